//! Geração de questões a partir do catálogo de condições.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::ecg::catalog::Condition;
use crate::ecg::trace::generate_trace;
use crate::quiz::content::{explanation, hint, random_patient};

/// Quantidade de distratores por questão
pub const DISTRACTOR_COUNT: usize = 3;
/// Alvo sorteado entre as N condições de nível mais alto disponíveis
pub const TARGET_POOL: usize = 3;

/// Tipo de questão
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuestionKind {
    /// "Qual o laudo deste traçado?" (opções textuais)
    #[serde(rename = "MULTIPLE_CHOICE")]
    LabelTrace,
    /// "Qual destes traçados é X?" (opções são traçados)
    #[serde(rename = "VISUAL_CHOICE")]
    PickTrace,
}

/// Questão pronta para a camada de lições
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub prompt: String,
    /// Traçado principal (vazio nas questões de escolher traçado)
    pub ecg_path_data: String,
    /// Opções textuais (questões de laudo)
    pub options: Vec<String>,
    /// Opções em path SVG (questões de escolher traçado)
    pub visual_options: Vec<String>,
    pub correct_answer: String,
    pub correct_index: usize,
    pub explanation: String,
    pub hint: String,
    pub difficulty: u32,
    #[serde(skip)]
    pub target: Condition,
    #[serde(skip)]
    pub distractors: Vec<Condition>,
}

impl Question {
    /// Opções exibidas, de acordo com o tipo
    pub fn choices(&self) -> &[String] {
        match self.kind {
            QuestionKind::LabelTrace => &self.options,
            QuestionKind::PickTrace => &self.visual_options,
        }
    }

    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }
}

/// Condições liberadas no nível; nunca vazio (cai no ritmo sinusal normal)
pub fn available_conditions(level: u32) -> Vec<Condition> {
    let mut available: Vec<Condition> = Condition::ALL
        .iter()
        .copied()
        .filter(|c| c.min_level() <= level)
        .collect();
    if available.is_empty() {
        available.push(Condition::NormalSinus);
    }
    available
}

/// Sorteia o alvo entre as condições mais recentes do nível
pub fn select_target<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Condition {
    let mut candidates = available_conditions(level);
    candidates.sort_by(|a, b| b.min_level().cmp(&a.min_level()));
    let pool = candidates.len().min(TARGET_POOL);
    candidates[rng.gen_range(0..pool)]
}

/// Três outras condições, em ordem aleatória
pub fn select_distractors<R: Rng + ?Sized>(target: Condition, rng: &mut R) -> Vec<Condition> {
    let mut others: Vec<Condition> = Condition::ALL
        .iter()
        .copied()
        .filter(|c| *c != target)
        .collect();
    others.shuffle(rng);
    others.truncate(DISTRACTOR_COUNT);
    others
}

/// Monta uma questão para o nível com uma fonte aleatória injetada
pub fn generate_question_with<R: Rng + ?Sized>(
    level: u32,
    config: &EngineConfig,
    rng: &mut R,
) -> Question {
    let target = select_target(level, rng);
    let distractors = select_distractors(target, rng);
    let patient = random_patient(rng);
    let pick_trace = rng.gen_bool(config.pick_trace_chance.clamp(0.0, 1.0));
    let id = format!(
        "q-{}-{}",
        chrono::Utc::now().timestamp_millis(),
        rng.gen_range(0..1_000_000u32)
    );

    log::debug!(
        "Questão nível {}: alvo {} ({}), distratores {:?}",
        level,
        target.key(),
        if pick_trace { "traçados" } else { "laudo" },
        distractors.iter().map(Condition::key).collect::<Vec<_>>()
    );

    if pick_trace {
        let mut traces: Vec<(String, bool)> = std::iter::once(target)
            .chain(distractors.iter().copied())
            .map(|c| (generate_trace(c, config, rng).path_data(), c == target))
            .collect();
        traces.shuffle(rng);
        let correct_index = traces.iter().position(|(_, ok)| *ok).unwrap_or(0);
        let visual_options: Vec<String> = traces.into_iter().map(|(path, _)| path).collect();

        Question {
            id,
            kind: QuestionKind::PickTrace,
            prompt: format!(
                "Patient: {}. Monitor the ECG.\nWhich tracing shows: {}?",
                patient,
                target.name()
            ),
            ecg_path_data: String::new(),
            options: Vec::new(),
            correct_answer: visual_options[correct_index].clone(),
            visual_options,
            correct_index,
            explanation: format!(
                "The observed pattern is characteristic of {}.",
                target.name()
            ),
            hint: hint(target).to_string(),
            difficulty: level,
            target,
            distractors,
        }
    } else {
        let ecg_path_data = generate_trace(target, config, rng).path_data();
        let mut options: Vec<String> = std::iter::once(target)
            .chain(distractors.iter().copied())
            .map(|c| c.name().to_string())
            .collect();
        options.shuffle(rng);
        let correct_index = options
            .iter()
            .position(|name| name == target.name())
            .unwrap_or(0);

        Question {
            id,
            kind: QuestionKind::LabelTrace,
            prompt: format!(
                "{}. Complains of malaise.\nAnalyze the tracing above. What is the diagnosis?",
                patient
            ),
            ecg_path_data,
            options,
            visual_options: Vec::new(),
            correct_answer: target.name().to_string(),
            correct_index,
            explanation: explanation(target).to_string(),
            hint: hint(target).to_string(),
            difficulty: level,
            target,
            distractors,
        }
    }
}

/// Monta uma questão com a configuração padrão e entropia do sistema
pub fn generate_question(level: u32) -> Question {
    generate_question_with(level, &EngineConfig::default(), &mut rand::thread_rng())
}
