use rand::Rng;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::quiz::question::{Question, generate_question_with};

pub const QUESTIONS_PER_LESSON: usize = 3;
/// Níveis reservados para cada unidade
pub const LEVELS_PER_UNIT: u32 = 10;

/// Lição gerada proceduralmente
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
}

/// Nível de dificuldade da lição `lesson` (1-based) dentro da unidade
pub fn lesson_level(unit_number: u32, lesson: u32) -> u32 {
    unit_number.saturating_sub(1) * LEVELS_PER_UNIT + lesson
}

/// Gera as lições de uma unidade, três questões por lição
pub fn generate_unit_with<R: Rng + ?Sized>(
    unit_number: u32,
    lesson_count: u32,
    config: &EngineConfig,
    rng: &mut R,
) -> Vec<Lesson> {
    (1..=lesson_count)
        .map(|i| {
            let level = lesson_level(unit_number, i);
            let questions = (0..QUESTIONS_PER_LESSON)
                .map(|_| generate_question_with(level, config, rng))
                .collect();
            Lesson {
                id: format!("u{}-l{}", unit_number, i),
                title: format!("Clinical Case {}", level),
                description: "Rhythm Identification".to_string(),
                questions,
            }
        })
        .collect()
}

pub fn generate_unit(unit_number: u32, lesson_count: u32) -> Vec<Lesson> {
    let lessons = generate_unit_with(
        unit_number,
        lesson_count,
        &EngineConfig::default(),
        &mut rand::thread_rng(),
    );
    log::info!(
        "Unidade {} gerada com {} lições",
        unit_number,
        lessons.len()
    );
    lessons
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn lessons_step_through_levels() {
        let mut rng = StdRng::seed_from_u64(99);
        let lessons = generate_unit_with(2, 4, &EngineConfig::default(), &mut rng);
        assert_eq!(lessons.len(), 4);
        assert_eq!(lessons[0].id, "u2-l1");
        assert_eq!(lessons[3].title, "Clinical Case 14");
        for (i, lesson) in lessons.iter().enumerate() {
            assert_eq!(lesson.questions.len(), QUESTIONS_PER_LESSON);
            for q in &lesson.questions {
                assert_eq!(q.difficulty, 11 + i as u32);
                assert!(q.target.min_level() <= q.difficulty);
            }
        }
    }

    #[test]
    fn unit_zero_does_not_underflow() {
        assert_eq!(lesson_level(0, 3), 3);
    }
}
