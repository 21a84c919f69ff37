use std::fmt;

use rand::Rng;

use crate::ecg::waveform::{
    BeatSegment, PathCommand, QrsShape, baseline_anchor, bell_complex, isoelectric, p_wave,
    pr_segment, qrs_complex, sawtooth, st_segment, t_wave,
};

/// Categoria clínica de uma condição
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Normal,
    Slow,
    Fast,
    Arrhythmia,
    Block,
    Infarct,
    Ectopic,
    Emergency,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Normal => "Normal",
            Category::Slow => "Slow",
            Category::Fast => "Fast",
            Category::Arrhythmia => "Arrhythmia",
            Category::Block => "Block",
            Category::Infarct => "Infarct",
            Category::Ectopic => "Ectopic",
            Category::Emergency => "Emergency",
        }
    }
}

/// Condições cardíacas conhecidas pelo motor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Condition {
    NormalSinus,
    SinusBradycardia,
    SinusTachycardia,
    AtrialFlutter,
    AtrialFibrillation,
    StElevation,
    PrematureVentricular,
    FirstDegreeBlock,
    VentricularTachycardia,
}

impl Condition {
    /// Todas as condições, na ordem de cadastro
    pub const ALL: [Condition; 9] = [
        Condition::NormalSinus,
        Condition::SinusBradycardia,
        Condition::SinusTachycardia,
        Condition::AtrialFlutter,
        Condition::AtrialFibrillation,
        Condition::StElevation,
        Condition::PrematureVentricular,
        Condition::FirstDegreeBlock,
        Condition::VentricularTachycardia,
    ];

    /// Chave estável usada pela camada de lições
    pub fn key(&self) -> &'static str {
        match self {
            Condition::NormalSinus => "NSR",
            Condition::SinusBradycardia => "SINUS_BRADY",
            Condition::SinusTachycardia => "SINUS_TACHY",
            Condition::AtrialFlutter => "AFLUTTER",
            Condition::AtrialFibrillation => "AFIB",
            Condition::StElevation => "STEMI",
            Condition::PrematureVentricular => "PVC",
            Condition::FirstDegreeBlock => "AVB_1",
            Condition::VentricularTachycardia => "VT",
        }
    }

    /// Nome exibido ao usuário
    pub fn name(&self) -> &'static str {
        match self {
            Condition::NormalSinus => "Normal Sinus Rhythm",
            Condition::SinusBradycardia => "Sinus Bradycardia",
            Condition::SinusTachycardia => "Sinus Tachycardia",
            Condition::AtrialFlutter => "Atrial Flutter",
            Condition::AtrialFibrillation => "Atrial Fibrillation",
            Condition::StElevation => "Anterior Wall STEMI",
            Condition::PrematureVentricular => "Premature Ventricular Contraction",
            Condition::FirstDegreeBlock => "First-Degree AV Block",
            Condition::VentricularTachycardia => "Ventricular Tachycardia",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Condition::NormalSinus => Category::Normal,
            Condition::SinusBradycardia => Category::Slow,
            Condition::SinusTachycardia => Category::Fast,
            Condition::AtrialFlutter | Condition::AtrialFibrillation => Category::Arrhythmia,
            Condition::StElevation => Category::Infarct,
            Condition::PrematureVentricular => Category::Ectopic,
            Condition::FirstDegreeBlock => Category::Block,
            Condition::VentricularTachycardia => Category::Emergency,
        }
    }

    /// Nível mínimo em que a condição aparece nas questões
    pub fn min_level(&self) -> u32 {
        match self {
            Condition::NormalSinus | Condition::SinusBradycardia | Condition::SinusTachycardia => 1,
            Condition::AtrialFlutter => 5,
            Condition::AtrialFibrillation => 8,
            Condition::PrematureVentricular => 10,
            Condition::StElevation => 12,
            Condition::FirstDegreeBlock => 15,
            Condition::VentricularTachycardia => 20,
        }
    }

    /// Procura a condição pela chave exata (sensível a maiúsculas); chaves
    /// desconhecidas viram ritmo sinusal normal
    pub fn from_key(key: &str) -> Condition {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.key() == key)
            .unwrap_or_else(|| {
                log::warn!("Condição desconhecida '{}', usando ritmo sinusal normal", key);
                Condition::NormalSinus
            })
    }

    /// Se a condição intercala batimentos ectópicos no ritmo de base
    pub fn has_ectopy(&self) -> bool {
        matches!(self, Condition::PrematureVentricular)
    }

    /// Desenha um batimento do ritmo de base a partir do cursor `x`
    pub fn beat<R: Rng + ?Sized>(&self, x: f64, baseline_y: f64, rng: &mut R) -> BeatSegment {
        match self {
            Condition::NormalSinus | Condition::PrematureVentricular => {
                normal_beat(x, 1.0, baseline_y, rng)
            }
            Condition::SinusBradycardia => normal_beat(x, 1.8, baseline_y, rng),
            Condition::SinusTachycardia => normal_beat(x, 0.6, baseline_y, rng),
            Condition::AtrialFlutter => flutter_beat(x),
            Condition::AtrialFibrillation => fibrillation_beat(x, baseline_y, rng),
            Condition::StElevation => st_elevation_beat(x, baseline_y),
            Condition::FirstDegreeBlock => first_degree_block_beat(x, baseline_y),
            Condition::VentricularTachycardia => bell_complex(x, 60.0, 90.0),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Batimento sinusal; `rr_mult` escala o repouso após a T (>1 mais lento)
pub fn normal_beat<R: Rng + ?Sized>(
    x: f64,
    rr_mult: f64,
    baseline_y: f64,
    rng: &mut R,
) -> BeatSegment {
    let rest = 40.0 * rr_mult * rng.gen_range(0.9..1.1);
    BeatSegment::at(x)
        .then(|x| baseline_anchor(x, 10.0, baseline_y))
        .then(|x| p_wave(x, 15.0, 8.0))
        .then(|x| pr_segment(x, 10.0))
        .then(|x| qrs_complex(x, QrsShape::default()))
        .then(|x| st_segment(x, 15.0, 0.0))
        .then(|x| t_wave(x, 25.0, 15.0))
        .then(|x| isoelectric(x, rest))
}

/// Três ondas F em dente de serra seguidas de um QRS normal
pub fn flutter_beat(x: f64) -> BeatSegment {
    BeatSegment::at(x)
        .then(|x| sawtooth(x, 3, 20.0, 15.0))
        .then(|x| qrs_complex(x, QrsShape::default()))
}

/// Linha de base tremida (ondas f), QRS estreito e T achatada
pub fn fibrillation_beat<R: Rng + ?Sized>(x: f64, baseline_y: f64, rng: &mut R) -> BeatSegment {
    let run: f64 = rng.gen_range(20.0..50.0);
    let steps = (run / 5.0).floor() as usize;

    let mut seg = BeatSegment::at(x);
    for _ in 0..steps {
        let dy = rng.gen_range(-3.0..3.0);
        seg = seg.push(PathCommand::Line { dx: 5.0, dy }, 5.0);
    }
    // volta ao zero antes do QRS
    let at = seg.end_x;
    seg.push(PathCommand::LineTo { x: at, y: baseline_y }, 0.0)
        .then(|x| {
            qrs_complex(
                x,
                QrsShape {
                    width: 15.0,
                    q_depth: 0.0,
                    r_height: 70.0,
                    s_depth: 5.0,
                },
            )
        })
        .then(|x| t_wave(x, 15.0, 3.0))
}

/// PR alargado com P e QRS normais
pub fn first_degree_block_beat(x: f64, baseline_y: f64) -> BeatSegment {
    BeatSegment::at(x)
        .then(|x| baseline_anchor(x, 10.0, baseline_y))
        .then(|x| p_wave(x, 15.0, 7.5))
        .then(|x| pr_segment(x, 35.0))
        .then(|x| {
            qrs_complex(
                x,
                QrsShape {
                    width: 20.0,
                    q_depth: 10.0,
                    r_height: 60.0,
                    s_depth: 10.0,
                },
            )
        })
        .then(|x| st_segment(x, 10.0, 0.0))
        .then(|x| t_wave(x, 30.0, 10.0))
        .then(|x| isoelectric(x, 40.0))
}

/// R reduzida, ponto J que não volta à base e ST convexo fundido com a T
pub fn st_elevation_beat(x: f64, baseline_y: f64) -> BeatSegment {
    BeatSegment::at(x)
        .then(|x| baseline_anchor(x, 10.0, baseline_y))
        .then(|x| p_wave(x, 15.0, 7.5))
        .then(|x| pr_segment(x, 10.0))
        .push(PathCommand::Line { dx: 5.0, dy: 10.0 }, 5.0)
        .push(PathCommand::Line { dx: 5.0, dy: -60.0 }, 5.0)
        // ponto J acima da linha de base
        .push(PathCommand::Line { dx: 5.0, dy: 40.0 }, 5.0)
        .push(
            PathCommand::Quadratic {
                c: (15.0, -15.0),
                dx: 30.0,
                dy: -5.0,
            },
            30.0,
        )
        .push(
            PathCommand::Quadratic {
                c: (10.0, 20.0),
                dx: 15.0,
                dy: 15.0,
            },
            15.0,
        )
        .then(|x| isoelectric(x, 40.0))
}

/// Complexo ectópico largo e bizarro, T invertida e pausa compensatória
pub fn ectopic_beat(x: f64) -> BeatSegment {
    BeatSegment::at(x)
        .push(PathCommand::Line { dx: 10.0, dy: 10.0 }, 10.0)
        .push(PathCommand::Line { dx: 15.0, dy: -100.0 }, 15.0)
        .push(PathCommand::Line { dx: 15.0, dy: 110.0 }, 15.0)
        .push(PathCommand::Line { dx: 10.0, dy: -20.0 }, 10.0)
        .then(|x| t_wave(x, 30.0, -40.0 / 3.0))
        .then(|x| isoelectric(x, 60.0))
}
