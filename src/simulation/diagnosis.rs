//! Laudo textual a partir dos parâmetros fisiológicos.
//!
//! Três grupos de regras independentes (ritmo, condução, isquemia); todos os
//! achados são concatenados nessa ordem.

use std::fmt;

use crate::simulation::params::PhysiologicalParameters;

/// Ruído acima deste nível mascara o ritmo
pub const ARTIFACT_NOISE_THRESHOLD: f64 = 5.0;
pub const BRADYCARDIA_BELOW_BPM: f64 = 60.0;
pub const TACHYCARDIA_ABOVE_BPM: f64 = 100.0;
pub const PROLONGED_PR_MS: f64 = 200.0;
pub const WIDE_QRS_MS: f64 = 120.0;
pub const ST_THRESHOLD_MM: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rhythm {
    FibrillationOrArtifact,
    SinusBradycardia,
    SinusTachycardia,
    SinusRhythm,
}

impl Rhythm {
    pub fn label(&self) -> &'static str {
        match self {
            Rhythm::FibrillationOrArtifact => "Fibrillation/Artifact",
            Rhythm::SinusBradycardia => "Sinus Bradycardia",
            Rhythm::SinusTachycardia => "Sinus Tachycardia",
            Rhythm::SinusRhythm => "Sinus Rhythm",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conduction {
    FirstDegreeBlock,
    BundleBranchBlock,
}

impl Conduction {
    pub fn label(&self) -> &'static str {
        match self {
            Conduction::FirstDegreeBlock => "First-Degree AV Block",
            Conduction::BundleBranchBlock => "Bundle Branch Block (Wide QRS)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ischemia {
    SubendocardialIschemia,
    StElevationInfarct,
}

impl Ischemia {
    pub fn label(&self) -> &'static str {
        match self {
            Ischemia::SubendocardialIschemia => "Subendocardial Ischemia (ST Depression)",
            Ischemia::StElevationInfarct => "ST-Elevation MI",
        }
    }
}

/// Resultado da avaliação das regras
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnosis {
    pub rhythm: Rhythm,
    pub conduction: Vec<Conduction>,
    pub ischemia: Option<Ischemia>,
}

impl Diagnosis {
    /// Rótulos na ordem ritmo, condução, isquemia
    pub fn labels(&self) -> Vec<&'static str> {
        std::iter::once(self.rhythm.label())
            .chain(self.conduction.iter().map(Conduction::label))
            .chain(self.ischemia.iter().map(Ischemia::label))
            .collect()
    }

    /// Apenas ritmo sinusal, sem achados adicionais
    pub fn is_normal(&self) -> bool {
        self.rhythm == Rhythm::SinusRhythm && self.conduction.is_empty() && self.ischemia.is_none()
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.labels().join(" + "))
    }
}

/// Avalia as regras de ritmo, condução e isquemia
pub fn diagnose(params: &PhysiologicalParameters) -> Diagnosis {
    let rhythm = if params.noise_level > ARTIFACT_NOISE_THRESHOLD {
        Rhythm::FibrillationOrArtifact
    } else if params.heart_rate < BRADYCARDIA_BELOW_BPM {
        Rhythm::SinusBradycardia
    } else if params.heart_rate > TACHYCARDIA_ABOVE_BPM {
        Rhythm::SinusTachycardia
    } else {
        Rhythm::SinusRhythm
    };

    let mut conduction = Vec::new();
    if params.pr_interval > PROLONGED_PR_MS {
        conduction.push(Conduction::FirstDegreeBlock);
    }
    if params.qrs_width > WIDE_QRS_MS {
        conduction.push(Conduction::BundleBranchBlock);
    }

    let ischemia = if params.st_deviation < -ST_THRESHOLD_MM {
        Some(Ischemia::SubendocardialIschemia)
    } else if params.st_deviation > ST_THRESHOLD_MM {
        Some(Ischemia::StElevationInfarct)
    } else {
        None
    };

    Diagnosis {
        rhythm,
        conduction,
        ischemia,
    }
}

/// Laudo composto como texto
pub fn diagnosis_label(params: &PhysiologicalParameters) -> String {
    diagnose(params).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(rate: f64, pr: f64, qrs: f64, st: f64, noise: f64) -> PhysiologicalParameters {
        PhysiologicalParameters {
            heart_rate: rate,
            pr_interval: pr,
            qrs_width: qrs,
            st_deviation: st,
            noise_level: noise,
        }
    }

    #[test]
    fn bradycardia() {
        assert_eq!(diagnosis_label(&params(45.0, 160.0, 80.0, 0.0, 0.0)), "Sinus Bradycardia");
    }

    #[test]
    fn all_three_groups_concatenate_in_order() {
        assert_eq!(
            diagnosis_label(&params(75.0, 230.0, 80.0, 2.0, 0.0)),
            "Sinus Rhythm + First-Degree AV Block + ST-Elevation MI"
        );
    }

    #[test]
    fn noise_short_circuits_rate_rules() {
        for rate in [40.0, 75.0, 150.0] {
            let d = diagnose(&params(rate, 160.0, 80.0, 0.0, 8.0));
            assert_eq!(d.rhythm, Rhythm::FibrillationOrArtifact);
        }
        assert_eq!(
            diagnosis_label(&params(75.0, 160.0, 80.0, 0.0, 8.0)),
            "Fibrillation/Artifact"
        );
    }

    #[test]
    fn noise_at_threshold_keeps_rate_rules() {
        let d = diagnose(&params(130.0, 160.0, 80.0, 0.0, 5.0));
        assert_eq!(d.rhythm, Rhythm::SinusTachycardia);
    }

    #[test]
    fn conduction_findings_are_additive() {
        let d = diagnose(&params(120.0, 250.0, 140.0, -2.0, 0.0));
        assert_eq!(
            d.to_string(),
            "Sinus Tachycardia + First-Degree AV Block + Bundle Branch Block (Wide QRS) + Subendocardial Ischemia (ST Depression)"
        );
    }

    #[test]
    fn boundaries_are_exclusive() {
        let d = diagnose(&params(60.0, 200.0, 120.0, 1.0, 0.0));
        assert!(d.is_normal());
        let d = diagnose(&params(100.0, 160.0, 80.0, -1.0, 0.0));
        assert!(d.is_normal());
    }
}
