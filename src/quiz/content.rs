use rand::Rng;
use rand::seq::SliceRandom;

use crate::ecg::catalog::Condition;

/// Perfis de paciente usados nos enunciados
pub const PATIENT_PROFILES: [&str; 6] = [
    "Male, 24, athlete",
    "Female, 67, hypertensive",
    "Male, 55, smoker",
    "Female, 32, pregnant",
    "Elderly, 82, syncope",
    "Young adult, 19, anxiety",
];

const GENERIC_HINT: &str = "Analyze the morphology of the P wave and the QRS complex.";
const GENERIC_EXPLANATION: &str = "Clinical pattern consistent with the diagnosis.";

/// Dica contextual da condição
pub fn hint(condition: Condition) -> &'static str {
    match condition {
        Condition::NormalSinus => "Check whether the rate is between 60 and 100 bpm.",
        Condition::SinusBradycardia => "Count the large boxes between R waves. Are there many?",
        Condition::SinusTachycardia => "The heart is beating very fast (>100 bpm).",
        Condition::AtrialFlutter => "Look at the baseline. Does it look like a saw?",
        Condition::AtrialFibrillation => "Is the rhythm regular? Look for P waves before each QRS.",
        Condition::StElevation => "Focus on the ST segment right after the QRS.",
        Condition::FirstDegreeBlock => "Measure the PR interval (from the start of P to the QRS).",
        Condition::VentricularTachycardia => "Do the QRS complexes look wide and very fast?",
        _ => GENERIC_HINT,
    }
}

/// Explicação exibida após a resposta
pub fn explanation(condition: Condition) -> &'static str {
    match condition {
        Condition::NormalSinus => "Regular rhythm, a P wave before every QRS, normal rate.",
        Condition::SinusBradycardia => "Normal sinus rhythm, but with a heart rate below 60 bpm.",
        Condition::SinusTachycardia => "Normal sinus rhythm, with a rate above 100 bpm.",
        Condition::AtrialFlutter => "Sawtooth F waves on the baseline, typical of flutter.",
        Condition::AtrialFibrillation => {
            "Irregularly irregular rhythm and no organized P waves."
        }
        Condition::StElevation => "ST segment elevation indicating acute injury.",
        Condition::FirstDegreeBlock => "Fixed prolonged PR interval (> 200ms), no dropped QRS.",
        Condition::VentricularTachycardia => {
            "Wide and bizarre QRS complexes, tachycardia, no visible P waves."
        }
        _ => GENERIC_EXPLANATION,
    }
}

/// Sorteia um perfil de paciente
pub fn random_patient<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    PATIENT_PROFILES.choose(rng).copied().unwrap_or(PATIENT_PROFILES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conditions_without_bespoke_text_use_the_generic_strings() {
        assert_eq!(hint(Condition::PrematureVentricular), GENERIC_HINT);
        assert_eq!(explanation(Condition::PrematureVentricular), GENERIC_EXPLANATION);
        assert_ne!(hint(Condition::AtrialFlutter), GENERIC_HINT);
    }
}
