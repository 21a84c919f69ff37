use crate::simulation::diagnosis::{Diagnosis, diagnose};
use crate::simulation::params::PhysiologicalParameters;

/// Alarme de laudo: reavalia o diagnóstico quando os parâmetros mudam
#[derive(Debug, Default)]
pub struct DiagnosisAlarm {
    /// Contador de alarmes disparados
    pub alarm_count: u32,
    /// Último laudo avaliado
    last_label: Option<String>,
}

impl DiagnosisAlarm {
    /// Cria um novo alarme
    pub fn new() -> Self {
        Self::default()
    }

    /// Avalia os parâmetros; devolve o diagnóstico se um novo alarme disparou.
    /// Um laudo igual ao anterior não dispara de novo.
    pub fn evaluate(&mut self, params: &PhysiologicalParameters) -> Option<Diagnosis> {
        let diagnosis = diagnose(params);
        let label = diagnosis.to_string();

        if self.last_label.as_deref() == Some(label.as_str()) {
            return None;
        }
        self.last_label = Some(label.clone());

        if diagnosis.is_normal() {
            log::info!("Laudo: {}", label);
            return None;
        }

        self.alarm_count += 1;
        log::error!(
            "⚠️ ALARME! {} ({} bpm) às {}",
            label,
            params.heart_rate,
            chrono::Local::now().format("%H:%M:%S")
        );
        log::warn!("Notificando a equipe. Alarme #{}", self.alarm_count);
        Some(diagnosis)
    }

    pub fn last_label(&self) -> Option<&str> {
        self.last_label.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_rhythm_does_not_alarm() {
        let mut alarm = DiagnosisAlarm::new();
        assert!(alarm.evaluate(&PhysiologicalParameters::default()).is_none());
        assert_eq!(alarm.alarm_count, 0);
        assert_eq!(alarm.last_label(), Some("Sinus Rhythm"));
    }

    #[test]
    fn repeated_label_alarms_once() {
        let mut alarm = DiagnosisAlarm::new();
        let brady = PhysiologicalParameters {
            heart_rate: 40.0,
            ..Default::default()
        };
        assert!(alarm.evaluate(&brady).is_some());
        assert!(alarm.evaluate(&brady).is_none());
        assert_eq!(alarm.alarm_count, 1);

        alarm.evaluate(&PhysiologicalParameters::default());
        assert!(alarm.evaluate(&brady).is_some());
        assert_eq!(alarm.alarm_count, 2);
    }
}
