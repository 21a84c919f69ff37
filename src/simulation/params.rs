/// Parâmetros fisiológicos ajustados pelo host do simulador
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysiologicalParameters {
    /// Frequência cardíaca (bpm)
    pub heart_rate: f64,
    /// Intervalo PR (ms), medido do início da P
    pub pr_interval: f64,
    /// Largura do QRS (ms)
    pub qrs_width: f64,
    /// Desvio do segmento ST (mm, positivo = supra)
    pub st_deviation: f64,
    /// Nível de interferência (0-10)
    pub noise_level: f64,
}

impl Default for PhysiologicalParameters {
    fn default() -> Self {
        Self {
            heart_rate: 60.0,
            pr_interval: 160.0,
            qrs_width: 80.0,
            st_deviation: 0.0,
            noise_level: 0.0,
        }
    }
}

impl PhysiologicalParameters {
    pub const HEART_RATE_RANGE: (f64, f64) = (30.0, 200.0);
    pub const PR_RANGE: (f64, f64) = (120.0, 400.0);
    pub const QRS_RANGE: (f64, f64) = (60.0, 160.0);
    pub const ST_RANGE: (f64, f64) = (-5.0, 5.0);
    pub const NOISE_RANGE: (f64, f64) = (0.0, 10.0);

    /// Restringe cada parâmetro à faixa documentada
    pub fn clamped(&self) -> Self {
        fn clamp(value: f64, (lo, hi): (f64, f64)) -> f64 {
            if value.is_nan() { lo } else { value.clamp(lo, hi) }
        }
        Self {
            heart_rate: clamp(self.heart_rate, Self::HEART_RATE_RANGE),
            pr_interval: clamp(self.pr_interval, Self::PR_RANGE),
            qrs_width: clamp(self.qrs_width, Self::QRS_RANGE),
            st_deviation: clamp(self.st_deviation, Self::ST_RANGE),
            noise_level: clamp(self.noise_level, Self::NOISE_RANGE),
        }
    }

    /// Duração de um batimento completo (ms)
    pub fn beat_period_ms(&self) -> f64 {
        60_000.0 / self.heart_rate.max(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_beat_period_is_one_second() {
        assert_eq!(PhysiologicalParameters::default().beat_period_ms(), 1000.0);
    }

    #[test]
    fn clamping_keeps_values_in_range() {
        let wild = PhysiologicalParameters {
            heart_rate: -20.0,
            pr_interval: 900.0,
            qrs_width: f64::NAN,
            st_deviation: 12.0,
            noise_level: -1.0,
        };
        let safe = wild.clamped();
        assert_eq!(safe.heart_rate, 30.0);
        assert_eq!(safe.pr_interval, 400.0);
        assert_eq!(safe.qrs_width, 60.0);
        assert_eq!(safe.st_deviation, 5.0);
        assert_eq!(safe.noise_level, 0.0);
    }

    #[test]
    fn non_positive_rate_does_not_divide_by_zero() {
        let params = PhysiologicalParameters {
            heart_rate: 0.0,
            ..Default::default()
        };
        assert!(params.beat_period_ms().is_finite());
    }
}
