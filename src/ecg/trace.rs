use std::fmt;

use rand::Rng;

use crate::config::EngineConfig;
use crate::ecg::catalog::{Condition, ectopic_beat};
use crate::ecg::waveform::PathCommand;

/// Traçado contínuo que cobre o viewport inteiro
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub condition: Condition,
    pub commands: Vec<PathCommand>,
    /// Cursor final (pode ultrapassar o viewport; o renderizador recorta)
    pub end_x: f64,
    /// Quantidade de batimentos desenhados
    pub beats: usize,
    /// Quantos desses batimentos foram ectópicos
    pub ectopic_beats: usize,
}

impl Trace {
    /// String do path SVG (atributo `d`)
    pub fn path_data(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", command)?;
        }
        Ok(())
    }
}

/// Repete o gerador de batimentos da condição até cobrir o viewport + margem.
///
/// Para extrassístoles cada iteração sorteia, com `config.pvc_chance`, se o
/// próximo batimento é ectópico ou do ritmo de base.
pub fn generate_trace<R: Rng + ?Sized>(
    condition: Condition,
    config: &EngineConfig,
    rng: &mut R,
) -> Trace {
    let mut commands = vec![PathCommand::MoveTo {
        x: 0.0,
        y: config.baseline_y,
    }];
    let mut cursor = 0.0;
    let mut beats = 0;
    let mut ectopic_beats = 0;
    let limit = config.coverage_limit();

    while cursor < limit {
        let ectopic = condition.has_ectopy() && rng.gen_bool(config.pvc_chance.clamp(0.0, 1.0));
        let segment = if ectopic {
            ectopic_beats += 1;
            ectopic_beat(cursor)
        } else {
            condition.beat(cursor, config.baseline_y, rng)
        };
        commands.extend(segment.commands);
        cursor = segment.end_x;
        beats += 1;
    }

    log::debug!(
        "Traçado {} gerado: {} batimentos ({} ectópicos), x final {:.1}",
        condition.key(),
        beats,
        ectopic_beats,
        cursor
    );

    Trace {
        condition,
        commands,
        end_x: cursor,
        beats,
        ectopic_beats,
    }
}

/// Gera o path SVG de uma condição pela chave, com entropia do sistema
pub fn generate_trace_for_key(key: &str) -> String {
    let config = EngineConfig::default();
    generate_trace(Condition::from_key(key), &config, &mut rand::thread_rng()).path_data()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn covers_viewport_for_every_condition() {
        let config = EngineConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        for condition in Condition::ALL {
            let trace = generate_trace(condition, &config, &mut rng);
            assert!(trace.end_x >= config.viewport_width + config.coverage_margin);
            assert!(trace.beats > 1);
        }
    }

    #[test]
    fn path_starts_at_the_baseline() {
        let config = EngineConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let path = generate_trace(Condition::VentricularTachycardia, &config, &mut rng).path_data();
        assert!(path.starts_with("M 0,100 q 15,-90 30,0"));
    }

    #[test]
    fn only_pvc_interleaves_ectopic_beats() {
        let config = EngineConfig {
            pvc_chance: 1.0,
            ..EngineConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let pvc = generate_trace(Condition::PrematureVentricular, &config, &mut rng);
        assert_eq!(pvc.ectopic_beats, pvc.beats);

        let nsr = generate_trace(Condition::NormalSinus, &config, &mut rng);
        assert_eq!(nsr.ectopic_beats, 0);
    }

    #[test]
    fn zero_chance_keeps_the_base_rhythm() {
        let config = EngineConfig {
            pvc_chance: 0.0,
            ..EngineConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let pvc = generate_trace(Condition::PrematureVentricular, &config, &mut rng);
        assert_eq!(pvc.ectopic_beats, 0);
    }

    #[test]
    fn unknown_key_draws_normal_rhythm() {
        let path = generate_trace_for_key("DOES_NOT_EXIST");
        assert!(path.starts_with("M 0,100 L 10,100"));
    }

    #[test]
    fn narrower_viewport_needs_fewer_beats() {
        let mut rng = StdRng::seed_from_u64(9);
        let wide = generate_trace(Condition::VentricularTachycardia, &EngineConfig::default(), &mut rng);
        let narrow_config = EngineConfig {
            viewport_width: 200.0,
            ..EngineConfig::default()
        };
        let narrow = generate_trace(Condition::VentricularTachycardia, &narrow_config, &mut rng);
        assert!(narrow.beats < wide.beats);
        assert!(narrow.end_x >= 250.0);
    }
}
