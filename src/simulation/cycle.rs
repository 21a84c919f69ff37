//! Máquina de estados do ciclo cardíaco em tempo real.
//!
//! A cada tick o host informa o delta de tempo e os parâmetros atuais; o
//! simulador avança pelas fases `P -> PR -> QRS -> ST -> T -> Isoelétrica -> P`
//! e emite exatamente uma amostra de voltagem, guardada no [`SampleBuffer`].

use std::f64::consts::PI;
use std::fmt;

use rand::Rng;
use rand::rngs::ThreadRng;

use crate::config::EngineConfig;
use crate::simulation::buffer::SampleBuffer;
use crate::simulation::params::PhysiologicalParameters;

pub const P_DURATION_MS: f64 = 100.0;
pub const ST_DURATION_MS: f64 = 100.0;
pub const T_DURATION_MS: f64 = 180.0;

const P_AMPLITUDE: f64 = 10.0;
const T_AMPLITUDE: f64 = 15.0;

/// Fase do batimento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    P,
    PrSegment,
    Qrs,
    St,
    T,
    Isoelectric,
}

impl Phase {
    pub const COUNT: usize = 6;

    /// Fase seguinte; a isoelétrica sempre fecha o ciclo em P
    pub fn next(&self) -> Phase {
        match self {
            Phase::P => Phase::PrSegment,
            Phase::PrSegment => Phase::Qrs,
            Phase::Qrs => Phase::St,
            Phase::St => Phase::T,
            Phase::T => Phase::Isoelectric,
            Phase::Isoelectric => Phase::P,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::P => "P",
            Phase::PrSegment => "PR",
            Phase::Qrs => "QRS",
            Phase::St => "ST",
            Phase::T => "T",
            Phase::Isoelectric => "ISO",
        }
    }

    /// Estrutura anatômica a destacar durante a fase
    pub fn structure(&self) -> Option<&'static str> {
        match self {
            Phase::P => Some("Atria"),
            Phase::PrSegment => Some("AV Node"),
            Phase::Qrs => Some("Ventricles"),
            Phase::St => Some("Ventricular Plateau"),
            Phase::T => Some("Ventricular Repolarization"),
            Phase::Isoelectric => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Duração de cada fase (ms) para um conjunto de parâmetros
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseDurations {
    pub p: f64,
    pub pr_segment: f64,
    pub qrs: f64,
    pub st: f64,
    pub t: f64,
    pub isoelectric: f64,
}

impl PhaseDurations {
    /// Calcula as durações. Se P..T não couberem no período do batimento, são
    /// comprimidas proporcionalmente e a isoelétrica fica em zero.
    pub fn from_params(params: &PhysiologicalParameters) -> Self {
        let period = params.beat_period_ms();
        let mut active = [
            P_DURATION_MS,
            (params.pr_interval - P_DURATION_MS).max(0.0),
            params.qrs_width.max(0.0),
            ST_DURATION_MS,
            T_DURATION_MS,
        ];
        let sum: f64 = active.iter().sum();
        if sum > period {
            let scale = period / sum;
            active.iter_mut().for_each(|d| *d *= scale);
        }
        let [p, pr_segment, qrs, st, t] = active;
        Self {
            p,
            pr_segment,
            qrs,
            st,
            t,
            isoelectric: (period - (p + pr_segment + qrs + st + t)).max(0.0),
        }
    }

    pub fn of(&self, phase: Phase) -> f64 {
        match phase {
            Phase::P => self.p,
            Phase::PrSegment => self.pr_segment,
            Phase::Qrs => self.qrs,
            Phase::St => self.st,
            Phase::T => self.t,
            Phase::Isoelectric => self.isoelectric,
        }
    }

    pub fn total(&self) -> f64 {
        self.p + self.pr_segment + self.qrs + self.st + self.t + self.isoelectric
    }
}

/// Estado mutável do ciclo
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CycleState {
    pub phase: Phase,
    /// Tempo decorrido dentro da fase atual (ms)
    pub elapsed_ms: f64,
    /// Última amostra emitida
    pub last_sample: f64,
}

/// Amostra emitida por um tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Voltagem em unidades de tela, positiva para cima
    pub voltage: f64,
    pub phase: Phase,
}

/// Simulador do ciclo cardíaco dirigido por ticks
pub struct CardiacCycleSimulator<R: Rng = ThreadRng> {
    state: CycleState,
    buffer: SampleBuffer,
    rng: R,
    noise_scale: f64,
    st_scale: f64,
    completed_beats: u64,
}

impl CardiacCycleSimulator<ThreadRng> {
    /// Simulador com entropia do sistema
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> CardiacCycleSimulator<R> {
    /// Simulador com uma fonte aleatória injetada
    pub fn with_rng(config: &EngineConfig, rng: R) -> Self {
        Self {
            state: CycleState::default(),
            buffer: SampleBuffer::filled(config.sample_buffer_capacity, 0.0),
            rng,
            noise_scale: config.noise_scale,
            st_scale: config.st_scale,
            completed_beats: 0,
        }
    }

    /// Avança o ciclo em `delta_ms` e emite uma amostra.
    ///
    /// Um delta nulo (ou inválido) não avança a fase nem o tempo e repete a
    /// última amostra.
    pub fn tick(&mut self, delta_ms: f64, params: &PhysiologicalParameters) -> Sample {
        if delta_ms.is_nan() || delta_ms <= 0.0 {
            let sample = Sample {
                voltage: self.state.last_sample,
                phase: self.state.phase,
            };
            self.buffer.push(sample.voltage);
            return sample;
        }

        let durations = PhaseDurations::from_params(params);
        self.state.elapsed_ms += delta_ms;
        self.advance_phases(&durations);

        let duration = durations.of(self.state.phase);
        let progress = if duration > 0.0 {
            (self.state.elapsed_ms / duration).min(1.0)
        } else {
            0.0
        };
        let mut voltage = self.synthesize(progress, params);

        if params.noise_level > 0.0 {
            voltage += self.rng.gen_range(-0.5..0.5) * params.noise_level * self.noise_scale;
        }

        self.state.last_sample = voltage;
        self.buffer.push(voltage);

        Sample {
            voltage,
            phase: self.state.phase,
        }
    }

    /// Troca de fase enquanto o tempo decorrido alcança a duração da fase atual.
    /// Se uma mudança de parâmetros encurtar a fase abaixo do tempo já
    /// decorrido, a transição é imediata.
    ///
    /// O excedente do tick é descartado na troca: cada fase dura um número
    /// inteiro de ticks, então com deltas que não dividem as durações o
    /// batimento fica um pouco mais longo que `60000 / bpm`.
    fn advance_phases(&mut self, durations: &PhaseDurations) {
        let mut hops = 0;
        while self.state.elapsed_ms >= durations.of(self.state.phase) && hops < Phase::COUNT {
            let from = self.state.phase;
            self.state.phase = from.next();
            self.state.elapsed_ms = 0.0;
            if from == Phase::Isoelectric {
                self.completed_beats += 1;
            }
            log::trace!("Fase {} -> {}", from, self.state.phase);
            hops += 1;
        }
    }

    fn synthesize(&self, progress: f64, params: &PhysiologicalParameters) -> f64 {
        let st_offset = params.st_deviation * self.st_scale;
        match self.state.phase {
            Phase::P => (progress * PI).sin() * P_AMPLITUDE,
            Phase::PrSegment | Phase::Isoelectric => 0.0,
            Phase::Qrs => qrs_level(progress),
            Phase::St => st_offset,
            Phase::T => st_offset + (progress * PI).sin() * T_AMPLITUDE,
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn state(&self) -> &CycleState {
        &self.state
    }

    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    /// Ciclos completos desde a criação
    pub fn completed_beats(&self) -> u64 {
        self.completed_beats
    }
}

/// Excursão do QRS em degraus: Q, subida, pico R, S profunda, retorno
fn qrs_level(progress: f64) -> f64 {
    if progress < 0.1 {
        -5.0
    } else if progress < 0.3 {
        30.0
    } else if progress < 0.5 {
        60.0
    } else if progress < 0.8 {
        -15.0
    } else {
        0.0
    }
}
