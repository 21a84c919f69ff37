//! Motor de síntese de sinais de ECG.
//!
//! Gera traçados vetoriais para as questões do quiz, laudos a partir de
//! parâmetros fisiológicos e um ciclo cardíaco em tempo real para o simulador.

pub mod config;
pub mod ecg;
pub mod quiz;
pub mod simulation;
pub mod tasks;
pub mod utils;

pub use config::EngineConfig;
pub use ecg::{Condition, Trace, generate_trace, generate_trace_for_key};
pub use quiz::{Lesson, Question, QuestionKind, generate_question, generate_unit};
pub use simulation::{
    CardiacCycleSimulator, Phase, PhysiologicalParameters, Sample, SampleBuffer, diagnose,
    diagnosis_label,
};
