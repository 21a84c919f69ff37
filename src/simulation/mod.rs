pub mod artifacts;
pub mod buffer;
pub mod cycle;
pub mod diagnosis;
pub mod params;

pub use artifacts::{Artifact, ArtifactKind, ArtifactSimulator};
pub use buffer::SampleBuffer;
pub use cycle::{CardiacCycleSimulator, CycleState, Phase, PhaseDurations, Sample};
pub use diagnosis::{Diagnosis, diagnose, diagnosis_label};
pub use params::PhysiologicalParameters;
