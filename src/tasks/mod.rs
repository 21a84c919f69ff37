pub mod alarm;
pub mod monitor;
pub mod recorder;

pub use alarm::DiagnosisAlarm;
pub use monitor::{MonitorMessage, MonitorReport, MonitorTask};
pub use recorder::{RecorderTask, SampleRecord};
