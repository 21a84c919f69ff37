pub mod plot;
pub mod timing;

pub use timing::FrameClock;
