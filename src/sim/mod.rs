/// Greedy battery dispatch state machine.
pub mod dispatch;
pub mod kpi;
/// Cartesian configuration sweep over battery sizings.
pub mod sweep;
pub mod types;
