//! Home battery-storage sizing via greedy-dispatch sweeps.

pub mod config;
/// CSV profile loading and results export.
pub mod io;
pub mod series;
/// Dispatch simulator, metrics, and sweep orchestration.
pub mod sim;
