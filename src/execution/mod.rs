// Signal execution and the polling loop
pub mod executor;
pub mod monitor;
pub mod shutdown;

pub use executor::{ExecutionOutcome, Executor};
pub use monitor::{Monitor, SymbolReport, TICK_SEPARATOR};
pub use shutdown::{shutdown_channel, Shutdown, ShutdownTrigger};
