mod session;

pub use session::{reap_child, InterpreterConfig, ReplSession, RunOutcome};
