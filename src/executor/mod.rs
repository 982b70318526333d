mod worker;

pub use worker::{drain_queue, ExecuteItem, WorkerState};
