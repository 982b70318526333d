use super::protocol::{MessageWriter, RpcRequest};
use crate::executor::{self, ExecuteItem, WorkerState};
use crate::interpreter::InterpreterConfig;
use crate::normalizer::is_valid_module;
use std::sync::atomic::Ordering;
use std::thread::{self, JoinHandle};

/// Dispatches decoded requests: queues work for the single worker thread,
/// handles interrupts, and answers validity checks inline.
pub struct ExecServer {
    state: WorkerState,
    config: InterpreterConfig,
    writer: MessageWriter,
    worker: Option<JoinHandle<()>>,
}

impl ExecServer {
    pub fn new(config: InterpreterConfig, writer: MessageWriter) -> Self {
        Self {
            state: WorkerState::default(),
            config,
            writer,
            worker: None,
        }
    }

    /// Dispatch one request. Returns false when the server should stop.
    pub fn handle(&mut self, request: RpcRequest) -> bool {
        match request.method.as_str() {
            "execute" => {
                self.handle_execute(request);
                true
            }
            "interrupt" => {
                self.handle_interrupt();
                true
            }
            "check_valid_command" => {
                self.handle_check(&request);
                true
            }
            "exit" => false,
            other => {
                log::warn!("unhandled method: {other}");
                let _ = self.writer.log(format!("unhandled method: {other}"));
                true
            }
        }
    }

    fn handle_execute(&mut self, request: RpcRequest) {
        let Some(id) = request.id else {
            let _ = self.writer.log("execute without id dropped");
            return;
        };
        let Some(code) = request.code_param() else {
            let _ = self.writer.log(format!("execute {id} without code dropped"));
            let _ = self.writer.respond(id, String::new());
            return;
        };

        if let Ok(mut queue) = self.state.queue.lock() {
            queue.push_back(ExecuteItem {
                id,
                code: code.to_string(),
            });
        }
        self.ensure_worker();
    }

    /// Spawn a worker thread if none is draining the queue.
    fn ensure_worker(&mut self) {
        let alive = self.worker.as_ref().is_some_and(|h| !h.is_finished());
        if alive {
            return;
        }
        self.state.cancelled.store(false, Ordering::SeqCst);
        let state = self.state.clone();
        let config = self.config.clone();
        let writer = self.writer.clone();
        self.worker = Some(thread::spawn(move || {
            executor::drain_queue(state, config, writer);
        }));
    }

    /// Drop everything pending, then stop the in-flight block by killing the
    /// interpreter process outright. The worker observes the cancellation
    /// flag between items; merely forgetting the thread would leave the
    /// block running.
    fn handle_interrupt(&mut self) {
        self.state.cancelled.store(true, Ordering::SeqCst);
        if let Ok(mut queue) = self.state.queue.lock() {
            queue.clear();
        }
        if let Ok(mut child) = self.state.child.lock() {
            if let Some(process) = child.as_mut() {
                if let Err(e) = process.kill() {
                    log::warn!("failed to kill interpreter: {e}");
                }
            }
        }
        log::info!("interrupt: queue cleared, interpreter killed");
    }

    fn handle_check(&self, request: &RpcRequest) {
        let Some(id) = request.id else { return };
        let valid = request.code_param().is_some_and(is_valid_module);
        let _ = self.writer.respond(id, if valid { "True" } else { "False" });
    }
}
