use crate::interpreter::{reap_child, InterpreterConfig, ReplSession};
use crate::rpc::MessageWriter;
use std::collections::VecDeque;
use std::process::Child;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// One queued execute request.
#[derive(Debug)]
pub struct ExecuteItem {
    pub id: i64,
    pub code: String,
}

/// State shared between the server loop and the worker thread. The session
/// outlives individual workers so interpreter globals persist across bursts
/// of requests.
#[derive(Clone, Default)]
pub struct WorkerState {
    pub queue: Arc<Mutex<VecDeque<ExecuteItem>>>,
    pub cancelled: Arc<AtomicBool>,
    pub child: Arc<Mutex<Option<Child>>>,
    pub session: Arc<Mutex<Option<ReplSession>>>,
}

/// Drain the queue until it is empty or cancellation is requested. The
/// cancellation flag is checked between items; the in-flight item is stopped
/// by killing the interpreter process, which surfaces here as an
/// uncompleted run.
pub fn drain_queue(state: WorkerState, config: InterpreterConfig, writer: MessageWriter) {
    loop {
        if state.cancelled.swap(false, Ordering::SeqCst) {
            break;
        }

        let item = match state.queue.lock() {
            Ok(mut queue) => queue.pop_front(),
            Err(_) => break,
        };
        let Some(item) = item else { break };

        let Ok(mut slot) = state.session.lock() else {
            break;
        };

        if slot.is_none() {
            match ReplSession::start(&config, &state.child) {
                Ok(session) => *slot = Some(session),
                Err(e) => {
                    log::error!("failed to start interpreter: {e}");
                    let _ = writer.log(format!("failed to start interpreter: {e}"));
                    let _ = writer.respond(item.id, String::new());
                    continue;
                }
            }
        }
        let Some(session) = slot.as_mut() else {
            continue;
        };

        match session.run(&item.code) {
            Ok(outcome) => {
                let _ = writer.respond(item.id, outcome.output);
                if !outcome.completed {
                    // Interpreter was killed or crashed mid-block: discard
                    // the session so the next item starts a fresh one.
                    *slot = None;
                    reap_child(&state.child);
                }
            }
            Err(e) => {
                log::error!("execute failed: {e}");
                let _ = writer.log(format!("execute failed: {e}"));
                let _ = writer.respond(item.id, String::new());
                *slot = None;
                reap_child(&state.child);
            }
        }
    }
}
