mod protocol;
mod server;

pub use protocol::{read_frame, MessageWriter, RpcRequest};
pub use server::ExecServer;

use crate::error::Result;
use crate::interpreter::InterpreterConfig;
use std::io;

/// Serve framed JSON-RPC requests on stdin until `exit` or EOF. Stdout
/// carries frames only; diagnostics go to stderr and to `log`
/// notifications.
pub fn run_server(config: InterpreterConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let writer = MessageWriter::stdout();
    let mut server = ExecServer::new(config, writer.clone());

    log::info!("execution server started");

    loop {
        let frame = match read_frame(&mut reader) {
            Ok(Some(frame)) => frame,
            Ok(None) => break,
            Err(e) => {
                // A framing error desynchronizes the stream; there is no
                // safe way to resume reading.
                log::error!("framing error: {e}");
                let _ = writer.log(format!("framing error: {e}"));
                break;
            }
        };

        let request: RpcRequest = match serde_json::from_slice(&frame) {
            Ok(request) => request,
            Err(e) => {
                log::warn!("malformed request: {e}");
                let _ = writer.log(format!("malformed request: {e}"));
                continue;
            }
        };

        log::debug!("received {}", request.method);
        if !server.handle(request) {
            break;
        }
    }

    log::info!("execution server exiting");
    Ok(())
}
