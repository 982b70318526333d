use pyrepl_tools::executor::{drain_queue, ExecuteItem, WorkerState};
use pyrepl_tools::interpreter::InterpreterConfig;
use pyrepl_tools::rpc::{read_frame, MessageWriter, RpcRequest};
use serde_json::Value;
use std::io::{self, Cursor, Write};
use std::sync::{Arc, Mutex};

/// Test sink that keeps a readable copy of everything the writer framed.
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> Vec<u8> {
        self.0.lock().unwrap().clone()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn read_all_frames(bytes: &[u8]) -> Vec<Value> {
    let mut cursor = Cursor::new(bytes);
    let mut frames = Vec::new();
    while let Some(body) = read_frame(&mut cursor).expect("well-formed frame") {
        frames.push(serde_json::from_slice(&body).expect("frame body is JSON"));
    }
    frames
}

#[test]
fn response_round_trips_through_framing() {
    let sink = SharedBuf::default();
    let writer = MessageWriter::new(Box::new(sink.clone()));

    writer.respond(7, "hello").expect("write frame");

    let frames = read_all_frames(&sink.contents());
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0]["jsonrpc"], "2.0");
    assert_eq!(frames[0]["id"], 7);
    assert_eq!(frames[0]["result"], "hello");
}

#[test]
fn content_length_counts_bytes_not_characters() {
    let sink = SharedBuf::default();
    let writer = MessageWriter::new(Box::new(sink.clone()));

    writer.respond(1, "héllo — ünïcode").expect("write frame");

    let frames = read_all_frames(&sink.contents());
    assert_eq!(frames[0]["result"], "héllo — ünïcode");
}

#[test]
fn multiple_frames_are_read_in_order() {
    let sink = SharedBuf::default();
    let writer = MessageWriter::new(Box::new(sink.clone()));

    writer.respond(1, "first").expect("write frame");
    writer.log("diagnostic").expect("write frame");
    writer.respond(2, "second").expect("write frame");

    let frames = read_all_frames(&sink.contents());
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0]["id"], 1);
    assert_eq!(frames[1]["method"], "log");
    assert_eq!(frames[1]["params"], "diagnostic");
    assert_eq!(frames[2]["id"], 2);
}

#[test]
fn read_frame_returns_none_on_clean_eof() {
    let mut cursor = Cursor::new(Vec::new());
    assert!(read_frame(&mut cursor).expect("eof is clean").is_none());
}

#[test]
fn read_frame_skips_stray_blank_lines() {
    let bytes = b"\r\n\r\nContent-Length: 2\r\n\r\n{}".to_vec();
    let mut cursor = Cursor::new(bytes);
    let body = read_frame(&mut cursor).expect("frame").expect("present");
    assert_eq!(body, b"{}");
}

#[test]
fn read_frame_rejects_missing_content_length() {
    let bytes = b"X-Other: 1\r\n\r\n{}".to_vec();
    let mut cursor = Cursor::new(bytes);
    assert!(read_frame(&mut cursor).is_err());
}

#[test]
fn execute_params_accept_string_or_array() {
    let as_string: RpcRequest =
        serde_json::from_str(r#"{"id": 1, "method": "execute", "params": "print(1)"}"#)
            .expect("decode");
    assert_eq!(as_string.code_param(), Some("print(1)"));

    let as_array: RpcRequest =
        serde_json::from_str(r#"{"id": 2, "method": "execute", "params": ["print(2)"]}"#)
            .expect("decode");
    assert_eq!(as_array.code_param(), Some("print(2)"));

    let missing: RpcRequest =
        serde_json::from_str(r#"{"method": "interrupt"}"#).expect("decode");
    assert_eq!(missing.code_param(), None);
    assert_eq!(missing.id, None);
}

#[test]
fn interpreter_command_line_splits_shell_style() {
    let config = InterpreterConfig::from_command_line("py -3").expect("parse");
    assert_eq!(config.program, "py");
    assert_eq!(config.args, vec!["-3".to_string()]);

    let plain = InterpreterConfig::from_command_line("python3").expect("parse");
    assert_eq!(plain.program, "python3");
    assert!(plain.args.is_empty());

    assert!(InterpreterConfig::from_command_line("").is_err());
}

#[test]
fn worker_answers_even_when_interpreter_is_missing() {
    let sink = SharedBuf::default();
    let writer = MessageWriter::new(Box::new(sink.clone()));

    let state = WorkerState::default();
    state.queue.lock().unwrap().push_back(ExecuteItem {
        id: 9,
        code: "print(1)\n".to_string(),
    });

    let config = InterpreterConfig {
        program: "pyrepl-missing-interpreter".to_string(),
        args: Vec::new(),
    };
    drain_queue(state, config, writer);

    let frames = read_all_frames(&sink.contents());
    let response = frames
        .iter()
        .find(|f| f["id"] == 9)
        .expect("queued item still gets a response");
    assert_eq!(response["result"], "");
}
