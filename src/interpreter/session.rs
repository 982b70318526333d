use crate::error::{Result, ToolError};
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::{Arc, Mutex};

const SENTINEL: &str = "__PYREPL_DONE__";

/// Interpreter launch configuration.
#[derive(Debug, Clone)]
pub struct InterpreterConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl InterpreterConfig {
    /// Split a shell-style command line, e.g. `python3` or `py -3`.
    pub fn from_command_line(command: &str) -> Result<Self> {
        let mut words = shlex::split(command).ok_or_else(|| {
            ToolError::interpreter(format!("unparsable interpreter command: {command}"))
        })?;
        if words.is_empty() {
            return Err(ToolError::interpreter("empty interpreter command"));
        }
        let program = words.remove(0);
        Ok(Self {
            program,
            args: words,
        })
    }
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            program: "python3".to_string(),
            args: Vec::new(),
        }
    }
}

/// Outcome of one executed block. `completed` is false when the interpreter
/// went away before the block finished (interrupt or crash).
#[derive(Debug)]
pub struct RunOutcome {
    pub output: String,
    pub completed: bool,
}

/// A piped interactive interpreter. Code blocks go to its stdin; output is
/// scraped from stdout up to a sentinel marker. Stderr passes through to our
/// own stderr, where the host logs it.
pub struct ReplSession {
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl ReplSession {
    /// Spawn the interpreter in interactive unbuffered mode. The child
    /// handle is parked in `slot` so an interrupt can kill it outright from
    /// another thread.
    pub fn start(config: &InterpreterConfig, slot: &Arc<Mutex<Option<Child>>>) -> Result<Self> {
        let mut child = Command::new(&config.program)
            .args(&config.args)
            .args(["-u", "-i", "-q"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ToolError::interpreter("interpreter has no stdin pipe"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ToolError::interpreter("interpreter has no stdout pipe"))?;

        let mut guard = slot
            .lock()
            .map_err(|_| ToolError::interpreter("session slot poisoned"))?;
        *guard = Some(child);

        Ok(Self {
            stdin,
            stdout: BufReader::new(stdout),
        })
    }

    /// Run one normalized code block and capture its output. The block must
    /// already carry the blank-line discipline the normalizer produces, so
    /// the interpreter knows where each statement ends.
    pub fn run(&mut self, code: &str) -> Result<RunOutcome> {
        self.stdin.write_all(code.as_bytes())?;
        if !code.ends_with('\n') {
            self.stdin.write_all(b"\n")?;
        }
        // Terminate any still-open block, then mark the end of the run.
        self.stdin.write_all(b"\n")?;
        writeln!(self.stdin, "print('{SENTINEL}')")?;
        self.stdin.flush()?;

        let mut output = String::new();
        loop {
            let mut line = String::new();
            if self.stdout.read_line(&mut line)? == 0 {
                return Ok(RunOutcome {
                    output,
                    completed: false,
                });
            }
            if line.trim_end() == SENTINEL {
                break;
            }
            output.push_str(&line);
        }

        Ok(RunOutcome {
            output,
            completed: true,
        })
    }
}

/// Wait on and drop the parked child, if any. Called after the session is
/// torn down so the dead interpreter does not linger as a zombie.
pub fn reap_child(slot: &Arc<Mutex<Option<Child>>>) {
    if let Ok(mut guard) = slot.lock() {
        if let Some(mut child) = guard.take() {
            let _ = child.wait();
        }
    }
}
