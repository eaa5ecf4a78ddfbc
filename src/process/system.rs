//! `std::process` backed runner

use std::io::{ErrorKind, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};
use wait_timeout::ChildExt;

use super::{render_command, ProbeResult, ProcessRunner};
use crate::error::{GateError, Result};

/// How long to keep reading once the child has exited
const OUTPUT_COLLECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum captured output per launch (10MB)
pub const MAX_OUTPUT_SIZE: usize = 10 * 1024 * 1024;

/// Runs programs as real child processes.
///
/// stdout and stderr share one pipe so the captured text preserves the order
/// in which the child wrote to either stream. Without a timeout the runner
/// waits for the child indefinitely.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    timeout: Option<Duration>,
    collection_timeout: Duration,
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self {
            timeout: None,
            collection_timeout: OUTPUT_COLLECTION_TIMEOUT,
        }
    }
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill launches that run longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[&str]) -> Result<ProbeResult> {
        let command = render_command(program, args);
        let launch_err = |source: std::io::Error| GateError::Launch {
            command: command.clone(),
            source,
        };

        debug!(command = %command, "launching");

        let (reader, writer) = std::io::pipe().map_err(launch_err)?;
        let writer_err = writer.try_clone().map_err(launch_err)?;

        // The Command owns the parent's copies of the write end; it has to be
        // dropped right after spawning or the reader never sees EOF.
        let mut child = {
            let mut cmd = Command::new(program);
            cmd.args(args)
                .stdin(Stdio::null())
                .stdout(writer)
                .stderr(writer_err);
            cmd.spawn().map_err(launch_err)?
        };

        // Drain before waiting: a child blocked on a full pipe never exits.
        // The buffer is shared so bytes read so far survive a collection timeout.
        let capture = Arc::new(Mutex::new(Capture::default()));
        let (done_tx, done_rx) = mpsc::channel();
        {
            let capture = Arc::clone(&capture);
            thread::spawn(move || {
                drain_into(reader, &capture);
                let _ = done_tx.send(());
            });
        }

        let (exit_code, timed_out) = match self.timeout {
            None => (child.wait().map_err(launch_err)?.code(), false),
            Some(timeout) => match child.wait_timeout(timeout).map_err(launch_err)? {
                Some(status) => (status.code(), false),
                None => {
                    warn!(command = %command, secs = timeout.as_secs(), "killing timed out launch");
                    // Already exited is fine; reap either way.
                    let _ = child.kill();
                    let _ = child.wait();
                    (None, true)
                }
            },
        };

        // A grandchild can keep the pipe open after the child exits.
        let collected = done_rx.recv_timeout(self.collection_timeout).is_ok();
        let mut output = capture
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .render();
        if !collected {
            warn!(command = %command, "output pipe still open after exit, keeping partial output");
            output.push_str("\n[output collection timed out]");
        }
        if let (true, Some(timeout)) = (timed_out, self.timeout) {
            output.push_str(&format!("\n[Process killed after {}s timeout]", timeout.as_secs()));
        }

        debug!(command = %command, exit_code = ?exit_code, "launch finished");

        Ok(ProbeResult {
            exit_code,
            output,
            timed_out,
        })
    }
}

/// Bytes read from the merged pipe, capped at [`MAX_OUTPUT_SIZE`]
#[derive(Debug, Default)]
struct Capture {
    bytes: Vec<u8>,
    truncated: bool,
    read_failed: bool,
}

impl Capture {
    fn push(&mut self, chunk: &[u8]) {
        let room = MAX_OUTPUT_SIZE.saturating_sub(self.bytes.len());
        if chunk.len() > room {
            self.truncated = true;
        }
        self.bytes.extend_from_slice(&chunk[..chunk.len().min(room)]);
    }

    /// Lossy text of what was read. Never fails, so capture problems cannot
    /// hide the child's exit status.
    fn render(&self) -> String {
        if self.read_failed && self.bytes.is_empty() {
            return "[error reading output]".to_string();
        }
        let mut text = String::from_utf8_lossy(&self.bytes).into_owned();
        if self.truncated {
            text.push_str("\n[output truncated at 10MB]");
        }
        text
    }
}

/// Read `stream` to EOF into `capture`, chunk by chunk.
///
/// Past the cap the stream is still drained so the writer never blocks.
fn drain_into<R: Read>(mut stream: R, capture: &Mutex<Capture>) {
    let mut chunk = [0u8; 8192];
    loop {
        match stream.read(&mut chunk) {
            Ok(0) => return,
            Ok(n) => capture
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(&chunk[..n]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(_) => {
                capture
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .read_failed = true;
                return;
            }
        }
    }
}
