//! Command input: newline-delimited JSON `DashboardCommand`s.

use std::io::{self, BufRead};
use std::thread::JoinHandle;

use tracing::{debug, warn};

use harbor_core::commands::DashboardCommand;

use crate::state::LoopHandle;

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command_line(line: &str) -> Option<Result<DashboardCommand, serde_json::Error>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(serde_json::from_str(trimmed))
}

/// Forward every command read from `reader` to the loop until EOF or the
/// loop goes away. Malformed lines are logged and skipped. Returns the
/// number of commands forwarded.
pub fn forward_commands<R: BufRead>(reader: R, handle: &LoopHandle) -> usize {
    let mut forwarded = 0;
    for (number, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!(%err, "command input failed");
                break;
            }
        };
        match parse_command_line(&line) {
            None => continue,
            Some(Ok(command)) => {
                if !handle.send(command) {
                    break;
                }
                forwarded += 1;
            }
            Some(Err(err)) => warn!(line = number + 1, %err, "ignoring malformed command"),
        }
    }
    debug!(forwarded, "command input closed");
    forwarded
}

/// Read commands from stdin on a background thread.
pub fn spawn_stdin_reader(handle: LoopHandle) -> io::Result<JoinHandle<usize>> {
    std::thread::Builder::new()
        .name("harbor-stdin".into())
        .spawn(move || forward_commands(io::stdin().lock(), &handle))
}
