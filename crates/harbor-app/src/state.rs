//! State shared between the frame loop and the threads feeding it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use harbor_core::commands::DashboardCommand;
use harbor_core::state::FrameSnapshot;

/// Messages sent to the frame loop.
#[derive(Debug)]
pub enum LoopCommand {
    /// Forward to the dashboard session at the next tick boundary.
    Dashboard(DashboardCommand),
    /// Finish the current frame and stop.
    Shutdown,
}

/// Cloneable handle to a frame loop.
///
/// - `command_tx` queues commands for the loop thread.
/// - `running` is cleared to stop the loop after its current frame.
/// - `latest_snapshot` holds the most recent frame for polling.
#[derive(Clone)]
pub struct LoopHandle {
    pub command_tx: mpsc::Sender<LoopCommand>,
    pub running: Arc<AtomicBool>,
    pub latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
}

impl LoopHandle {
    /// Queue a dashboard command. Returns `false` once the loop is gone.
    pub fn send(&self, command: DashboardCommand) -> bool {
        self.command_tx.send(LoopCommand::Dashboard(command)).is_ok()
    }

    /// Ask the loop to stop after its current frame.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        let _ = self.command_tx.send(LoopCommand::Shutdown);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn latest_snapshot(&self) -> Option<FrameSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.clone())
    }
}
