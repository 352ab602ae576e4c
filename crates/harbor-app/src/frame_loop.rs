//! Frame clock and scheduler.
//!
//! Each frame: drain loop commands into the session, take the next delta
//! from the delta source, clamp it, tick the session once and hand the
//! snapshot to the sink. The delta source owns pacing, so a scripted
//! source runs as fast as the CPU allows and replays exactly.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use harbor_core::config::FrameConfig;
use harbor_core::constants::{MAX_FRAME_DELTA, TARGET_FPS};
use harbor_core::events::DashboardEvent;
use harbor_core::state::FrameSnapshot;
use harbor_sim::DashboardSession;

use crate::error::AppError;
use crate::sink::FrameSink;
use crate::state::{LoopCommand, LoopHandle};

/// Supplies the raw elapsed time for each frame.
pub trait DeltaSource {
    /// Seconds since the previous frame, or `None` when no frames remain.
    fn next_delta(&mut self) -> Option<f64>;
}

/// Real time, paced to a target frame rate.
pub struct WallClock {
    frame: Duration,
    last: Option<Instant>,
    next_frame: Instant,
}

impl WallClock {
    pub fn new(target_fps: u32) -> Self {
        Self {
            frame: Duration::from_nanos(1_000_000_000 / u64::from(target_fps.max(1))),
            last: None,
            next_frame: Instant::now(),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new(TARGET_FPS)
    }
}

impl DeltaSource for WallClock {
    fn next_delta(&mut self) -> Option<f64> {
        let Some(last) = self.last else {
            let now = Instant::now();
            self.last = Some(now);
            self.next_frame = now + self.frame;
            return Some(0.0);
        };

        let now = Instant::now();
        if self.next_frame > now {
            std::thread::sleep(self.next_frame - now);
        }
        let now = Instant::now();
        if now.saturating_duration_since(self.next_frame) > self.frame * 2 {
            // Too far behind; resync instead of bursting.
            self.next_frame = now;
        }
        self.next_frame += self.frame;
        self.last = Some(now);
        Some(now.duration_since(last).as_secs_f64())
    }
}

/// Fixed sequence of deltas, for replays and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDeltas {
    deltas: VecDeque<f64>,
}

impl ScriptedDeltas {
    pub fn new(deltas: impl IntoIterator<Item = f64>) -> Self {
        Self {
            deltas: deltas.into_iter().collect(),
        }
    }

    /// `count` frames of exactly `dt`.
    pub fn uniform(dt: f64, count: usize) -> Self {
        Self::new(std::iter::repeat(dt).take(count))
    }

    pub fn remaining(&self) -> usize {
        self.deltas.len()
    }
}

impl DeltaSource for ScriptedDeltas {
    fn next_delta(&mut self) -> Option<f64> {
        self.deltas.pop_front()
    }
}

/// Negative or non-finite deltas become 0; large ones are capped at `max`.
pub fn clamp_delta(raw: f64, max: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        0.0
    } else {
        raw.min(max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopSettings {
    pub max_delta_secs: f64,
    /// Emit every Nth frame.
    pub emit_every: u32,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            max_delta_secs: MAX_FRAME_DELTA,
            emit_every: 1,
        }
    }
}

impl From<&FrameConfig> for LoopSettings {
    fn from(frame: &FrameConfig) -> Self {
        Self {
            max_delta_secs: frame.max_delta_secs,
            emit_every: frame.emit_every.max(1),
        }
    }
}

/// Totals for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoopSummary {
    pub frames: u64,
    pub emitted: u64,
    pub sim_secs: f64,
}

pub struct FrameLoop<D: DeltaSource> {
    session: DashboardSession,
    deltas: D,
    settings: LoopSettings,
    command_tx: mpsc::Sender<LoopCommand>,
    command_rx: mpsc::Receiver<LoopCommand>,
    running: Arc<AtomicBool>,
    latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
    /// Events from frames that were ticked but not emitted.
    pending_events: Vec<DashboardEvent>,
}

impl<D: DeltaSource> FrameLoop<D> {
    pub fn new(session: DashboardSession, deltas: D, settings: LoopSettings) -> Self {
        let (command_tx, command_rx) = mpsc::channel();
        Self {
            session,
            deltas,
            settings,
            command_tx,
            command_rx,
            running: Arc::new(AtomicBool::new(false)),
            latest_snapshot: Arc::new(Mutex::new(None)),
            pending_events: Vec::new(),
        }
    }

    /// Handle for feeding commands from other threads.
    pub fn handle(&self) -> LoopHandle {
        LoopHandle {
            command_tx: self.command_tx.clone(),
            running: Arc::clone(&self.running),
            latest_snapshot: Arc::clone(&self.latest_snapshot),
        }
    }

    pub fn session(&self) -> &DashboardSession {
        &self.session
    }

    /// Run until shutdown, the delta source runs dry, or `max_frames`
    /// frames have been ticked.
    pub fn run(
        &mut self,
        sink: &mut impl FrameSink,
        max_frames: Option<u64>,
    ) -> Result<LoopSummary, AppError> {
        let mut summary = LoopSummary::default();
        self.running.store(true, Ordering::SeqCst);
        info!(
            max_frames,
            emit_every = self.settings.emit_every,
            "frame loop started"
        );

        let result = self.run_frames(sink, max_frames, &mut summary);
        self.running.store(false, Ordering::SeqCst);
        info!(
            frames = summary.frames,
            emitted = summary.emitted,
            sim_secs = summary.sim_secs,
            "frame loop stopped"
        );
        result.map(|()| summary)
    }

    fn run_frames(
        &mut self,
        sink: &mut impl FrameSink,
        max_frames: Option<u64>,
        summary: &mut LoopSummary,
    ) -> Result<(), AppError> {
        while self.running.load(Ordering::SeqCst) {
            if max_frames.is_some_and(|max| summary.frames >= max) {
                break;
            }
            if !self.drain_commands() {
                break;
            }
            let Some(raw) = self.deltas.next_delta() else {
                debug!("delta source exhausted");
                break;
            };

            let dt = clamp_delta(raw, self.settings.max_delta_secs);
            let mut snapshot = self.session.tick(dt);
            summary.frames += 1;
            summary.sim_secs = snapshot.time.elapsed_secs;

            if summary.frames % u64::from(self.settings.emit_every) == 0 {
                if !self.pending_events.is_empty() {
                    let mut events = std::mem::take(&mut self.pending_events);
                    events.append(&mut snapshot.events);
                    snapshot.events = events;
                }
                sink.emit(&snapshot)?;
                summary.emitted += 1;
            } else {
                self.pending_events.append(&mut snapshot.events);
            }

            if let Ok(mut lock) = self.latest_snapshot.lock() {
                *lock = Some(snapshot);
            }
        }
        Ok(())
    }

    /// Queue every pending command. Returns `false` on shutdown.
    fn drain_commands(&mut self) -> bool {
        while let Ok(command) = self.command_rx.try_recv() {
            match command {
                LoopCommand::Dashboard(cmd) => self.session.queue_command(cmd),
                LoopCommand::Shutdown => return false,
            }
        }
        true
    }
}
