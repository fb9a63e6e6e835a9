use crate::prefs::Preferences;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

const TICK: Duration = Duration::from_millis(100);

/// Commands understood by the timer thread
pub enum TimerCommand {
    /// Disable whatever is currently counting down
    PauseAll,
    /// Replace the durations used for future phases
    Reload(Preferences),
    /// Begin a work session
    StartWork,
    /// Stop the timer thread
    Stop,
}

/// What the timer is currently counting down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Work,
    Break,
}

impl Phase {
    fn as_u8(self) -> u8 {
        match self {
            Phase::Idle => 0,
            Phase::Work => 1,
            Phase::Break => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => Phase::Work,
            2 => Phase::Break,
            _ => Phase::Idle,
        }
    }
}

/// Host operations the settings form needs from the timer subsystem.
pub trait TimerHost {
    fn pause_all(&self);
    fn reload(&self, prefs: &Preferences);
    fn start_work(&self);
}

/// Cloneable command handle; every send is fire-and-forget and a send to a
/// stopped timer is silently dropped.
#[derive(Clone)]
pub struct TimerHandle {
    sender: Sender<TimerCommand>,
}

impl TimerHost for TimerHandle {
    fn pause_all(&self) {
        let _ = self.sender.send(TimerCommand::PauseAll);
    }

    fn reload(&self, prefs: &Preferences) {
        let _ = self.sender.send(TimerCommand::Reload(*prefs));
    }

    fn start_work(&self) {
        let _ = self.sender.send(TimerCommand::StartWork);
    }
}

/// Timer engine running work/break countdowns on a background thread
pub struct TimerBackend {
    /// Seconds left in the current phase, updated every tick
    left_secs: Arc<AtomicU64>,
    /// Current phase, encoded via `Phase::as_u8`
    phase: Arc<AtomicU8>,
    /// Raised once when a work phase ends, so the window can grab focus
    wants_focus: Arc<AtomicBool>,
    /// Sender to communicate with the timer thread
    sender: Sender<TimerCommand>,
    /// Handle to the timer thread
    _thread_handle: thread::JoinHandle<()>,
}

impl TimerBackend {
    /// Spawn the timer thread with the given initial durations
    pub fn spawn(prefs: Preferences) -> Self {
        let (sender, receiver) = mpsc::channel();
        let left_secs = Arc::new(AtomicU64::new(0));
        let phase = Arc::new(AtomicU8::new(Phase::Idle.as_u8()));
        let wants_focus = Arc::new(AtomicBool::new(false));

        let left_secs_clone = Arc::clone(&left_secs);
        let phase_clone = Arc::clone(&phase);
        let wants_focus_clone = Arc::clone(&wants_focus);
        let thread_handle = thread::spawn(move || {
            timer_loop(
                receiver,
                prefs,
                left_secs_clone,
                phase_clone,
                wants_focus_clone,
            );
        });

        Self {
            left_secs,
            phase,
            wants_focus,
            sender,
            _thread_handle: thread_handle,
        }
    }

    /// A cloneable handle for sending commands from elsewhere
    pub fn handle(&self) -> TimerHandle {
        TimerHandle {
            sender: self.sender.clone(),
        }
    }

    /// Seconds left in the current phase
    pub fn left_secs(&self) -> u64 {
        self.left_secs.load(Ordering::Relaxed)
    }

    /// The shared left-seconds value, for read-only display elsewhere
    pub fn left_secs_observable(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.left_secs)
    }

    /// The current phase
    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::Relaxed))
    }

    /// One-shot: true when a work phase just ended and the window
    /// should start grabbing focus
    pub fn take_focus_request(&self) -> bool {
        self.wants_focus.swap(false, Ordering::Relaxed)
    }
}

impl Drop for TimerBackend {
    fn drop(&mut self) {
        let _ = self.sender.send(TimerCommand::Stop);
        // Note: We don't wait for the thread to join in drop to avoid blocking
        // The thread will be joined when the program exits
    }
}

/// The main countdown loop that runs in a separate thread
fn timer_loop(
    receiver: Receiver<TimerCommand>,
    mut prefs: Preferences,
    left_secs: Arc<AtomicU64>,
    phase: Arc<AtomicU8>,
    wants_focus: Arc<AtomicBool>,
) {
    let mut current = Phase::Idle;
    let mut deadline: Option<Instant> = None;

    loop {
        // Check for commands with a timeout; the timeout doubles as the tick
        match receiver.recv_timeout(TICK) {
            Ok(TimerCommand::PauseAll) => {
                current = Phase::Idle;
                deadline = None;
                phase.store(current.as_u8(), Ordering::Relaxed);
                info!("All timers paused");
            }
            Ok(TimerCommand::Reload(new_prefs)) => {
                prefs = new_prefs;
                info!("Timer durations reloaded: {:?}", prefs);
            }
            Ok(TimerCommand::StartWork) => {
                let secs = u64::from(prefs.work_minutes) * 60;
                current = Phase::Work;
                deadline = Some(Instant::now() + Duration::from_secs(secs));
                left_secs.store(secs, Ordering::Relaxed);
                phase.store(current.as_u8(), Ordering::Relaxed);
                info!("Work session started ({} min)", prefs.work_minutes);
            }
            Ok(TimerCommand::Stop) => break,
            Err(_) => {
                // Timeout, fall through to the tick below
            }
        }

        if current != Phase::Idle
            && let Some(d) = deadline
        {
            let remaining = d.saturating_duration_since(Instant::now());
            left_secs.store(remaining.as_secs(), Ordering::Relaxed);

            if remaining.is_zero() {
                match current {
                    Phase::Work => {
                        // The break starts immediately; the window grabs focus
                        wants_focus.store(true, Ordering::Relaxed);
                        let secs = u64::from(prefs.break_minutes) * 60;
                        current = Phase::Break;
                        deadline = Some(Instant::now() + Duration::from_secs(secs));
                        left_secs.store(secs, Ordering::Relaxed);
                        info!("Work session over, break started ({} min)", prefs.break_minutes);
                    }
                    Phase::Break | Phase::Idle => {
                        current = Phase::Idle;
                        deadline = None;
                        info!("Break over");
                    }
                }
                phase.store(current.as_u8(), Ordering::Relaxed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    fn short_prefs() -> Preferences {
        Preferences {
            work_minutes: 1,
            break_minutes: 1,
            force_window_focus_secs: 60,
        }
    }

    #[test]
    fn start_work_counts_down_and_pause_freezes() {
        let backend = TimerBackend::spawn(short_prefs());
        assert_eq!(backend.phase(), Phase::Idle);

        backend.handle().start_work();
        thread::sleep(Duration::from_millis(300));
        assert_eq!(backend.phase(), Phase::Work);
        let left = backend.left_secs();
        assert!(left > 0 && left <= 60, "unexpected countdown: {}", left);

        backend.handle().pause_all();
        thread::sleep(Duration::from_millis(300));
        assert_eq!(backend.phase(), Phase::Idle);
        let frozen = backend.left_secs();
        thread::sleep(Duration::from_millis(300));
        assert_eq!(backend.left_secs(), frozen);
    }

    #[test]
    fn work_expiry_starts_break_and_requests_focus() {
        let backend = TimerBackend::spawn(Preferences {
            work_minutes: 0,
            break_minutes: 1,
            force_window_focus_secs: 60,
        });

        backend.handle().start_work();
        thread::sleep(Duration::from_millis(400));
        assert_eq!(backend.phase(), Phase::Break);
        assert!(backend.take_focus_request());
        // One-shot: consumed on the first read
        assert!(!backend.take_focus_request());
    }

    #[test]
    fn reload_changes_future_sessions() {
        let backend = TimerBackend::spawn(short_prefs());
        let handle = backend.handle();

        handle.reload(&Preferences {
            work_minutes: 2,
            break_minutes: 1,
            force_window_focus_secs: 60,
        });
        handle.start_work();
        thread::sleep(Duration::from_millis(300));
        let left = backend.left_secs();
        assert!(left > 60 && left <= 120, "unexpected countdown: {}", left);
    }
}
