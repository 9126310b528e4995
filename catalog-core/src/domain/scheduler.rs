//! # Scheduling Primitives
//!
//! Platform-neutral stand-ins for per-frame loops and debounced timers.
//!
//! ## Responsibilities:
//! - `RepeatingTask`: a cancellable, repeating tick source (an animation-frame
//!   loop in the browser)
//! - `ManualTicker`: a `RepeatingTask` advanced by hand, for tests and headless use
//! - `Debouncer`: collapses bursts of events into one action after a quiet
//!   period, driven by caller-supplied timestamps rather than a timer

/// Tick callback invoked once per scheduled repetition
pub type Tick = Box<dyn FnMut()>;

/// A repeating task that can be started and stopped
pub trait RepeatingTask {
    /// Start invoking `tick` once per repetition. Starting a running task
    /// replaces its tick.
    fn start(&mut self, tick: Tick);

    /// Stop the task; no tick runs after this returns
    fn stop(&mut self);

    fn is_running(&self) -> bool;
}

/// A `RepeatingTask` whose repetitions happen only when `advance` is called
#[derive(Default)]
pub struct ManualTicker {
    tick: Option<Tick>,
    frames: u64,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `frames` repetitions; returns how many actually ran
    pub fn advance(&mut self, frames: u64) -> u64 {
        let Some(tick) = self.tick.as_mut() else {
            return 0;
        };
        for _ in 0..frames {
            tick();
        }
        self.frames += frames;
        frames
    }

    /// Total repetitions run since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RepeatingTask for ManualTicker {
    fn start(&mut self, tick: Tick) {
        self.tick = Some(tick);
    }

    fn stop(&mut self) {
        self.tick = None;
    }

    fn is_running(&self) -> bool {
        self.tick.is_some()
    }
}

/// Trailing-edge debouncer over millisecond timestamps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    delay_ms: u64,
    deadline: Option<u64>,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            deadline: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Record an event at `now_ms`, pushing the deadline out
    pub fn schedule(&mut self, now_ms: u64) {
        self.deadline = Some(now_ms.saturating_add(self.delay_ms));
    }

    /// True exactly once when the quiet period has elapsed
    pub fn fire_due(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_manual_ticker_runs_only_while_started() {
        let count = Rc::new(Cell::new(0));
        let mut ticker = ManualTicker::new();

        assert_eq!(ticker.advance(3), 0);

        let counter = count.clone();
        ticker.start(Box::new(move || counter.set(counter.get() + 1)));
        assert!(ticker.is_running());
        ticker.advance(3);
        assert_eq!(count.get(), 3);

        ticker.stop();
        assert!(!ticker.is_running());
        ticker.advance(5);
        assert_eq!(count.get(), 3);
        assert_eq!(ticker.frames(), 3);
    }

    #[test]
    fn test_debouncer_collapses_bursts() {
        let mut debouncer = Debouncer::new(100);

        debouncer.schedule(0);
        debouncer.schedule(50);
        debouncer.schedule(90);

        assert!(!debouncer.fire_due(150));
        assert!(debouncer.fire_due(190));
        assert!(!debouncer.fire_due(500), "fires once per burst");
    }

    #[test]
    fn test_debouncer_cancel() {
        let mut debouncer = Debouncer::new(100);
        debouncer.schedule(0);
        assert!(debouncer.is_pending());
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert!(!debouncer.fire_due(1000));
    }
}
