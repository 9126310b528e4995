//! # Load Trigger
//!
//! Edge-triggered "load more" signal driven by the visibility of a sentinel
//! element near the end of the displayed items.
//!
//! ## States:
//! - `Disarmed` - no sentinel, a load is in flight, or nothing more to load;
//!   no observation is active
//! - `Armed` - observing the sentinel, waiting for it to become visible
//! - `Fired` - a load was requested for the current visibility episode; the
//!   sentinel has to leave the viewport before another request is issued
//!
//! Visibility observation is injected through `VisibilityObserver`, so the
//! state machine runs the same against `IntersectionObserver` in the browser
//! and against a fake in tests.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Sentinel must be fully visible by default
pub const DEFAULT_THRESHOLD: f64 = 1.0;

/// Receives `true` when the target starts intersecting the viewport and
/// `false` when it stops
pub type VisibilityCallback = Box<dyn FnMut(bool)>;

/// Capability to watch one target's visibility
///
/// Implementations must deliver notifications after `observe` has returned,
/// never from inside it.
pub trait VisibilityObserver<T> {
    /// Start watching `target`, replacing any previous observation
    fn observe(&mut self, target: &T, on_change: VisibilityCallback, threshold: f64);

    /// Stop all observation; pending notifications must not be delivered
    fn disconnect(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Disarmed,
    Armed,
    Fired,
}

struct TriggerInner<T, O: VisibilityObserver<T>> {
    observer: O,
    sentinel: Option<T>,
    loading: bool,
    has_more: bool,
    threshold: f64,
    state: TriggerState,
    observing: bool,
    /// Incremented for every new observation so late callbacks from an
    /// earlier one are recognisable
    observation_id: u64,
    fire_count: u64,
    on_load: Rc<dyn Fn()>,
}

impl<T, O: VisibilityObserver<T>> TriggerInner<T, O> {
    fn can_fire(&self) -> bool {
        self.sentinel.is_some() && !self.loading && self.has_more
    }

    fn disconnect(&mut self) {
        if self.observing {
            self.observer.disconnect();
            self.observing = false;
        }
        self.state = TriggerState::Disarmed;
    }

    /// Decide what a visibility notification means. Returns the load callback
    /// when a request must be issued; the caller runs it after releasing the
    /// borrow.
    fn handle_visibility(&mut self, observation_id: u64, intersecting: bool) -> Option<Rc<dyn Fn()>> {
        if !self.observing || observation_id != self.observation_id {
            return None;
        }

        if !intersecting {
            if self.state == TriggerState::Fired {
                self.state = TriggerState::Armed;
            }
            return None;
        }

        // Re-checked here, not just when arming
        if self.state != TriggerState::Armed || !self.can_fire() {
            return None;
        }

        self.state = TriggerState::Fired;
        self.fire_count += 1;
        log::debug!("🎯 Sentinel visible, requesting next page (fire #{})", self.fire_count);
        Some(self.on_load.clone())
    }
}

impl<T, O: VisibilityObserver<T>> Drop for TriggerInner<T, O> {
    fn drop(&mut self) {
        if self.observing {
            self.observer.disconnect();
        }
    }
}

/// Shared handle to a load trigger state machine
pub struct LoadTrigger<T: 'static, O: VisibilityObserver<T> + 'static> {
    inner: Rc<RefCell<TriggerInner<T, O>>>,
}

impl<T: 'static, O: VisibilityObserver<T> + 'static> Clone for LoadTrigger<T, O> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static, O: VisibilityObserver<T> + 'static> LoadTrigger<T, O> {
    pub fn new(observer: O, threshold: f64, on_load: impl Fn() + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(TriggerInner {
                observer,
                sentinel: None,
                loading: false,
                has_more: false,
                threshold,
                state: TriggerState::Disarmed,
                observing: false,
                observation_id: 0,
                fire_count: 0,
                on_load: Rc::new(on_load),
            })),
        }
    }

    pub fn state(&self) -> TriggerState {
        self.inner.borrow().state
    }

    /// Load requests issued so far
    pub fn fire_count(&self) -> u64 {
        self.inner.borrow().fire_count
    }

    pub fn threshold(&self) -> f64 {
        self.inner.borrow().threshold
    }

    /// Swap the sentinel. Any existing observation is torn down and the state
    /// re-evaluated from scratch.
    pub fn register_sentinel(&self, sentinel: Option<T>) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.disconnect();
            inner.sentinel = sentinel;
        }
        self.reconcile();
    }

    pub fn set_flags(&self, loading: bool, has_more: bool) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.loading == loading && inner.has_more == has_more {
                return;
            }
            inner.loading = loading;
            inner.has_more = has_more;
        }
        self.reconcile();
    }

    pub fn set_threshold(&self, threshold: f64) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.threshold == threshold {
                return;
            }
            inner.threshold = threshold;
            inner.disconnect();
        }
        self.reconcile();
    }

    /// Disconnect and forget the sentinel (unmount)
    pub fn teardown(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.disconnect();
        inner.sentinel = None;
    }

    /// Arm or disarm to match the current sentinel and flags
    fn reconcile(&self) {
        let mut inner = self.inner.borrow_mut();
        let should_observe = inner.can_fire();

        match (should_observe, inner.observing) {
            (false, _) => inner.disconnect(),
            (true, true) => {}
            (true, false) => {
                inner.observation_id += 1;
                let observation_id = inner.observation_id;
                let weak: Weak<RefCell<TriggerInner<T, O>>> = Rc::downgrade(&self.inner);

                let callback: VisibilityCallback = Box::new(move |intersecting| {
                    let Some(inner) = weak.upgrade() else {
                        return;
                    };
                    let on_load = inner.borrow_mut().handle_visibility(observation_id, intersecting);
                    if let Some(on_load) = on_load {
                        on_load();
                    }
                });

                let TriggerInner {
                    observer,
                    sentinel,
                    threshold,
                    ..
                } = &mut *inner;
                if let Some(sentinel) = sentinel.as_ref() {
                    observer.observe(sentinel, callback, *threshold);
                }
                inner.observing = true;
                inner.state = TriggerState::Armed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Records observations and lets the test deliver notifications
    #[derive(Clone, Default)]
    struct FakeObserver {
        callback: Rc<RefCell<Option<VisibilityCallback>>>,
        observed: Rc<RefCell<Vec<(String, f64)>>>,
        disconnects: Rc<Cell<u32>>,
        epoch: Rc<Cell<u32>>,
    }

    impl FakeObserver {
        fn emit(&self, intersecting: bool) {
            let epoch = self.epoch.get();
            let mut callback = self.callback.borrow_mut().take();
            if let Some(cb) = callback.as_mut() {
                cb(intersecting);
            }
            // Put it back unless the callback re-observed or disconnected
            if self.epoch.get() == epoch {
                *self.callback.borrow_mut() = callback;
            }
        }

        fn is_observing(&self) -> bool {
            self.callback.borrow().is_some()
        }
    }

    impl VisibilityObserver<String> for FakeObserver {
        fn observe(&mut self, target: &String, on_change: VisibilityCallback, threshold: f64) {
            self.epoch.set(self.epoch.get() + 1);
            self.observed.borrow_mut().push((target.clone(), threshold));
            *self.callback.borrow_mut() = Some(on_change);
        }

        fn disconnect(&mut self) {
            self.epoch.set(self.epoch.get() + 1);
            self.disconnects.set(self.disconnects.get() + 1);
            *self.callback.borrow_mut() = None;
        }
    }

    fn armed_trigger() -> (LoadTrigger<String, FakeObserver>, FakeObserver, Rc<Cell<u32>>) {
        let observer = FakeObserver::default();
        let loads = Rc::new(Cell::new(0));
        let counter = loads.clone();
        let trigger = LoadTrigger::new(observer.clone(), DEFAULT_THRESHOLD, move || {
            counter.set(counter.get() + 1)
        });
        trigger.set_flags(false, true);
        trigger.register_sentinel(Some("item-11".to_string()));
        (trigger, observer, loads)
    }

    #[test]
    fn test_arms_with_sentinel_and_flags() {
        let (trigger, observer, _) = armed_trigger();
        assert_eq!(trigger.state(), TriggerState::Armed);
        assert_eq!(observer.observed.borrow().as_slice(), &[("item-11".to_string(), 1.0)]);
    }

    #[test]
    fn test_disarmed_without_sentinel() {
        let observer = FakeObserver::default();
        let trigger = LoadTrigger::new(observer.clone(), DEFAULT_THRESHOLD, || {});
        trigger.set_flags(false, true);
        assert_eq!(trigger.state(), TriggerState::Disarmed);
        assert!(!observer.is_observing());
    }

    #[test]
    fn test_single_fire_per_visibility_transition() {
        let (trigger, observer, loads) = armed_trigger();

        observer.emit(true);
        assert_eq!(loads.get(), 1);
        assert_eq!(trigger.state(), TriggerState::Fired);

        // Repeated intersecting callback without leaving the viewport
        observer.emit(true);
        assert_eq!(loads.get(), 1);

        observer.emit(false);
        assert_eq!(trigger.state(), TriggerState::Armed);
        observer.emit(true);
        assert_eq!(loads.get(), 2);
        assert_eq!(trigger.fire_count(), 2);
    }

    #[test]
    fn test_not_intersecting_does_not_fire() {
        let (_trigger, observer, loads) = armed_trigger();
        observer.emit(false);
        assert_eq!(loads.get(), 0);
    }

    #[test]
    fn test_loading_disarms_and_tears_down_observation() {
        let (trigger, observer, loads) = armed_trigger();

        trigger.set_flags(true, true);
        assert_eq!(trigger.state(), TriggerState::Disarmed);
        assert!(!observer.is_observing());
        assert_eq!(observer.disconnects.get(), 1);

        observer.emit(true);
        assert_eq!(loads.get(), 0);

        // Load finished: a fresh observation is established
        trigger.set_flags(false, true);
        assert_eq!(trigger.state(), TriggerState::Armed);
        assert_eq!(observer.observed.borrow().len(), 2);
        observer.emit(true);
        assert_eq!(loads.get(), 1);
    }

    #[test]
    fn test_no_more_items_disarms() {
        let (trigger, observer, loads) = armed_trigger();
        trigger.set_flags(false, false);
        assert_eq!(trigger.state(), TriggerState::Disarmed);
        observer.emit(true);
        assert_eq!(loads.get(), 0);
    }

    #[test]
    fn test_stale_callback_from_previous_observation_is_ignored() {
        let (trigger, observer, loads) = armed_trigger();
        let stale = observer.callback.borrow_mut().take();

        trigger.register_sentinel(Some("item-23".to_string()));
        assert_eq!(observer.observed.borrow().last().map(|(t, _)| t.as_str()), Some("item-23"));

        if let Some(mut stale) = stale {
            stale(true);
        }
        assert_eq!(loads.get(), 0);

        observer.emit(true);
        assert_eq!(loads.get(), 1);
    }

    #[test]
    fn test_rechecks_flags_at_fire_time() {
        let (trigger, observer, loads) = armed_trigger();
        // Flags flipped without the trigger being told to re-observe: simulate
        // a callback racing a state change by poking the inner flags directly.
        trigger.inner.borrow_mut().loading = true;
        observer.emit(true);
        assert_eq!(loads.get(), 0);
        assert_eq!(trigger.state(), TriggerState::Armed);
    }

    #[test]
    fn test_threshold_override_reobserves() {
        let (trigger, observer, _) = armed_trigger();
        trigger.set_threshold(0.1);
        assert_eq!(trigger.threshold(), 0.1);
        assert_eq!(observer.observed.borrow().last().map(|(_, t)| *t), Some(0.1));
    }

    #[test]
    fn test_teardown_and_drop_disconnect() {
        let (trigger, observer, _) = armed_trigger();
        trigger.teardown();
        assert!(!observer.is_observing());
        assert_eq!(trigger.state(), TriggerState::Disarmed);

        let (trigger, observer, _) = armed_trigger();
        drop(trigger);
        assert!(!observer.is_observing());
    }

    #[test]
    fn test_load_callback_may_reenter_trigger() {
        let observer = FakeObserver::default();
        let slot: Rc<RefCell<Option<LoadTrigger<String, FakeObserver>>>> = Rc::new(RefCell::new(None));
        let reentrant = slot.clone();
        let trigger = LoadTrigger::new(observer.clone(), DEFAULT_THRESHOLD, move || {
            if let Some(trigger) = reentrant.borrow().as_ref() {
                trigger.set_flags(true, true);
            }
        });
        *slot.borrow_mut() = Some(trigger.clone());

        trigger.set_flags(false, true);
        trigger.register_sentinel(Some("last".to_string()));
        observer.emit(true);

        assert_eq!(trigger.fire_count(), 1);
        assert_eq!(trigger.state(), TriggerState::Disarmed);
        assert!(!observer.is_observing());
        slot.borrow_mut().take();
    }
}
