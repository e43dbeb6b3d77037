//! Cancellable timers.
//!
//! Every scheduled callback is owned through a [`TimerHandle`]. Dropping the
//! handle cancels the timer, so a presenter that goes away takes its pending
//! ticks with it. A timer that should outlive its owner (an exit transition
//! after the box has been dismissed) must be [`TimerHandle::detach`]ed.
//!
//! [`ManualScheduler`] advances a virtual clock on demand. It backs headless
//! sessions and every timer test; the browser uses `platform::web`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub trait Scheduler {
    /// Run `tick` every `interval_ms` until the handle is cancelled.
    fn repeat(&self, interval_ms: u32, tick: Box<dyn FnMut()>) -> TimerHandle;

    /// Run `fire` once after `delay_ms` unless cancelled first.
    fn once(&self, delay_ms: u32, fire: Box<dyn FnOnce()>) -> TimerHandle;
}

/// Backend-specific cancellation.
pub trait TimerGuard {
    fn cancel(self: Box<Self>);

    /// Let the timer run on without an owner.
    fn detach(self: Box<Self>);
}

#[must_use = "dropping a TimerHandle cancels the timer"]
pub struct TimerHandle {
    guard: Option<Box<dyn TimerGuard>>,
}

impl TimerHandle {
    pub fn new(guard: impl TimerGuard + 'static) -> Self {
        Self {
            guard: Some(Box::new(guard)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(guard) = self.guard.take() {
            guard.cancel();
        }
    }

    pub fn detach(mut self) {
        if let Some(guard) = self.guard.take() {
            guard.detach();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(guard) = self.guard.take() {
            guard.cancel();
        }
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("armed", &self.guard.is_some())
            .finish()
    }
}

// ── Manual clock ───────────────────────────────────────────────────

enum Task {
    Once(Box<dyn FnOnce()>),
    Repeat(Box<dyn FnMut()>),
}

struct PendingTimer {
    seq: u64,
    due: u64,
    interval: u64,
    cancelled: Rc<Cell<bool>>,
    task: Task,
}

#[derive(Default)]
struct Clock {
    now: u64,
    next_seq: u64,
    timers: Vec<PendingTimer>,
}

struct ManualGuard {
    cancelled: Rc<Cell<bool>>,
}

impl TimerGuard for ManualGuard {
    fn cancel(self: Box<Self>) {
        self.cancelled.set(true);
    }

    fn detach(self: Box<Self>) {}
}

/// Virtual-time scheduler. Clones share the same clock.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.clock.borrow().now
    }

    /// Timers that are scheduled and not cancelled.
    pub fn pending(&self) -> usize {
        self.clock
            .borrow()
            .timers
            .iter()
            .filter(|t| !t.cancelled.get())
            .count()
    }

    /// Move the clock forward by `ms`, firing everything that falls due, in
    /// due order (ties in scheduling order). Callbacks may schedule or cancel
    /// timers; the clock is not borrowed while they run.
    pub fn advance(&self, ms: u64) {
        let target = self.clock.borrow().now + ms;
        while let Some(mut timer) = self.take_next_due(target) {
            match timer.task {
                Task::Once(fire) => fire(),
                Task::Repeat(ref mut tick) => {
                    tick();
                    if !timer.cancelled.get() {
                        timer.due += timer.interval;
                        self.clock.borrow_mut().timers.push(timer);
                    }
                }
            }
        }
        self.clock.borrow_mut().now = target;
    }

    fn take_next_due(&self, target: u64) -> Option<PendingTimer> {
        let mut clock = self.clock.borrow_mut();
        clock.timers.retain(|t| !t.cancelled.get());
        let idx = clock
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= target)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, _)| i)?;
        let timer = clock.timers.swap_remove(idx);
        clock.now = timer.due;
        Some(timer)
    }

    fn schedule(&self, delay_ms: u32, interval: u64, task: Task) -> TimerHandle {
        let cancelled = Rc::new(Cell::new(false));
        let mut clock = self.clock.borrow_mut();
        let seq = clock.next_seq;
        clock.next_seq += 1;
        let due = clock.now + u64::from(delay_ms);
        clock.timers.push(PendingTimer {
            seq,
            due,
            interval,
            cancelled: Rc::clone(&cancelled),
            task,
        });
        TimerHandle::new(ManualGuard { cancelled })
    }
}

impl Scheduler for ManualScheduler {
    fn repeat(&self, interval_ms: u32, tick: Box<dyn FnMut()>) -> TimerHandle {
        let interval_ms = interval_ms.max(1);
        self.schedule(interval_ms, u64::from(interval_ms), Task::Repeat(tick))
    }

    fn once(&self, delay_ms: u32, fire: Box<dyn FnOnce()>) -> TimerHandle {
        self.schedule(delay_ms, 0, Task::Once(fire))
    }
}
