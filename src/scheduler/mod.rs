use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

pub type Task = Box<dyn FnOnce()>;

/// Cooperative deferral on the UI thread.
///
/// Tasks are fire-and-forget; a task that wakes after its owner is gone must
/// check for that itself.
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Task);
}

/// Browser `setTimeout` backed scheduler.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) {
        use wasm_bindgen::JsCast;

        let Some(win) = web_sys::window() else {
            log::debug!("no window; dropping deferred task");
            return;
        };

        let cb = wasm_bindgen::closure::Closure::once_into_js(move || task());
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            delay_ms.min(i32::MAX as u32) as i32,
        );
    }
}

/// Virtual-time task queue driven explicitly by its owner. A test utility:
/// nothing runs until `advance` or `run_until_idle` is called.
///
/// Tasks run in due-time order, ties in scheduling order. A task may
/// schedule further tasks; those run in the same `advance` call when they
/// fall due inside the window.
#[derive(Default)]
pub struct ManualScheduler {
    now_ms: Cell<u64>,
    seq: Cell<u64>,
    queue: RefCell<BTreeMap<(u64, u64), Task>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    fn pop_due(&self, until: u64) -> Option<(u64, Task)> {
        let mut queue = self.queue.borrow_mut();
        let key = *queue.keys().next()?;
        if key.0 > until {
            return None;
        }
        queue.remove(&key).map(|task| (key.0, task))
    }

    /// Moves the clock forward by `ms`, running everything that falls due.
    /// Returns the number of tasks run.
    pub fn advance(&self, ms: u64) -> usize {
        let until = self.now_ms.get().saturating_add(ms);
        let mut ran = 0;

        // The queue borrow is released before each task runs.
        while let Some((due, task)) = self.pop_due(until) {
            self.now_ms.set(due.max(self.now_ms.get()));
            task();
            ran += 1;
        }

        self.now_ms.set(until);
        ran
    }

    /// Runs tasks until the queue is empty, jumping the clock as needed.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while let Some((due, task)) = self.pop_due(u64::MAX) {
            self.now_ms.set(due.max(self.now_ms.get()));
            task();
            ran += 1;
        }
        ran
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        let due = self.now_ms.get().saturating_add(u64::from(delay_ms));
        self.queue.borrow_mut().insert((due, seq), task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log2 = log.clone();
        let make = move |name: &'static str| -> Task {
            let log = log2.clone();
            Box::new(move || log.borrow_mut().push(name))
        };
        (log, make)
    }

    #[test]
    fn test_runs_in_due_order_then_fifo() {
        let s = ManualScheduler::new();
        let (log, task) = recorder();

        s.schedule(50, task("late"));
        s.schedule(0, task("first"));
        s.schedule(0, task("second"));

        assert_eq!(s.advance(0), 2);
        assert_eq!(*log.borrow(), vec!["first", "second"]);

        assert_eq!(s.advance(49), 0);
        assert_eq!(s.advance(1), 1);
        assert_eq!(*log.borrow(), vec!["first", "second", "late"]);
        assert_eq!(s.now_ms(), 50);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn test_advance_stops_at_window() {
        let s = ManualScheduler::new();
        let (log, task) = recorder();

        s.schedule(100, task("a"));
        assert_eq!(s.advance(99), 0);
        assert!(log.borrow().is_empty());
        assert_eq!(s.advance(1), 1);
    }

    #[test]
    fn test_tasks_may_schedule_tasks() {
        let s = Rc::new(ManualScheduler::new());
        let (log, task) = recorder();

        let s2 = s.clone();
        let inner = task("inner");
        s.schedule(10, Box::new(move || s2.schedule(10, inner)));

        assert_eq!(s.advance(15), 1);
        assert!(log.borrow().is_empty());
        assert_eq!(s.advance(5), 1);
        assert_eq!(*log.borrow(), vec!["inner"]);
    }

    #[test]
    fn test_run_until_idle() {
        let s = ManualScheduler::new();
        let (log, task) = recorder();

        s.schedule(1000, task("b"));
        s.schedule(5, task("a"));

        assert_eq!(s.run_until_idle(), 2);
        assert_eq!(*log.borrow(), vec!["a", "b"]);
        assert_eq!(s.now_ms(), 1000);
    }
}
