//! Runtime services for components: timers, task spawning and dispatch.
//!
//! The browser provides `setTimeout` and a microtask queue; natively the same
//! roles are played by [`ManualScheduler`] (a virtual clock) and a
//! `futures` [`LocalSpawner`]. Components never see the difference.

use crate::state::{Command, Component};
use futures::executor::LocalSpawner;
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Handle for a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// One-shot timer service.
pub trait Scheduler {
    /// Run `task` once after `delay`.
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId;

    /// Cancel a timer. Unknown or already-fired ids are ignored.
    fn clear_timeout(&self, id: TimerId);
}

impl<S: Scheduler + ?Sized> Scheduler for Rc<S> {
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId {
        (**self).set_timeout(delay, task)
    }

    fn clear_timeout(&self, id: TimerId) {
        (**self).clear_timeout(id);
    }
}

struct PendingTimer {
    id: TimerId,
    due: Duration,
    task: Box<dyn FnOnce()>,
}

/// Deterministic scheduler driven by a virtual clock.
///
/// Time only moves when [`advance`](Self::advance) is called. Timers due at
/// the same instant fire in the order they were scheduled.
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    pending: RefCell<Vec<PendingTimer>>,
}

impl ManualScheduler {
    /// Create a scheduler with the clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// Number of timers scheduled but not yet fired.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Move the clock forward, firing every timer that becomes due.
    ///
    /// Each task runs with the clock set to its due time, so tasks that
    /// schedule further timers see a consistent `now`.
    pub fn advance(&self, delta: Duration) {
        let target = self.now.get() + delta;
        while let Some(timer) = self.pop_due(target) {
            self.now.set(timer.due);
            (timer.task)();
        }
        self.now.set(target);
    }

    /// Move the clock to an absolute time. Times in the past are ignored.
    pub fn advance_to(&self, instant: Duration) {
        if let Some(delta) = instant.checked_sub(self.now.get()) {
            self.advance(delta);
        }
    }

    fn pop_due(&self, target: Duration) -> Option<PendingTimer> {
        let mut pending = self.pending.borrow_mut();
        let index = pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= target)
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(i, _)| i)?;
        Some(pending.remove(index))
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId {
        let id = TimerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.pending.borrow_mut().push(PendingTimer {
            id,
            due: self.now.get() + delay,
            task,
        });
        id
    }

    fn clear_timeout(&self, id: TimerId) {
        self.pending.borrow_mut().retain(|t| t.id != id);
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("now", &self.now.get())
            .field("pending", &self.pending_count())
            .finish()
    }
}

/// Spawns futures on the UI thread.
pub trait Spawner {
    /// Spawn a future; its output is discarded.
    fn spawn(&self, future: LocalBoxFuture<'static, ()>);
}

impl<S: Spawner + ?Sized> Spawner for Rc<S> {
    fn spawn(&self, future: LocalBoxFuture<'static, ()>) {
        (**self).spawn(future);
    }
}

impl Spawner for LocalSpawner {
    fn spawn(&self, future: LocalBoxFuture<'static, ()>) {
        if let Err(err) = self.spawn_local(future) {
            tracing::warn!(%err, "local executor rejected task");
        }
    }
}

/// Type alias for state change observers.
type Observer<C> = Box<dyn Fn(&C)>;

/// Owns a component and executes the commands its updates return.
///
/// Cloning a dispatcher yields another handle to the same component.
pub struct Dispatcher<C: Component> {
    component: Rc<RefCell<C>>,
    spawner: Rc<dyn Spawner>,
    observers: Rc<RefCell<Vec<Observer<C>>>>,
}

impl<C: Component> Clone for Dispatcher<C> {
    fn clone(&self) -> Self {
        Self {
            component: Rc::clone(&self.component),
            spawner: Rc::clone(&self.spawner),
            observers: Rc::clone(&self.observers),
        }
    }
}

impl<C: Component + 'static> Dispatcher<C> {
    /// Create a dispatcher for `component`.
    pub fn new(component: C, spawner: Rc<dyn Spawner>) -> Self {
        Self {
            component: Rc::new(RefCell::new(component)),
            spawner,
            observers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Register an observer called after every update.
    ///
    /// Observers receive the component by shared reference and must not
    /// dispatch synchronously.
    pub fn subscribe(&self, observer: impl Fn(&C) + 'static) {
        self.observers.borrow_mut().push(Box::new(observer));
    }

    /// Number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Deliver a message, notify observers, then run the resulting command.
    pub fn dispatch(&self, msg: C::Message) {
        let command = self.component.borrow_mut().update(msg);
        self.notify();
        self.execute(command);
    }

    /// Read the component.
    pub fn with<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        f(&self.component.borrow())
    }

    fn notify(&self) {
        let component = self.component.borrow();
        for observer in self.observers.borrow().iter() {
            observer(&component);
        }
    }

    fn execute(&self, command: Command<C::Message>) {
        match command {
            Command::None => {}
            Command::Task(future) => {
                let this = self.clone();
                self.spawner.spawn(Box::pin(async move {
                    let msg = future.await;
                    this.dispatch(msg);
                }));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::LocalPool;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn FnOnce()>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let make = move |name: &'static str| -> Box<dyn FnOnce()> {
            let sink = Rc::clone(&sink);
            Box::new(move || sink.borrow_mut().push(name))
        };
        (log, make)
    }

    // =========================================================================
    // ManualScheduler
    // =========================================================================

    #[test]
    fn test_manual_scheduler_fires_when_due() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();
        scheduler.set_timeout(Duration::from_millis(500), task("a"));

        scheduler.advance(Duration::from_millis(499));
        assert!(log.borrow().is_empty());
        assert_eq!(scheduler.pending_count(), 1);

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(*log.borrow(), vec!["a"]);
        assert_eq!(scheduler.pending_count(), 0);
        assert_eq!(scheduler.now(), Duration::from_millis(500));
    }

    #[test]
    fn test_manual_scheduler_orders_by_due_then_id() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();
        scheduler.set_timeout(Duration::from_millis(300), task("late"));
        scheduler.set_timeout(Duration::from_millis(100), task("first"));
        scheduler.set_timeout(Duration::from_millis(100), task("second"));

        scheduler.advance(Duration::from_secs(1));
        assert_eq!(*log.borrow(), vec!["first", "second", "late"]);
    }

    #[test]
    fn test_manual_scheduler_clear_timeout() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();
        let id = scheduler.set_timeout(Duration::from_millis(10), task("cleared"));
        scheduler.set_timeout(Duration::from_millis(20), task("kept"));
        scheduler.clear_timeout(id);
        scheduler.clear_timeout(TimerId(999));

        scheduler.advance(Duration::from_millis(50));
        assert_eq!(*log.borrow(), vec!["kept"]);
    }

    #[test]
    fn test_manual_scheduler_task_can_schedule() {
        let scheduler = Rc::new(ManualScheduler::new());
        let fired_at = Rc::new(Cell::new(None));

        let inner = Rc::clone(&scheduler);
        let slot = Rc::clone(&fired_at);
        scheduler.set_timeout(
            Duration::from_millis(100),
            Box::new(move || {
                let clock = Rc::clone(&inner);
                inner.set_timeout(
                    Duration::from_millis(50),
                    Box::new(move || slot.set(Some(clock.now()))),
                );
            }),
        );

        scheduler.advance(Duration::from_millis(200));
        assert_eq!(fired_at.get(), Some(Duration::from_millis(150)));
        assert_eq!(scheduler.now(), Duration::from_millis(200));
    }

    #[test]
    fn test_manual_scheduler_advance_to_past_is_noop() {
        let scheduler = ManualScheduler::new();
        scheduler.advance(Duration::from_millis(100));
        scheduler.advance_to(Duration::from_millis(50));
        assert_eq!(scheduler.now(), Duration::from_millis(100));
        assert!(format!("{scheduler:?}").contains("ManualScheduler"));
    }

    // =========================================================================
    // Dispatcher
    // =========================================================================

    #[derive(Default)]
    struct Loader {
        loaded: Vec<String>,
    }

    enum LoaderMessage {
        Request(&'static str),
        Loaded(String),
    }

    impl Component for Loader {
        type Message = LoaderMessage;

        fn update(&mut self, msg: Self::Message) -> Command<Self::Message> {
            match msg {
                LoaderMessage::Request(name) => {
                    Command::task(async move { LoaderMessage::Loaded(name.to_uppercase()) })
                }
                LoaderMessage::Loaded(value) => {
                    self.loaded.push(value);
                    Command::None
                }
            }
        }
    }

    #[test]
    fn test_dispatcher_runs_tasks_and_feeds_results_back() {
        let mut pool = LocalPool::new();
        let dispatcher = Dispatcher::new(Loader::default(), Rc::new(pool.spawner()));

        dispatcher.dispatch(LoaderMessage::Request("a"));
        dispatcher.dispatch(LoaderMessage::Request("b"));
        assert!(dispatcher.with(|l| l.loaded.is_empty()));

        pool.run_until_stalled();
        assert_eq!(dispatcher.with(|l| l.loaded.clone()), vec!["A", "B"]);
    }

    #[test]
    fn test_dispatcher_notifies_observers_after_each_update() {
        let pool = LocalPool::new();
        let dispatcher = Dispatcher::new(Loader::default(), Rc::new(pool.spawner()));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        dispatcher.subscribe(move |l: &Loader| sink.borrow_mut().push(l.loaded.len()));
        assert_eq!(dispatcher.observer_count(), 1);

        dispatcher.dispatch(LoaderMessage::Loaded("x".into()));
        dispatcher.clone().dispatch(LoaderMessage::Loaded("y".into()));
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }
}
