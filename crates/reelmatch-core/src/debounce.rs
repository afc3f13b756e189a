//! Trailing-edge debounce.
//!
//! Every [`Debounce::call`] cancels the previously scheduled invocation and
//! schedules a new one with the latest arguments, so a burst of calls
//! collapses into a single call once the input has been quiet for the delay.

use crate::runtime::{Scheduler, TimerId};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Delay used by [`Debounce::with_default_delay`].
pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_millis(1000);

/// A debounced wrapper around a target function.
///
/// At most one invocation is pending at any time. Dropping the wrapper
/// cancels the pending invocation.
///
/// ```
/// use reelmatch_core::{Debounce, ManualScheduler};
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use std::time::Duration;
///
/// let clock = Rc::new(ManualScheduler::new());
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
/// let search = Debounce::new(clock.clone(), Duration::from_millis(500), move |q: String| {
///     sink.borrow_mut().push(q);
/// });
///
/// search.call("m".into());
/// search.call("ma".into());
/// clock.advance(Duration::from_millis(500));
/// assert_eq!(*seen.borrow(), vec!["ma".to_string()]);
/// ```
pub struct Debounce<A: 'static> {
    target: Rc<dyn Fn(A)>,
    delay: Duration,
    scheduler: Rc<dyn Scheduler>,
    pending: Rc<Cell<Option<TimerId>>>,
}

impl<A: 'static> Debounce<A> {
    /// Wrap `target` so it runs `delay` after the last call.
    pub fn new(
        scheduler: Rc<dyn Scheduler>,
        delay: Duration,
        target: impl Fn(A) + 'static,
    ) -> Self {
        Self {
            target: Rc::new(target),
            delay,
            scheduler,
            pending: Rc::new(Cell::new(None)),
        }
    }

    /// Wrap `target` with [`DEFAULT_DEBOUNCE_DELAY`].
    pub fn with_default_delay(scheduler: Rc<dyn Scheduler>, target: impl Fn(A) + 'static) -> Self {
        Self::new(scheduler, DEFAULT_DEBOUNCE_DELAY, target)
    }

    /// Schedule the target with `args`, superseding any pending call.
    pub fn call(&self, args: A) {
        self.cancel();

        let target = Rc::clone(&self.target);
        let pending = Rc::clone(&self.pending);
        let id = self.scheduler.set_timeout(
            self.delay,
            Box::new(move || {
                pending.set(None);
                target(args);
            }),
        );
        self.pending.set(Some(id));
    }

    /// Drop the pending call, if any.
    pub fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.clear_timeout(id);
        }
    }

    /// Whether a call is scheduled and has not fired yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    /// The quiet period.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl<A: 'static> Drop for Debounce<A> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<A: 'static> fmt::Debug for Debounce<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounce")
            .field("delay", &self.delay)
            .field("pending", &self.is_pending())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::ManualScheduler;
    use proptest::prelude::*;
    use std::cell::RefCell;

    type Calls = Rc<RefCell<Vec<(Duration, u32)>>>;

    fn debounced(delay_ms: u64) -> (Rc<ManualScheduler>, Debounce<u32>, Calls) {
        let clock = Rc::new(ManualScheduler::new());
        let calls: Calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let at = Rc::clone(&clock);
        let debounce = Debounce::new(clock.clone(), Duration::from_millis(delay_ms), move |n| {
            sink.borrow_mut().push((at.now(), n));
        });
        (clock, debounce, calls)
    }

    #[test]
    fn test_burst_collapses_to_last_call() {
        let (clock, debounce, calls) = debounced(500);

        debounce.call(1);
        clock.advance_to(Duration::from_millis(100));
        debounce.call(2);
        clock.advance_to(Duration::from_millis(200));
        debounce.call(3);

        clock.advance_to(Duration::from_millis(699));
        assert!(calls.borrow().is_empty());
        assert!(debounce.is_pending());

        clock.advance_to(Duration::from_millis(700));
        assert_eq!(*calls.borrow(), vec![(Duration::from_millis(700), 3)]);
        assert!(!debounce.is_pending());

        clock.advance(Duration::from_secs(10));
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_separate_quiet_periods_fire_separately() {
        let (clock, debounce, calls) = debounced(500);

        debounce.call(1);
        clock.advance(Duration::from_millis(600));
        debounce.call(2);
        clock.advance(Duration::from_millis(600));

        let values: Vec<u32> = calls.borrow().iter().map(|(_, n)| *n).collect();
        assert_eq!(values, vec![1, 2]);
    }

    #[test]
    fn test_no_calls_never_fires() {
        let (clock, _debounce, calls) = debounced(500);
        clock.advance(Duration::from_secs(5));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_cancel_drops_pending_call() {
        let (clock, debounce, calls) = debounced(500);
        debounce.call(7);
        debounce.cancel();
        assert!(!debounce.is_pending());
        assert_eq!(clock.pending_count(), 0);

        clock.advance(Duration::from_secs(1));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_drop_cancels_pending_call() {
        let (clock, debounce, calls) = debounced(500);
        debounce.call(7);
        drop(debounce);

        clock.advance(Duration::from_secs(1));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_default_delay() {
        let clock = Rc::new(ManualScheduler::new());
        let debounce = Debounce::with_default_delay(clock, |_: ()| {});
        assert_eq!(debounce.delay(), Duration::from_millis(1000));
        assert!(format!("{debounce:?}").contains("pending: false"));
    }

    proptest! {
        #[test]
        fn prop_burst_fires_once_with_last_args(
            gaps in prop::collection::vec(0u64..500, 1..20),
        ) {
            let (clock, debounce, calls) = debounced(500);
            let mut t = 0;
            for (i, gap) in gaps.iter().enumerate() {
                t += gap;
                clock.advance_to(Duration::from_millis(t));
                debounce.call(i as u32);
            }
            clock.advance(Duration::from_secs(2));

            let calls = calls.borrow();
            prop_assert_eq!(calls.len(), 1);
            prop_assert_eq!(calls[0].0, Duration::from_millis(t + 500));
            prop_assert_eq!(calls[0].1, (gaps.len() - 1) as u32);
        }
    }
}
