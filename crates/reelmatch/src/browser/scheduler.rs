//! `setTimeout`-backed [`Scheduler`] and `spawn_local`-backed [`Spawner`].

use reelmatch_core::{LocalBoxFuture, Scheduler, Spawner, TimerId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

struct Armed {
    _callback: Closure<dyn FnMut()>,
    done: Rc<Cell<bool>>,
}

/// Timers on the window's `setTimeout`.
///
/// Callbacks are owned here until they have run or been cleared; finished
/// ones are released on the next `set_timeout`.
pub struct BrowserScheduler {
    window: Window,
    armed: RefCell<HashMap<u64, Armed>>,
}

impl BrowserScheduler {
    /// Scheduler on `window`.
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self {
            window,
            armed: RefCell::new(HashMap::new()),
        }
    }

    fn release_finished(&self) {
        self.armed.borrow_mut().retain(|_, armed| !armed.done.get());
    }
}

impl Scheduler for BrowserScheduler {
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId {
        self.release_finished();

        let done = Rc::new(Cell::new(false));
        let flag = Rc::clone(&done);
        let mut task = Some(task);
        let callback = Closure::<dyn FnMut()>::new(move || {
            if let Some(task) = task.take() {
                task();
            }
            // Only after the task: a finished callback may be dropped.
            flag.set(true);
        });

        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                millis,
            ) {
            Ok(handle) => {
                let id = TimerId(u64::from(handle.unsigned_abs()));
                self.armed.borrow_mut().insert(
                    id.0,
                    Armed {
                        _callback: callback,
                        done,
                    },
                );
                id
            }
            Err(err) => {
                tracing::warn!(?err, "setTimeout failed");
                TimerId(0)
            }
        }
    }

    fn clear_timeout(&self, id: TimerId) {
        if let Ok(handle) = i32::try_from(id.0) {
            self.window.clear_timeout_with_handle(handle);
        }
        self.armed.borrow_mut().remove(&id.0);
    }
}

/// Runs futures on the browser's microtask queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSpawner;

impl Spawner for BrowserSpawner {
    fn spawn(&self, future: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(future);
    }
}
