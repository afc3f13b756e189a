//! Component state management.
//!
//! Components follow the Elm Architecture: `State + Message → (State, Command)`.
//! Side effects never run inside `update`; they are returned as a [`Command`]
//! and executed by a [`Dispatcher`](crate::Dispatcher).
//!
//! # Examples
//!
//! ```
//! use reelmatch_core::{Command, Component};
//!
//! #[derive(Default)]
//! struct Clicks {
//!     count: u32,
//! }
//!
//! enum ClickMessage {
//!     Clicked,
//!     Reset,
//! }
//!
//! impl Component for Clicks {
//!     type Message = ClickMessage;
//!
//!     fn update(&mut self, msg: Self::Message) -> Command<Self::Message> {
//!         match msg {
//!             ClickMessage::Clicked => self.count += 1,
//!             ClickMessage::Reset => self.count = 0,
//!         }
//!         Command::None
//!     }
//! }
//!
//! let mut clicks = Clicks::default();
//! clicks.update(ClickMessage::Clicked);
//! assert_eq!(clicks.count, 1);
//! ```

use futures::future::{FutureExt, LocalBoxFuture};
use std::fmt;
use std::future::Future;

/// A UI component driven by messages.
///
/// Everything runs on the UI thread, so neither the component nor its
/// messages need to be `Send`.
pub trait Component {
    /// Message type for state updates
    type Message: 'static;

    /// Update state in response to a message.
    ///
    /// Returns a command for side effects (network fetches and the like).
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;
}

/// Commands for side effects.
#[derive(Default)]
pub enum Command<M> {
    /// No command
    #[default]
    None,
    /// Run a local future and feed its output back as a message
    Task(LocalBoxFuture<'static, M>),
}

impl<M: 'static> Command<M> {
    /// Create a task command from an async block.
    pub fn task<F>(future: F) -> Self
    where
        F: Future<Output = M> + 'static,
    {
        Self::Task(future.boxed_local())
    }

    /// Check if this is the none command.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl<M> fmt::Debug for Command<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Task(_) => f.write_str("Task(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[derive(Debug, Default)]
    struct Counter {
        count: i32,
    }

    #[derive(Debug)]
    enum CounterMessage {
        Increment,
        Set(i32),
        LoadLater(i32),
    }

    impl Component for Counter {
        type Message = CounterMessage;

        fn update(&mut self, msg: Self::Message) -> Command<Self::Message> {
            match msg {
                CounterMessage::Increment => self.count += 1,
                CounterMessage::Set(value) => self.count = value,
                CounterMessage::LoadLater(value) => {
                    return Command::task(async move { CounterMessage::Set(value) });
                }
            }
            Command::None
        }
    }

    #[test]
    fn test_update_applies_message() {
        let mut counter = Counter::default();
        assert!(counter.update(CounterMessage::Increment).is_none());
        assert!(counter.update(CounterMessage::Increment).is_none());
        assert_eq!(counter.count, 2);
    }

    #[test]
    fn test_update_returns_task() {
        let mut counter = Counter::default();
        let cmd = counter.update(CounterMessage::LoadLater(9));
        assert!(!cmd.is_none());
        assert_eq!(format!("{cmd:?}"), "Task(..)");
        assert_eq!(counter.count, 0);

        let Command::Task(fut) = cmd else {
            panic!("expected task");
        };
        let msg = block_on(fut);
        counter.update(msg);
        assert_eq!(counter.count, 9);
    }

    #[test]
    fn test_command_default_is_none() {
        let cmd: Command<()> = Command::default();
        assert!(cmd.is_none());
        assert_eq!(format!("{cmd:?}"), "None");
    }
}
