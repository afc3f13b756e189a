//! Core types and traits for reelmatch.
//!
//! This crate provides the UI-agnostic runtime the widgets are built on:
//! - Elm-style components: [`Component`], [`Command`]
//! - Runtime services: [`Scheduler`], [`Spawner`], [`Dispatcher`]
//! - Trailing-edge [`Debounce`]
//! - [`FetchError`] for asynchronous data sources

mod debounce;
mod error;
pub mod runtime;
mod state;

pub use debounce::{Debounce, DEFAULT_DEBOUNCE_DELAY};
pub use error::FetchError;
pub use futures::future::LocalBoxFuture;
pub use runtime::{Dispatcher, ManualScheduler, Scheduler, Spawner, TimerId};
pub use state::{Command, Component};
