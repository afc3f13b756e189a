//! Reelmatch: pick two movies, compare their numbers side by side.
//!
//! Two search boxes query the OMDb API as the user types. Picking a result
//! fetches the full record, renders a summary card, and once both sides are
//! filled every statistic row is styled by which movie comes out ahead.
//!
//! The comparison logic ([`stats`], [`compare`], [`session`], [`controller`])
//! is plain Rust and runs natively. The [`browser`] module binds it to the
//! page when built for `wasm32`.
//!
//! # Browser usage
//!
//! ```javascript
//! import init, { App } from './reelmatch.js';
//!
//! await init();
//! const app = new App();                  // defaults
//! // const app = new App("debounce_ms: 300");
//! ```

pub mod browser;
pub mod compare;
pub mod config;
pub mod controller;
pub mod error;
pub mod omdb;
pub mod session;
pub mod stats;
pub mod template;

pub use compare::{compare_rows, compare_stats, compare_values, RowOutcome, Side};
pub use config::{ReelmatchConfig, DEFAULT_API_BASE, DEFAULT_API_KEY};
pub use controller::{ComparisonController, MovieSource, SummaryView};
pub use error::{ConfigError, FetchError};
pub use omdb::{MovieApi, MovieDetail, MovieSummary, OmdbClient};
pub use session::{ComparisonSession, SelectionTicket};
pub use stats::{movie_stats, Stat, StatKind};

#[cfg(target_arch = "wasm32")]
pub use browser::App;
pub use browser::MountError;
