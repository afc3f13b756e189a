//! Autocomplete search box with a dropdown of results.
//!
//! The widget is headless: [`Autocomplete`] is a [`Component`] holding the
//! input text and dropdown state, and [`AutocompleteDriver`] wires it to a
//! debounce timer and a task spawner. A host (the browser module, or a test)
//! forwards input, option clicks and document clicks to the driver and
//! renders the component from an observer.
//!
//! Every search is tagged with a sequence number. A response is applied only
//! if it answers the most recently issued search; anything older is dropped.

use crate::markup::escape_html;
use reelmatch_core::{
    Command, Component, Debounce, Dispatcher, FetchError, LocalBoxFuture, Scheduler, Spawner,
};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use std::time::Duration;

/// Class toggled on the dropdown container while results are shown.
pub const ACTIVE_CLASS: &str = "is-active";
/// Class of a single dropdown entry.
pub const OPTION_CLASS: &str = "dropdown-item";
/// Attribute carrying an entry's position in the result list.
pub const OPTION_INDEX_ATTR: &str = "data-index";

/// The capabilities an autocomplete needs from its surroundings.
pub trait OptionSource {
    /// A search result
    type Item: Clone + 'static;

    /// Markup for one dropdown entry.
    fn render_option(&self, item: &Self::Item) -> String;

    /// Text placed in the input once `item` is chosen.
    fn input_value(&self, item: &Self::Item) -> String;

    /// Called synchronously when the user picks `item`.
    fn on_option_select(&self, item: &Self::Item);

    /// Search for `query`.
    fn fetch(&self, query: &str) -> LocalBoxFuture<'static, Result<Vec<Self::Item>, FetchError>>;
}

/// Autocomplete configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteConfig {
    /// Label shown above the input
    pub label: String,
    /// Quiet period before a search is issued, in milliseconds
    pub debounce_ms: u64,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            label: "Search".to_string(),
            debounce_ms: 500,
        }
    }
}

impl AutocompleteConfig {
    /// Set the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the debounce delay in milliseconds.
    #[must_use]
    pub const fn debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Debounce delay.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// One rendered dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownEntry<T> {
    /// The result backing this entry
    pub item: T,
    /// Markup produced by [`OptionSource::render_option`]
    pub markup: String,
}

/// Messages understood by [`Autocomplete`].
#[derive(Debug)]
pub enum AutocompleteMsg<T> {
    /// The input settled on this text; search for it
    Search(String),
    /// A search finished
    Resolved {
        /// Sequence number of the search
        seq: u64,
        /// Results or failure
        outcome: Result<Vec<T>, FetchError>,
    },
    /// The entry at this index was clicked
    Pick(usize),
    /// A click landed somewhere in the document
    DocumentClick {
        /// Whether the click target is inside the widget root
        inside_root: bool,
    },
}

/// Autocomplete state.
pub struct Autocomplete<S: OptionSource> {
    source: S,
    config: AutocompleteConfig,
    input_text: String,
    entries: Vec<DropdownEntry<S::Item>>,
    active: bool,
    issued: u64,
    revision: u64,
    last_error: Option<FetchError>,
}

impl<S: OptionSource> Autocomplete<S> {
    /// Create an autocomplete over `source`.
    pub fn new(source: S, config: AutocompleteConfig) -> Self {
        Self {
            source,
            config,
            input_text: String::new(),
            entries: Vec::new(),
            active: false,
            issued: 0,
            revision: 0,
            last_error: None,
        }
    }

    /// Markup that replaces the root's contents on mount: a label, the text
    /// input and an inactive dropdown.
    #[must_use]
    pub fn skeleton_html(&self) -> String {
        format!(
            r#"<label><strong>{}</strong></label>
<input class="input">
<div class="dropdown">
  <div class="dropdown-menu">
    <div class="dropdown-content results"></div>
  </div>
</div>"#,
            escape_html(&self.config.label)
        )
    }

    /// Markup for the dropdown content, one anchor per entry in result order.
    #[must_use]
    pub fn entries_html(&self) -> String {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                format!(
                    r#"<a class="{OPTION_CLASS}" {OPTION_INDEX_ATTR}="{i}">{}</a>"#,
                    entry.markup
                )
            })
            .collect()
    }

    /// Current input text.
    #[must_use]
    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    /// Entries backing the dropdown.
    #[must_use]
    pub fn entries(&self) -> &[DropdownEntry<S::Item>] {
        &self.entries
    }

    /// Whether the dropdown is visible.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Sequence number of the most recent search.
    #[must_use]
    pub const fn latest_seq(&self) -> u64 {
        self.issued
    }

    /// Incremented whenever the entry list is rebuilt.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Failure of the most recent applied search, if it failed.
    #[must_use]
    pub const fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    /// Configuration.
    #[must_use]
    pub const fn config(&self) -> &AutocompleteConfig {
        &self.config
    }

    /// The injected source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    fn replace_entries(&mut self, items: Vec<S::Item>) {
        self.entries = items
            .into_iter()
            .map(|item| DropdownEntry {
                markup: self.source.render_option(&item),
                item,
            })
            .collect();
        self.revision += 1;
    }

    fn resolve(&mut self, seq: u64, outcome: Result<Vec<S::Item>, FetchError>) {
        if seq != self.issued {
            tracing::debug!(seq, latest = self.issued, "discarding stale search response");
            return;
        }

        // An empty or failed search only hides the dropdown; the previous
        // entries stay rendered underneath.
        match outcome {
            Ok(items) if items.is_empty() => {
                self.last_error = None;
                self.active = false;
            }
            Ok(items) => {
                self.last_error = None;
                self.replace_entries(items);
                self.active = true;
            }
            Err(err) => {
                tracing::warn!(%err, query = %self.input_text, "search failed");
                self.last_error = Some(err);
                self.active = false;
            }
        }
    }

    fn pick(&mut self, index: usize) {
        let Some(entry) = self.entries.get(index) else {
            tracing::debug!(index, "pick outside the result list ignored");
            return;
        };
        let item = entry.item.clone();
        self.input_text = self.source.input_value(&item);
        self.active = false;
        self.source.on_option_select(&item);
    }
}

impl<S: OptionSource> Component for Autocomplete<S> {
    type Message = AutocompleteMsg<S::Item>;

    fn update(&mut self, msg: Self::Message) -> Command<Self::Message> {
        match msg {
            AutocompleteMsg::Search(query) => {
                self.issued += 1;
                let seq = self.issued;
                let fetch = self.source.fetch(&query);
                self.input_text = query;
                return Command::task(async move {
                    AutocompleteMsg::Resolved {
                        seq,
                        outcome: fetch.await,
                    }
                });
            }
            AutocompleteMsg::Resolved { seq, outcome } => self.resolve(seq, outcome),
            AutocompleteMsg::Pick(index) => self.pick(index),
            AutocompleteMsg::DocumentClick { inside_root } => {
                if !inside_root {
                    self.active = false;
                }
            }
        }
        Command::None
    }
}

/// Connects an [`Autocomplete`] to a debounce timer and a task spawner.
pub struct AutocompleteDriver<S: OptionSource + 'static> {
    dispatcher: Dispatcher<Autocomplete<S>>,
    search: Debounce<String>,
}

impl<S: OptionSource + 'static> AutocompleteDriver<S> {
    /// Drive `component`, debouncing input by its configured delay.
    pub fn new(
        component: Autocomplete<S>,
        scheduler: Rc<dyn Scheduler>,
        spawner: Rc<dyn Spawner>,
    ) -> Self {
        let delay = component.config().delay();
        let dispatcher = Dispatcher::new(component, spawner);
        let target = dispatcher.clone();
        let search = Debounce::new(scheduler, delay, move |query: String| {
            target.dispatch(AutocompleteMsg::Search(query));
        });
        Self { dispatcher, search }
    }

    /// The input's value changed.
    pub fn input(&self, text: impl Into<String>) {
        self.search.call(text.into());
    }

    /// The entry at `index` was clicked.
    pub fn click_option(&self, index: usize) {
        self.dispatcher.dispatch(AutocompleteMsg::Pick(index));
    }

    /// A click happened somewhere in the document.
    pub fn document_click(&self, inside_root: bool) {
        self.dispatcher
            .dispatch(AutocompleteMsg::DocumentClick { inside_root });
    }

    /// Whether a debounced search is waiting to fire.
    #[must_use]
    pub fn search_pending(&self) -> bool {
        self.search.is_pending()
    }

    /// Register an observer called after every state change.
    pub fn subscribe(&self, observer: impl Fn(&Autocomplete<S>) + 'static) {
        self.dispatcher.subscribe(observer);
    }

    /// Read the component.
    pub fn with<R>(&self, f: impl FnOnce(&Autocomplete<S>) -> R) -> R {
        self.dispatcher.with(f)
    }

    /// The underlying dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher<Autocomplete<S>> {
        &self.dispatcher
    }
}
