//! Selection handling: detail fetch, summary rendering, comparison.
//!
//! [`ComparisonController`] owns the session and is shared by both search
//! boxes through [`MovieSource`], the [`OptionSource`] each autocomplete is
//! built with.

use crate::compare::{RowOutcome, Side};
use crate::omdb::{MovieApi, MovieDetail, MovieSummary};
use crate::session::{ComparisonSession, SelectionTicket};
use crate::template::{movie_template, render_option};
use futures::future::FutureExt;
use reelmatch_core::{FetchError, LocalBoxFuture, Spawner};
use reelmatch_widgets::OptionSource;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Where summaries and comparison results are shown.
pub trait SummaryView {
    /// Hide the "pick a movie on each side" hint.
    fn hide_tutorial(&self);

    /// Replace the summary area for `side`.
    fn show_summary(&self, side: Side, html: &str);

    /// Style every stat row of both summaries from `outcomes`, positionally.
    fn mark_rows(&self, outcomes: &[RowOutcome]);
}

/// Coordinates both sides of the comparison.
pub struct ComparisonController<A, V> {
    api: A,
    view: V,
    session: RefCell<ComparisonSession>,
    spawner: Rc<dyn Spawner>,
}

impl<A: MovieApi + 'static, V: SummaryView + 'static> ComparisonController<A, V> {
    /// Create a shared controller.
    pub fn new(api: A, view: V, spawner: Rc<dyn Spawner>) -> Rc<Self> {
        Rc::new(Self {
            api,
            view,
            session: RefCell::new(ComparisonSession::new()),
            spawner,
        })
    }

    /// The option source for one side's search box.
    #[must_use]
    pub fn source(self: &Rc<Self>, side: Side) -> MovieSource<A, V> {
        MovieSource {
            side,
            controller: Rc::clone(self),
        }
    }

    /// A movie was picked on `side`: fetch its details in the background.
    pub fn select(self: &Rc<Self>, side: Side, movie: &MovieSummary) {
        self.view.hide_tutorial();

        let ticket = self.session.borrow_mut().begin_selection(side);
        let detail = self.api.detail(&movie.imdb_id);
        let imdb_id = movie.imdb_id.clone();
        let this = Rc::clone(self);
        self.spawner.spawn(
            async move {
                match detail.await {
                    Ok(detail) => this.finish_selection(ticket, detail),
                    Err(err) => {
                        tracing::warn!(%err, %side, imdb_id = %imdb_id, "movie detail failed");
                    }
                }
            }
            .boxed_local(),
        );
    }

    fn finish_selection(&self, ticket: SelectionTicket, detail: MovieDetail) {
        let side = ticket.side();
        let html = movie_template(&detail);
        if !self.session.borrow_mut().record(ticket, detail) {
            tracing::debug!(%side, "discarding superseded movie detail");
            return;
        }
        self.view.show_summary(side, &html);

        let outcomes = self.session.borrow().comparison();
        if let Some(outcomes) = outcomes {
            tracing::debug!(rows = outcomes.len(), "running comparison");
            self.view.mark_rows(&outcomes);
        }
    }

    /// Current selections.
    pub fn session(&self) -> Ref<'_, ComparisonSession> {
        self.session.borrow()
    }

    /// The movie API.
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// The summary view.
    pub const fn view(&self) -> &V {
        &self.view
    }
}

/// [`OptionSource`] for one side of the comparison.
pub struct MovieSource<A, V> {
    side: Side,
    controller: Rc<ComparisonController<A, V>>,
}

impl<A, V> MovieSource<A, V> {
    /// Side this source feeds.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }
}

impl<A: MovieApi + 'static, V: SummaryView + 'static> OptionSource for MovieSource<A, V> {
    type Item = MovieSummary;

    fn render_option(&self, item: &MovieSummary) -> String {
        render_option(item)
    }

    fn input_value(&self, item: &MovieSummary) -> String {
        item.title.clone()
    }

    fn on_option_select(&self, item: &MovieSummary) {
        self.controller.select(self.side, item);
    }

    fn fetch(&self, query: &str) -> LocalBoxFuture<'static, Result<Vec<MovieSummary>, FetchError>> {
        self.controller.api().search(query)
    }
}
