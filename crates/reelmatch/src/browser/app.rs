//! WASM application entry point.

use super::autocomplete::MountedAutocomplete;
use super::logging::init_logging;
use super::scheduler::{BrowserScheduler, BrowserSpawner};
use super::view::DomSummaryView;
use super::{
    MountError, LEFT_AUTOCOMPLETE_ID, LEFT_SUMMARY_ID, RIGHT_AUTOCOMPLETE_ID, RIGHT_SUMMARY_ID,
    TUTORIAL_SELECTOR,
};
use crate::compare::Side;
use crate::config::ReelmatchConfig;
use crate::controller::{ComparisonController, MovieSource};
use crate::omdb::OmdbClient;
use reelmatch_core::{Scheduler, Spawner};
use reelmatch_widgets::Autocomplete;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{window, Document, Element};

type Controller = ComparisonController<OmdbClient, DomSummaryView>;
type SearchBox = MountedAutocomplete<MovieSource<OmdbClient, DomSummaryView>>;

fn element(document: &Document, id: &str) -> Result<Element, MountError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| MountError::MissingElement(format!("#{id}")))
}

/// The comparison widget mounted into the current page.
#[wasm_bindgen]
pub struct App {
    controller: Rc<Controller>,
    left: SearchBox,
    right: SearchBox,
}

#[wasm_bindgen]
impl App {
    /// Mount into the page, optionally configured by a YAML document.
    #[wasm_bindgen(constructor)]
    pub fn new(config_yaml: Option<String>) -> Result<App, JsValue> {
        let config = ReelmatchConfig::from_yaml(config_yaml.as_deref().unwrap_or(""))
            .map_err(MountError::from)?;
        Ok(Self::mount(&config)?)
    }

    /// Whether both sides have a movie.
    pub fn is_complete(&self) -> bool {
        self.controller.session().is_complete()
    }

    /// Title selected on `side` (`"left"` or `"right"`).
    pub fn selection_title(&self, side: &str) -> Option<String> {
        let side = Side::from_tag(side)?;
        self.controller
            .session()
            .selection(side)
            .map(|movie| movie.title.clone())
    }

    /// Current text of a side's search input.
    pub fn input_text(&self, side: &str) -> Option<String> {
        Side::from_tag(side).map(|side| self.search_box(side).input().value())
    }
}

impl App {
    /// Mount with an already validated configuration.
    pub fn mount(config: &ReelmatchConfig) -> Result<Self, MountError> {
        let window = window().ok_or(MountError::NoWindow)?;
        let document = window.document().ok_or(MountError::NoDocument)?;

        let tutorial = document
            .query_selector(TUTORIAL_SELECTOR)
            .map_err(|e| MountError::js(&e))?;
        let view = DomSummaryView::new(
            element(&document, LEFT_SUMMARY_ID)?,
            element(&document, RIGHT_SUMMARY_ID)?,
            tutorial,
        );

        let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler::new(window));
        let spawner: Rc<dyn Spawner> = Rc::new(BrowserSpawner);
        let controller = ComparisonController::new(OmdbClient::new(config), view, Rc::clone(&spawner));

        let mount_side = |side: Side, id: &str| {
            MountedAutocomplete::mount(
                element(&document, id)?,
                Autocomplete::new(controller.source(side), config.autocomplete()),
                Rc::clone(&scheduler),
                Rc::clone(&spawner),
            )
        };
        let left = mount_side(Side::Left, LEFT_AUTOCOMPLETE_ID)?;
        let right = mount_side(Side::Right, RIGHT_AUTOCOMPLETE_ID)?;

        tracing::info!(api = %config.api_base, "reelmatch mounted");
        Ok(Self {
            controller,
            left,
            right,
        })
    }

    /// The search box for `side`.
    #[must_use]
    pub const fn search_box(&self, side: Side) -> &SearchBox {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// The shared controller.
    #[must_use]
    pub const fn controller(&self) -> &Rc<Controller> {
        &self.controller
    }
}

/// Install the panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    init_logging();
}
