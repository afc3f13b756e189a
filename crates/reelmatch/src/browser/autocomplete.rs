//! An [`Autocomplete`] attached to a DOM element.

use super::listener::EventListener;
use super::MountError;
use reelmatch_core::{Scheduler, Spawner};
use reelmatch_widgets::{
    Autocomplete, AutocompleteDriver, OptionSource, ACTIVE_CLASS, OPTION_CLASS, OPTION_INDEX_ATTR,
};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlInputElement, Node};

fn query(root: &Element, selector: &str) -> Result<Element, MountError> {
    root.query_selector(selector)
        .map_err(|e| MountError::js(&e))?
        .ok_or_else(|| MountError::MissingElement(selector.to_string()))
}

/// Index of the dropdown entry an event landed in, if any.
fn option_index(event: &Event) -> Option<usize> {
    let target: Element = event.target()?.dyn_into().ok()?;
    let option = target.closest(&format!(".{OPTION_CLASS}")).ok()??;
    option.get_attribute(OPTION_INDEX_ATTR)?.parse().ok()
}

/// Search box mounted into a root element.
///
/// Holds the listeners for its input, its dropdown and the document. Dropping
/// it detaches them all.
pub struct MountedAutocomplete<S: OptionSource + 'static> {
    root: Element,
    input: HtmlInputElement,
    driver: Rc<AutocompleteDriver<S>>,
    listeners: Vec<EventListener>,
}

impl<S: OptionSource + 'static> MountedAutocomplete<S> {
    /// Replace `root`'s contents with the search box and wire its events.
    pub fn mount(
        root: Element,
        component: Autocomplete<S>,
        scheduler: Rc<dyn Scheduler>,
        spawner: Rc<dyn Spawner>,
    ) -> Result<Self, MountError> {
        root.set_inner_html(&component.skeleton_html());
        let input: HtmlInputElement = query(&root, "input")?
            .dyn_into()
            .map_err(|_| MountError::MissingElement("input".into()))?;
        let dropdown = query(&root, ".dropdown")?;
        let results = query(&root, ".results")?;
        let document = root.owner_document().ok_or(MountError::NoDocument)?;

        let driver = Rc::new(AutocompleteDriver::new(component, scheduler, spawner));

        let rendered = Cell::new(None);
        let menu = results.clone();
        driver.subscribe(move |ac: &Autocomplete<S>| {
            if rendered.get() != Some(ac.revision()) {
                menu.set_inner_html(&ac.entries_html());
                rendered.set(Some(ac.revision()));
            }
            let classes = dropdown.class_list();
            let toggled = if ac.is_active() {
                classes.add_1(ACTIVE_CLASS)
            } else {
                classes.remove_1(ACTIVE_CLASS)
            };
            if let Err(err) = toggled {
                tracing::warn!(?err, "dropdown class update failed");
            }
        });

        let mut listeners = Vec::with_capacity(3);
        {
            let driver = Rc::clone(&driver);
            let field = input.clone();
            listeners.push(EventListener::new(&input, "input", move |_| {
                driver.input(field.value());
            })?);
        }
        {
            let driver = Rc::clone(&driver);
            let field = input.clone();
            listeners.push(EventListener::new(&results, "click", move |event| {
                if let Some(index) = option_index(&event) {
                    driver.click_option(index);
                    field.set_value(&driver.with(|ac| ac.input_text().to_string()));
                }
            })?);
        }
        {
            let driver = Rc::clone(&driver);
            let inside: Node = root.clone().into();
            listeners.push(EventListener::new(&document, "click", move |event| {
                let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
                driver.document_click(inside.contains(target.as_ref()));
            })?);
        }

        tracing::debug!(id = %root.id(), "autocomplete mounted");
        Ok(Self {
            root,
            input,
            driver,
            listeners,
        })
    }

    /// The element the search box lives in.
    #[must_use]
    pub const fn root(&self) -> &Element {
        &self.root
    }

    /// The text input.
    #[must_use]
    pub const fn input(&self) -> &HtmlInputElement {
        &self.input
    }

    /// State driver, for programmatic input.
    #[must_use]
    pub fn driver(&self) -> &AutocompleteDriver<S> {
        &self.driver
    }

    /// Number of attached DOM listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
