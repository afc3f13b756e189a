//! Summary areas and tutorial hint in the page.

use super::HIDDEN_CLASS;
use crate::compare::{RowOutcome, Side};
use crate::controller::SummaryView;
use crate::template::{LOSING_CLASS, PRIMARY_CLASS, STAT_CLASS};
use wasm_bindgen::JsCast;
use web_sys::Element;

/// [`SummaryView`] writing into two summary elements.
pub struct DomSummaryView {
    left: Element,
    right: Element,
    tutorial: Option<Element>,
}

impl DomSummaryView {
    /// View over the two summary areas. The tutorial hint is optional.
    #[must_use]
    pub const fn new(left: Element, right: Element, tutorial: Option<Element>) -> Self {
        Self {
            left,
            right,
            tutorial,
        }
    }

    const fn area(&self, side: Side) -> &Element {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Stat cells of one summary, in document order.
    #[must_use]
    pub fn stat_cells(&self, side: Side) -> Vec<Element> {
        let Ok(nodes) = self.area(side).query_selector_all(&format!(".{STAT_CLASS}")) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

fn restyle(cell: &Element, losing: bool) {
    let classes = cell.class_list();
    let (add, remove) = if losing {
        (LOSING_CLASS, PRIMARY_CLASS)
    } else {
        (PRIMARY_CLASS, LOSING_CLASS)
    };
    if classes.remove_1(remove).and_then(|()| classes.add_1(add)).is_err() {
        tracing::warn!("stat cell class update failed");
    }
}

impl SummaryView for DomSummaryView {
    fn hide_tutorial(&self) {
        if let Some(tutorial) = &self.tutorial {
            if tutorial.class_list().add_1(HIDDEN_CLASS).is_err() {
                tracing::warn!("could not hide tutorial");
            }
        }
    }

    fn show_summary(&self, side: Side, html: &str) {
        self.area(side).set_inner_html(html);
    }

    fn mark_rows(&self, outcomes: &[RowOutcome]) {
        for side in Side::BOTH {
            let cells = self.stat_cells(side);
            for (cell, outcome) in cells.iter().zip(outcomes) {
                restyle(cell, outcome.loses(side));
            }
        }
    }
}
