//! Widget implementations for reelmatch.

pub mod autocomplete;
pub mod markup;

pub use autocomplete::{
    Autocomplete, AutocompleteConfig, AutocompleteDriver, AutocompleteMsg, DropdownEntry,
    OptionSource, ACTIVE_CLASS, OPTION_CLASS, OPTION_INDEX_ATTR,
};
pub use markup::escape_html;
