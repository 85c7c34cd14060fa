//! The document the controller drives.
//!
//! Everything the controller knows about the page goes through [`FormHost`]:
//! element values, text, markup, classes, attributes and checked state.
//! A browser binding implements it over the DOM; [`MemoryDocument`] implements
//! it in memory for tests and the command-line host.

pub mod document;
pub mod layout;

pub use document::{Element, ElementKind, MemoryDocument};
pub use layout::{intake_page, FormSnapshot};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Class toggled on a control whose last verdict failed.
pub const INVALID_CLASS: &str = "invalid";

/// Suffix of the element that displays a field's error text.
pub const ERROR_SUFFIX: &str = "-error";

/// Id of the error display paired with `field`.
pub fn error_id(field: &str) -> String {
    format!("{}{}", field, ERROR_SUFFIX)
}

/// Interaction signals an element can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    /// Content changed while typing.
    Input,
    /// Focus left the element.
    Blur,
    /// Committed change (checkbox toggle, slider release).
    Change,
    /// Button or link activation.
    Click,
    /// Form submission.
    Submit,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Input => "input",
            Self::Blur => "blur",
            Self::Change => "change",
            Self::Click => "click",
            Self::Submit => "submit",
        };
        f.write_str(name)
    }
}

/// Read/write access to the page elements the controller works with.
///
/// Operations on an id the document does not contain are no-ops for setters
/// and `None`/`false` for getters.
pub trait FormHost {
    /// Check whether an element with this id exists.
    fn contains(&self, id: &str) -> bool;

    /// Current value of a control.
    fn value(&self, id: &str) -> Option<String>;

    fn set_value(&mut self, id: &str, value: &str);

    /// Text content of an element.
    fn text(&self, id: &str) -> Option<String>;

    fn set_text(&mut self, id: &str, text: &str);

    /// Markup content of a container.
    fn inner_html(&self, id: &str) -> Option<String>;

    fn set_inner_html(&mut self, id: &str, html: &str);

    fn has_class(&self, id: &str, class: &str) -> bool;

    /// Add (`on == true`) or remove a class.
    fn toggle_class(&mut self, id: &str, class: &str, on: bool);

    fn attribute(&self, id: &str, name: &str) -> Option<String>;

    fn set_attribute(&mut self, id: &str, name: &str, value: &str);

    fn is_checked(&self, id: &str) -> bool;

    fn set_checked(&mut self, id: &str, checked: bool);

    /// Values of the checked boxes/radios sharing a group name, in document order.
    fn checked_values(&self, group: &str) -> Vec<String>;

    /// Ids of every input, select and textarea, in document order.
    fn controls(&self) -> Vec<String>;

    fn is_required(&self, id: &str) -> bool;

    fn is_visible(&self, id: &str) -> bool;

    fn set_visible(&mut self, id: &str, visible: bool);

    /// Replace a select's options with a disabled placeholder plus `options`.
    fn set_options(&mut self, id: &str, placeholder: &str, options: &[String]);

    /// Check the box or radio in `group` whose value is `value`; radios in
    /// the group are unchecked first. `false` when no member has that value.
    fn select_choice(&mut self, group: &str, value: &str) -> bool;

    /// Put a control back to its initial state: boxes and radios
    /// unchecked, other controls emptied.
    fn reset_control(&mut self, id: &str);

    /// Blocking notice shown to the user (a browser `alert`).
    fn notify(&mut self, message: &str);

    /// Trimmed value of a control, empty when absent.
    fn trimmed_value(&self, id: &str) -> String {
        self.value(id)
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    /// Ids of every element currently carrying `class`.
    fn elements_with_class(&self, class: &str) -> Vec<String> {
        self.controls()
            .into_iter()
            .filter(|id| self.has_class(id, class))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_id() {
        assert_eq!(error_id("passid"), "passid-error");
    }

    #[test]
    fn test_signal_display() {
        assert_eq!(Signal::Blur.to_string(), "blur");
        assert_eq!(Signal::Submit.to_string(), "submit");
    }
}
