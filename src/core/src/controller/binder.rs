//! Event registry: which handlers run when an element receives a signal.

use crate::host::{error_id, FormHost, Signal};
use crate::validation::RuleTable;
use std::collections::BTreeMap;
use tracing::debug;

/// Work the controller performs in response to a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handler {
    /// Re-validate the field.
    Validate(String),
    /// Save the field to its store while remember-me is on.
    Persist(String),
    RefreshWelcome,
    /// Refresh the income slider's currency text.
    UpdateIncome,
    /// Save or forget remembered fields following the checkbox.
    ToggleRememberMe,
    NotMe,
    CheckData,
    Review,
    Submit,
    ConfirmSubmit,
    CancelSubmit,
    CloseAlert,
}

/// Handlers keyed by (element id, signal), run in registration order.
#[derive(Debug, Clone, Default)]
pub struct EventRegistry {
    handlers: BTreeMap<(String, Signal), Vec<Handler>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, id: &str, signal: Signal, handler: Handler) {
        self.handlers
            .entry((id.to_string(), signal))
            .or_default()
            .push(handler);
    }

    pub fn handlers(&self, id: &str, signal: Signal) -> &[Handler] {
        self.handlers
            .get(&(id.to_string(), signal))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_bound(&self, id: &str, signal: Signal) -> bool {
        !self.handlers(id, signal).is_empty()
    }

    /// Total number of bound handlers.
    pub fn len(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

/// Bind validation to Input and Blur of every rule field.
///
/// A field is skipped when the page lacks it or its `-error` element.
/// Returns the number of fields bound.
pub fn bind_validators<H: FormHost + ?Sized>(
    registry: &mut EventRegistry,
    rules: &RuleTable,
    host: &H,
) -> usize {
    let mut bound = 0;
    for id in rules.ids() {
        if !host.contains(id) || !host.contains(&error_id(id)) {
            debug!(field = %id, "Skipping validation binding, element missing");
            continue;
        }
        registry.bind(id, Signal::Input, Handler::Validate(id.to_string()));
        registry.bind(id, Signal::Blur, Handler::Validate(id.to_string()));
        bound += 1;
    }
    bound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Element, MemoryDocument};

    #[test]
    fn test_bind_order_preserved() {
        let mut registry = EventRegistry::new();
        registry.bind("remember-me", Signal::Change, Handler::ToggleRememberMe);
        registry.bind("remember-me", Signal::Change, Handler::RefreshWelcome);
        assert_eq!(
            registry.handlers("remember-me", Signal::Change),
            &[Handler::ToggleRememberMe, Handler::RefreshWelcome]
        );
        assert!(registry.handlers("remember-me", Signal::Input).is_empty());
    }

    #[test]
    fn test_missing_elements_skipped() {
        let doc = MemoryDocument::new()
            .with(Element::input("zip"))
            .with(Element::text("zip-error"))
            .with(Element::input("city"));

        let mut registry = EventRegistry::new();
        let bound = bind_validators(&mut registry, &RuleTable::default(), &doc);

        assert_eq!(bound, 1);
        assert!(registry.is_bound("zip", Signal::Input));
        assert!(registry.is_bound("zip", Signal::Blur));
        assert!(!registry.is_bound("city", Signal::Blur));
        assert_eq!(registry.len(), 2);
    }
}
