//! In-memory document.

use super::FormHost;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// What an element is, as far as the controller cares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// `<input>` of the given type (`text`, `date`, `range`, `password`, ...).
    Input(String),
    Checkbox,
    Radio,
    Select,
    TextArea,
    /// Text-only element such as an error `<span>` or `<h4>`.
    Text,
    /// Element that receives markup (`<div>`).
    Container,
    Button,
}

impl ElementKind {
    /// Inputs, selects and textareas.
    pub fn is_control(&self) -> bool {
        matches!(
            self,
            Self::Input(_) | Self::Checkbox | Self::Radio | Self::Select | Self::TextArea
        )
    }
}

/// One element of a [`MemoryDocument`].
#[derive(Debug, Clone, Serialize)]
pub struct Element {
    pub id: String,
    pub kind: ElementKind,
    /// Group name for checkboxes and radios.
    pub name: Option<String>,
    pub value: String,
    pub text: String,
    pub html: String,
    pub classes: BTreeSet<String>,
    pub attributes: BTreeMap<String, String>,
    pub required: bool,
    pub checked: bool,
    pub visible: bool,
    pub options: Vec<String>,
}

impl Element {
    fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            name: None,
            value: String::new(),
            text: String::new(),
            html: String::new(),
            classes: BTreeSet::new(),
            attributes: BTreeMap::new(),
            required: false,
            checked: false,
            visible: true,
            options: Vec::new(),
        }
    }

    pub fn input(id: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Input("text".to_string()))
    }

    pub fn typed_input(id: impl Into<String>, input_type: &str) -> Self {
        Self::new(id, ElementKind::Input(input_type.to_string()))
    }

    pub fn checkbox(id: impl Into<String>, name: &str, value: &str) -> Self {
        let mut element = Self::new(id, ElementKind::Checkbox);
        element.name = Some(name.to_string());
        element.value = value.to_string();
        element
    }

    pub fn radio(id: impl Into<String>, name: &str, value: &str) -> Self {
        let mut element = Self::new(id, ElementKind::Radio);
        element.name = Some(name.to_string());
        element.value = value.to_string();
        element
    }

    pub fn select(id: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Select)
    }

    pub fn textarea(id: impl Into<String>) -> Self {
        Self::new(id, ElementKind::TextArea)
    }

    pub fn text(id: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Text)
    }

    pub fn container(id: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Container)
    }

    pub fn button(id: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Button)
    }

    /// Mark the control as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }
}

/// A flat, id-addressed document held in memory.
///
/// Notices raised through [`FormHost::notify`] are kept so callers can
/// inspect what the user would have been shown.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: Vec<Element>,
    index: HashMap<String, usize>,
    notices: Vec<String>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element, replacing any existing element with the same id.
    pub fn insert(&mut self, element: Element) {
        match self.index.get(&element.id) {
            Some(&pos) => self.elements[pos] = element,
            None => {
                self.index.insert(element.id.clone(), self.elements.len());
                self.elements.push(element);
            }
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, element: Element) -> Self {
        self.insert(element);
        self
    }

    /// Remove an element; returns whether it existed.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(pos) = self.index.remove(id) else {
            return false;
        };
        self.elements.remove(pos);
        for slot in self.index.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        true
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.index.get(id).map(|&pos| &self.elements[pos])
    }

    fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        match self.index.get(id) {
            Some(&pos) => Some(&mut self.elements[pos]),
            None => None,
        }
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Notices raised so far, oldest first.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }
}

impl FormHost for MemoryDocument {
    fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    fn value(&self, id: &str) -> Option<String> {
        self.element(id).map(|e| e.value.clone())
    }

    fn set_value(&mut self, id: &str, value: &str) {
        if let Some(element) = self.element_mut(id) {
            element.value = value.to_string();
        }
    }

    fn text(&self, id: &str) -> Option<String> {
        self.element(id).map(|e| e.text.clone())
    }

    fn set_text(&mut self, id: &str, text: &str) {
        if let Some(element) = self.element_mut(id) {
            element.text = text.to_string();
        }
    }

    fn inner_html(&self, id: &str) -> Option<String> {
        self.element(id).map(|e| e.html.clone())
    }

    fn set_inner_html(&mut self, id: &str, html: &str) {
        if let Some(element) = self.element_mut(id) {
            element.html = html.to_string();
        }
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.element(id)
            .map(|e| e.classes.contains(class))
            .unwrap_or(false)
    }

    fn toggle_class(&mut self, id: &str, class: &str, on: bool) {
        if let Some(element) = self.element_mut(id) {
            if on {
                element.classes.insert(class.to_string());
            } else {
                element.classes.remove(class);
            }
        }
    }

    fn attribute(&self, id: &str, name: &str) -> Option<String> {
        self.element(id).and_then(|e| e.attributes.get(name).cloned())
    }

    fn set_attribute(&mut self, id: &str, name: &str, value: &str) {
        if let Some(element) = self.element_mut(id) {
            element
                .attributes
                .insert(name.to_string(), value.to_string());
        }
    }

    fn is_checked(&self, id: &str) -> bool {
        self.element(id).map(|e| e.checked).unwrap_or(false)
    }

    fn set_checked(&mut self, id: &str, checked: bool) {
        if let Some(element) = self.element_mut(id) {
            element.checked = checked;
        }
    }

    fn checked_values(&self, group: &str) -> Vec<String> {
        self.elements
            .iter()
            .filter(|e| e.checked && e.name.as_deref() == Some(group))
            .map(|e| e.value.clone())
            .collect()
    }

    fn controls(&self) -> Vec<String> {
        self.elements
            .iter()
            .filter(|e| e.kind.is_control())
            .map(|e| e.id.clone())
            .collect()
    }

    fn is_required(&self, id: &str) -> bool {
        self.element(id).map(|e| e.required).unwrap_or(false)
    }

    fn is_visible(&self, id: &str) -> bool {
        self.element(id).map(|e| e.visible).unwrap_or(false)
    }

    fn set_visible(&mut self, id: &str, visible: bool) {
        if let Some(element) = self.element_mut(id) {
            element.visible = visible;
        }
    }

    fn set_options(&mut self, id: &str, placeholder: &str, options: &[String]) {
        if let Some(element) = self.element_mut(id) {
            element.options = options.to_vec();
            element.value = String::new();
            element
                .attributes
                .insert("placeholder".to_string(), placeholder.to_string());
        }
    }

    fn reset_control(&mut self, id: &str) {
        if let Some(element) = self.element_mut(id) {
            match element.kind {
                ElementKind::Checkbox | ElementKind::Radio => element.checked = false,
                _ => element.value.clear(),
            }
        }
    }

    fn select_choice(&mut self, group: &str, value: &str) -> bool {
        let target = self
            .elements
            .iter()
            .position(|e| e.name.as_deref() == Some(group) && e.value == value);
        let Some(target) = target else {
            return false;
        };
        if self.elements[target].kind == ElementKind::Radio {
            for element in self.elements.iter_mut() {
                if element.name.as_deref() == Some(group) {
                    element.checked = false;
                }
            }
        }
        self.elements[target].checked = true;
        true
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
