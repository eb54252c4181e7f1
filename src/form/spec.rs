use crate::error::FormWarning;
use crate::schema::SUBMIT_GROUP;
use crate::value::{FormValue, PostedValues};
use crate::widget::{ValidationRule, WidgetSpec};
use serde::Serialize;

/// The submit button. Its name is also the key under which a posted form carries
/// the button press, which binding skips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitButton {
    pub name: String,
    pub label: String,
}

impl SubmitButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            name: SUBMIT_GROUP.to_string(),
            label: label.into(),
        }
    }
}

/// Widgets rendered side by side under one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetGroup {
    pub key: String,
    pub widgets: Vec<WidgetSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit: Option<SubmitButton>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "item", rename_all = "snake_case")]
pub enum FormItem {
    Widget(WidgetSpec),
    Group(WidgetGroup),
}

/// A generated form, ready for rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    pub items: Vec<FormItem>,
    /// Top-level submit button; `None` when a group carries it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit: Option<SubmitButton>,
    /// Current field values, shaped exactly as a submission of this form would be.
    pub defaults: PostedValues,
    #[serde(skip)]
    pub warnings: Vec<FormWarning>,
}

impl FormSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Every widget, top-level and grouped, in render order.
    pub fn widgets(&self) -> impl Iterator<Item = &WidgetSpec> {
        self.items.iter().flat_map(|item| match item {
            FormItem::Widget(widget) => std::slice::from_ref(widget).iter(),
            FormItem::Group(group) => group.widgets.iter(),
        })
    }

    pub fn widget(&self, name: &str) -> Option<&WidgetSpec> {
        self.widgets().find(|widget| widget.name == name)
    }

    pub fn widget_mut(&mut self, name: &str) -> Option<&mut WidgetSpec> {
        self.items
            .iter_mut()
            .flat_map(|item| match item {
                FormItem::Widget(widget) => std::slice::from_mut(widget).iter_mut(),
                FormItem::Group(group) => group.widgets.iter_mut(),
            })
            .find(|widget| widget.name == name)
    }

    pub fn group(&self, key: &str) -> Option<&WidgetGroup> {
        self.items.iter().find_map(|item| match item {
            FormItem::Group(group) if group.key == key => Some(group),
            _ => None,
        })
    }

    /// Removes a widget wherever it sits, along with its default.
    pub fn remove_widget(&mut self, name: &str) -> Option<WidgetSpec> {
        let mut removed = None;
        self.items.retain_mut(|item| match item {
            FormItem::Widget(widget) if widget.name == name => {
                removed = Some(widget.clone());
                false
            }
            FormItem::Widget(_) => true,
            FormItem::Group(group) => {
                if let Some(index) = group.widgets.iter().position(|w| w.name == name) {
                    removed = Some(group.widgets.remove(index));
                }
                !group.widgets.is_empty() || group.submit.is_some()
            }
        });
        if removed.is_some() {
            self.defaults.remove(name);
        }
        removed
    }

    /// How many submit buttons the form renders. A generated form always has one.
    pub fn submit_count(&self) -> usize {
        let grouped = self
            .items
            .iter()
            .filter(|item| matches!(item, FormItem::Group(WidgetGroup { submit: Some(_), .. })))
            .count();
        grouped + usize::from(self.submit.is_some())
    }

    pub fn default_value(&self, name: &str) -> Option<&FormValue> {
        self.defaults.get(name)
    }

    /// Validation rules keyed by the field they apply to.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &ValidationRule)> {
        self.widgets().flat_map(|widget| {
            widget
                .rules
                .iter()
                .map(move |rule| (widget.name.as_str(), rule))
        })
    }
}
