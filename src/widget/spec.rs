use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The abstract kind of input element a field is rendered with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Hidden,
    Text,
    Textarea,
    Select,
    MultiSelect,
    DateGroup,
    TimeGroup,
    DateTimeGroup,
    Checkbox,
    RadioGroup,
    Static,
    /// A toolkit-specific element named by the caller.
    Custom(String),
}

impl WidgetKind {
    /// Whether defaults for this kind are carried as date/time parts.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            WidgetKind::DateGroup | WidgetKind::TimeGroup | WidgetKind::DateTimeGroup
        )
    }

    pub fn has_options(&self) -> bool {
        matches!(
            self,
            WidgetKind::Select | WidgetKind::MultiSelect | WidgetKind::RadioGroup
        )
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetKind::Hidden => write!(f, "hidden"),
            WidgetKind::Text => write!(f, "text"),
            WidgetKind::Textarea => write!(f, "textarea"),
            WidgetKind::Select => write!(f, "select"),
            WidgetKind::MultiSelect => write!(f, "multiselect"),
            WidgetKind::DateGroup => write!(f, "date"),
            WidgetKind::TimeGroup => write!(f, "time"),
            WidgetKind::DateTimeGroup => write!(f, "datetime"),
            WidgetKind::Checkbox => write!(f, "checkbox"),
            WidgetKind::RadioGroup => write!(f, "radio"),
            WidgetKind::Static => write!(f, "static"),
            WidgetKind::Custom(name) => write!(f, "custom:{}", name),
        }
    }
}

/// One entry of a select or radio option list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: Value,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Numeric,
    Required,
    /// A rule registered with the rendering toolkit under this name.
    Custom(String),
}

/// A validation rule the rendering toolkit enforces on a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationRule {
    pub kind: RuleKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    pub message: String,
}

impl ValidationRule {
    pub fn new(kind: RuleKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            parameter: None,
            message: message.into(),
        }
    }

    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }
}

/// The abstract description of one form element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetSpec {
    pub name: String,
    #[serde(default)]
    pub label: String,
    pub kind: WidgetKind,
    /// Ordered `(value, label)` pairs for selects and radio sets.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    /// Applied in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<ValidationRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Display format for date and time groups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl WidgetSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: WidgetKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            options: Vec::new(),
            rules: Vec::new(),
            group: None,
            format: None,
        }
    }

    pub fn hidden(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, WidgetKind::Hidden)
    }

    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn has_rule(&self, kind: &RuleKind) -> bool {
        self.rules.iter().any(|rule| &rule.kind == kind)
    }
}
