use super::{FormItem, FormSpec, SubmitButton, WidgetGroup};
use crate::value::FormValue;
use crate::widget::{RuleKind, WidgetSpec};
use itertools::Itertools;
use std::fmt;

/// Renders a form as an indented text tree, for inspecting generated forms.
pub struct FormOutline<'a> {
    pub form: &'a FormSpec,
}

pub fn format_form(form: &FormSpec) -> String {
    FormOutline { form }.to_string()
}

impl<'a> fmt::Display for FormOutline<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Form: {}", self.form.name)?;
        if let Some(header) = &self.form.header {
            writeln!(f, "│   Header: {}", header)?;
        }

        let count = self.form.items.len() + usize::from(self.form.submit.is_some());
        for (index, item) in self.form.items.iter().enumerate() {
            let is_last = index + 1 == count;
            match item {
                FormItem::Widget(widget) => self.fmt_widget(f, widget, "", is_last)?,
                FormItem::Group(group) => self.fmt_group(f, group, is_last)?,
            }
        }
        if let Some(submit) = &self.form.submit {
            fmt_submit(f, submit, "", true)?;
        }

        for warning in &self.form.warnings {
            writeln!(f, "! {}", warning)?;
        }
        Ok(())
    }
}

impl<'a> FormOutline<'a> {
    fn fmt_group(&self, f: &mut fmt::Formatter<'_>, group: &WidgetGroup, is_last: bool) -> fmt::Result {
        writeln!(f, "{}Group: {}", marker(is_last), group.key)?;
        let prefix = if is_last { "    " } else { "│   " };
        let count = group.widgets.len() + usize::from(group.submit.is_some());
        for (index, widget) in group.widgets.iter().enumerate() {
            self.fmt_widget(f, widget, prefix, index + 1 == count)?;
        }
        if let Some(submit) = &group.submit {
            fmt_submit(f, submit, prefix, true)?;
        }
        Ok(())
    }

    fn fmt_widget(
        &self,
        f: &mut fmt::Formatter<'_>,
        widget: &WidgetSpec,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        write!(
            f,
            "{}{}[{}] {} ({})",
            prefix,
            marker(is_last),
            widget.kind,
            widget.label,
            widget.name
        )?;
        if let Some(value) = self.form.default_value(&widget.name) {
            write!(f, " = {}", DisplayValue(value))?;
        }
        if let Some(format) = &widget.format {
            write!(f, " <{}>", format)?;
        }
        if !widget.rules.is_empty() {
            let rules = widget.rules.iter().map(|rule| rule_name(&rule.kind)).join(", ");
            write!(f, " {{{}}}", rules)?;
        }
        writeln!(f)?;

        if !widget.kind.has_options() {
            return Ok(());
        }
        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        for (index, option) in widget.options.iter().enumerate() {
            writeln!(
                f,
                "{}{}{} => {}",
                child_prefix,
                marker(index + 1 == widget.options.len()),
                option.value,
                option.label
            )?;
        }
        Ok(())
    }
}

fn fmt_submit(f: &mut fmt::Formatter<'_>, submit: &SubmitButton, prefix: &str, is_last: bool) -> fmt::Result {
    writeln!(f, "{}{}[submit] {}", prefix, marker(is_last), submit.label)
}

fn marker(is_last: bool) -> &'static str {
    if is_last { "└── " } else { "├── " }
}

fn rule_name(kind: &RuleKind) -> &str {
    match kind {
        RuleKind::Numeric => "numeric",
        RuleKind::Required => "required",
        RuleKind::Custom(name) => name,
    }
}

struct DisplayValue<'a>(&'a FormValue);

impl fmt::Display for DisplayValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            FormValue::Scalar(value) if value.is_null() => write!(f, "null"),
            FormValue::Scalar(value) => write!(f, "{:?}", value.to_string()),
            FormValue::Date(parts) => {
                write!(f, "{:04}-{:02}-{:02}", parts.year, parts.month, parts.day)
            }
            FormValue::Time(parts) => {
                write!(f, "{:02}:{:02}:{:02}", parts.hour, parts.minute, parts.second)
            }
            FormValue::DateTime(parts) => write!(
                f,
                "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                parts.date.year,
                parts.date.month,
                parts.date.day,
                parts.time.hour,
                parts.time.minute,
                parts.time.second
            ),
        }
    }
}
