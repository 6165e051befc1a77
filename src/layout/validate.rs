//! Structural validation of widgets and layouts.
//!
//! Checks well-formedness only: required fields present, the layout's `id`
//! and `name` non-empty, widget strings present (an empty widget title is
//! allowed), coordinates numeric. Value ranges (negative `x`, zero `w`) and declared
//! min/max bounds are not checked here.
//!
//! Each rule is reported as a [`Violation`] tagged with the offending widget
//! so callers and tests can see what failed. [`validate_layout`] and
//! [`validate_widget`] are the boolean fast paths over the same rules.

use std::fmt;

use serde_json::Value;

use super::{DashboardLayout, WidgetConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Missing,
    Empty,
    WrongType,
    NotFinite,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ViolationKind::Missing => "missing",
            ViolationKind::Empty => "empty",
            ViolationKind::WrongType => "wrong type",
            ViolationKind::NotFinite => "not a finite number",
        };
        write!(f, "{}", s)
    }
}

/// One violated structural rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Position in `widgets`, when the rule concerns a widget.
    pub index: Option<usize>,
    /// Id of the offending widget, when it has a usable one.
    pub widget_id: Option<String>,
    pub field: &'static str,
    pub kind: ViolationKind,
}

impl Violation {
    fn layout(field: &'static str, kind: ViolationKind) -> Self {
        Self {
            index: None,
            widget_id: None,
            field,
            kind,
        }
    }

    fn widget(
        index: Option<usize>,
        widget_id: Option<String>,
        field: &'static str,
        kind: ViolationKind,
    ) -> Self {
        Self {
            index,
            widget_id,
            field,
            kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.widget_id, self.index) {
            (Some(id), _) => write!(f, "widget '{}': {} is {}", id, self.field, self.kind),
            (None, Some(index)) => write!(f, "widget #{}: {} is {}", index, self.field, self.kind),
            (None, None) => write!(f, "layout: {} is {}", self.field, self.kind),
        }
    }
}

const WIDGET_STRING_FIELDS: [&str; 3] = ["id", "type", "title"];
const WIDGET_NUMBER_FIELDS: [&str; 4] = ["x", "y", "w", "h"];

/// A typed widget always carries its strings, so only the coordinates can
/// fail here.
pub fn validate_widget(widget: &WidgetConfig) -> bool {
    [widget.x, widget.y, widget.w, widget.h]
        .iter()
        .all(|v| v.is_finite())
}

pub fn validate_layout(layout: &DashboardLayout) -> bool {
    !layout.id.is_empty() && !layout.name.is_empty() && layout.widgets.iter().all(validate_widget)
}

pub fn widget_violations(widget: &WidgetConfig) -> Vec<Violation> {
    collect_widget_violations(None, widget)
}

fn collect_widget_violations(index: Option<usize>, widget: &WidgetConfig) -> Vec<Violation> {
    let tag = (!widget.id.is_empty()).then(|| widget.id.clone());
    let mut out = Vec::new();
    let numbers = [widget.x, widget.y, widget.w, widget.h];
    for (field, value) in WIDGET_NUMBER_FIELDS.into_iter().zip(numbers) {
        if !value.is_finite() {
            out.push(Violation::widget(
                index,
                tag.clone(),
                field,
                ViolationKind::NotFinite,
            ));
        }
    }
    out
}

pub fn layout_violations(layout: &DashboardLayout) -> Vec<Violation> {
    let mut out = Vec::new();
    if layout.id.is_empty() {
        out.push(Violation::layout("id", ViolationKind::Empty));
    }
    if layout.name.is_empty() {
        out.push(Violation::layout("name", ViolationKind::Empty));
    }
    for (index, widget) in layout.widgets.iter().enumerate() {
        out.extend(collect_widget_violations(Some(index), widget));
    }
    out
}

/// Evaluate the structural rules over untyped JSON.
///
/// Used before deserializing imported or stored layouts so a malformed
/// document is rejected with the fields at fault rather than a parse error
/// pointing at a byte offset.
pub fn json_violations(value: &Value) -> Vec<Violation> {
    let mut out = Vec::new();
    let Some(object) = value.as_object() else {
        out.push(Violation::layout("layout", ViolationKind::WrongType));
        return out;
    };
    for field in ["id", "name"] {
        if let Some(kind) = string_problem(object.get(field), false) {
            out.push(Violation::layout(field, kind));
        }
    }
    match object.get("widgets") {
        None => out.push(Violation::layout("widgets", ViolationKind::Missing)),
        Some(Value::Array(widgets)) => {
            for (index, widget) in widgets.iter().enumerate() {
                json_widget_violations(index, widget, &mut out);
            }
        }
        Some(_) => out.push(Violation::layout("widgets", ViolationKind::WrongType)),
    }
    out
}

fn json_widget_violations(index: usize, value: &Value, out: &mut Vec<Violation>) {
    let Some(object) = value.as_object() else {
        out.push(Violation::widget(
            Some(index),
            None,
            "widget",
            ViolationKind::WrongType,
        ));
        return;
    };
    let tag = object
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string);
    for field in WIDGET_STRING_FIELDS {
        if let Some(kind) = string_problem(object.get(field), true) {
            out.push(Violation::widget(Some(index), tag.clone(), field, kind));
        }
    }
    for field in WIDGET_NUMBER_FIELDS {
        let kind = match object.get(field) {
            None => Some(ViolationKind::Missing),
            Some(Value::Number(_)) => None,
            Some(_) => Some(ViolationKind::WrongType),
        };
        if let Some(kind) = kind {
            out.push(Violation::widget(Some(index), tag.clone(), field, kind));
        }
    }
}

fn string_problem(value: Option<&Value>, allow_empty: bool) -> Option<ViolationKind> {
    match value {
        None => Some(ViolationKind::Missing),
        Some(Value::String(s)) if s.is_empty() && !allow_empty => Some(ViolationKind::Empty),
        Some(Value::String(_)) => None,
        Some(_) => Some(ViolationKind::WrongType),
    }
}
