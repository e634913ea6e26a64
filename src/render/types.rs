use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::types::FieldType;
use crate::schema::types::GroupLayout;

/// A resolved option entry carried by select/multiselect widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetOption {
    pub code: String,
    pub name_key: String,
    pub sort: i32,
}

/// A fully resolved field widget: everything the display layer needs to
/// draw one input, with all override precedences already applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldWidget {
    pub field_key: String,
    pub field_type: FieldType,
    pub label_key: String,
    pub description_key: Option<String>,
    pub placeholder_key: Option<String>,
    pub required: bool,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub step: Option<f64>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub options: Vec<WidgetOption>,
    #[serde(default)]
    pub value: Option<Value>,
}

/// One rendered slot: either a resolved widget or an inert placeholder
/// for a schema reference the registry does not know. A broken reference
/// must never break the whole form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderedField {
    Widget(FieldWidget),
    Placeholder { field_key: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedGroup {
    pub key: String,
    pub label_key: String,
    pub layout: GroupLayout,
    pub fields: Vec<RenderedField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedStep {
    pub key: String,
    pub label_key: String,
    pub description_key: Option<String>,
    pub groups: Vec<RenderedGroup>,
}

/// The renderable widget tree for one category form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedForm {
    pub locale: String,
    pub schema_version: u32,
    pub steps: Vec<RenderedStep>,
}

impl RenderedForm {
    /// All widgets in document order, placeholders excluded.
    pub fn widgets(&self) -> impl Iterator<Item = &FieldWidget> {
        self.steps
            .iter()
            .flat_map(|step| step.groups.iter())
            .flat_map(|group| group.fields.iter())
            .filter_map(|field| match field {
                RenderedField::Widget(widget) => Some(widget),
                RenderedField::Placeholder { .. } => None,
            })
    }

    #[must_use]
    pub fn widget(&self, field_key: &str) -> Option<&FieldWidget> {
        self.widgets().find(|widget| widget.field_key == field_key)
    }

    #[must_use]
    pub fn has_placeholder(&self, field_key: &str) -> bool {
        self.steps
            .iter()
            .flat_map(|step| step.groups.iter())
            .flat_map(|group| group.fields.iter())
            .any(|field| matches!(field, RenderedField::Placeholder { field_key: key } if key == field_key))
    }
}
