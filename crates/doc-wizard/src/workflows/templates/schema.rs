//! Ordered question list for one section of a write-up form.

use serde::{Deserialize, Serialize};

use super::domain::{FieldId, FieldType, MoveDirection};
use super::ids::IdGenerator;

pub const RATING_SCALE: u8 = 5;
const ID_PREFIX: &str = "fld";
const NEW_QUESTION_LABEL: &str = "Untitled question";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFieldDefinition {
    pub id: FieldId,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rating: Option<u8>,
}

impl FormFieldDefinition {
    pub fn new(id: FieldId, field_type: FieldType, label: impl Into<String>) -> Self {
        let mut field = Self {
            id,
            field_type,
            label: label.into(),
            required: false,
            options: Vec::new(),
            max_rating: None,
        };
        field.normalize_payload();
        field
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options(mut self, options: &[&str]) -> Self {
        if self.field_type.has_options() && !options.is_empty() {
            self.options = options.iter().map(|option| option.to_string()).collect();
        }
        self
    }

    /// Bring the type-specific payload in line with the field type.
    fn normalize_payload(&mut self) {
        if self.field_type.has_options() {
            if self.options.is_empty() {
                self.options = placeholder_options();
            }
        } else {
            self.options.clear();
        }

        self.max_rating = match self.field_type {
            FieldType::Rating => Some(RATING_SCALE),
            _ => None,
        };
    }
}

fn placeholder_options() -> Vec<String> {
    vec!["Option 1".to_string(), "Option 2".to_string()]
}

/// Partial update merged by [`FieldSchemaBuilder::update_field`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPatch {
    pub label: Option<String>,
    pub required: Option<bool>,
    pub field_type: Option<FieldType>,
}

impl FieldPatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn required(required: bool) -> Self {
        Self {
            required: Some(required),
            ..Self::default()
        }
    }

    pub fn field_type(field_type: FieldType) -> Self {
        Self {
            field_type: Some(field_type),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSchemaBuilder {
    fields: Vec<FormFieldDefinition>,
    expanded: Option<FieldId>,
}

impl FieldSchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(mut fields: Vec<FormFieldDefinition>) -> Self {
        fields.iter_mut().for_each(FormFieldDefinition::normalize_payload);
        Self {
            fields,
            expanded: None,
        }
    }

    pub fn fields(&self) -> &[FormFieldDefinition] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, id: &FieldId) -> Option<&FormFieldDefinition> {
        self.fields.iter().find(|field| &field.id == id)
    }

    pub fn expanded(&self) -> Option<&FieldId> {
        self.expanded.as_ref()
    }

    /// Expand one entry (or collapse all with `None`). Unknown ids are refused.
    pub fn set_expanded(&mut self, id: Option<FieldId>) -> bool {
        match id {
            Some(id) if self.field(&id).is_none() => false,
            other => {
                self.expanded = other;
                true
            }
        }
    }

    /// Append a field with type defaults and expand it.
    pub fn add_field(&mut self, field_type: FieldType, ids: &dyn IdGenerator) -> FieldId {
        let id = FieldId(ids.next_id(ID_PREFIX));
        self.fields
            .push(FormFieldDefinition::new(id.clone(), field_type, NEW_QUESTION_LABEL));
        self.expanded = Some(id.clone());
        id
    }

    pub fn update_field(&mut self, id: &FieldId, patch: FieldPatch) -> bool {
        let Some(field) = self.field_mut(id) else {
            return false;
        };

        if let Some(label) = patch.label {
            field.label = label;
        }
        if let Some(required) = patch.required {
            field.required = required;
        }
        if let Some(field_type) = patch.field_type {
            field.field_type = field_type;
            field.normalize_payload();
        }
        true
    }

    pub fn remove_field(&mut self, id: &FieldId) -> bool {
        let before = self.fields.len();
        self.fields.retain(|field| &field.id != id);
        if self.expanded.as_ref() == Some(id) {
            self.expanded = None;
        }
        self.fields.len() != before
    }

    pub fn add_option(&mut self, id: &FieldId) -> bool {
        match self.field_mut(id) {
            Some(field) if field.field_type.has_options() => {
                let next = field.options.len() + 1;
                field.options.push(format!("Option {next}"));
                true
            }
            _ => false,
        }
    }

    pub fn update_option(&mut self, id: &FieldId, index: usize, value: impl Into<String>) -> bool {
        match self.field_mut(id).and_then(|field| field.options.get_mut(index)) {
            Some(option) => {
                *option = value.into();
                true
            }
            None => false,
        }
    }

    /// Remove an option, refusing to drop the last one.
    pub fn remove_option(&mut self, id: &FieldId, index: usize) -> bool {
        match self.field_mut(id) {
            Some(field) if field.options.len() > 1 && index < field.options.len() => {
                field.options.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Swap with the neighbour in `direction`; no-op at either boundary.
    pub fn move_field(&mut self, index: usize, direction: MoveDirection) -> bool {
        swap_adjacent(&mut self.fields, index, direction)
    }

    fn field_mut(&mut self, id: &FieldId) -> Option<&mut FormFieldDefinition> {
        self.fields.iter_mut().find(|field| &field.id == id)
    }
}

pub(crate) fn swap_adjacent<T>(items: &mut [T], index: usize, direction: MoveDirection) -> bool {
    let target = match direction {
        MoveDirection::Up => index.checked_sub(1),
        MoveDirection::Down => index.checked_add(1),
    };

    match target {
        Some(target) if index < items.len() && target < items.len() => {
            items.swap(index, target);
            true
        }
        _ => false,
    }
}
