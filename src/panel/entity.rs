//! Traits every panel entity and its forms implement.

use std::fmt;

use serde::Serialize;

use crate::error::{AppError, Result};

use super::ids::{Control, EntityId, EntityKind};

/// Request being reported on in failure texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    Update,
    Delete,
}

/// Static failure text shown when the backend gives no `error` message.
pub fn failure_text(kind: EntityKind, op: Operation) -> String {
    match op {
        Operation::Load => format!("error loading {}", kind.plural()),
        Operation::Create => format!("error creating {}", kind.tag()),
        Operation::Update => format!("error updating {}", kind.tag()),
        Operation::Delete => format!("error deleting {}", kind.tag()),
    }
}

/// One labelled value shown in a display row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    /// Hyphenated key, used as the `{type}-{id}-{key}` suffix.
    pub key: &'static str,
    pub label: &'static str,
    pub text: String,
}

impl FieldView {
    pub fn new(key: &'static str, label: &'static str, text: impl Into<String>) -> Self {
        Self {
            key,
            label,
            text: text.into(),
        }
    }
}

/// Loaded list a choice input draws its options from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceSource {
    Departments,
    Positions,
    Vacancies,
}

/// Editable input exposed by a form.
pub enum FormInput<'a> {
    Text {
        key: &'static str,
        label: &'static str,
        value: &'a mut String,
    },
    Date {
        key: &'static str,
        label: &'static str,
        value: &'a mut String,
    },
    Choice {
        key: &'static str,
        label: &'static str,
        source: ChoiceSource,
        value: &'a mut Option<i32>,
    },
    Flag {
        key: &'static str,
        label: &'static str,
        value: &'a mut bool,
    },
}

impl FormInput<'_> {
    pub fn key(&self) -> &'static str {
        match self {
            FormInput::Text { key, .. }
            | FormInput::Date { key, .. }
            | FormInput::Choice { key, .. }
            | FormInput::Flag { key, .. } => *key,
        }
    }
}

/// Form state that validates into a request body.
pub trait EntityForm: Clone + fmt::Debug + Send + 'static {
    type Output: Send + 'static;

    fn inputs(&mut self) -> Vec<FormInput<'_>>;

    /// Local validation; an `Err` short-circuits before any request is sent.
    fn validate(&self) -> Result<Self::Output>;
}

/// A record displayed as a panel row.
pub trait Entity: Clone + fmt::Debug + Send + 'static {
    const KIND: EntityKind;

    /// Body of the create request.
    type Create: Serialize + Send + Sync + 'static;
    /// Body of the update request.
    type Update: Serialize + Send + Sync + 'static;

    type EditForm: EntityForm<Output = Self::Update>;
    type CreateForm: EntityForm<Output = Self::Create> + Default;

    fn id(&self) -> EntityId;

    /// Short human name for logs and confirmations.
    fn title(&self) -> String;

    /// Display projection, in column order.
    fn fields(&self) -> Vec<FieldView>;

    /// Controls rendered on a display row.
    fn controls() -> &'static [Control];

    /// Form pre-filled from this record, or `None` when the type is not editable.
    fn edit_form(&self) -> Option<Self::EditForm>;
}

/// Placeholder edit form for entities without inline edit.
#[derive(Debug, Clone, Default)]
pub struct NoEdit;

impl EntityForm for NoEdit {
    type Output = ();

    fn inputs(&mut self) -> Vec<FormInput<'_>> {
        Vec::new()
    }

    fn validate(&self) -> Result<()> {
        Err(AppError::validation("This record cannot be edited"))
    }
}

/// Require a non-blank text value, returning it trimmed.
pub fn required(value: &str, label: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{label} is required")));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_texts() {
        assert_eq!(failure_text(EntityKind::Vacancy, Operation::Delete), "error deleting vacancy");
        assert_eq!(failure_text(EntityKind::Vacancy, Operation::Create), "error creating vacancy");
        assert_eq!(
            failure_text(EntityKind::Department, Operation::Load),
            "error loading departments"
        );
    }

    #[test]
    fn test_required() {
        assert_eq!(required("  Eng ", "Name").unwrap(), "Eng");
        let err = required("   ", "Surname").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Surname is required");
    }
}
