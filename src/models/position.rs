//! Position record and DTOs.

use serde::{Deserialize, Serialize};

use super::text_or_empty;
use crate::error::Result;
use crate::panel::{ChoiceSource, Control, Entity, EntityForm, EntityId, EntityKind, FieldView, FormInput, required};

/// Position as returned by `/api/position/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: i32,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub description: String,
    #[serde(default)]
    pub department_id: Option<i32>,
}

/// DTO for creating a position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePosition {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i32>,
}

/// DTO for updating a position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePosition {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Not sent; an edit never moves a position between departments.
    #[serde(skip)]
    pub department_id: Option<i32>,
}

impl UpdatePosition {
    /// Record implied by this update, for backends that answer with a bare success.
    pub fn applied(&self) -> Position {
        Position {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            department_id: self.department_id,
        }
    }
}

/// Inline edit form for a position row.
#[derive(Debug, Clone)]
pub struct PositionForm {
    pub id: i32,
    pub department_id: Option<i32>,
    pub name: String,
    pub description: String,
}

impl EntityForm for PositionForm {
    type Output = UpdatePosition;

    fn inputs(&mut self) -> Vec<FormInput<'_>> {
        vec![
            FormInput::Text {
                key: "name",
                label: "Name",
                value: &mut self.name,
            },
            FormInput::Text {
                key: "description",
                label: "Description",
                value: &mut self.description,
            },
        ]
    }

    fn validate(&self) -> Result<UpdatePosition> {
        Ok(UpdatePosition {
            id: self.id,
            name: required(&self.name, "Name")?,
            description: self.description.trim().to_string(),
            department_id: self.department_id,
        })
    }
}

/// Create form for a new position.
#[derive(Debug, Clone, Default)]
pub struct NewPositionForm {
    pub name: String,
    pub description: String,
    pub department_id: Option<i32>,
}

impl EntityForm for NewPositionForm {
    type Output = CreatePosition;

    fn inputs(&mut self) -> Vec<FormInput<'_>> {
        vec![
            FormInput::Text {
                key: "name",
                label: "Name",
                value: &mut self.name,
            },
            FormInput::Text {
                key: "description",
                label: "Description",
                value: &mut self.description,
            },
            FormInput::Choice {
                key: "department",
                label: "Department",
                source: ChoiceSource::Departments,
                value: &mut self.department_id,
            },
        ]
    }

    fn validate(&self) -> Result<CreatePosition> {
        Ok(CreatePosition {
            name: required(&self.name, "Name")?,
            description: self.description.trim().to_string(),
            department_id: self.department_id,
        })
    }
}

impl Entity for Position {
    const KIND: EntityKind = EntityKind::Position;

    type Create = CreatePosition;
    type Update = UpdatePosition;
    type EditForm = PositionForm;
    type CreateForm = NewPositionForm;

    fn id(&self) -> EntityId {
        EntityId(self.id)
    }

    fn title(&self) -> String {
        self.name.clone()
    }

    fn fields(&self) -> Vec<FieldView> {
        vec![
            FieldView::new("name", "Name", self.name.clone()),
            FieldView::new("description", "Description", self.description.clone()),
        ]
    }

    fn controls() -> &'static [Control] {
        &[Control::Delete, Control::Edit]
    }

    fn edit_form(&self) -> Option<PositionForm> {
        Some(PositionForm {
            id: self.id,
            department_id: self.department_id,
            name: self.name.clone(),
            description: self.description.clone(),
        })
    }
}
