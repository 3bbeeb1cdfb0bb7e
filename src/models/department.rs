//! Department record, DTOs for create and update operations, and its panel forms.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::text_or_empty;
use crate::error::Result;
use crate::panel::{Control, Entity, EntityForm, EntityId, EntityKind, FieldView, FormInput, required};

/// Department as returned by `/api/department/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: i32,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub description: String,
}

impl Department {
    /// Department page, `{base}/department/{name}` with the name encoded as one path segment.
    ///
    /// Any path prefix of `base` is kept.
    pub fn detail_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("department").push(&self.name);
        }
        url
    }
}

/// DTO for creating a department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDepartment {
    pub name: String,
    pub description: String,
}

/// DTO for updating a department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDepartment {
    pub id: i32,
    pub name: String,
    pub description: String,
}

impl UpdateDepartment {
    /// Record implied by this update, for backends that answer with a bare success.
    pub fn applied(&self) -> Department {
        Department {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

/// Inline edit form for a department row.
#[derive(Debug, Clone)]
pub struct DepartmentForm {
    pub id: i32,
    pub name: String,
    pub description: String,
}

impl EntityForm for DepartmentForm {
    type Output = UpdateDepartment;

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

    fn validate(&self) -> Result<UpdateDepartment> {
        Ok(UpdateDepartment {
            id: self.id,
            name: required(&self.name, "Name")?,
            description: self.description.trim().to_string(),
        })
    }
}

/// Create form for a new department.
#[derive(Debug, Clone, Default)]
pub struct NewDepartmentForm {
    pub name: String,
    pub description: String,
}

impl EntityForm for NewDepartmentForm {
    type Output = CreateDepartment;

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

    fn validate(&self) -> Result<CreateDepartment> {
        Ok(CreateDepartment {
            name: required(&self.name, "Name")?,
            description: self.description.trim().to_string(),
        })
    }
}

impl Entity for Department {
    const KIND: EntityKind = EntityKind::Department;

    type Create = CreateDepartment;
    type Update = UpdateDepartment;
    type EditForm = DepartmentForm;
    type CreateForm = NewDepartmentForm;

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

    fn edit_form(&self) -> Option<DepartmentForm> {
        Some(DepartmentForm {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
        })
    }
}
