//! Employee record, hire and update DTOs.

use serde::{Deserialize, Serialize};

use super::{NamedRef, date_text, text_or_empty};
use crate::dates;
use crate::error::{AppError, Result};
use crate::panel::{ChoiceSource, Control, Entity, EntityForm, EntityId, EntityKind, FieldView, FormInput, required};

/// Employee as returned by `/api/employee/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i32,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub surname: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub phone: String,
    #[serde(default, deserialize_with = "date_text")]
    pub birth_date: String,
    #[serde(default, deserialize_with = "date_text")]
    pub start_work_date: String,
    #[serde(default)]
    pub is_department_leader: bool,
    #[serde(default)]
    pub position: Option<NamedRef>,
    #[serde(default)]
    pub department: Option<NamedRef>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname).trim().to_string()
    }

    fn position_name(&self) -> &str {
        self.position.as_ref().map(|p| p.name.as_str()).unwrap_or("")
    }

    fn department_name(&self) -> &str {
        self.department.as_ref().map(|d| d.name.as_str()).unwrap_or("")
    }
}

/// DTO for hiring a person into an open vacancy. The backend closes the vacancy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HireEmployee {
    pub name: String,
    pub surname: String,
    pub vacancy_id: i32,
}

/// DTO for updating an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEmployee {
    pub employee_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i32>,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub birth_date: String,
    pub start_work_date: String,
    pub is_department_leader: bool,
}

/// Inline edit form for an employee row.
#[derive(Debug, Clone, Default)]
pub struct EmployeeForm {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub birth_date: String,
    pub start_work_date: String,
    pub is_department_leader: bool,
    pub position_id: Option<i32>,
    pub department_id: Option<i32>,
}

impl EntityForm for EmployeeForm {
    type Output = UpdateEmployee;

    fn inputs(&mut self) -> Vec<FormInput<'_>> {
        vec![
            FormInput::Text {
                key: "name",
                label: "Name",
                value: &mut self.name,
            },
            FormInput::Text {
                key: "surname",
                label: "Surname",
                value: &mut self.surname,
            },
            FormInput::Choice {
                key: "position",
                label: "Position",
                source: ChoiceSource::Positions,
                value: &mut self.position_id,
            },
            FormInput::Choice {
                key: "department",
                label: "Department",
                source: ChoiceSource::Departments,
                value: &mut self.department_id,
            },
            FormInput::Text {
                key: "email",
                label: "Email",
                value: &mut self.email,
            },
            FormInput::Text {
                key: "phone",
                label: "Phone",
                value: &mut self.phone,
            },
            FormInput::Date {
                key: "birth-date",
                label: "Birth date",
                value: &mut self.birth_date,
            },
            FormInput::Date {
                key: "start-work-date",
                label: "Start work date",
                value: &mut self.start_work_date,
            },
            FormInput::Flag {
                key: "is-department-leader",
                label: "Department leader",
                value: &mut self.is_department_leader,
            },
        ]
    }

    fn validate(&self) -> Result<UpdateEmployee> {
        let name = required(&self.name, "Name")?;
        let surname = required(&self.surname, "Surname")?;
        let birth_date = dates::normalize_date_input(&self.birth_date)
            .ok_or_else(|| AppError::validation("Invalid birth date"))?;
        let start_work_date = dates::normalize_date_input(&self.start_work_date)
            .ok_or_else(|| AppError::validation("Invalid start work date"))?;

        Ok(UpdateEmployee {
            employee_id: self.id,
            position_id: self.position_id,
            department_id: self.department_id,
            name,
            surname,
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            birth_date,
            start_work_date,
            is_department_leader: self.is_department_leader,
        })
    }
}

/// Hire form: a new employee filling an open vacancy.
#[derive(Debug, Clone, Default)]
pub struct HireForm {
    pub name: String,
    pub surname: String,
    pub vacancy_id: Option<i32>,
}

impl HireForm {
    pub fn for_vacancy(vacancy_id: i32) -> Self {
        Self {
            vacancy_id: Some(vacancy_id),
            ..Default::default()
        }
    }
}

impl EntityForm for HireForm {
    type Output = HireEmployee;

    fn inputs(&mut self) -> Vec<FormInput<'_>> {
        vec![
            FormInput::Text {
                key: "name",
                label: "Name",
                value: &mut self.name,
            },
            FormInput::Text {
                key: "surname",
                label: "Surname",
                value: &mut self.surname,
            },
            FormInput::Choice {
                key: "vacancy",
                label: "Vacancy",
                source: ChoiceSource::Vacancies,
                value: &mut self.vacancy_id,
            },
        ]
    }

    fn validate(&self) -> Result<HireEmployee> {
        let name = required(&self.name, "Name")?;
        let surname = required(&self.surname, "Surname")?;
        let vacancy_id = self
            .vacancy_id
            .ok_or_else(|| AppError::validation("Vacancy is required"))?;
        Ok(HireEmployee {
            name,
            surname,
            vacancy_id,
        })
    }
}

impl Entity for Employee {
    const KIND: EntityKind = EntityKind::Employee;

    type Create = HireEmployee;
    type Update = UpdateEmployee;
    type EditForm = EmployeeForm;
    type CreateForm = HireForm;

    fn id(&self) -> EntityId {
        EntityId(self.id)
    }

    fn title(&self) -> String {
        self.full_name()
    }

    fn fields(&self) -> Vec<FieldView> {
        vec![
            FieldView::new("name", "Name", self.name.clone()),
            FieldView::new("surname", "Surname", self.surname.clone()),
            FieldView::new("position", "Position", self.position_name()),
            FieldView::new("department", "Department", self.department_name()),
            FieldView::new("email", "Email", self.email.clone()),
            FieldView::new("phone", "Phone", self.phone.clone()),
            FieldView::new("birth-date", "Birth date", self.birth_date.clone()),
            FieldView::new("start-work-date", "Start work date", self.start_work_date.clone()),
            FieldView::new(
                "is-department-leader",
                "Leader",
                if self.is_department_leader { "Yes" } else { "No" },
            ),
        ]
    }

    fn controls() -> &'static [Control] {
        &[Control::Edit]
    }

    fn edit_form(&self) -> Option<EmployeeForm> {
        Some(EmployeeForm {
            id: self.id,
            name: self.name.clone(),
            surname: self.surname.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            birth_date: self.birth_date.clone(),
            start_work_date: self.start_work_date.clone(),
            is_department_leader: self.is_department_leader,
            position_id: self.position.as_ref().and_then(|p| p.id),
            department_id: self.department.as_ref().and_then(|d| d.id),
        })
    }
}
