//! Vacancy record and the open-vacancy form.

use serde::{Deserialize, Serialize};

use super::{NamedRef, date_text, null_as_default};
use crate::dates;
use crate::error::{AppError, Result};
use crate::panel::{ChoiceSource, Control, Entity, EntityForm, EntityId, EntityKind, FieldView, FormInput, NoEdit};

/// Open vacancy as returned by `/api/vacancy/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vacancy {
    pub id: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: NamedRef,
    #[serde(default, deserialize_with = "date_text")]
    pub date_opened: String,
    #[serde(default)]
    pub department_id: Option<i32>,
}

/// DTO for opening a vacancy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenVacancy {
    pub position_id: i32,
    pub department_id: i32,
    /// `MM/DD/YYYY`; empty lets the backend use the current date.
    pub date_opened: String,
}

/// Create form for a new vacancy.
#[derive(Debug, Clone, Default)]
pub struct NewVacancyForm {
    pub position_id: Option<i32>,
    pub department_id: Option<i32>,
    pub date_opened: String,
}

impl NewVacancyForm {
    /// Empty form opened against a department.
    pub fn for_department(department_id: Option<i32>) -> Self {
        Self {
            department_id,
            ..Default::default()
        }
    }
}

impl EntityForm for NewVacancyForm {
    type Output = OpenVacancy;

    fn inputs(&mut self) -> Vec<FormInput<'_>> {
        vec![
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
            FormInput::Date {
                key: "date-opened",
                label: "Date opened",
                value: &mut self.date_opened,
            },
        ]
    }

    fn validate(&self) -> Result<OpenVacancy> {
        let position_id = self
            .position_id
            .ok_or_else(|| AppError::validation("Position is required"))?;
        let department_id = self
            .department_id
            .ok_or_else(|| AppError::validation("Department is required"))?;
        let date_opened =
            dates::normalize_date_input(&self.date_opened).ok_or_else(|| AppError::validation("Invalid date format"))?;

        Ok(OpenVacancy {
            position_id,
            department_id,
            date_opened,
        })
    }
}

impl Entity for Vacancy {
    const KIND: EntityKind = EntityKind::Vacancy;

    type Create = OpenVacancy;
    type Update = ();
    type EditForm = NoEdit;
    type CreateForm = NewVacancyForm;

    fn id(&self) -> EntityId {
        EntityId(self.id)
    }

    fn title(&self) -> String {
        self.position.name.clone()
    }

    fn fields(&self) -> Vec<FieldView> {
        vec![
            FieldView::new("name", "Position", self.position.name.clone()),
            FieldView::new("date-opened", "Opened", self.date_opened.clone()),
        ]
    }

    fn controls() -> &'static [Control] {
        &[Control::Delete, Control::Hire]
    }

    fn edit_form(&self) -> Option<NoEdit> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::render_row;

    #[test]
    fn test_deserialize_timestamp_date() {
        let vacancy: Vacancy =
            serde_json::from_str(r#"{"id":5,"position":{"name":"QA"},"date_opened":1514851200}"#).unwrap();
        assert_eq!(vacancy.position.name, "QA");
        assert_eq!(vacancy.date_opened, "01/02/2018");
    }

    #[test]
    fn test_deserialize_text_date() {
        let vacancy: Vacancy =
            serde_json::from_str(r#"{"id":5,"position":{"name":"QA"},"date_opened":"03/04/2019"}"#).unwrap();
        assert_eq!(vacancy.date_opened, "03/04/2019");
    }

    #[test]
    fn test_null_position_does_not_break_list() {
        let vacancies: Vec<Vacancy> = serde_json::from_str(
            r#"[{"id":5,"position":null,"date_opened":1514851200},{"id":6,"position":{"name":"QA"}}]"#,
        )
        .unwrap();
        assert_eq!(vacancies.len(), 2);
        assert_eq!(vacancies[0].position, NamedRef::default());
        assert_eq!(vacancies[1].position.name, "QA");
        assert_eq!(vacancies[1].date_opened, "");
    }

    #[test]
    fn test_row_has_hire_and_no_edit() {
        let vacancy = Vacancy {
            id: 5,
            position: NamedRef {
                id: None,
                name: "QA".to_string(),
            },
            date_opened: "03/04/2019".to_string(),
            department_id: Some(1),
        };
        let row = render_row(&vacancy);
        let ids: Vec<String> = row.controls.iter().map(|c| c.element_id.to_string()).collect();
        assert_eq!(ids, ["vacancy-5-delete-button", "vacancy-5-hire-button"]);
        assert_eq!(row.text("date-opened"), Some("03/04/2019"));
        assert!(vacancy.edit_form().is_none());
    }

    #[test]
    fn test_form_requires_position_and_department() {
        let mut form = NewVacancyForm::for_department(Some(1));
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Validation error: Position is required"
        );

        form.position_id = Some(3);
        form.date_opened = "2019-03-04".to_string();
        let body = form.validate().unwrap();
        assert_eq!(body.department_id, 1);
        assert_eq!(body.date_opened, "03/04/2019");

        form.department_id = None;
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_form_rejects_bad_date() {
        let form = NewVacancyForm {
            position_id: Some(3),
            department_id: Some(1),
            date_opened: "next week".to_string(),
        };
        assert!(form.validate().is_err());
    }
}
