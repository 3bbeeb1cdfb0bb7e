//! Directory records, request DTOs and their panel forms.

pub mod company;
pub mod department;
pub mod employee;
pub mod position;
pub mod vacancy;

pub use company::CompanyInfo;
pub use department::{CreateDepartment, Department, DepartmentForm, NewDepartmentForm, UpdateDepartment};
pub use employee::{Employee, EmployeeForm, HireEmployee, HireForm, UpdateEmployee};
pub use position::{CreatePosition, NewPositionForm, Position, PositionForm, UpdatePosition};
pub use vacancy::{NewVacancyForm, OpenVacancy, Vacancy};

use serde::{Deserialize, Deserializer};

use crate::dates;

/// Nested `{id, name}` reference returned inside employee and vacancy records.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,
}

/// `null` or a missing value becomes an empty string.
pub(crate) fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// `null` or a missing value becomes `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Date fields come back either as display text or as unix seconds.
pub(crate) fn date_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Timestamp(i64),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(text)) => text,
        Some(Raw::Timestamp(ts)) => dates::from_timestamp(ts),
        None => String::new(),
    })
}

/// Options for a choice input: `(id, label)`.
pub type ChoiceOptions = Vec<(i32, String)>;
