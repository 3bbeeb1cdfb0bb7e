//! Company summary shown on the dashboard.

use serde::{Deserialize, Serialize};

use super::text_or_empty;

/// Response of `GET /api/company/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub company_name: String,
    /// Number of departments.
    #[serde(default)]
    pub departments: u64,
    /// Number of positions.
    #[serde(default)]
    pub positions: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_company() {
        let info: CompanyInfo =
            serde_json::from_str(r#"{"company_name": "Evo", "departments": 4, "positions": 11}"#).unwrap();
        assert_eq!(info.company_name, "Evo");
        assert_eq!(info.departments, 4);
        assert_eq!(info.positions, 11);
    }

    #[test]
    fn test_null_name() {
        let info: CompanyInfo = serde_json::from_str(r#"{"company_name": null}"#).unwrap();
        assert_eq!(info, CompanyInfo::default());
    }
}
