//! Directory backend HTTP client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, Response, Url, cookie::Jar};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::{AppError, Result};
use crate::models::{CompanyInfo, Department, Employee, Position, Vacancy};
use crate::panel::{Entity, EntityId};

/// A record type served by one CRUD endpoint.
pub trait Resource: Entity + DeserializeOwned {
    /// Endpoint path relative to the API base, e.g. `api/department/`.
    const PATH: &'static str;
    /// Key wrapping the record in create/update responses.
    const ENVELOPE: &'static str;

    /// Record to show when an update response carries no record.
    fn from_update(_update: &Self::Update) -> Option<Self> {
        None
    }
}

impl Resource for Department {
    const PATH: &'static str = "api/department/";
    const ENVELOPE: &'static str = "department";

    fn from_update(update: &Self::Update) -> Option<Self> {
        Some(update.applied())
    }
}

impl Resource for Position {
    const PATH: &'static str = "api/position/";
    const ENVELOPE: &'static str = "position";

    fn from_update(update: &Self::Update) -> Option<Self> {
        Some(update.applied())
    }
}

impl Resource for Vacancy {
    const PATH: &'static str = "api/vacancy/";
    const ENVELOPE: &'static str = "vacancy";
}

impl Resource for Employee {
    const PATH: &'static str = "api/employee/";
    const ENVELOPE: &'static str = "employee";
}

/// Error body returned by the backend on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct DeleteBody {
    id: EntityId,
}

/// Directory backend client.
///
/// Every call is a single form-encoded request; there are no retries.
#[derive(Clone)]
pub struct DirectoryClient {
    client: Client,
    base_url: Url,
}

impl DirectoryClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - The backend URL (e.g., "http://127.0.0.1:5000")
    /// * `timeout` - Per-request timeout; `None` waits indefinitely
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let normalized = format!("{}/", base_url.trim().trim_end_matches('/'));
        let base_url =
            Url::parse(&normalized).map_err(|e| AppError::config(format!("Invalid API URL '{base_url}': {e}")))?;

        let jar = Arc::new(Jar::default());
        let mut builder = Client::builder().cookie_provider(jar);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, base_url })
    }

    /// Create a client from the `[api]` config section.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(&config.base_url, config.timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Aggregate company info.
    pub async fn company(&self) -> Result<CompanyInfo> {
        let body = self.send(Method::GET, "api/company/", None::<&()>).await?;
        parse_json(&body)
    }

    /// Fetch the full list for a resource, in server order.
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>> {
        let body = self.send(Method::GET, R::PATH, None::<&()>).await?;
        parse_json(&body)
    }

    /// Create a record and return it as stored by the backend.
    pub async fn create<R: Resource>(&self, data: &R::Create) -> Result<R> {
        let body = self.send(Method::POST, R::PATH, Some(data)).await?;
        unwrap_envelope::<R>(&body, R::ENVELOPE)?
            .ok_or_else(|| AppError::parse(format!("response is missing '{}'", R::ENVELOPE)))
    }

    /// Update a record and return the backend's version of it.
    pub async fn update<R: Resource>(&self, data: &R::Update) -> Result<R> {
        let body = self.send(Method::PATCH, R::PATH, Some(data)).await?;
        match unwrap_envelope::<R>(&body, R::ENVELOPE)? {
            Some(record) => Ok(record),
            None => R::from_update(data)
                .ok_or_else(|| AppError::parse(format!("response is missing '{}'", R::ENVELOPE))),
        }
    }

    /// Delete a record by id.
    pub async fn delete<R: Resource>(&self, id: EntityId) -> Result<()> {
        self.send(Method::DELETE, R::PATH, Some(&DeleteBody { id })).await?;
        Ok(())
    }

    /// Test connection to the backend.
    pub async fn test_connection(&self) -> Result<bool> {
        let url = self.endpoint("api/company/")?;
        let response = self.client.get(url).send().await?;
        Ok(response.status().is_success())
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::config(format!("Invalid endpoint '{path}': {e}")))
    }

    /// Send one request and return the body of a successful response.
    async fn send<T: Serialize + ?Sized>(&self, method: Method, path: &str, form: Option<&T>) -> Result<String> {
        let url = self.endpoint(path)?;
        tracing::debug!("{} {}", method, url);

        let mut request = self.client.request(method, url);
        if let Some(form) = form {
            request = request.form(form);
        }

        let response = check_status(request.send().await?).await?;
        Ok(response.text().await?)
    }
}

/// Turn a non-success response into `AppError::Api`, extracting the backend's `error` text.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(err) => err.error,
        Err(_) => {
            tracing::warn!("Unparsable error response ({}): {}", status, body);
            String::new()
        }
    };

    Err(AppError::Api {
        status: status.as_u16(),
        message,
    })
}

fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| AppError::parse(format!("Invalid response body: {e}")))
}

/// Extract `{key: record}`. An empty body, a missing key or `null` yields `None`.
fn unwrap_envelope<T: DeserializeOwned>(body: &str, key: &str) -> Result<Option<T>> {
    if body.trim().is_empty() {
        return Ok(None);
    }

    let mut value: Value = parse_json(body)?;
    match value.get_mut(key).map(Value::take) {
        None | Some(Value::Null) => Ok(None),
        Some(inner) => serde_json::from_value(inner)
            .map(Some)
            .map_err(|e| AppError::parse(format!("Invalid '{key}' record: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalized() {
        let client = DirectoryClient::new("http://localhost:5000", Some(Duration::from_secs(5))).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:5000/");
        assert_eq!(
            client.endpoint(Department::PATH).unwrap().as_str(),
            "http://localhost:5000/api/department/"
        );

        let client = DirectoryClient::new("https://hr.example.com/directory/", Some(Duration::from_secs(5))).unwrap();
        assert_eq!(
            client.endpoint(Vacancy::PATH).unwrap().as_str(),
            "https://hr.example.com/directory/api/vacancy/"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = DirectoryClient::new("not a url", Some(Duration::from_secs(5)));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_unwrap_envelope() {
        let dept: Option<Department> =
            unwrap_envelope(r#"{"department": {"id": 4, "name": "Ops", "description": ""}}"#, "department").unwrap();
        assert_eq!(dept.unwrap().id, 4);

        let missing: Option<Department> = unwrap_envelope(r#"{"success": "updated"}"#, "department").unwrap();
        assert!(missing.is_none());

        let empty: Option<Department> = unwrap_envelope("", "department").unwrap();
        assert!(empty.is_none());

        let bad: Result<Option<Department>> = unwrap_envelope(r#"{"department": {"name": 3}}"#, "department");
        assert!(matches!(bad, Err(AppError::Parse(_))));
    }
}
