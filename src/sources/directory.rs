//! HTTP client for the external directory list source.
//!
//! Configuration is via environment variables:
//! - `STAFFDIR_DIRECTORY_URL` - Base URL of the directory API
//! - `STAFFDIR_LIST` - Name of the list to load (default: `Employees`)

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{Employee, Presence};

/// Default URL for local development.
const DEFAULT_URL: &str = "http://localhost:17020/_api";

/// Default list name.
const DEFAULT_LIST: &str = "Employees";

/// Upper bound on records fetched in one load. Effectively "all" for
/// realistic directory sizes.
const MAX_ITEMS: u32 = 5000;

/// Directory fetch/parse failure. Fatal to that load attempt only; the
/// previously held roster is retained by the caller.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Directory returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed directory payload: {0}")]
    Malformed(String),
}

/// A source of the flat employee collection.
#[async_trait]
pub trait DirectorySource: Send + Sync {
    /// Fetch the full list in one request and normalize it into employees.
    async fn fetch(&self) -> Result<Vec<Employee>, LoadError>;
}

/// Raw list item as the directory API serves it. Every field may be absent
/// or null; normalization happens in [`RawItem::into_employee`].
#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(rename = "Id")]
    id: i64,
    #[serde(rename = "Title", default)]
    title: Option<String>,
    #[serde(rename = "JobTitle", default)]
    job_title: Option<String>,
    #[serde(rename = "Department", default)]
    department: Option<String>,
    #[serde(rename = "Email", default)]
    email: Option<String>,
    #[serde(rename = "ProfilePhoto", default)]
    photo: Option<String>,
    #[serde(rename = "PhoneNumber", default)]
    phone: Option<String>,
    #[serde(rename = "Location", default)]
    location: Option<String>,
    #[serde(rename = "Skills", default)]
    skills: Option<String>,
    #[serde(rename = "AboutMe", default)]
    about_me: Option<String>,
    #[serde(rename = "JoiningDate", default)]
    joining_date: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "Manager", default)]
    manager: Option<RawPerson>,
}

/// Nested person field; only the email matters for manager resolution.
#[derive(Debug, Deserialize)]
struct RawPerson {
    #[serde(rename = "Email", default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    value: Vec<RawItem>,
}

impl RawItem {
    fn into_employee(self) -> Employee {
        Employee {
            id: self.id,
            name: self.title.unwrap_or_default(),
            job_title: self.job_title.unwrap_or_default(),
            department: self.department.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            photo: self.photo.unwrap_or_default(),
            manager_email: self
                .manager
                .and_then(|m| m.email)
                .unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            skills: self.skills.unwrap_or_default(),
            about_me: self.about_me.unwrap_or_default(),
            joining_date: self.joining_date,
            // Presence is populated by the enricher, never by the loader.
            presence: Presence::Offline,
        }
    }
}

/// HTTP client for the directory list API.
#[derive(Debug, Clone)]
pub struct HttpDirectoryClient {
    base_url: String,
    list_name: String,
    client: Client,
}

impl HttpDirectoryClient {
    /// Create client from environment variables.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("STAFFDIR_DIRECTORY_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        let list_name =
            std::env::var("STAFFDIR_LIST").unwrap_or_else(|_| DEFAULT_LIST.to_string());
        Self::new(base_url, list_name)
    }

    /// Create with explicit configuration.
    pub fn new(base_url: impl Into<String>, list_name: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            list_name: list_name.into(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl DirectorySource for HttpDirectoryClient {
    async fn fetch(&self) -> Result<Vec<Employee>, LoadError> {
        let url = format!(
            "{}/lists/{}/items?top={}",
            self.base_url, self.list_name, MAX_ITEMS
        );
        tracing::debug!("Fetching directory list: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LoadError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: ListResponse = response
            .json()
            .await
            .map_err(|e| LoadError::Malformed(e.to_string()))?;

        Ok(payload
            .value
            .into_iter()
            .map(RawItem::into_employee)
            .collect())
    }
}
