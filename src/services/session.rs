//! Session client for weightbot.com
//!
//! weightbot has no API. The export is reached by logging in through the
//! web form and confirming the export on the page that follows, all within
//! one cookie session.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::Url;

use crate::services::form::HtmlForm;
use crate::services::normalizer::EXPORT_HEADER;
use crate::types::{Credentials, Result, WeightbotError};

/// Default service base URL
pub const DEFAULT_SITE: &str = "https://weightbot.com";

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("weightbot/", env!("CARGO_PKG_VERSION"));

/// HTTP request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Anything that can produce a raw export
pub trait ExportSource {
    fn fetch_raw_export(&self, site: &str, credentials: &Credentials) -> Result<String>;
}

/// Browser-like session against the weightbot web pages
#[derive(Debug, Clone)]
pub struct SessionClient {
    timeout: Duration,
}

impl Default for SessionClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionClient {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }

    /// Fresh client with its own cookie jar
    fn build_client(&self) -> Result<Client> {
        Ok(Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .timeout(self.timeout)
            .build()?)
    }
}

impl ExportSource for SessionClient {
    /// Log in, confirm the export and return the export text.
    ///
    /// No retries: any failure surfaces immediately.
    fn fetch_raw_export(&self, site: &str, credentials: &Credentials) -> Result<String> {
        let client = self.build_client()?;
        let login_url = login_url(site)?;

        let response = client.get(login_url.clone()).send()?;
        tracing::debug!(url = %login_url, status = %response.status(), "fetched login page");
        let (page_url, body) = read_page(response)?;

        let mut login = HtmlForm::first_in(&body, &page_url)?;
        login.set("email", credentials.email());
        login.set("password", credentials.password());
        let response = login.submit(&client)?;
        tracing::debug!(action = %login.action, status = %response.status(), "submitted login form");
        let (page_url, body) = read_page(response)?;

        let confirm = HtmlForm::first_in(&body, &page_url)?;
        let response = confirm.submit(&client)?;
        tracing::debug!(action = %confirm.action, status = %response.status(), "submitted export form");
        let body = response.text()?;
        tracing::debug!(bytes = body.len(), "received export body");

        validate_export(body)
    }
}

/// `{site}/account/login`, tolerating a trailing slash on `site`
pub fn login_url(site: &str) -> Result<Url> {
    let url = format!("{}/account/login", site.trim_end_matches('/'));
    Url::parse(&url).map_err(|e| WeightbotError::Config(format!("invalid site {:?}: {}", site, e)))
}

/// Accept `body` only if it starts with the header line and a newline
pub fn validate_export(body: String) -> Result<String> {
    let valid = body
        .strip_prefix(EXPORT_HEADER)
        .is_some_and(|rest| rest.starts_with('\n'));
    if valid {
        Ok(body)
    } else {
        Err(WeightbotError::InvalidExportFormat)
    }
}

fn read_page(response: Response) -> Result<(Url, String)> {
    let url = response.url().clone();
    let body = response.text()?;
    Ok((url, body))
}
