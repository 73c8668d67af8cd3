use serde::Deserialize;
use std::fmt;

use super::{Result, WeightbotError};

/// Account credentials, validated non-empty at construction
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let email = email.into();
        let password = password.into();
        if email.is_empty() {
            return Err(WeightbotError::Config("email is required".into()));
        }
        if password.is_empty() {
            return Err(WeightbotError::Config("password is required".into()));
        }
        Ok(Self { email, password })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Construction input for [`crate::services::Weightbot`].
///
/// Every field is optional here so that settings can be layered from
/// several sources before validation.
#[derive(Clone, Default, Deserialize)]
pub struct Options {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Base URL of the service (defaults to weightbot.com)
    #[serde(default)]
    pub site: Option<String>,
    /// Pre-seeded export text; skips the network entirely
    #[serde(skip)]
    pub raw_data: Option<String>,
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("site", &self.site)
            .field("raw_data", &self.raw_data.as_ref().map(String::len))
            .finish()
    }
}

impl Options {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }

    pub fn site(mut self, site: impl Into<String>) -> Self {
        self.site = Some(site.into());
        self
    }

    pub fn raw_data(mut self, raw: impl Into<String>) -> Self {
        self.raw_data = Some(raw.into());
        self
    }

    /// Fill unset fields from `fallback`
    pub fn or(self, fallback: Options) -> Self {
        Self {
            email: self.email.or(fallback.email),
            password: self.password.or(fallback.password),
            site: self.site.or(fallback.site),
            raw_data: self.raw_data.or(fallback.raw_data),
        }
    }

    pub fn credentials(&self) -> Result<Credentials> {
        let email = self
            .email
            .clone()
            .ok_or_else(|| WeightbotError::Config("email is required".into()))?;
        let password = self
            .password
            .clone()
            .ok_or_else(|| WeightbotError::Config("password is required".into()))?;
        Credentials::new(email, password)
    }
}
