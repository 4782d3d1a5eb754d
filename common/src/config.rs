use crate::error::{CpError, CpResult};

/// Connection details for the hosted backend. Every request made against the backend needs the
/// project url and the public api key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    url: String,
    anon_key: String,
}

impl BackendConfig {
    /// Create a new [BackendConfig], trimming whitespace and any trailing `/` from the `url`.
    /// # Errors
    /// This function will return an error if either value is empty or the url is not http(s)
    pub fn new<U, K>(url: U, anon_key: K) -> CpResult<Self>
    where
        U: AsRef<str>,
        K: AsRef<str>,
    {
        let url = url.as_ref().trim().trim_end_matches('/');
        let anon_key = anon_key.as_ref().trim();
        if url.is_empty() {
            return Err(CpError::Config("backend url cannot be empty"));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(CpError::Config("backend url must start with http:// or https://"));
        }
        if anon_key.is_empty() {
            return Err(CpError::Config("backend anon key cannot be empty"));
        }
        Ok(Self {
            url: url.to_owned(),
            anon_key: anon_key.to_owned(),
        })
    }

    /// Read the config from variables captured at compile time, the browser bundle has no
    /// runtime environment.
    /// # Errors
    /// This function will return an error if either variable was not set during the build or is
    /// invalid. Required build environment variables are:
    /// - SUPABASE_URL -> base url of the backend project
    /// - SUPABASE_ANON_KEY -> public api key of the backend project
    pub fn from_build_env() -> CpResult<Self> {
        let Some(url) = option_env!("SUPABASE_URL") else {
            return Err(CpError::Config("SUPABASE_URL was not set at build time"));
        };
        let Some(anon_key) = option_env!("SUPABASE_ANON_KEY") else {
            return Err(CpError::Config("SUPABASE_ANON_KEY was not set at build time"));
        };
        Self::new(url, anon_key)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    /// Url of an auth endpoint, `path` is relative to `/auth/v1`
    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.url, path.trim_start_matches('/'))
    }

    /// Url of a table in the rest interface of the store
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url, table.trim_start_matches('/'))
    }
}
