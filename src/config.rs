//! Client configuration. The API base URL is the only required value; in the
//! original deployment it is a same-origin `/api` prefix, so everything here
//! accepts a full origin plus optional prefix and normalizes slashes when
//! joining endpoint paths.

use crate::errors::ApiError;
use url::Url;

/// Environment variable consulted by the CLI for the API base URL.
pub const API_URL_ENV: &str = "YGG_API_URL";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
}

impl AppConfig {
    /// Validates and stores the API base URL, e.g. `https://auth.example.com/api`.
    ///
    /// # Errors
    /// Returns an error if the URL cannot be parsed or is not http(s).
    pub fn new(api_base_url: &str) -> Result<Self, ApiError> {
        let parsed = Url::parse(api_base_url.trim())
            .map_err(|err| ApiError::Config(format!("invalid API base URL: {err}")))?;

        match parsed.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ApiError::Config(format!(
                    "invalid API base URL: unsupported scheme {scheme}"
                )));
            }
        }

        Ok(Self {
            api_base_url: api_base_url.trim().to_string(),
        })
    }
}

/// Builds a URL from a base URL and an endpoint path, normalizing slashes.
#[must_use]
pub fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::{join_url, AppConfig};
    use crate::errors::ApiError;

    #[test]
    fn join_url_normalizes_slashes() {
        assert_eq!(
            join_url("https://auth.example.com/api/", "/authserver/authenticate"),
            "https://auth.example.com/api/authserver/authenticate"
        );
        assert_eq!(
            join_url("https://auth.example.com", "extern/register/user"),
            "https://auth.example.com/extern/register/user"
        );
        assert_eq!(join_url("https://auth.example.com/api", "/"), "https://auth.example.com/api/");
    }

    #[test]
    fn config_accepts_http_and_https() {
        assert!(AppConfig::new("http://127.0.0.1:8095").is_ok());
        assert!(AppConfig::new(" https://auth.example.com/api ").is_ok());
    }

    #[test]
    fn config_rejects_bad_urls() {
        assert!(matches!(AppConfig::new("auth.example.com"), Err(ApiError::Config(_))));
        assert!(matches!(AppConfig::new("ftp://auth.example.com"), Err(ApiError::Config(_))));
    }
}
