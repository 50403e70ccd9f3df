//! Frontend configuration module
//!
//! Values are baked in at compile time so the bundle needs no runtime
//! configuration fetch. Set `BRANDREPORT_API_URL` / `BRANDREPORT_APP_NAME`
//! when running `trunk build` to override the defaults.

const DEFAULT_API_URL: &str = "/api";
const DEFAULT_APP_NAME: &str = "HR 360";

/// Frontend configuration for the API endpoint and branding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendConfig {
    /// Base URL of the reports API, without a trailing slash.
    pub api_base_url: String,
    /// Product name shown on the loading screen and header.
    pub app_name: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self::from_values(
            option_env!("BRANDREPORT_API_URL"),
            option_env!("BRANDREPORT_APP_NAME"),
        )
    }
}

impl FrontendConfig {
    /// Create a new frontend configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    fn from_values(api_base_url: Option<&str>, app_name: Option<&str>) -> Self {
        let api_base_url = api_base_url
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/');
        let app_name = app_name
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_APP_NAME);

        Self {
            api_base_url: if api_base_url.is_empty() {
                DEFAULT_API_URL.to_string()
            } else {
                api_base_url.to_string()
            },
            app_name: app_name.to_string(),
        }
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }
}
