use configuration::ApiConfig;
use serde::Serialize;
use std::fmt;

/// Identity of one queried API endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    base_url: String,
    subpath: String,
    name: String,
}

impl Endpoint {
    pub fn new(base_url: &str, subpath: &str, name: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            subpath: subpath.trim_matches('/').to_string(),
            name: name.trim_matches('/').to_string(),
        }
    }

    pub fn from_config(api: &ApiConfig, name: &str) -> Self {
        Self::new(&api.base_url, &api.subpath, name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// e.g. `/api/v1/authorized_transactions`
    pub fn subpath(&self) -> String {
        format!("/{}/{}", self.subpath, self.name)
    }

    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, self.subpath())
    }

    /// Short data-source label, e.g. `api.authorized_transactions`.
    pub fn source_text(&self) -> String {
        format!("api.{}", self.name)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.subpath())
    }
}
