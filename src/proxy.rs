//! Outbound proxy bootstrap
//!
//! Writes the proxy environment variables read by HTTP clients. Call it once
//! at process start, before any network client is constructed; clients built
//! earlier will not see the settings.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Proxy values for the four roles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    /// `http_proxy`
    pub http: String,
    /// `https_proxy`
    pub https: String,
    /// `all_proxy`, usually a SOCKS endpoint
    pub all: String,
    /// `no_proxy` exclusion list
    pub no_proxy: String,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            http: "http://127.0.0.1:2022".to_string(),
            https: "http://127.0.0.1:2022".to_string(),
            all: "socks5://127.0.0.1:2022".to_string(),
            no_proxy: "localhost,127.0.0.1".to_string(),
        }
    }
}

impl ProxySettings {
    /// The eight `(key, value)` pairs in write order: lower-case keys, then upper-case
    pub fn vars(&self) -> [(&'static str, &str); 8] {
        [
            ("http_proxy", self.http.as_str()),
            ("https_proxy", self.https.as_str()),
            ("all_proxy", self.all.as_str()),
            ("no_proxy", self.no_proxy.as_str()),
            ("HTTP_PROXY", self.http.as_str()),
            ("HTTPS_PROXY", self.https.as_str()),
            ("ALL_PROXY", self.all.as_str()),
            ("NO_PROXY", self.no_proxy.as_str()),
        ]
    }

    /// Write every variable into the process environment
    pub fn apply(&self) {
        for (key, value) in self.vars() {
            debug!("Setting {}={}", key, value);
            std::env::set_var(key, value);
        }
    }
}

/// Write the default proxy settings into the process environment
///
/// Idempotent; calling it again rewrites the same values.
pub fn set_proxy_environment() {
    ProxySettings::default().apply();
}
