//! Runtime configuration
//!
//! Read once at start-up from `HEALTHAI_*` environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Backend API root; the profile is read from `{api_base_url}/user/profile`
    pub api_base_url: String,
    /// Sent verbatim as the `Cookie` header on the profile request
    pub session_cookie: Option<String>,
    /// Unset means the profile request may wait indefinitely
    pub profile_timeout: Option<Duration>,
    pub logo_path: Option<PathBuf>,
    pub report_dir: PathBuf,
    pub database_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let root = project_root();

        let profile_timeout = get("HEALTHAI_PROFILE_TIMEOUT_SECS").and_then(|v| match v.parse::<u64>() {
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(_) => {
                tracing::warn!(value = %v, "Ignoring invalid HEALTHAI_PROFILE_TIMEOUT_SECS");
                None
            }
        });

        Self {
            api_base_url: get("HEALTHAI_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            session_cookie: get("HEALTHAI_SESSION_COOKIE"),
            profile_timeout,
            logo_path: get("HEALTHAI_LOGO_PATH").map(PathBuf::from),
            report_dir: get("HEALTHAI_REPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| root.join("reports")),
            database_path: get("HEALTHAI_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| root.join("data").join("healthai.db")),
        }
    }
}

/// Directory of the running executable, lifted out of `target/{debug,release}`
fn project_root() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(Path::parent) {
            path = grandparent.to_path_buf();
        }
    }
    path
}
