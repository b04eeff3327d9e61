//! Backend configuration and factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use gradepoint_core::traits::CourseBackend;

use crate::file::JsonFileBackend;
use crate::http::HttpBackend;
use crate::memory::MemoryBackend;

/// Which storage backend to use.
///
/// Note: Custom Debug impl masks the API token to prevent accidental exposure in logs.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BackendConfig {
    Memory {
        /// Simulated latency per call, in milliseconds.
        #[serde(default)]
        latency_ms: u64,
        /// Start with the four sample courses.
        #[serde(default)]
        sample_data: bool,
    },
    File {
        #[serde(default = "default_data_file")]
        path: PathBuf,
    },
    Http {
        base_url: String,
        #[serde(default)]
        api_token: Option<String>,
        #[serde(default)]
        timeout_secs: Option<u64>,
    },
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendConfig::Memory {
                latency_ms,
                sample_data,
            } => f
                .debug_struct("Memory")
                .field("latency_ms", latency_ms)
                .field("sample_data", sample_data)
                .finish(),
            BackendConfig::File { path } => f.debug_struct("File").field("path", path).finish(),
            BackendConfig::Http {
                base_url,
                api_token,
                timeout_secs,
            } => f
                .debug_struct("Http")
                .field("base_url", base_url)
                .field("api_token", &api_token.as_ref().map(|_| "***"))
                .field("timeout_secs", timeout_secs)
                .finish(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::File {
            path: default_data_file(),
        }
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from("./gradepoint-courses.json")
}

/// Top-level gradepoint configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradepointConfig {
    /// Where courses are stored.
    #[serde(default)]
    pub backend: BackendConfig,
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied verbatim and never scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Resolve env vars in a backend config.
fn resolve_backend_config(config: &BackendConfig) -> BackendConfig {
    match config {
        BackendConfig::Memory { .. } => config.clone(),
        BackendConfig::File { path } => BackendConfig::File {
            path: PathBuf::from(resolve_env_vars(&path.to_string_lossy())),
        },
        BackendConfig::Http {
            base_url,
            api_token,
            timeout_secs,
        } => BackendConfig::Http {
            base_url: resolve_env_vars(base_url),
            api_token: api_token.as_ref().map(|t| resolve_env_vars(t)),
            timeout_secs: *timeout_secs,
        },
    }
}

/// Apply `GRADEPOINT_*` overrides. `GRADEPOINT_API_URL` wins over
/// `GRADEPOINT_DATA_FILE` when both are set.
fn apply_overrides(config: &mut GradepointConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(path) = lookup("GRADEPOINT_DATA_FILE") {
        config.backend = BackendConfig::File {
            path: PathBuf::from(path),
        };
    }

    if let Some(url) = lookup("GRADEPOINT_API_URL") {
        let (api_token, timeout_secs) = match &config.backend {
            BackendConfig::Http {
                api_token,
                timeout_secs,
                ..
            } => (api_token.clone(), *timeout_secs),
            _ => (None, None),
        };
        config.backend = BackendConfig::Http {
            base_url: url,
            api_token,
            timeout_secs,
        };
    }

    if let Some(token) = lookup("GRADEPOINT_API_TOKEN") {
        if let BackendConfig::Http { api_token, .. } = &mut config.backend {
            *api_token = Some(token);
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `gradepoint.toml` in the current directory
/// 2. `~/.config/gradepoint/config.toml`
///
/// Environment variable overrides: `GRADEPOINT_DATA_FILE`, `GRADEPOINT_API_URL`,
/// `GRADEPOINT_API_TOKEN`.
pub fn load_config() -> Result<GradepointConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GradepointConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradepoint.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("using config {}", path.display());
            toml::from_str::<GradepointConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GradepointConfig::default(),
    };

    apply_overrides(&mut config, |key| std::env::var(key).ok());
    config.backend = resolve_backend_config(&config.backend);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradepoint"))
}

/// Create a backend instance from its configuration.
pub fn create_backend(config: &BackendConfig) -> Result<Arc<dyn CourseBackend>> {
    match config {
        BackendConfig::Memory {
            latency_ms,
            sample_data,
        } => {
            let mut backend = if *sample_data {
                MemoryBackend::with_sample_data()
            } else {
                MemoryBackend::new()
            };
            if *latency_ms > 0 {
                backend = backend.with_latency(Duration::from_millis(*latency_ms));
            }
            Ok(Arc::new(backend))
        }
        BackendConfig::File { path } => Ok(Arc::new(JsonFileBackend::new(path.clone()))),
        BackendConfig::Http {
            base_url,
            api_token,
            timeout_secs,
        } => {
            anyhow::ensure!(!base_url.trim().is_empty(), "http backend needs a base_url");
            Ok(Arc::new(HttpBackend::new(
                base_url,
                api_token.clone(),
                *timeout_secs,
            )?))
        }
    }
}
