//! Versioned JSON config for the server binary.

use std::path::{Path, PathBuf};

use eyre::{WrapErr, eyre};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use manasooth_bedrock::client::DEFAULT_MODEL_ID;

const APP_DIR: &str = "com.manasooth.server";

type Migration = fn(&mut Map<String, Value>);

/// Upgrade steps, indexed by the version they upgrade from. The config
/// version this build writes is `MIGRATIONS.len()`.
const MIGRATIONS: &[Migration] = &[add_log_json];

const LATEST: u32 = MIGRATIONS.len() as u32;

fn add_log_json(obj: &mut Map<String, Value>) {
    obj.entry("log_json").or_insert(Value::Bool(false));
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 0 (or absent) for files written before versioning.
    #[serde(default)]
    pub config_version: u32,
    pub listen_addr: String,
    /// Directory holding the JSON blobs.
    pub data_dir: PathBuf,
    pub region: String,
    /// Bedrock model or inference profile ID.
    pub model_id: String,
    /// JSON log lines instead of the human-readable format.
    #[serde(default)]
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            config_version: LATEST,
            listen_addr: "127.0.0.1:8787".to_string(),
            data_dir: dirs::data_dir()
                .map(|d| d.join(APP_DIR))
                .unwrap_or_else(|| PathBuf::from("manasooth-data")),
            region: "us-east-1".to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            log_json: false,
        }
    }
}

/// `<config dir>/com.manasooth.server/config.json`.
pub fn config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre!("could not determine the config directory"))?;
    Ok(base.join(APP_DIR).join("config.json"))
}

impl ServerConfig {
    /// Read `path`, upgrading older layouts. A missing file yields defaults.
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file absent, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e).wrap_err_with(|| format!("reading {}", path.display())),
        };

        let value: Value =
            serde_json::from_str(&raw).wrap_err_with(|| format!("parsing {}", path.display()))?;
        let upgraded = upgrade(value)?;
        Ok(serde_json::from_value(upgraded)?)
    }

    /// Apply `MANASOOTH_*` and `AWS_REGION` overrides. `var` looks up one
    /// variable; pass `|k| std::env::var(k).ok()` for the real environment.
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = var("MANASOOTH_LISTEN_ADDR") {
            self.listen_addr = addr;
        }
        if let Some(dir) = var("MANASOOTH_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(model) = var("MANASOOTH_MODEL_ID") {
            self.model_id = model;
        }
        if let Some(region) = var("AWS_REGION") {
            self.region = region;
        }
    }
}

/// Bring a raw config value up to [`LATEST`].
fn upgrade(mut value: Value) -> eyre::Result<Value> {
    let found = value
        .get("config_version")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    let found = u32::try_from(found).unwrap_or(u32::MAX);
    if found > LATEST {
        return Err(eyre!(
            "config version {found} was written by a newer Manasooth (this build reads up to {LATEST})"
        ));
    }

    let obj = value
        .as_object_mut()
        .ok_or_else(|| eyre!("config root must be a JSON object"))?;
    for (from, step) in MIGRATIONS.iter().enumerate().skip(found as usize) {
        step(obj);
        tracing::info!(from, to = from + 1, "config upgraded");
    }
    obj.insert("config_version".to_string(), Value::from(LATEST));
    Ok(value)
}
