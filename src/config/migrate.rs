use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Keys every current config file is expected to carry.
const KNOWN_KEYS: [&str; 4] = ["database", "secret_var", "default_duration", "separator_char"];

fn read_mapping(conf: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(conf)?;
    let yaml: Value = serde_yaml::from_str(&content)?;

    match yaml {
        Value::Mapping(map) => Ok(map),
        // an empty file parses as Null
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{} is not a YAML mapping",
            conf.display()
        ))),
    }
}

/// Return the known keys that are absent from the config file at `conf`.
pub fn missing_fields(conf: &Path) -> AppResult<Vec<&'static str>> {
    let map = read_mapping(conf)?;

    Ok(KNOWN_KEYS
        .iter()
        .filter(|k| !map.contains_key(Value::String(k.to_string())))
        .copied()
        .collect())
}

/// Add the missing keys to the config file, keeping every value already present.
///
/// Returns:
///   Ok(true)  → config updated
///   Ok(false) → no change needed
pub fn migrate_config_file(conf: &Path) -> AppResult<bool> {
    let missing = missing_fields(conf)?;
    if missing.is_empty() {
        info("Configuration file is up to date.");
        return Ok(false);
    }

    let mut map = read_mapping(conf)?;
    let defaults = serde_yaml::to_value(Config::default())?;

    for key in &missing {
        let k = Value::String(key.to_string());
        if let Some(v) = defaults.get(*key) {
            map.insert(k, v.clone());
        }
    }

    let serialized = serde_yaml::to_string(&Value::Mapping(map))?;
    fs::write(conf, serialized)?;

    success(format!(
        "Configuration migrated: added {}",
        missing.join(", ")
    ));
    Ok(true)
}
