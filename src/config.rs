use crate::error::Error;
use std::collections::HashSet;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use yaml_rust2::{Yaml, YamlLoader};

pub const DEFAULT_CONFIG_FILE: &str = "coop.yaml";
pub const DEFAULT_API_KEY_FILE: &str = "steam_api_key.secret";
pub const DEFAULT_TAG: &str = "online co-op";
pub const API_KEY_ENV: &str = "STEAM_API_KEY";

/// Settings for one run, after every source has been merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub steam_id: String,
    /// Lowercase persona names to intersect against.
    pub personas: HashSet<String>,
    /// Lowercase category that marks a game as co-op.
    pub tag: String,
}

/// Values from the command line and environment. These win over the file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub config_file: Option<PathBuf>,
    pub api_key_file: Option<PathBuf>,
    pub api_key: Option<String>,
    pub steam_id: Option<String>,
    pub personas: Option<Vec<String>>,
    pub tag: Option<String>,
}

/// Contents of the YAML config file. Every key is optional.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub api_key_file: Option<PathBuf>,
    pub steam_id: Option<String>,
    pub personas: Option<Vec<String>>,
    pub tag: Option<String>,
}

impl FileConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, Error> {
        let docs = YamlLoader::load_from_str(source)?;
        let Some(doc) = docs.first() else {
            return Ok(Self::default());
        };

        let personas = match &doc["personas"] {
            Yaml::BadValue => None,
            Yaml::Array(items) => Some(
                items
                    .iter()
                    .map(|p| scalar(p, "personas"))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            _ => return Err(Error::Config("`personas` must be a list".to_string())),
        };

        Ok(Self {
            api_key: optional_scalar(doc, "api_key")?,
            api_key_file: optional_scalar(doc, "api_key_file")?.map(PathBuf::from),
            steam_id: optional_scalar(doc, "steam_id")?,
            personas,
            tag: optional_scalar(doc, "tag")?,
        })
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        Self::from_yaml_str(&read_to_string(path)?)
    }
}

// Steam IDs are often written unquoted, which YAML reads as integers.
fn scalar(value: &Yaml, key: &str) -> Result<String, Error> {
    match value {
        Yaml::String(s) => Ok(s.clone()),
        Yaml::Integer(n) => Ok(n.to_string()),
        _ => Err(Error::Config(format!("`{key}` must be a string"))),
    }
}

fn optional_scalar(doc: &Yaml, key: &str) -> Result<Option<String>, Error> {
    match &doc[key] {
        Yaml::BadValue | Yaml::Null => Ok(None),
        value => scalar(value, key).map(Some),
    }
}

fn read_api_key(path: &Path) -> Result<String, Error> {
    read_to_string(path)
        .map(|key| key.trim().to_string())
        .map_err(|e| Error::Config(format!("cannot read API key file {}: {e}", path.display())))
}

impl Config {
    /// Reads the config file (explicit, or `coop.yaml` if present) and
    /// merges it under `overrides`.
    pub fn load(overrides: Overrides) -> Result<Self, Error> {
        let file = match &overrides.config_file {
            Some(path) => FileConfig::load(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                FileConfig::load(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => FileConfig::default(),
        };

        Self::resolve(file, overrides)
    }

    pub fn resolve(file: FileConfig, overrides: Overrides) -> Result<Self, Error> {
        let api_key = if let Some(path) = &overrides.api_key_file {
            read_api_key(path)?
        } else if let Some(key) = overrides.api_key.or(file.api_key) {
            key.trim().to_string()
        } else if let Some(path) = &file.api_key_file {
            read_api_key(path)?
        } else if Path::new(DEFAULT_API_KEY_FILE).is_file() {
            read_api_key(Path::new(DEFAULT_API_KEY_FILE))?
        } else {
            return Err(Error::Config(format!(
                "no API key (use --api-key, ${API_KEY_ENV}, or `api_key` in the config file)"
            )));
        };

        if api_key.is_empty() {
            return Err(Error::Config("API key is empty".to_string()));
        }

        let Some(steam_id) = overrides.steam_id.or(file.steam_id) else {
            return Err(Error::Config(
                "no Steam ID (use --steam-id or `steam_id` in the config file)".to_string(),
            ));
        };

        let personas = overrides
            .personas
            .or(file.personas)
            .unwrap_or_default()
            .iter()
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();

        let tag = overrides
            .tag
            .or(file.tag)
            .unwrap_or_else(|| DEFAULT_TAG.to_string())
            .to_lowercase();

        Ok(Self {
            api_key,
            steam_id: steam_id.trim().to_string(),
            personas,
            tag,
        })
    }
}
