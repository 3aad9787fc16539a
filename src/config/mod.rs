use std::env;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::schema::SchemaEntry;

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct ConfigFile {
    pub token: Option<String>,
    #[serde(alias = "database_id")]
    pub collection: Option<String>,
    pub api_base: Option<String>,
    pub page_size: Option<u32>,
    pub max_pages: Option<u32>,
    pub rate: Option<u32>,
    pub timeout: Option<usize>,
    #[serde(alias = "cache_ttl_seconds")]
    pub cache_ttl: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub per_page: Option<u32>,
    pub output: Option<String>,
    pub output_format: Option<String>,
    pub no_color: Option<bool>,
    pub schema: Option<Vec<SchemaEntry>>,
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("USERPROFILE").map(PathBuf::from))
        .or_else(|| {
            let drive = env::var_os("HOMEDRIVE")?;
            let path = env::var_os("HOMEPATH")?;
            Some(PathBuf::from(drive).join(path))
        })
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(home_dir()?.join(".placeboard").join("config.yml"))
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        if let Some(home) = home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

pub fn expand_tilde_string(path: &str) -> String {
    expand_tilde(path).to_string_lossy().to_string()
}

pub fn load_config(path: &PathBuf, allow_missing: bool) -> Result<ConfigFile, String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => serde_yaml::from_str::<ConfigFile>(&contents)
            .map_err(|e| format!("failed to parse config '{}': {e}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
            Ok(ConfigFile::default())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(format!("config file not found '{}'", path.display()))
        }
        Err(e) => Err(format!("failed to read config '{}': {e}", path.display())),
    }
}

fn default_config_yaml() -> String {
    r#"# Placeboard config
#
# Location (default):
#   ~/.placeboard/config.yml

# Source (required, here or on the command line)
# token: secret_xxx             # or set PLACEBOARD_TOKEN
# collection: d9824bdc84454327be8b5b47500af6ce

# api_base: https://api.notion.com/v1

# Fetch
page_size: 100
max_pages: 200
rate: 3
timeout: 10

# Whole-result cache lifetime in seconds (0 disables caching)
cache_ttl: 3600

# Display
sort_by: name
sort_order: asc
per_page: 20

# Output (optional)
# output: ./places.html
# output_format: html

no_color: false

# Column map (defaults to the standard places schema when omitted)
# schema:
#   - column: Place
#     kind: title
#   - column: City
#     kind: rich_text
#   - column: Rating
#     kind: number
"#
    .to_string()
}

pub fn ensure_default_config_file(path: &PathBuf) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    let parent = path
        .parent()
        .ok_or_else(|| format!("invalid config path '{}'", path.display()))?;
    std::fs::create_dir_all(parent).map_err(|e| {
        format!(
            "failed to create config directory '{}': {e}",
            parent.display()
        )
    })?;
    let contents = default_config_yaml();
    std::fs::write(path, contents)
        .map_err(|e| format!("failed to write config file '{}': {e}", path.display()))?;
    Ok(())
}
