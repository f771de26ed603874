use anyhow::Result;
use clap::Parser;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::DocumentId;

#[derive(Parser, Debug)]
#[command(name = "pmstandards")]
#[command(about = "Serves the PM standards reference viewer", long_about = None)]
pub struct Cli {
    #[arg(short = 'c', long = "config")]
    pub config_path: Option<String>,
}

pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".pmstandards")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}

#[derive(Debug, Deserialize, Clone)]
pub struct App {
    #[serde(default = "default_database")]
    database: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_content")]
    content: String,
    #[serde(default = "default_pdf_dir")]
    pdf_dir: String,
}

fn default_database() -> String {
    "pmstandards.db".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_content() -> String {
    "references.json".to_string()
}

fn default_pdf_dir() -> String {
    "pdfs".to_string()
}

impl Default for App {
    fn default() -> Self {
        App {
            database: default_database(),
            port: default_port(),
            content: default_content(),
            pdf_dir: default_pdf_dir(),
        }
    }
}

impl App {
    pub fn get_db(&self) -> &str {
        &self.database
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    /// Content payload path; relative paths resolve against `data_dir`.
    pub fn content_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.content)
    }

    pub fn pdf_dir(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.pdf_dir)
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct DocumentOverride {
    pub offset: i32,
}

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub app: App,
    #[serde(default)]
    pub documents: HashMap<DocumentId, DocumentOverride>,
}

impl Config {
    pub fn new(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!(path = ?path, "config file not found, using defaults");
            return Ok(Config::default());
        }
        Config::load_config(path)
    }

    fn load_config(path: &Path) -> Result<Config> {
        let yaml_str = fs::read_to_string(path)?;
        Config::from_yaml(&yaml_str)
    }

    pub fn from_yaml(yaml_str: &str) -> Result<Config> {
        let yaml_with_env = Config::substitute_env_vars(yaml_str)?;
        // an empty document deserializes to unit, not to an empty map
        if yaml_with_env.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(&yaml_with_env)?;
        Ok(config)
    }

    pub fn offsets(&self) -> HashMap<DocumentId, i32> {
        self.documents.iter().map(|(id, o)| (*id, o.offset)).collect()
    }

    fn substitute_env_vars(yaml_str: &str) -> Result<String> {
        let mut result = yaml_str.to_string();
        let mut offset = 0;

        while let Some(start) = result[offset..].find("${") {
            let actual_start = offset + start;
            if let Some(end) = result[actual_start..].find("}") {
                let var_name = &result[actual_start + 2..actual_start + end];

                // ${VAR:-default}
                let env_value = if let Some(default_start) = var_name.find(":-") {
                    let actual_var = &var_name[..default_start];
                    let default_val = &var_name[default_start + 2..];
                    env::var(actual_var).unwrap_or_else(|_| default_val.to_string())
                } else {
                    env::var(var_name).unwrap_or_else(|_| {
                        tracing::warn!("environment variable '{}' not found", var_name);
                        String::new()
                    })
                };

                result.replace_range(actual_start..actual_start + end + 1, &env_value);
                offset = actual_start + env_value.len();
            } else {
                break;
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_sections_missing() {
        let cfg = Config::from_yaml("").unwrap();
        assert_eq!(cfg.app.get_port(), 8080);
        assert_eq!(cfg.app.get_db(), "pmstandards.db");
        assert!(cfg.documents.is_empty());

        let dir = Path::new("/srv/pm");
        assert_eq!(cfg.app.content_path(dir), PathBuf::from("/srv/pm/references.json"));
        assert_eq!(cfg.app.pdf_dir(dir), PathBuf::from("/srv/pm/pdfs"));
    }

    #[test]
    fn test_document_offsets() {
        let cfg = Config::from_yaml(
            r#"
app:
  port: 9000
documents:
  prince2:
    offset: 5
  iso21502:
    offset: -1
"#,
        )
        .unwrap();
        assert_eq!(cfg.app.get_port(), 9000);
        let offsets = cfg.offsets();
        assert_eq!(offsets.get(&DocumentId::Prince2), Some(&5));
        assert_eq!(offsets.get(&DocumentId::Iso21502), Some(&-1));
        assert_eq!(offsets.get(&DocumentId::Pmbok), None);
    }

    #[test]
    fn test_unknown_document_in_config_is_rejected() {
        assert!(Config::from_yaml("documents:\n  pmbok6:\n    offset: 1\n").is_err());
    }

    #[test]
    fn test_env_default_substitution() {
        let yaml = Config::substitute_env_vars("port: ${PMSTANDARDS_TEST_UNSET_PORT:-7070}").unwrap();
        assert_eq!(yaml, "port: 7070");
    }

    #[test]
    fn test_absolute_content_path_is_kept() {
        let cfg = Config::from_yaml("app:\n  content: /data/references.json\n").unwrap();
        assert_eq!(
            cfg.app.content_path(Path::new("/home/me/.pmstandards")),
            PathBuf::from("/data/references.json")
        );
    }
}
