// FILE: src/cli/config.rs

use crate::error::{PrefixerError, Result};
use serde::{Deserialize, Serialize};
use std::fs;

/// Settings a config file may supply; command line flags win
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub browsers: Option<Vec<String>>,
    pub indent: Option<String>,
    pub compact: Option<bool>,
    pub keep_comments: Option<bool>,
    pub output_directory: Option<String>,
}

pub fn load(config_path: &str) -> Result<ConfigFile> {
    let config_content = fs::read_to_string(config_path).map_err(|e| {
        PrefixerError::FileNotFound {
            path: format!("Config file {}: {}", config_path, e),
        }
    })?;

    let config = parse(config_path, &config_content)?;
    log::info!("Loaded configuration from {}", config_path);
    Ok(config)
}

fn parse(config_path: &str, content: &str) -> Result<ConfigFile> {
    if config_path.ends_with(".json") {
        serde_json::from_str(content).map_err(|e| PrefixerError::InvalidFormat {
            message: format!("Invalid JSON config: {}", e),
        })
    } else if config_path.ends_with(".toml") {
        toml::from_str(content).map_err(|e| PrefixerError::InvalidFormat {
            message: format!("Invalid TOML config: {}", e),
        })
    } else {
        Err(PrefixerError::InvalidFormat {
            message: "Config file must be .json or .toml format".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_toml_config() {
        let config = parse(
            "prefixr.toml",
            "browsers = [\"last 2 versions\", \"ie 10\"]\ncompact = true\n",
        )
        .unwrap();
        assert_eq!(
            config.browsers,
            Some(vec!["last 2 versions".to_string(), "ie 10".to_string()])
        );
        assert_eq!(config.compact, Some(true));
        assert!(config.indent.is_none());
    }

    #[test]
    fn test_json_config_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"indent": "\t", "keep_comments": false, "output_directory": "dist"}}"#).unwrap();

        let config = load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.indent.as_deref(), Some("\t"));
        assert_eq!(config.keep_comments, Some(false));
        assert_eq!(config.output_directory.as_deref(), Some("dist"));
    }

    #[test]
    fn test_bad_configs() {
        assert!(matches!(
            parse("prefixr.yaml", "browsers: []"),
            Err(PrefixerError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse("prefixr.json", "{ browsers: }"),
            Err(PrefixerError::InvalidFormat { .. })
        ));
        assert!(matches!(
            load("/nonexistent/prefixr.toml"),
            Err(PrefixerError::FileNotFound { .. })
        ));
    }
}
