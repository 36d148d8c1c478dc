use crate::error::{CoreError, CoreResult};
use crate::paths::BaseDir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "MANIFEST_CONFIG";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Zero-based column indices into each row of the recording sheet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnConfig {
    #[serde(rename = "fileName")]
    pub file_name: usize,
    pub transcript: usize,
}

impl ColumnConfig {
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            CoreError::InvalidInput(format!("config {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// `$MANIFEST_CONFIG` when set, otherwise `config.json` beside the program.
    pub fn locate(base: &BaseDir, env_override: Option<&str>) -> PathBuf {
        match env_override {
            Some(p) if !p.is_empty() => base.resolve(p),
            _ => base.resolve(CONFIG_FILE_NAME),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_camel_case_field_names() {
        let cfg = ColumnConfig::from_json_str(r#"{"fileName": 0, "transcript": 2}"#).unwrap();
        assert_eq!(
            cfg,
            ColumnConfig {
                file_name: 0,
                transcript: 2
            }
        );
    }

    #[test]
    fn ignores_unknown_fields() {
        let cfg =
            ColumnConfig::from_json_str(r#"{"fileName": 3, "transcript": 1, "note": "x"}"#).unwrap();
        assert_eq!(cfg.file_name, 3);
        assert_eq!(cfg.transcript, 1);
    }

    #[test]
    fn missing_field_is_an_error() {
        assert!(ColumnConfig::from_json_str(r#"{"fileName": 0}"#).is_err());
        assert!(ColumnConfig::from_json_str(r#"{"fileName": -1, "transcript": 1}"#).is_err());
    }

    #[test]
    fn echoes_with_original_field_names() {
        let cfg = ColumnConfig {
            file_name: 1,
            transcript: 4,
        };
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(json, r#"{"fileName":1,"transcript":4}"#);
    }

    #[test]
    fn locate_prefers_override() {
        let base = BaseDir::new("/opt/tool").unwrap();
        assert_eq!(
            ColumnConfig::locate(&base, None),
            PathBuf::from("/opt/tool/config.json")
        );
        assert_eq!(
            ColumnConfig::locate(&base, Some("alt/cols.json")),
            PathBuf::from("/opt/tool/alt/cols.json")
        );
        assert_eq!(
            ColumnConfig::locate(&base, Some("/etc/cols.json")),
            PathBuf::from("/etc/cols.json")
        );
        assert_eq!(
            ColumnConfig::locate(&base, Some("")),
            PathBuf::from("/opt/tool/config.json")
        );
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ColumnConfig::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }
}
