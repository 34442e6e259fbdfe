use crate::domain::ports::ActivityLog;
use crate::utils::error::Result;
use chrono::Local;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const LOG_SCHEMA_VERSION: &str = "1.0";

/// The system has no per-user identity beyond the shared passphrase, so every
/// record carries the same actor tag.
pub const LOG_ACTOR: &str = "sistema";

#[derive(Debug, Clone, Serialize)]
pub struct ActivityRecord {
    pub timestamp: String,
    pub usuario: String,
    pub accion: String,
    pub version: String,
}

impl ActivityRecord {
    pub fn now(accion: &str) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            usuario: LOG_ACTOR.to_string(),
            accion: accion.to_string(),
            version: LOG_SCHEMA_VERSION.to_string(),
        }
    }
}

/// Append-only JSONL activity log. Each record is written as a single
/// newline-terminated line in one write call, so independent sessions can
/// append to the same file without interleaving partial lines.
#[derive(Debug, Clone)]
pub struct FileActivityLog {
    path: PathBuf,
}

impl FileActivityLog {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ActivityLog for FileActivityLog {
    fn record(&self, accion: &str) -> Result<()> {
        let entry = ActivityRecord::now(accion);
        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_file_on_first_append() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("logs").join("actividad.log");
        let log = FileActivityLog::new(&path);

        assert!(!path.exists());
        log.record("Aplicativo iniciado").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn appends_one_json_line_per_record() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("actividad.log");
        let log = FileActivityLog::new(&path);

        log.record("Usuario autenticado correctamente").unwrap();
        log.record("Aplicativo cerrado").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["usuario"], "sistema");
        assert_eq!(first["accion"], "Usuario autenticado correctamente");
        assert_eq!(first["version"], "1.0");
        assert!(first["timestamp"].as_str().unwrap().len() == 19);

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["accion"], "Aplicativo cerrado");
    }

    #[test]
    fn earlier_records_survive_later_appends() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("actividad.log");
        let log = FileActivityLog::new(&path);

        log.record("primera").unwrap();
        let before = std::fs::read_to_string(&path).unwrap();
        log.record("segunda").unwrap();
        let after = std::fs::read_to_string(&path).unwrap();

        assert!(after.starts_with(&before));
    }
}
