//! Answer persistence: dispatch the answers to the backend for the file's
//! format.
//!
//! YAML and HCL files are re-read, patched and rewritten once per answer. INI
//! and dotenv files are loaded once, receive every answer and are saved once.
//! Permission bits of the existing file survive every write. Any failure
//! aborts the remaining writes; earlier writes are not rolled back.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::SurveyError;
use crate::types::{Answers, FileFormat};
use crate::{hcl, ini, yaml};

/// Write every answer into `path`, creating the file first if needed.
pub fn apply_answers(path: &Path, answers: &Answers) -> Result<FileFormat, SurveyError> {
    let format = FileFormat::from_path(path)?;
    ensure_exists(path)?;

    match format {
        FileFormat::Yaml => {
            for (key, answer) in answers.iter() {
                debug!(path = %path.display(), key, "patching yaml key");
                yaml::patch_file(path, key, answer)?;
            }
        }
        FileFormat::Hcl => {
            for (key, answer) in answers.iter() {
                debug!(path = %path.display(), key, "patching hcl attribute");
                hcl::patch_file(path, key, answer)?;
            }
        }
        FileFormat::Ini | FileFormat::DotEnv => {
            let flavor = if format == FileFormat::DotEnv {
                ini::Flavor::DotEnv
            } else {
                ini::Flavor::Ini
            };
            ini::patch_file(path, flavor, answers)?;
        }
    }

    info!(path = %path.display(), count = answers.len(), %format, "answers written");
    Ok(format)
}

/// Create an empty file at `path` if nothing exists there yet.
pub fn ensure_exists(path: &Path) -> Result<(), SurveyError> {
    if path.exists() {
        return Ok(());
    }
    debug!(path = %path.display(), "creating output file");
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map(|_| ())
        .map_err(|e| SurveyError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })
}

pub(crate) fn read(path: &Path) -> Result<String, SurveyError> {
    fs::read_to_string(path).map_err(|e| SurveyError::IoError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Overwrite `path` with `content`, restoring the permission bits it had
/// before the write.
pub(crate) fn write_preserving_mode(path: &Path, content: &str) -> Result<(), SurveyError> {
    let write_err = |e: std::io::Error| SurveyError::WriteError {
        path: path.to_path_buf(),
        source: e,
    };
    let permissions = fs::metadata(path).map(|m| m.permissions()).ok();
    fs::write(path, content).map_err(write_err)?;
    if let Some(permissions) = permissions {
        fs::set_permissions(path, permissions).map_err(write_err)?;
    }
    Ok(())
}
