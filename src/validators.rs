//! Answer checks.
//!
//! A [`Check`] is a pure predicate over a typed-in string or a selection count.
//! Failing checks return a short message that the prompt shows inline before
//! asking again. They never abort the run.

use std::path::{Path, PathBuf};

use crate::types::{QuestionType, ValidatorKind};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_SELECTIONS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Required,
    MinLength(usize),
    MinSelections(usize),
    IsFile,
    IsDir,
    PublicKey,
    PrivateKey,
}

impl Check {
    /// Check a text answer. Selection-count checks always pass here.
    pub fn text(self, answer: &str) -> Result<(), String> {
        match self {
            Check::Required => {
                if answer.is_empty() {
                    Err("Value is required".into())
                } else {
                    Ok(())
                }
            }
            Check::MinLength(min) => {
                if answer.chars().count() < min {
                    Err(format!("password must be at least {min} characters"))
                } else {
                    Ok(())
                }
            }
            Check::MinSelections(_) => Ok(()),
            Check::IsFile => {
                let path = expand_path(answer);
                let meta = std::fs::metadata(&path).map_err(|e| format!("{}: {e}", path.display()))?;
                if meta.is_dir() {
                    Err(format!("{} is a directory", path.display()))
                } else {
                    Ok(())
                }
            }
            Check::IsDir => {
                let path = expand_path(answer);
                let meta = std::fs::metadata(&path).map_err(|e| format!("{}: {e}", path.display()))?;
                if meta.is_dir() {
                    Ok(())
                } else {
                    Err(format!("{} is a file", path.display()))
                }
            }
            Check::PublicKey => {
                let content = std::fs::read_to_string(expand_path(answer))
                    .map_err(|_| "no public key found".to_string())?;
                let line = content
                    .lines()
                    .map(str::trim)
                    .find(|l| !l.is_empty() && !l.starts_with('#'))
                    .unwrap_or("");
                ssh_key::PublicKey::from_openssh(line)
                    .map(|_| ())
                    .map_err(|e| format!("{answer} - {e}"))
            }
            Check::PrivateKey => {
                let content = std::fs::read_to_string(expand_path(answer))
                    .map_err(|_| "no private key found".to_string())?;
                ssh_key::PrivateKey::from_openssh(content.trim())
                    .map(|_| ())
                    .map_err(|e| format!("{answer} - {e}"))
            }
        }
    }

    /// Check a selection count. Text checks pass, except `Required`, which
    /// demands at least one selection.
    pub fn selection(self, count: usize) -> Result<(), String> {
        match self {
            Check::MinSelections(min) if count < min => Err(match min {
                2 => "select minimum two options".to_string(),
                _ => format!("select at least {min} options"),
            }),
            Check::Required if count == 0 => Err("Value is required".into()),
            _ => Ok(()),
        }
    }
}

/// Checks for a question: the structural checks implied by its type, followed
/// by its configured validator.
pub fn checks_for(kind: QuestionType, validator: ValidatorKind) -> Vec<Check> {
    let mut checks = match kind {
        QuestionType::PublicKey => vec![Check::Required, Check::PublicKey],
        QuestionType::PrivateKey => vec![Check::Required, Check::PrivateKey],
        QuestionType::File => vec![Check::Required, Check::IsFile],
        QuestionType::Dir => vec![Check::Required, Check::IsDir],
        _ => Vec::new(),
    };
    match validator {
        ValidatorKind::None => {}
        ValidatorKind::Password => checks.push(Check::MinLength(MIN_PASSWORD_LEN)),
        ValidatorKind::Many => checks.push(Check::MinSelections(MIN_SELECTIONS)),
        ValidatorKind::Required => {
            if !checks.contains(&Check::Required) {
                checks.insert(0, Check::Required);
            }
        }
    }
    checks
}

/// Run `checks` in order against a text answer, stopping at the first failure.
pub fn check_text(checks: &[Check], answer: &str) -> Result<(), String> {
    checks.iter().try_for_each(|c| c.text(answer))
}

/// Run `checks` in order against a selection count.
pub fn check_selection(checks: &[Check], count: usize) -> Result<(), String> {
    checks.iter().try_for_each(|c| c.selection(count))
}

/// Expand a leading `~` and make the path absolute against the working
/// directory. No symlink resolution and no existence check.
pub fn expand_path(input: &str) -> PathBuf {
    let expanded = shellexpand::tilde(input).to_string();
    let path = Path::new(&expanded);
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
