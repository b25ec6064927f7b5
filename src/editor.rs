//! Post-write verification and editor hand-off.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::error::SurveyError;
use crate::prompt::{PromptRequest, Prompter};

#[cfg(windows)]
const PLATFORM_EDITOR: &str = "notepad";
#[cfg(not(windows))]
const PLATFORM_EDITOR: &str = "vim";

/// Pick the editor command: `VISUAL`, then `EDITOR`, then `configured`, then
/// the platform default. Empty variables are skipped.
///
/// `lookup` is injected so tests don't touch the process environment.
pub fn resolve_editor<F>(lookup: F, configured: Option<&str>) -> String
where
    F: Fn(&str) -> Option<String>,
{
    ["VISUAL", "EDITOR"]
        .into_iter()
        .filter_map(&lookup)
        .chain(configured.map(str::to_string))
        .find(|e| !e.trim().is_empty())
        .unwrap_or_else(|| PLATFORM_EDITOR.to_string())
}

/// Split an editor command such as `code --wait` into program and arguments,
/// then append the file to open.
pub fn editor_command(editor: &str, file: &Path) -> Result<Command, SurveyError> {
    let words = shell_words::split(editor).map_err(|e| SurveyError::Editor {
        editor: editor.into(),
        reason: e.to_string(),
    })?;
    let Some((program, args)) = words.split_first() else {
        return Err(SurveyError::Editor {
            editor: editor.into(),
            reason: "empty command".into(),
        });
    };
    let mut cmd = Command::new(program);
    cmd.args(args).arg(file);
    Ok(cmd)
}

/// Open `file` in `editor`, blocking until it exits. The editor shares this
/// process's terminal. Its exit status is ignored.
pub fn open_in_editor(editor: &str, file: &Path) -> Result<(), SurveyError> {
    let file = std::path::absolute(file).map_err(|e| SurveyError::IoError {
        path: file.to_path_buf(),
        source: e,
    })?;
    let mut cmd = editor_command(editor, &file)?;
    debug!(editor, file = %file.display(), "launching editor");
    let status = cmd
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| SurveyError::Editor {
            editor: editor.into(),
            reason: e.to_string(),
        })?;
    if !status.success() {
        warn!(editor, %status, "editor exited unsuccessfully");
    }
    Ok(())
}

/// Ask whether the written file is correct. On "no", open it in the editor
/// resolved from the environment and `configured`.
///
/// Returns whether the editor was launched.
pub fn verify(
    file: &Path,
    prompter: &mut dyn Prompter,
    configured: Option<&str>,
) -> Result<bool, SurveyError> {
    let correct = prompter.confirm(&PromptRequest::new("All correct?"), true)?;
    if correct {
        return Ok(false);
    }
    let editor = resolve_editor(|name| std::env::var(name).ok(), configured);
    open_in_editor(&editor, file)?;
    Ok(true)
}
