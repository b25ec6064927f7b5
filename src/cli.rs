//! Clap adapter.
//!
//! Compiled only with the `clap` Cargo feature (on by default). The bridge to
//! the framework-agnostic core is [`SurveyArgs::into_builder()`], which merges
//! the parsed flags over the loaded [`Settings`] and produces a
//! [`SurveyBuilder`].

use std::path::PathBuf;

use clap::Parser;

use crate::builder::{Survey, SurveyBuilder};
use crate::settings::Settings;

/// Ask the questions of a questionnaire and patch the answers into a YAML,
/// HCL, INI or dotenv file.
#[derive(Debug, Parser)]
#[command(name = "aa-survey", version)]
pub struct SurveyArgs {
    /// Questionnaire YAML file [default: Surveyfile.yaml].
    #[arg(long, short = 's', value_name = "PATH")]
    pub survey: Option<PathBuf>,

    /// File to write answers into (.yaml, .yml, .tf, .ini, .env). Without it,
    /// answers are printed to stdout.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Ask to confirm the written file and offer to open it in an editor.
    #[arg(long)]
    pub check: bool,

    /// Extra settings file, applied over the discovered ones.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print answers as a JSON object instead of `key: value` lines.
    #[arg(long)]
    pub json: bool,

    /// Log filter, e.g. "debug" or "aa_survey=trace". Overrides RUST_LOG.
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Print a commented settings template and exit.
    #[arg(long)]
    pub print_config: bool,
}

impl SurveyArgs {
    /// Convert parsed flags into a [`SurveyBuilder`]. Flags win over
    /// `settings`; `--check` can only turn the post-check on.
    pub fn into_builder(self, settings: &Settings) -> SurveyBuilder {
        let builder = Survey::builder()
            .questionnaire(self.survey.unwrap_or_else(|| settings.survey.clone()))
            .post_check(self.check || settings.check)
            .editor(settings.editor.clone());
        match self.output {
            Some(output) => builder.output(output),
            None => builder,
        }
    }
}
