//! Interactive questionnaires that write their answers into existing
//! configuration files.
//!
//! aa-survey reads a list of questions from a YAML document, walks the user
//! through them in the terminal, and either prints the answers or patches
//! them into a YAML, HCL (`.tf`), INI or dotenv file, one key at a time.
//!
//! ```ignore
//! let result = Survey::builder()
//!     .questionnaire("Surveyfile.yaml")
//!     .output("values.yaml")
//!     .run(&mut InquirePrompter::new())?;
//! ```
//!
//! # Questionnaires
//!
//! ```yaml
//! questions:
//!   - prompt: "Database host?"
//!     type: input
//!     default: localhost
//!     target: DB__HOST
//!     help: "Hostname or IP of the primary"
//!   - prompt: "Regions?"
//!     type: multiselect
//!     options: [eu-west-1, us-east-1, ap-south-1]
//!     validate: many
//!     target: regions
//! ```
//!
//! Each entry has a `type`, one of `confirm`, `input`, `password`, `select`,
//! `multiselect`, `public_key`, `private_key`, `file` and `dir`, and a
//! `target` key that names where the answer goes. Questions are asked in
//! document order.
//!
//! The whole questionnaire is checked before the first prompt: unknown types,
//! unknown validators, validators attached to the wrong type (`password` only
//! fits `password`, `many` only fits `multiselect`), selects without options
//! and confirm defaults that are not one of `1 t T true TRUE True 0 f F false
//! FALSE False` all abort the run up front. An empty confirm default means
//! yes.
//!
//! # Answers
//!
//! Answers are strings, except multiselect answers, which are lists in option
//! order. Confirm answers are `"true"` or `"false"`. Path questions
//! (`public_key`, `private_key`, `file`, `dir`) complete file names as you
//! type, expand `~`, check that the path is what it claims to be (a parseable
//! OpenSSH key, a file, a directory) and store the absolute path.
//!
//! A failing check shows its message inline and asks again. Ctrl-C aborts
//! the whole run and nothing is written.
//!
//! # Patching
//!
//! The output format comes from the file extension, checked before anything
//! else happens:
//!
//! | Extension       | Format | Key lookup                                         |
//! |-----------------|--------|----------------------------------------------------|
//! | `.yaml`, `.yml` | YAML   | first matching mapping key anywhere, else root      |
//! | `.tf`           | HCL    | top-level attribute                                 |
//! | `.ini`          | INI    | `SECTION__NAME`, else the general section           |
//! | `.env`          | dotenv | upper-cased key in the general section              |
//!
//! A missing output file is created first. Existing files keep their
//! permission bits. HCL files keep their formatting and comments; YAML, INI
//! and dotenv files are re-serialized. See [`persist`] for the write cycle of
//! each format.
//!
//! # Prompt providers
//!
//! All terminal interaction goes through the [`Prompter`] trait.
//! [`InquirePrompter`] is the interactive implementation; anything else (a
//! scripted provider in tests, a GUI) can drive the same collection and
//! patching code.
//!
//! # Settings and CLI
//!
//! The binary reads optional settings from `aa-survey.toml` (platform config
//! directory, then the working directory, then `--config`) and `AA_SURVEY_*`
//! environment variables; see [`settings`]. The clap adapter lives in the
//! `cli` module behind the default `clap` feature.
//!
//! # Error handling
//!
//! Every fallible operation returns [`SurveyError`]. Messages name the file,
//! key or allowed values involved and are meant to be shown to the user
//! as-is.

pub mod error;
pub mod persist;
pub mod settings;
pub mod types;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod collect;
mod editor;
mod hcl;
mod ini;
mod prompt;
mod questionnaire;
mod validators;
mod yaml;

#[cfg(test)]
mod fixtures;

pub use builder::{DEFAULT_SURVEY, Survey, SurveyBuilder, SurveyResult};
#[cfg(feature = "clap")]
pub use cli::SurveyArgs;
pub use collect::{ask, collect};
pub use editor::{resolve_editor, verify};
pub use error::SurveyError;
pub use prompt::{InquirePrompter, PathCompleter, PromptRequest, Prompter};
pub use questionnaire::{Question, Questionnaire, parse_bool_default};
pub use types::{Answer, Answers, FileFormat, QuestionType, ValidatorKind};
pub use validators::{Check, expand_path};
