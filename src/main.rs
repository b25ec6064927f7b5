use std::process;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use aa_survey::{InquirePrompter, SurveyArgs, SurveyError, SurveyResult, settings};

fn main() {
    let args = SurveyArgs::parse();
    if let Err(e) = run(args) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(args: SurveyArgs) -> Result<(), SurveyError> {
    if args.print_config {
        print!("{}", settings::template());
        return Ok(());
    }

    let settings = settings::load(args.config.as_deref())?;
    init_tracing(args.log_level.as_deref(), &settings.log_level);
    debug!(?settings, "settings resolved");

    let json = args.json;
    let result = args
        .into_builder(&settings)
        .run(&mut InquirePrompter::new())?;

    match result {
        SurveyResult::Answers(answers) if json => {
            println!("{}", serde_json::to_string_pretty(&answers)?);
        }
        SurveyResult::Answers(answers) => {
            if !answers.is_empty() {
                println!("{answers}");
            }
        }
        SurveyResult::Written { .. } => {}
    }
    Ok(())
}

/// Logs go to stderr so stdout only carries answers.
fn init_tracing(flag: Option<&str>, configured: &str) {
    let filter = match flag {
        Some(directives) => EnvFilter::try_new(directives),
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(configured)),
    }
    .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
