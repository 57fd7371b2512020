use crate::demo::{print_reference, print_steps, run_demo, DemoArgs, ReferenceArgs};
use clap::{Parser, Subcommand};
use doc_wizard::config::AppConfig;
use doc_wizard::error::AppError;
use doc_wizard::telemetry;
use doc_wizard::workflows::templates::ReferenceData;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Document Template Wizard",
    about = "Build document templates step by step from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the wizard steps and panels for every document kind (default command)
    Steps,
    /// Run a scripted wizard session against an in-memory template catalog
    Demo(DemoArgs),
    /// Print the reference data the wizard validates against
    Reference(ReferenceArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let reference = Arc::new(ReferenceData::load(&config.wizard)?);
    info!(
        ?config.environment,
        signers = reference.company_signers.len(),
        "document template wizard ready"
    );

    match cli.command.unwrap_or(Command::Steps) {
        Command::Steps => {
            print_steps();
            Ok(())
        }
        Command::Demo(args) => run_demo(args, &config.wizard, reference),
        Command::Reference(args) => {
            print_reference(args, &reference);
            Ok(())
        }
    }
}
