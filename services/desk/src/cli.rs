use crate::demo::{run_demo, DemoArgs};
use crate::infra::OutputFormat;
use crate::replay::{run_replay, ReplayArgs};
use clap::{Parser, Subcommand};
use registration_form::config::AppConfig;
use registration_form::error::AppError;
use registration_form::form::TimeSlot;
use registration_form::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "Registration Desk",
    about = "Fill in and submit the candidate registration form from the command line",
    version
)]
struct Cli {
    /// How rendered views are written to stdout
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk through a rejected attempt, a successful registration and a reset (default command)
    Demo(DemoArgs),
    /// Play a JSON script of form events and print the view after each one
    Replay(ReplayArgs),
    /// List the time slots applicants can pick from
    Slots,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(?config.environment, delay_ms = config.submission.delay_ms, "configuration loaded");

    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Demo(args) => run_demo(args, &config, cli.format).await,
        Command::Replay(args) => run_replay(args, &config, cli.format).await,
        Command::Slots => {
            for slot in TimeSlot::options() {
                println!("{slot}");
            }
            Ok(())
        }
    }
}
