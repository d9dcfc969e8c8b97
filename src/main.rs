use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use safecalc::cli::{Cli, Mode};
use safecalc::line_mode::run_line;
use safecalc::one_shot::one_shot;
use safecalc::self_test::run_self_tests;
use safecalc::session::Session;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let filter = match cli.mode() {
        // anything chattier would draw over the alternate screen
        #[cfg(feature = "tui")]
        Mode::Tui => EnvFilter::new("error"),
        _ => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install log subscriber: {}", e);
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let mode = cli.mode();
    info!(?mode, "starting");

    match mode {
        Mode::SelfTest => {
            let report = run_self_tests()?;
            Ok(ExitCode::from(report.exit_code()))
        }
        Mode::OneShot => {
            let expr = cli.expr.as_deref().unwrap_or_default();
            let code = one_shot(expr, &mut io::stdout().lock())?;
            Ok(ExitCode::from(code))
        }
        Mode::Repl => {
            run_line(&mut Session::new(cli.config()))?;
            Ok(ExitCode::SUCCESS)
        }
        #[cfg(feature = "tui")]
        Mode::Tui => {
            safecalc::tui_mode::run_tui(Session::new(cli.config()))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
