mod app;
mod checks;
mod collectors;
mod console;
mod engine;
mod error;
mod model;
mod provider;
mod report;

use crate::app::App;
use crate::engine::ScanEngine;
use crate::model::CheckStatus;
use crate::provider::{FixtureProvider, ScanProvider};
use crate::report::{FileSink, JsonFormatter, MarkdownFormatter, PromptSink, ReportFormatter, ReportSink};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "readiness-wizard", version, about = "Guided environment readiness scan with step-by-step remediation")]
struct Cli {
    /// Replay a saved scan result (JSON) instead of inspecting this machine
    #[arg(long, env = "READINESS_FIXTURE")]
    fixture: Option<PathBuf>,

    /// Run one scan, print results and the report, then exit.
    /// Exit code: 0 pass, 1 warnings, 2 failures, 3 scan error
    #[arg(long, default_value_t = false)]
    once: bool,

    /// With --once, write the report here (file or directory) instead of stdout
    #[arg(long, requires = "once")]
    output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = FormatArg::Minimal)]
    format: FormatArg,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    debug: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum FormatArg {
    Minimal,
    Markdown,
    Json,
}

impl FormatArg {
    fn formatter(self) -> Option<Box<dyn ReportFormatter>> {
        match self {
            FormatArg::Minimal => None,
            FormatArg::Markdown => Some(Box::new(MarkdownFormatter)),
            FormatArg::Json => Some(Box::new(JsonFormatter)),
        }
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("readiness_wizard=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("readiness_wizard=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    tracing::debug!("starting with args: {:?}", cli);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let scanner: Box<dyn ScanProvider> = match &cli.fixture {
        Some(path) => Box::new(FixtureProvider::new(path)),
        None => {
            let mut engine = ScanEngine::new();
            engine.register_default_checks();
            Box::new(engine)
        }
    };
    let sink: Box<dyn ReportSink> = match &cli.output {
        Some(path) => Box::new(FileSink::new(path)),
        None => Box::new(PromptSink),
    };

    let mut app = App::new(scanner, sink);
    if let Some(formatter) = cli.format.formatter() {
        app = app.with_formatter(formatter);
    }

    if !cli.once {
        console::run_interactive(&mut app)?;
        return Ok(ExitCode::SUCCESS);
    }

    app.start_scan();
    println!("{}", console::summary(app.state()));
    let Some(overall) = app.state().scan_result().map(|r| r.overall) else {
        if let Some(err) = app.state().scan_error() {
            eprintln!("Scan failed: {}", err);
        }
        return Ok(ExitCode::from(3));
    };
    if cli.output.is_some() {
        app.save_report()?;
        eprintln!("{}", app.state().status().message);
    } else {
        println!("\n{}", app.generate_report()?);
    }
    Ok(match overall {
        CheckStatus::Fail => ExitCode::from(2),
        CheckStatus::Warning => ExitCode::from(1),
        CheckStatus::Pass | CheckStatus::Skipped => ExitCode::SUCCESS,
    })
}
