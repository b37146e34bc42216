//! Logicpad CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use logicpad_cli::{
    Args,
    error_adapter::{Reportable, outcome_reportables, to_reportables},
};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Logicpad");
    debug!(args:?; "Parsed arguments");

    match logicpad_cli::run(&args) {
        Ok(outcome) => {
            println!("{outcome}");
            if !outcome.success() {
                report(outcome_reportables(&outcome));
                process::exit(1);
            }
        }
        Err(err) => {
            report(to_reportables(&err));
            process::exit(1);
        }
    }

    info!("Completed successfully");
}

/// Render each reportable independently.
fn report(reportables: Vec<Reportable<'_>>) {
    let reporter = miette::GraphicalReportHandler::new();
    for reportable in reportables {
        let mut writer = String::new();
        reporter
            .render_report(&mut writer, &reportable)
            .expect("Writing to String buffer is infallible");

        error!("{writer}");
    }
}
