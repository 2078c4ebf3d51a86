use std::path::{Path, PathBuf};
use std::process::ExitCode;

use allocopt_core::configuration::{NumberFormat, CONFIGURATION};
use allocopt_core::io::json::{read_allocation_json, read_selection_json, JsonError};
use allocopt_core::io::validate::Validator;
use allocopt_core::{solve_allocation, solve_selection, SolveError, SolveOutcome};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, LevelFilter};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "allocopt")]
#[command(about = "Solve small knapsack and production planning problems", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Accept decimal and negative numbers in table cells, instead of digits only
    #[arg(long, global = true)]
    decimal: bool,
    /// Print the solution as json instead of text
    #[arg(long, global = true)]
    json: bool,
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Select the most valuable set of items from a json table
    Knapsack {
        /// The json file holding the item table
        file: PathBuf,
    },
    /// Find the most profitable production levels from a json table
    Production {
        /// The json file holding the product table
        file: PathBuf,
    },
    /// Validate a json table without solving it
    Check {
        /// The json file to check
        file: PathBuf,
        /// Kind of table in the file
        #[arg(short, long, value_enum)]
        kind: TableKind,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum TableKind {
    Knapsack,
    Production,
}

/// Errors ending the program, with the exit code they map to
enum Failure {
    Read(JsonError),
    Solve(SolveError),
    Output(serde_json::Error),
}

impl Failure {
    fn report(&self) -> ExitCode {
        match self {
            Failure::Read(e) => eprintln!("Error reading table: {}", e),
            // Input errors already read "Input Error: ..."
            Failure::Solve(e) if e.is_recoverable() => eprintln!("{}", e),
            Failure::Solve(e) => eprintln!("Error: {}", e),
            Failure::Output(e) => eprintln!("Error writing json: {}", e),
        }
        match self {
            Failure::Solve(e) if e.is_recoverable() => ExitCode::from(1),
            _ => ExitCode::from(2),
        }
    }
}

fn setup_logger(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{:5} | {} | {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = setup_logger(level) {
        eprintln!("Unable to set up logging: {}", e);
    }

    if cli.decimal {
        match CONFIGURATION.write() {
            Ok(mut config) => config.number_format = NumberFormat::Decimal,
            Err(poisoned) => poisoned.into_inner().number_format = NumberFormat::Decimal,
        }
    }

    let result = match cli.command {
        Commands::Knapsack { file } => knapsack(&file, cli.json),
        Commands::Production { file } => production(&file, cli.json),
        Commands::Check { file, kind } => check(&file, kind),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => failure.report(),
    }
}

fn knapsack(file: &Path, json: bool) -> Result<(), Failure> {
    let raw = read_selection_json(file).map_err(Failure::Read)?;
    debug!("Read {} items from {}", raw.values.len(), file.display());
    let outcome = solve_selection(&raw).map_err(Failure::Solve)?;
    print_outcome(&outcome, json)
}

fn production(file: &Path, json: bool) -> Result<(), Failure> {
    let raw = read_allocation_json(file).map_err(Failure::Read)?;
    debug!("Read {} products from {}", raw.products.len(), file.display());
    let outcome = solve_allocation(&raw).map_err(Failure::Solve)?;
    print_outcome(&outcome, json)
}

fn check(file: &Path, kind: TableKind) -> Result<(), Failure> {
    let validator = Validator::new(&allocopt_core::configuration::Configuration::current());
    let (rows, constraints) = match kind {
        TableKind::Knapsack => {
            let raw = read_selection_json(file).map_err(Failure::Read)?;
            let problem = validator
                .validate_selection(&raw)
                .map_err(|e| Failure::Solve(e.into()))?;
            (problem.len(), problem.num_constraints())
        }
        TableKind::Production => {
            let raw = read_allocation_json(file).map_err(Failure::Read)?;
            let problem = validator
                .validate_allocation(&raw)
                .map_err(|e| Failure::Solve(e.into()))?;
            (problem.len(), problem.num_constraints())
        }
    };
    println!("Table is valid: {} rows, {} constraints", rows, constraints);
    Ok(())
}

fn print_outcome<S>(outcome: &SolveOutcome<S>, json: bool) -> Result<(), Failure>
where
    S: Serialize + std::fmt::Display,
{
    if json {
        let text = serde_json::to_string_pretty(outcome).map_err(Failure::Output)?;
        println!("{}", text);
    } else {
        println!("{}", outcome);
    }
    Ok(())
}
