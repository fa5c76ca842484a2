//! # termsift - Peptide Term Sifting
//!
//! Command-line interface for building, intersecting and filtering peptide
//! term tables across data sets.
//!
//! ## Usage
//!
//! ```bash
//! # Describe the data once
//! termsift define-set glyma data/glyma --label "Glycine max"
//! termsift define-set medtr data/medtr
//! termsift define-summary data/summary
//! termsift define-simplicity runlength
//!
//! # Per-set term tables from data/<set>/proteins.faa
//! termsift calculate-peptide-terms -k 10 proteins.faa k10 all
//!
//! # Terms shared by at least two sets, then low-simplicity survivors
//! termsift intersect-peptide-terms k10 all
//! termsift filter-peptide-terms --cutoff 0.3 k10 k10_filt
//!
//! # Lowercase low-complexity regions
//! termsift peptide-simplicity-mask --cutoff 3 proteins.faa masked all
//! ```
//!
//! ## Global Options
//!
//! - `--config <FILE>`: Configuration file (default: `$TERMSIFT_CONFIG`, then
//!   `.termsift/config.yaml`)
//! - `--first-n <N>`: Use only the first N records of each input, 0 for all
//! - `-v, --verbose`: Debug logging
//! - `-q, --quiet`: Warnings and errors only
//!
//! `TERMSIFT_LOG` overrides the log filter, e.g. `TERMSIFT_LOG=termsift=trace`.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use termsift_core::config::{RunOptions, TermsiftConfig};
use termsift_core::constants::{DEFAULT_K, DEFAULT_MAX_SCORE, DEFAULT_SIMPLICITY_CUTOFF};
use termsift_core::engine::{
    calculate_peptide_terms, filter_peptide_terms, intersect_peptide_terms,
    peptide_simplicity_mask,
};
use termsift_core::simplicity::{SIMPLICITY_LABELS, oracle_from_label};
use termsift_core::types::TermsiftError;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn sets_arg() -> Arg {
    Arg::new("sets")
        .value_name("SETS")
        .required(true)
        .num_args(1..)
        .help("Data set names, or \"all\"")
}

fn label_arg() -> Arg {
    Arg::new("label")
        .long("label")
        .value_name("LABEL")
        .help("Free-form description")
}

fn build_cli() -> Command {
    Command::new("termsift")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Peptide term extraction, simplicity filtering and cross-set intersection")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Configuration file"),
        )
        .arg(
            Arg::new("first-n")
                .long("first-n")
                .value_name("N")
                .global(true)
                .value_parser(value_parser!(usize))
                .default_value("0")
                .help("Use only the first N records of each input (0: all)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .conflicts_with("quiet")
                .help("Debug logging"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Only log warnings and errors"),
        )
        .subcommand(
            Command::new("calculate-peptide-terms")
                .about("Build a term table for each set")
                .arg(
                    Arg::new("k")
                        .short('k')
                        .value_name("K")
                        .value_parser(value_parser!(usize))
                        .default_value("10")
                        .help("Term length in residues"),
                )
                .arg(Arg::new("infilename").value_name("INFILENAME").required(true))
                .arg(Arg::new("outfilestem").value_name("OUTFILESTEM").required(true))
                .arg(sets_arg()),
        )
        .subcommand(
            Command::new("intersect-peptide-terms")
                .about("Merge set term tables, keeping terms found in two or more sets")
                .arg(Arg::new("filestem").value_name("FILESTEM").required(true))
                .arg(sets_arg()),
        )
        .subcommand(
            Command::new("filter-peptide-terms")
                .about("Drop terms scoring above a cutoff")
                .arg(
                    Arg::new("cutoff")
                        .long("cutoff")
                        .value_name("C")
                        .value_parser(value_parser!(f64))
                        .default_value("0.3")
                        .help("Maximum simplicity score kept"),
                )
                .arg(Arg::new("infilestem").value_name("INFILESTEM").required(true))
                .arg(Arg::new("outfilestem").value_name("OUTFILESTEM").required(true)),
        )
        .subcommand(
            Command::new("peptide-simplicity-mask")
                .about("Lowercase low-complexity regions of each set's sequences")
                .arg(
                    Arg::new("cutoff")
                        .long("cutoff")
                        .value_name("C")
                        .value_parser(value_parser!(f64))
                        .default_value("3")
                        .help("Minimum simplicity level to mask"),
                )
                .arg(Arg::new("infilename").value_name("INFILENAME").required(true))
                .arg(Arg::new("outfilestem").value_name("OUTFILESTEM").required(true))
                .arg(sets_arg()),
        )
        .subcommand(
            Command::new("define-set")
                .about("Add or replace a data set")
                .arg(Arg::new("name").value_name("NAME").required(true))
                .arg(
                    Arg::new("dir")
                        .value_name("DIR")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(label_arg()),
        )
        .subcommand(
            Command::new("define-summary")
                .about("Set the directory receiving merged and filtered tables")
                .arg(
                    Arg::new("dir")
                        .value_name("DIR")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(label_arg()),
        )
        .subcommand(
            Command::new("define-simplicity")
                .about("Select the simplicity function")
                .arg(
                    Arg::new("label")
                        .value_name("LABEL")
                        .required(true)
                        .value_parser(SIMPLICITY_LABELS),
                ),
        )
        .subcommand(Command::new("show-config").about("Print the configuration"))
}

fn init_logging(matches: &ArgMatches) {
    let level = if matches.get_flag("verbose") {
        "debug"
    } else if matches.get_flag("quiet") {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_env("TERMSIFT_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("termsift={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

/// Positional string argument; clap guarantees required ones are present.
fn string_arg<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    matches.get_one::<String>(id).map_or("", String::as_str)
}

fn set_list(config: &TermsiftConfig, matches: &ArgMatches) -> Result<Vec<String>, TermsiftError> {
    let names: Vec<String> = matches
        .get_many::<String>("sets")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    Ok(config.resolve_set_list(&names)?)
}

fn label(matches: &ArgMatches) -> Option<String> {
    matches.get_one::<String>("label").cloned()
}

fn show_config(config: &TermsiftConfig, path: &Path) {
    println!("config: {}", path.display());
    println!("simplicity: {}", config.simplicity);
    match &config.summary {
        Some(summary) => println!(
            "summary: {}{}",
            summary.dir.display(),
            summary
                .label
                .as_ref()
                .map(|l| format!(" ({})", l))
                .unwrap_or_default()
        ),
        None => println!("summary: undefined"),
    }
    println!("sets:");
    for set in &config.sets {
        println!(
            "  {}\t{}{}",
            set.name,
            set.dir.display(),
            set.label
                .as_ref()
                .map(|l| format!("\t{}", l))
                .unwrap_or_default()
        );
    }
}

fn run(matches: &ArgMatches) -> Result<(), TermsiftError> {
    let explicit = matches.get_one::<PathBuf>("config").map(PathBuf::as_path);
    let config_path = TermsiftConfig::locate(explicit);
    let options = RunOptions {
        first_n: matches.get_one::<usize>("first-n").copied().unwrap_or(0),
    };

    match matches.subcommand() {
        Some(("calculate-peptide-terms", sub)) => {
            let config = TermsiftConfig::load(&config_path)?;
            let sets = set_list(&config, sub)?;
            let k = sub.get_one::<usize>("k").copied().unwrap_or(DEFAULT_K);
            calculate_peptide_terms(
                &config,
                options,
                k,
                string_arg(sub, "infilename"),
                string_arg(sub, "outfilestem"),
                &sets,
            )?;
        }
        Some(("intersect-peptide-terms", sub)) => {
            let config = TermsiftConfig::load(&config_path)?;
            let sets = set_list(&config, sub)?;
            intersect_peptide_terms(&config, string_arg(sub, "filestem"), &sets)?;
        }
        Some(("filter-peptide-terms", sub)) => {
            let config = TermsiftConfig::load(&config_path)?;
            let cutoff = sub
                .get_one::<f64>("cutoff")
                .copied()
                .unwrap_or(DEFAULT_MAX_SCORE);
            filter_peptide_terms(
                &config,
                cutoff,
                string_arg(sub, "infilestem"),
                string_arg(sub, "outfilestem"),
            )?;
        }
        Some(("peptide-simplicity-mask", sub)) => {
            let config = TermsiftConfig::load(&config_path)?;
            let sets = set_list(&config, sub)?;
            let cutoff = sub
                .get_one::<f64>("cutoff")
                .copied()
                .unwrap_or(DEFAULT_SIMPLICITY_CUTOFF);
            peptide_simplicity_mask(
                &config,
                options,
                cutoff,
                string_arg(sub, "infilename"),
                string_arg(sub, "outfilestem"),
                &sets,
            )?;
        }
        Some(("define-set", sub)) => {
            let mut config = TermsiftConfig::load_or_default(&config_path)?;
            let name = string_arg(sub, "name");
            let dir = sub.get_one::<PathBuf>("dir").cloned().unwrap_or_default();
            info!("Defining set \"{}\" at \"{}\"", name, dir.display());
            config.define_set(name, dir, label(sub))?;
            config.save(&config_path)?;
        }
        Some(("define-summary", sub)) => {
            let mut config = TermsiftConfig::load_or_default(&config_path)?;
            let dir = sub.get_one::<PathBuf>("dir").cloned().unwrap_or_default();
            info!("Summary directory \"{}\"", dir.display());
            config.define_summary(dir, label(sub));
            config.save(&config_path)?;
        }
        Some(("define-simplicity", sub)) => {
            let mut config = TermsiftConfig::load_or_default(&config_path)?;
            let oracle = oracle_from_label(string_arg(sub, "label"))?;
            info!(
                "Simplicity function \"{}\": {}",
                oracle.label(),
                oracle.description()
            );
            config.simplicity = oracle.label().to_string();
            config.save(&config_path)?;
        }
        Some(("show-config", _)) => {
            let config = TermsiftConfig::load(&config_path)?;
            show_config(&config, &config_path);
        }
        _ => unreachable!("clap requires a subcommand"),
    }
    Ok(())
}

fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    init_logging(&matches);

    let start = Instant::now();
    match run(&matches) {
        Ok(()) => {
            info!("Elapsed time {:.2?}", start.elapsed());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
