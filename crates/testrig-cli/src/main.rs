//! testrig CLI
//!
//! Runs one of the built-in test units by name.

mod samples;

use clap::{Arg, ArgAction, ArgMatches, Command};
use samples::{SAMPLE_NAMES, sample};
use std::process;
use testrig_runner::{Runner, RunnerOptions};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Exit code for a unit name that is not registered
const EXIT_UNKNOWN_UNIT: i32 = 2;

fn cli() -> Command {
    Command::new("testrig")
        .version("0.1.0")
        .about("Annotation-driven test runner")
        .arg(
            Arg::new("unit")
                .value_name("UNIT")
                .help("Test unit to run")
                .default_value("TestClass")
                .index(1),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .help("Print the execution plan without running it")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("units")
                .long("units")
                .help("List the built-in test units")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("trim-csv")
                .long("trim-csv")
                .help("Trim whitespace around every @CsvSource value")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("teardown-on-failure")
                .long("teardown-on-failure")
                .help("Run @AfterSuite even when the run fails")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log every invocation")
                .action(ArgAction::SetTrue),
        )
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

fn main() {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    match execute(&matches) {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}

fn runner_options(matches: &ArgMatches) -> RunnerOptions {
    RunnerOptions {
        trim_csv_fields: matches.get_flag("trim-csv"),
        teardown_on_failure: matches.get_flag("teardown-on-failure"),
    }
}

fn execute(matches: &ArgMatches) -> Result<i32, anyhow::Error> {
    if matches.get_flag("units") {
        for name in SAMPLE_NAMES {
            println!("{name}");
        }
        return Ok(0);
    }

    let name = matches
        .get_one::<String>("unit")
        .map_or("TestClass", String::as_str);
    let Some(unit) = sample(name) else {
        eprintln!("unknown test unit: {name}");
        eprintln!("available units: {}", SAMPLE_NAMES.join(", "));
        return Ok(EXIT_UNKNOWN_UNIT);
    };

    let options = runner_options(matches);
    debug!(unit = name, ?options, "selected test unit");
    let runner = Runner::new(options);

    if matches.get_flag("list") {
        let plan = runner.plan(&unit)?;
        for test in plan.tests() {
            println!("{test}");
        }
        return Ok(0);
    }

    runner.run(&unit)?;
    Ok(0)
}
