mod run;
mod version;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::cnf::PKG_NAME;
use crate::telemetry::LOG_LEVELS;

const INFO: &str = "
A versioned document store with point-in-time SELECT queries.

Load a fixture of versioned writes, then run a batch of statements:

  $ strata run --data fixture.json --query batch.json
";

#[derive(Parser, Debug)]
#[command(name = PKG_NAME, bin_name = PKG_NAME)]
#[command(about = INFO, before_help = "")]
#[command(disable_version_flag = true, arg_required_else_help = true)]
struct Cli {
	#[arg(help = "The logging level for the command-line tool")]
	#[arg(env = "STRATA_LOG", short = 'l', long = "log")]
	#[arg(default_value = "error")]
	#[arg(value_parser = LOG_LEVELS)]
	#[arg(global = true)]
	log: String,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
	#[command(about = "Run a batch of statements against a fixture")]
	Run(run::RunCommandArguments),
	#[command(about = "Output the command-line tool version information")]
	Version,
}

pub async fn init() -> ExitCode {
	let args = Cli::parse();
	// Initialize the logging output
	if let Err(e) = crate::telemetry::builder().with_log_level(&args.log).init() {
		eprintln!("{e}");
		return ExitCode::FAILURE;
	}
	// Run the chosen command
	let output = match args.command {
		Commands::Run(args) => run::init(args).await,
		Commands::Version => version::init(),
	};
	if let Err(e) = output {
		error!("{}", e);
		eprintln!("{e}");
		return ExitCode::FAILURE;
	}
	ExitCode::SUCCESS
}
