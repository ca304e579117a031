use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use resctrl_stat::collect::default_workers;
use resctrl_stat::constants::{DEFAULT_CPUINFO_PATH, DEFAULT_RESCTRL_ROOT};
use resctrl_stat::display::{render_json, render_table};
use resctrl_stat::{ResctrlConfig, read_groups};

#[derive(Parser)]
#[command(name = "resctrl-stat", about = "LLC occupancy and memory bandwidth per resctrl group", version)]
struct Args {
	/// Mount point of the resctrl filesystem.
	#[arg(long, env = "RESCTRL_ROOT", default_value = DEFAULT_RESCTRL_ROOT)]
	root: PathBuf,

	/// cpuinfo file used to detect the CPU vendor.
	#[arg(long, env = "RESCTRL_CPUINFO", default_value = DEFAULT_CPUINFO_PATH)]
	cpuinfo: PathBuf,

	/// Control group to read (repeatable). An empty name reads the root group.
	#[arg(short, long = "group", default_values_t = [String::from("BE"), String::from("LS")])]
	groups: Vec<String>,

	/// Fail instead of falling back when the CPU vendor is not supported.
	#[arg(long)]
	strict: bool,

	/// Print JSON instead of a table.
	#[arg(long)]
	json: bool,

	/// Number of worker threads (defaults to the number of CPUs).
	#[arg(short, long)]
	workers: Option<usize>,

	/// Increase log verbosity (-v debug, -vv trace).
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,

	/// Only log errors.
	#[arg(short, long)]
	quiet: bool,
}

/// Initializes the tracing subscriber on stderr; RUST_LOG directives are honored.
fn init_logging(verbose: u8, quiet: bool) {
	let level = if quiet {
		LevelFilter::ERROR
	} else {
		match verbose {
			0 => LevelFilter::WARN,
			1 => LevelFilter::DEBUG,
			_ => LevelFilter::TRACE,
		}
	};

	let filter = EnvFilter::builder()
		.with_default_directive(level.into())
		.from_env_lossy();

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.with_writer(std::io::stderr)
		.init();
}

fn main() -> ExitCode {
	let args = Args::parse();
	init_logging(args.verbose, args.quiet);

	let config = ResctrlConfig {
		root: args.root,
		cpuinfo_path: args.cpuinfo,
		strict_vendor: args.strict,
	};
	let workers = args.workers.unwrap_or_else(default_workers);

	let (kind, results) = match read_groups(&config, &args.groups, workers) {
		Ok(read) => read,
		Err(e) => {
			tracing::error!(error = %e, "cannot build resctrl reader");
			return ExitCode::FAILURE;
		},
	};

	if args.json {
		match render_json(kind, &results) {
			Ok(json) => println!("{json}"),
			Err(e) => {
				tracing::error!(error = %e, "cannot serialize results");
				return ExitCode::FAILURE;
			},
		}
	} else {
		print!("{}", render_table(kind, &results));
	}

	if results.iter().any(|stats| stats.has_errors()) {
		ExitCode::FAILURE
	} else {
		ExitCode::SUCCESS
	}
}
