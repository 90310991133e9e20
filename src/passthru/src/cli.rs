use clap::Parser;

pub const DEFAULT_CLIENT_NAME: &str = "jack-passthru";
pub const DEFAULT_PORTS: usize = 16;

/// Copy every JACK input port to its paired output port
#[derive(Debug, Parser)]
#[command(name = "jack-passthru")]
#[command(version, about, long_about = None)]
pub struct Cli {
	/// Client name in JACK
	#[arg(short, long, default_value = DEFAULT_CLIENT_NAME)]
	pub name: String,

	/// Number of in/out pairs to open
	#[arg(short, long, default_value_t = DEFAULT_PORTS)]
	pub ports: usize,

	/// Let libjack start a server if none is running
	#[arg(short, long)]
	pub start_server: bool,

	/// Also quit on ENTER or EOF from stdin
	#[arg(long)]
	pub quit_on_eof: bool,

	/// Show debug output
	#[arg(short, long)]
	pub verbose: bool,
}

impl Cli {
	pub fn log_filter(&self) -> &'static str {
		if self.verbose {
			"debug"
		} else {
			"info"
		}
	}
}
