use std::process::ExitCode;
use std::sync::mpsc::{sync_channel, SyncSender};

use anyhow::Context;
use assert_no_alloc::assert_no_alloc;
use clap::Parser;

use passthru::{Cli, Event, PassthruError, PortRegistry, ShutdownNotifier};

#[cfg(debug_assertions)]
#[global_allocator]
static A: assert_no_alloc::AllocDisabler = assert_no_alloc::AllocDisabler;

fn main() -> ExitCode {
	let cli = Cli::parse();
	env_logger::Builder::from_env(
		env_logger::Env::default().default_filter_or(cli.log_filter()),
	)
	.init();

	match run(&cli) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			log::error!("{:#}", e);
			ExitCode::FAILURE
		}
	}
}

fn run(cli: &Cli) -> anyhow::Result<()> {
	let client = passthru::session::open_client(&cli.name, cli.start_server)?;
	let mut registry = PortRegistry::register(&client, cli.ports)?;
	log::debug!("registered {} port pairs", registry.len());

	let (tx, rx) = sync_channel(passthru::session::EVENT_QUEUE);
	let int_tx = tx.clone();
	ctrlc::set_handler(move || {
		let _ = int_tx.try_send(Event::Interrupted);
	})
	.context("failed to install signal handler")?;
	if cli.quit_on_eof {
		watch_stdin(tx.clone());
	}

	let callback =
		move |_: &jack::Client, ps: &jack::ProcessScope| -> jack::Control {
			assert_no_alloc(|| registry.pass_through(ps));
			jack::Control::Continue
		};
	let active_client = client
		.activate_async(
			ShutdownNotifier::new(tx),
			jack::ClosureProcessHandler::new(callback),
		)
		.map_err(PassthruError::Activate)?;
	log::info!("press ctrl+c to terminate");

	match rx.recv() {
		Ok(Event::ServerShutdown { reason }) => {
			log::warn!("killed by JACK server: {}", reason);
			// dropping closes the client; deactivating a zombie would fail
			drop(active_client);
		}
		Ok(event) => {
			log::info!("stopping: {:?}", event);
			active_client.deactivate().map_err(PassthruError::from)?;
		}
		Err(e) => return Err(e).context("event channel closed"),
	}
	Ok(())
}

fn watch_stdin(tx: SyncSender<Event>) {
	std::thread::spawn(move || {
		let mut line = String::new();
		// ENTER, EOF or a read error all end the session
		let _ = std::io::stdin().read_line(&mut line);
		let _ = tx.try_send(Event::StdinClosed);
	});
}
