use thiserror::Error;

#[derive(Debug, Error)]
pub enum PassthruError {
	#[error("jack client open failed for {name:?}: status {status:?}")]
	Open {
		name: String,
		status: jack::ClientStatus,
	},
	#[error(
		"jack client open failed for {name:?}: status {status:?}: \
		unable to connect to JACK server"
	)]
	ServerFailed {
		name: String,
		status: jack::ClientStatus,
	},
	#[error("no more JACK ports available: cannot register {port}")]
	RegisterPort {
		port: String,
		#[source]
		source: jack::Error,
	},
	#[error("couldn't activate client")]
	Activate(#[source] jack::Error),
	#[error(transparent)]
	Jack(#[from] jack::Error),
}
