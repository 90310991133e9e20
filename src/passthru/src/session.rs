use std::sync::mpsc::SyncSender;

use crate::error::PassthruError;

/// Bound of the event channel. A `sync_channel` preallocates its slots.
pub const EVENT_QUEUE: usize = 4;
pub const REASON_CAPACITY: usize = 256;

/// Why the main thread stopped waiting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
	ServerShutdown { reason: String },
	Interrupted,
	StdinClosed,
}

pub fn truncate_name(name: &str, max: usize) -> &str {
	if name.len() <= max {
		return name;
	}
	let mut end = max;
	while !name.is_char_boundary(end) {
		end -= 1;
	}
	&name[..end]
}

pub fn open_client(
	name: &str,
	start_server: bool,
) -> Result<jack::Client, PassthruError> {
	let short = truncate_name(name, *jack::CLIENT_NAME_SIZE);
	if short.len() != name.len() {
		log::warn!("client name truncated to {:?}", short);
	}
	let options = if start_server {
		jack::ClientOptions::empty()
	} else {
		jack::ClientOptions::NO_START_SERVER
	};
	let (client, status) = match jack::Client::new(short, options) {
		Ok(x) => x,
		Err(jack::Error::ClientError(status)) => {
			if status.contains(jack::ClientStatus::SERVER_FAILED) {
				return Err(PassthruError::ServerFailed {
					name: short.to_string(),
					status,
				});
			}
			return Err(PassthruError::Open {
				name: short.to_string(),
				status,
			});
		}
		Err(e) => return Err(e.into()),
	};
	if status.contains(jack::ClientStatus::SERVER_STARTED) {
		log::info!("JACK server started");
	}
	if status.contains(jack::ClientStatus::NAME_NOT_UNIQUE) {
		log::info!("unique name: {} assigned", client.name());
	}
	log::info!("sample rate: {}", client.sample_rate());
	log::debug!("buffer size: {}", client.buffer_size());
	Ok(client)
}

/// Forwards the server's shutdown notice to the main thread.
///
/// The hook has to behave like an async signal handler: no allocation and no
/// waiting on the main thread. The reason is copied into a buffer reserved up
/// front, and the event goes through a preallocated channel with `try_send`.
pub struct ShutdownNotifier {
	tx: SyncSender<Event>,
	reason: String,
}

impl ShutdownNotifier {
	pub fn new(tx: SyncSender<Event>) -> Self {
		Self {
			tx,
			reason: String::with_capacity(REASON_CAPACITY),
		}
	}
}

impl jack::NotificationHandler for ShutdownNotifier {
	fn shutdown(&mut self, _status: jack::ClientStatus, reason: &str) {
		self.reason.clear();
		let cap = self.reason.capacity();
		self.reason.push_str(truncate_name(reason, cap));
		let _ = self.tx.try_send(Event::ServerShutdown {
			reason: std::mem::take(&mut self.reason),
		});
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use jack::NotificationHandler;

	#[test]
	fn test_truncate_short() {
		assert_eq!(truncate_name("jack-passthru", 64), "jack-passthru");
		assert_eq!(truncate_name("", 0), "");
	}

	#[test]
	fn test_truncate_long() {
		assert_eq!(truncate_name("jack-passthru", 4), "jack");
		assert_eq!(truncate_name("jack-passthru", 0), "");
	}

	#[test]
	fn test_truncate_char_boundary() {
		// 'é' is two bytes
		assert_eq!(truncate_name("aé", 2), "a");
		assert_eq!(truncate_name("aé", 3), "aé");
	}

	#[test]
	fn test_shutdown_forwarded() {
		let (tx, rx) = std::sync::mpsc::sync_channel(EVENT_QUEUE);
		let mut notifier = ShutdownNotifier::new(tx);
		notifier.shutdown(jack::ClientStatus::SERVER_ERROR, "server gone");
		assert_eq!(
			rx.try_recv().unwrap(),
			Event::ServerShutdown {
				reason: "server gone".to_string()
			},
		);
	}

	#[test]
	fn test_shutdown_reason_fits_buffer() {
		let (tx, rx) = std::sync::mpsc::sync_channel(EVENT_QUEUE);
		let mut notifier = ShutdownNotifier::new(tx);
		let long = "x".repeat(REASON_CAPACITY * 2);
		notifier.shutdown(jack::ClientStatus::SERVER_ERROR, &long);
		match rx.try_recv().unwrap() {
			Event::ServerShutdown { reason } => {
				assert_eq!(reason.len(), REASON_CAPACITY);
				// the reserved buffer itself was handed over, not a copy
				assert_eq!(reason.capacity(), REASON_CAPACITY);
			}
			e => panic!("unexpected event {:?}", e),
		}
	}

	#[test]
	fn test_shutdown_full_queue() {
		let (tx, rx) = std::sync::mpsc::sync_channel(1);
		tx.send(Event::Interrupted).unwrap();
		let mut notifier = ShutdownNotifier::new(tx);
		// must return instead of waiting for the main thread
		notifier.shutdown(jack::ClientStatus::SERVER_ERROR, "gone");
		assert_eq!(rx.try_recv().unwrap(), Event::Interrupted);
		assert!(rx.try_recv().is_err());
	}
}
