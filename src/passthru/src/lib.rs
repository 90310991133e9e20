//! Copy every JACK input port to its paired output port, once per cycle.

pub mod cli;
pub mod error;
pub mod registry;
pub mod session;

pub use cli::Cli;
pub use error::PassthruError;
pub use registry::{AudioSink, AudioSource, PortPair, PortRegistry, Registrar};
pub use session::{Event, ShutdownNotifier};

pub type Sample = f32;
