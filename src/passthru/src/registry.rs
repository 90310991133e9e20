use crate::error::PassthruError;
use crate::Sample;

pub trait AudioSource<S> {
	fn samples<'a>(&'a self, scope: &'a S) -> &'a [Sample];
}

pub trait AudioSink<S> {
	fn samples_mut<'a>(&'a mut self, scope: &'a S) -> &'a mut [Sample];
}

impl AudioSource<jack::ProcessScope> for jack::Port<jack::AudioIn> {
	fn samples<'a>(&'a self, ps: &'a jack::ProcessScope) -> &'a [Sample] {
		self.as_slice(ps)
	}
}

impl AudioSink<jack::ProcessScope> for jack::Port<jack::AudioOut> {
	fn samples_mut<'a>(
		&'a mut self,
		ps: &'a jack::ProcessScope,
	) -> &'a mut [Sample] {
		self.as_mut_slice(ps)
	}
}

pub trait Registrar {
	type Input;
	type Output;

	fn register_input(&self, name: &str) -> Result<Self::Input, jack::Error>;
	fn register_output(&self, name: &str)
		-> Result<Self::Output, jack::Error>;
}

impl Registrar for jack::Client {
	type Input = jack::Port<jack::AudioIn>;
	type Output = jack::Port<jack::AudioOut>;

	fn register_input(&self, name: &str) -> Result<Self::Input, jack::Error> {
		self.register_port(name, jack::AudioIn::default())
	}

	fn register_output(
		&self,
		name: &str,
	) -> Result<Self::Output, jack::Error> {
		self.register_port(name, jack::AudioOut::default())
	}
}

pub fn input_name(idx: usize) -> String {
	format!("input_{}", idx)
}

pub fn output_name(idx: usize) -> String {
	format!("output_{}", idx)
}

pub struct PortPair<I, O> {
	pub input: I,
	pub output: O,
}

pub struct PortRegistry<I, O> {
	pairs: Vec<PortPair<I, O>>,
}

impl<I, O> PortRegistry<I, O> {
	/// Register `count` pairs, stopping at the first failure.
	///
	/// Ports registered before the failure stay with the client and go away
	/// when it is closed; nothing is returned that could be activated.
	/// `count` is untrusted, so the list grows with successful registrations
	/// instead of being sized up front.
	pub fn register<R>(
		registrar: &R,
		count: usize,
	) -> Result<Self, PassthruError>
	where
		R: Registrar<Input = I, Output = O>,
	{
		let mut pairs = Vec::new();
		for idx in 0..count {
			let input = register_one(&input_name(idx), |name| {
				registrar.register_input(name)
			})?;
			let output = register_one(&output_name(idx), |name| {
				registrar.register_output(name)
			})?;
			pairs.push(PortPair { input, output });
		}
		Ok(Self { pairs })
	}

	pub fn len(&self) -> usize {
		self.pairs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.pairs.is_empty()
	}

	pub fn pairs(&self) -> &[PortPair<I, O>] {
		&self.pairs
	}

	pub fn pairs_mut(&mut self) -> &mut [PortPair<I, O>] {
		&mut self.pairs
	}

	/// Copy each input block into the output of the same pair.
	///
	/// Runs on the real-time thread: no allocation, no locking, no logging.
	pub fn pass_through<S>(&mut self, scope: &S)
	where
		I: AudioSource<S>,
		O: AudioSink<S>,
	{
		for pair in self.pairs.iter_mut() {
			let src = pair.input.samples(scope);
			let dst = pair.output.samples_mut(scope);
			let n = src.len().min(dst.len());
			dst[..n].copy_from_slice(&src[..n]);
		}
	}
}

fn register_one<T>(
	name: &str,
	f: impl FnOnce(&str) -> Result<T, jack::Error>,
) -> Result<T, PassthruError> {
	f(name).map_err(|source| PassthruError::RegisterPort {
		port: name.to_string(),
		source,
	})
}
