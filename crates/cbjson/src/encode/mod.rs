//! Encoding pipeline: classify, dispatch, escape, append.

pub mod emitter;
pub mod escape;
pub mod hooks;
pub mod sink;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::options::Options;
use crate::value::Classify;

use self::emitter::Emitter;
use self::hooks::{DefaultHooks, EncodeHooks};

/// Reusable encoder holding the outcome of its last `encode` call.
///
/// On success the output is available through [`Encoder::encoded_bytes`];
/// on failure only [`Encoder::error`] is set and the partial output is
/// dropped. Each call starts from a clean slate.
#[derive(Debug)]
pub struct Encoder<H: EncodeHooks = DefaultHooks> {
    hooks: H,
    options: Options,
    error: Option<Error>,
    output: Option<Vec<u8>>,
}

impl Encoder<DefaultHooks> {
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Self {
        Self::with_hooks(DefaultHooks, options)
    }
}

impl Default for Encoder<DefaultHooks> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: EncodeHooks> Encoder<H> {
    pub fn with_hooks(hooks: H, options: Options) -> Self {
        Self {
            hooks,
            options,
            error: None,
            output: None,
        }
    }

    pub fn encode(&mut self, root: &dyn Classify) -> Result<&[u8]> {
        self.error = None;
        self.output = None;
        match run(&mut self.hooks, &self.options, root) {
            Ok(bytes) => Ok(self.output.insert(bytes).as_slice()),
            Err(err) => {
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Error recorded by the last `encode`, if it failed.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Output of the last `encode`, if it succeeded.
    pub fn encoded_bytes(&self) -> Option<&[u8]> {
        self.output.as_deref()
    }

    pub fn into_bytes(self) -> Option<Vec<u8>> {
        self.output
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }
}

pub(crate) fn run<H: EncodeHooks + ?Sized>(
    hooks: &mut H,
    options: &Options,
    root: &dyn Classify,
) -> Result<Vec<u8>> {
    let mut emitter = Emitter::new(options);
    match emitter.write_value(hooks, root) {
        Ok(()) => {
            let bytes = emitter.into_sink().into_bytes();
            trace!(len = bytes.len(), "encoded value");
            Ok(bytes)
        }
        Err(err) => {
            debug!(kind = %err.kind(), path = %err.path(), "encode failed: {}", err.message());
            Err(err)
        }
    }
}
