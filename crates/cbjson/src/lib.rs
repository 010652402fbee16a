#![doc = include_str!("../README.md")]

pub mod encode;
pub mod error;
pub mod host;
pub mod options;
pub mod value;

mod number;

pub use crate::encode::Encoder;
pub use crate::encode::emitter::Emitter;
pub use crate::encode::escape::{for_each_escaped_run, try_for_each_escaped_run};
pub use crate::encode::hooks::{DefaultHooks, EncodeHooks};
pub use crate::error::{Error, ErrorKind, Path, Result, Segment};
pub use crate::host::{Bytes, RawText};
pub use crate::options::{FloatStyle, Options};
pub use crate::value::{Classify, Identity, Text, Variant};

/// Encode `root` with default options.
pub fn encode(root: &dyn Classify) -> Result<Vec<u8>> {
    encode_with(root, &Options::default())
}

pub fn encode_with(root: &dyn Classify, options: &Options) -> Result<Vec<u8>> {
    crate::encode::run(&mut DefaultHooks, options, root)
}

pub fn encode_to_string(root: &dyn Classify, options: &Options) -> Result<String> {
    let bytes = encode_with(root, options)?;
    String::from_utf8(bytes).map_err(|e| {
        Error::new(
            ErrorKind::InvalidText,
            format!("output is not UTF-8 at byte {}", e.utf8_error().valid_up_to()),
        )
    })
}
