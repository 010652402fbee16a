use crate::encode::emitter::Emitter;
use crate::error::Result;
use crate::value::Classify;

/// Per-value interception points around the shared traversal.
///
/// Override a method to coerce or rewrite individual values; call back into
/// the [`Emitter`] for everything else. `encode_nested_value` sees every
/// value, the root included, and must write exactly one value.
/// `encode_key_value` writes one `key:value` pair, or nothing to leave the
/// entry out. Separating commas are written by the traversal.
pub trait EncodeHooks {
    fn encode_key_value(
        &mut self,
        emitter: &mut Emitter<'_>,
        key: &dyn Classify,
        value: &dyn Classify,
    ) -> Result<()> {
        emitter.write_key_value(self, key, value)
    }

    fn encode_nested_value(&mut self, emitter: &mut Emitter<'_>, value: &dyn Classify) -> Result<()> {
        emitter.write_variant(self, value)
    }
}

/// Plain JSON, no interception.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultHooks;

impl EncodeHooks for DefaultHooks {}
