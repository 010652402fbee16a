use base64::Engine as _;

use crate::encode::hooks::EncodeHooks;
use crate::encode::{escape, sink::ByteSink};
use crate::error::{Error, ErrorKind, Result};
use crate::number;
use crate::options::{MAX_DEPTH_CEILING, Options};
use crate::value::{Classify, Elements, Entries, Identity, Variant};

#[cfg(feature = "perf_smallvec")]
type OpenStack = smallvec::SmallVec<[Identity; 16]>;
#[cfg(not(feature = "perf_smallvec"))]
type OpenStack = Vec<Identity>;

/// In-flight state of one encode call: the output sink and the composites
/// currently open on the recursion path.
///
/// `open` doubles as the cycle guard and the depth counter. Entries are
/// pushed on entering a sequence or mapping and popped on every way out.
pub struct Emitter<'o> {
    sink: ByteSink,
    open: OpenStack,
    options: &'o Options,
    max_depth: usize,
    // comma owed to the current mapping entry, written with its first byte
    pending_comma: bool,
}

impl<'o> Emitter<'o> {
    pub(crate) fn new(options: &'o Options) -> Self {
        Self {
            sink: ByteSink::new(),
            open: OpenStack::new(),
            options,
            max_depth: options.max_depth.min(MAX_DEPTH_CEILING),
            pending_comma: false,
        }
    }

    pub fn options(&self) -> &Options {
        self.options
    }

    /// Number of composites currently open.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Append bytes as-is. The caller is responsible for them being valid
    /// JSON in this position.
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.flush_separator();
        self.sink.extend_from_slice(bytes);
    }

    /// Append `text` as a quoted, escaped JSON string.
    pub fn write_text(&mut self, text: &str) {
        self.flush_separator();
        escape::write_escaped_str(&mut self.sink, text);
    }

    /// Append `"key":`.
    pub fn write_key(&mut self, key: &str) {
        self.write_text(key);
        self.sink.push(b':');
    }

    /// Encode `value` through the hooks. The hooks must write something:
    /// an empty value position is reported as `UnsupportedType`.
    pub fn write_value<H: EncodeHooks + ?Sized>(
        &mut self,
        hooks: &mut H,
        value: &dyn Classify,
    ) -> Result<()> {
        let before = self.sink.len();
        hooks.encode_nested_value(self, value)?;
        if self.sink.len() == before {
            return Err(Error::new(
                ErrorKind::UnsupportedType,
                format!("{} was encoded as nothing", value.type_name()),
            ));
        }
        Ok(())
    }

    /// Classify `value` and write it. Children are routed back through the
    /// hooks.
    pub fn write_variant<H: EncodeHooks + ?Sized>(
        &mut self,
        hooks: &mut H,
        value: &dyn Classify,
    ) -> Result<()> {
        self.flush_separator();
        match value.classify() {
            Variant::Null => self.sink.extend_from_slice(b"null"),
            Variant::Bool(true) => self.sink.extend_from_slice(b"true"),
            Variant::Bool(false) => self.sink.extend_from_slice(b"false"),
            Variant::Int(i) => number::write_i64(&mut self.sink, i),
            Variant::UInt(u) => number::write_u64(&mut self.sink, u),
            Variant::Float(f) => number::write_float(&mut self.sink, f, self.options.float_style)?,
            Variant::Float32(f) => number::write_float(&mut self.sink, f, self.options.float_style)?,
            Variant::Text(text) => escape::write_escaped(&mut self.sink, &text)?,
            Variant::Binary(bytes) => {
                // base64 output never needs escaping
                self.sink.push(b'"');
                self.sink
                    .extend_from_slice(base64::engine::general_purpose::STANDARD.encode(bytes).as_bytes());
                self.sink.push(b'"');
            }
            #[cfg(feature = "chrono")]
            Variant::Date(date) => {
                let stamp = date.to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
                escape::write_escaped_str(&mut self.sink, &stamp);
            }
            Variant::Sequence(items) => {
                self.enter(value.identity())?;
                let res = self.write_elements(hooks, items);
                self.open.pop();
                res?;
            }
            Variant::Mapping(entries) => {
                self.enter(value.identity())?;
                let res = self.write_entries(hooks, entries);
                self.open.pop();
                res?;
            }
            Variant::Unsupported => {
                return Err(Error::new(
                    ErrorKind::UnsupportedType,
                    format!("{} has no JSON representation", value.type_name()),
                ));
            }
        }
        Ok(())
    }

    /// Write one mapping entry. Keys must classify as text.
    pub fn write_key_value<H: EncodeHooks + ?Sized>(
        &mut self,
        hooks: &mut H,
        key: &dyn Classify,
        value: &dyn Classify,
    ) -> Result<()> {
        self.flush_separator();
        match key.classify() {
            Variant::Text(text) => escape::write_escaped(&mut self.sink, &text)?,
            other => {
                return Err(Error::new(
                    ErrorKind::InvalidKey,
                    format!(
                        "mapping keys must be text, found {} ({})",
                        other.name(),
                        key.type_name()
                    ),
                ));
            }
        }
        self.sink.push(b':');
        self.write_value(hooks, value)
    }

    pub(crate) fn into_sink(self) -> ByteSink {
        self.sink
    }

    fn enter(&mut self, id: Identity) -> Result<()> {
        if self.open.contains(&id) {
            return Err(Error::new(
                ErrorKind::CyclicReference,
                format!("{} is reachable from itself", id.type_name),
            ));
        }
        if self.open.len() >= self.max_depth {
            return Err(Error::new(
                ErrorKind::DepthExceeded,
                format!("nesting exceeds max_depth of {}", self.max_depth),
            ));
        }
        self.open.push(id);
        Ok(())
    }

    fn flush_separator(&mut self) {
        if std::mem::take(&mut self.pending_comma) {
            self.sink.push(b',');
        }
    }

    fn write_elements<H: EncodeHooks + ?Sized>(
        &mut self,
        hooks: &mut H,
        items: Elements<'_>,
    ) -> Result<()> {
        self.sink.push(b'[');
        for (i, item) in items.enumerate() {
            if i > 0 {
                self.sink.push(b',');
            }
            self.write_value(hooks, item).map_err(|e| e.at_index(i))?;
        }
        self.sink.push(b']');
        Ok(())
    }

    fn write_entries<H: EncodeHooks + ?Sized>(
        &mut self,
        hooks: &mut H,
        entries: Entries<'_>,
    ) -> Result<()> {
        self.sink.push(b'{');
        // an entry whose hook writes nothing is left out, separator included
        let mut written = 0;
        for (i, (key, value)) in entries.enumerate() {
            let before = self.sink.len();
            self.pending_comma = written > 0;
            let res = hooks.encode_key_value(self, key, value);
            self.pending_comma = false;
            res.map_err(|e| within_entry(e, i, key))?;
            if self.sink.len() > before {
                written += 1;
            }
        }
        self.sink.push(b'}');
        Ok(())
    }
}

// Entries with a text key are addressed by key, anything else by position.
fn within_entry(err: Error, index: usize, key: &dyn Classify) -> Error {
    match key.classify() {
        Variant::Text(text) => err.at_key(text.to_string_lossy().into_owned()),
        _ => err.at_index(index),
    }
}
