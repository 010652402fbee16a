use core::fmt;

use thiserror::Error;

/// The reason an encode call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The value's variant has no JSON representation.
    UnsupportedType,
    /// A mapping key did not classify as text.
    InvalidKey,
    /// Text bytes were not well-formed UTF-8.
    InvalidText,
    /// NaN or an infinity.
    NonFiniteNumber,
    /// A composite value was reached again while still open.
    CyclicReference,
    /// Nesting went past `Options::max_depth`.
    DepthExceeded,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::UnsupportedType => "unsupported type",
            ErrorKind::InvalidKey => "invalid key",
            ErrorKind::InvalidText => "invalid text",
            ErrorKind::NonFiniteNumber => "non-finite number",
            ErrorKind::CyclicReference => "cyclic reference",
            ErrorKind::DepthExceeded => "depth exceeded",
        })
    }
}

/// One step from a composite value to one of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Index(usize),
    Key(String),
}

/// Location of the offending value, relative to the root passed to `encode`.
///
/// Paths are only built while a failure unwinds, so the happy path never
/// pays for them. Segments are stored innermost-first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    rev: Vec<Segment>,
}

impl Path {
    /// Segments from the root downwards.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.rev.iter().rev()
    }

    pub fn is_root(&self) -> bool {
        self.rev.is_empty()
    }

    fn push_outer(&mut self, seg: Segment) {
        self.rev.push(seg);
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for seg in self.segments() {
            match seg {
                Segment::Index(i) => write!(f, "[{}]", i)?,
                Segment::Key(k) if is_plain_key(k) => write!(f, ".{}", k)?,
                Segment::Key(k) => {
                    let mut sink = crate::encode::sink::ByteSink::with_capacity(k.len() + 2);
                    crate::encode::escape::write_escaped_str(&mut sink, k);
                    write!(f, "[{}]", String::from_utf8_lossy(sink.as_bytes()))?;
                }
            }
        }
        Ok(())
    }
}

fn is_plain_key(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A failed encode: what went wrong, a human readable message, and where.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message} at {path}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    path: Path,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            path: Path::default(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn at_index(mut self, index: usize) -> Self {
        self.path.push_outer(Segment::Index(index));
        self
    }

    pub(crate) fn at_key(mut self, key: String) -> Self {
        self.path.push_outer(Segment::Key(key));
        self
    }
}

pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_renders_outermost_first() {
        let err = Error::new(ErrorKind::NonFiniteNumber, "NaN")
            .at_index(2)
            .at_key("odd key".into())
            .at_key("items".into());
        assert_eq!(err.path().to_string(), "$.items[\"odd key\"][2]");
        assert_eq!(err.to_string(), "non-finite number: NaN at $.items[\"odd key\"][2]");
    }

    #[test]
    fn root_path() {
        let err = Error::new(ErrorKind::UnsupportedType, "x");
        assert!(err.path().is_root());
        assert_eq!(err.path().to_string(), "$");
    }
}
