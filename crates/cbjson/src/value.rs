//! The seam between the encoder and whatever object graph the caller holds.
//!
//! A host type implements [`Classify`] to say which JSON-ish variant a value is
//! and to hand out its payload or children. The encoder never mutates the
//! graph and keeps no reference to it once `encode` returns.

use std::borrow::Cow;
use std::fmt;

/// Children of a sequence, in output order.
pub type Elements<'a> = Box<dyn Iterator<Item = &'a dyn Classify> + 'a>;

/// Key/value pairs of a mapping, in output order. Duplicates pass through.
pub type Entries<'a> = Box<dyn Iterator<Item = (&'a dyn Classify, &'a dyn Classify)> + 'a>;

/// Text payload. Bytes that came from a `str` are known to be UTF-8; raw
/// bytes are validated when escaped.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    bytes: Cow<'a, [u8]>,
    utf8: bool,
}

impl<'a> Text<'a> {
    /// Text whose encoding has not been checked yet.
    pub fn raw(bytes: &'a [u8]) -> Self {
        Self {
            bytes: Cow::Borrowed(bytes),
            utf8: false,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_known_utf8(&self) -> bool {
        self.utf8
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

impl<'a> From<&'a str> for Text<'a> {
    fn from(s: &'a str) -> Self {
        Self {
            bytes: Cow::Borrowed(s.as_bytes()),
            utf8: true,
        }
    }
}

impl From<String> for Text<'_> {
    fn from(s: String) -> Self {
        Self {
            bytes: Cow::Owned(s.into_bytes()),
            utf8: true,
        }
    }
}

impl<'a> From<Cow<'a, str>> for Text<'a> {
    fn from(s: Cow<'a, str>) -> Self {
        match s {
            Cow::Borrowed(s) => Self::from(s),
            Cow::Owned(s) => Self::from(s),
        }
    }
}

/// What a value is, plus what the encoder needs to write it.
pub enum Variant<'a> {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    /// Kept narrow so the shortest form is that of the `f32` value.
    Float32(f32),
    Text(Text<'a>),
    /// Written as a padded, standard-alphabet base64 string.
    Binary(&'a [u8]),
    /// Written as an RFC 3339 UTC string with millisecond precision.
    #[cfg(feature = "chrono")]
    Date(chrono::DateTime<chrono::Utc>),
    Sequence(Elements<'a>),
    Mapping(Entries<'a>),
    /// No JSON representation. The encoder, not the classifier, decides
    /// whether this is fatal.
    Unsupported,
}

impl<'a> Variant<'a> {
    pub fn text(text: impl Into<Text<'a>>) -> Self {
        Variant::Text(text.into())
    }

    pub fn sequence<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a T>,
        I::IntoIter: 'a,
        T: Classify + 'a,
    {
        Variant::Sequence(Box::new(items.into_iter().map(|v| v as &dyn Classify)))
    }

    pub fn mapping<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a K, &'a V)>,
        I::IntoIter: 'a,
        K: Classify + 'a,
        V: Classify + 'a,
    {
        Variant::Mapping(Box::new(
            entries
                .into_iter()
                .map(|(k, v)| (k as &dyn Classify, v as &dyn Classify)),
        ))
    }

    /// Short lowercase name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Null => "null",
            Variant::Bool(_) => "bool",
            Variant::Int(_) | Variant::UInt(_) => "integer",
            Variant::Float(_) | Variant::Float32(_) => "float",
            Variant::Text(_) => "text",
            Variant::Binary(_) => "binary",
            #[cfg(feature = "chrono")]
            Variant::Date(_) => "date",
            Variant::Sequence(_) => "sequence",
            Variant::Mapping(_) => "mapping",
            Variant::Unsupported => "unsupported",
        }
    }
}

impl fmt::Debug for Variant<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Null => f.write_str("Null"),
            Variant::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Variant::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Variant::UInt(u) => f.debug_tuple("UInt").field(u).finish(),
            Variant::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Variant::Float32(x) => f.debug_tuple("Float32").field(x).finish(),
            Variant::Text(t) => f.debug_tuple("Text").field(&t.to_string_lossy()).finish(),
            Variant::Binary(b) => f.debug_tuple("Binary").field(&b.len()).finish(),
            #[cfg(feature = "chrono")]
            Variant::Date(d) => f.debug_tuple("Date").field(d).finish(),
            Variant::Sequence(_) => f.write_str("Sequence(..)"),
            Variant::Mapping(_) => f.write_str("Mapping(..)"),
            Variant::Unsupported => f.write_str("Unsupported"),
        }
    }
}

/// Identity of a composite on the active path.
///
/// The address is paired with the type name so that a struct and its first
/// field, which share an address, are not mistaken for one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub addr: usize,
    pub type_name: &'static str,
}

/// Capability query over a host value.
///
/// `classify` must be total and free of side effects: it is called while
/// parent composites are still open, and may be called more than once for
/// the same value (for example when an error path is being built).
pub trait Classify {
    fn classify(&self) -> Variant<'_>;

    /// Identity used for cycle detection. Wrappers that forward to a shared
    /// pointee (`Rc`, `Arc`, `&T`) must forward this too.
    fn identity(&self) -> Identity {
        Identity {
            addr: self as *const Self as *const () as usize,
            type_name: self.type_name(),
        }
    }

    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
