//! `Classify` for std types, plus adapters for other host representations.

#[cfg(feature = "json")]
pub mod json;

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

use crate::value::{Classify, Identity, Text, Variant};

/// Binary payload, encoded as a base64 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bytes<'a>(pub &'a [u8]);

impl Classify for Bytes<'_> {
    fn classify(&self) -> Variant<'_> {
        Variant::Binary(self.0)
    }
}

/// Text held as bytes of unverified encoding. Malformed UTF-8 fails the
/// encode with `InvalidText` instead of being replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawText<'a>(pub &'a [u8]);

impl Classify for RawText<'_> {
    fn classify(&self) -> Variant<'_> {
        Variant::Text(Text::raw(self.0))
    }
}

impl Classify for () {
    fn classify(&self) -> Variant<'_> {
        Variant::Null
    }
}

impl Classify for bool {
    fn classify(&self) -> Variant<'_> {
        Variant::Bool(*self)
    }
}

macro_rules! classify_signed {
    ($($t:ty),*) => {
        $(impl Classify for $t {
            fn classify(&self) -> Variant<'_> {
                Variant::Int(*self as i64)
            }
        })*
    };
}

macro_rules! classify_unsigned {
    ($($t:ty),*) => {
        $(impl Classify for $t {
            fn classify(&self) -> Variant<'_> {
                Variant::UInt(*self as u64)
            }
        })*
    };
}

classify_signed!(i8, i16, i32, i64, isize);
classify_unsigned!(u8, u16, u32, u64, usize);

impl Classify for i128 {
    fn classify(&self) -> Variant<'_> {
        match i64::try_from(*self) {
            Ok(v) => Variant::Int(v),
            Err(_) => match u64::try_from(*self) {
                Ok(v) => Variant::UInt(v),
                Err(_) => Variant::Unsupported,
            },
        }
    }
}

impl Classify for u128 {
    fn classify(&self) -> Variant<'_> {
        match u64::try_from(*self) {
            Ok(v) => Variant::UInt(v),
            Err(_) => Variant::Unsupported,
        }
    }
}

impl Classify for f32 {
    fn classify(&self) -> Variant<'_> {
        Variant::Float32(*self)
    }
}

impl Classify for f64 {
    fn classify(&self) -> Variant<'_> {
        Variant::Float(*self)
    }
}

impl Classify for char {
    fn classify(&self) -> Variant<'_> {
        Variant::text(self.to_string())
    }
}

impl Classify for str {
    fn classify(&self) -> Variant<'_> {
        Variant::text(self)
    }
}

impl Classify for String {
    fn classify(&self) -> Variant<'_> {
        Variant::text(self.as_str())
    }
}

impl Classify for Cow<'_, str> {
    fn classify(&self) -> Variant<'_> {
        Variant::text(&**self)
    }
}

impl<T: Classify> Classify for Option<T> {
    fn classify(&self) -> Variant<'_> {
        match self {
            Some(v) => v.classify(),
            None => Variant::Null,
        }
    }

    fn identity(&self) -> Identity {
        match self {
            Some(v) => v.identity(),
            None => Identity {
                addr: self as *const Self as usize,
                type_name: self.type_name(),
            },
        }
    }
}

impl<T: Classify> Classify for [T] {
    fn classify(&self) -> Variant<'_> {
        Variant::sequence(self)
    }
}

impl<T: Classify, const N: usize> Classify for [T; N] {
    fn classify(&self) -> Variant<'_> {
        Variant::sequence(self)
    }
}

impl<T: Classify> Classify for Vec<T> {
    fn classify(&self) -> Variant<'_> {
        Variant::sequence(self)
    }
}

impl<T: Classify> Classify for VecDeque<T> {
    fn classify(&self) -> Variant<'_> {
        Variant::sequence(self)
    }
}

impl<K: Classify, V: Classify> Classify for BTreeMap<K, V> {
    fn classify(&self) -> Variant<'_> {
        Variant::mapping(self)
    }
}

impl<K: Classify, V: Classify, S: BuildHasher> Classify for HashMap<K, V, S> {
    fn classify(&self) -> Variant<'_> {
        Variant::mapping(self)
    }
}

macro_rules! classify_forward {
    ($($ptr:ident),*) => {
        $(impl<T: Classify + ?Sized> Classify for $ptr<T> {
            fn classify(&self) -> Variant<'_> {
                (**self).classify()
            }

            fn identity(&self) -> Identity {
                (**self).identity()
            }

            fn type_name(&self) -> &'static str {
                (**self).type_name()
            }
        })*
    };
}

classify_forward!(Box, Rc, Arc);

impl<T: Classify + ?Sized> Classify for &T {
    fn classify(&self) -> Variant<'_> {
        (**self).classify()
    }

    fn identity(&self) -> Identity {
        (**self).identity()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}

#[cfg(feature = "chrono")]
impl Classify for chrono::DateTime<chrono::Utc> {
    fn classify(&self) -> Variant<'_> {
        Variant::Date(*self)
    }
}
