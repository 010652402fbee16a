//! JSON string-literal escaping at the byte level.
//!
//! Unescaped bytes are handed on in maximal runs; only `"`, `\` and the
//! C0 controls are rewritten. Non-ASCII text stays as raw UTF-8 and `/` is
//! left alone.

use crate::encode::sink::ByteSink;
use crate::error::{Error, ErrorKind, Result};
use crate::value::Text;

const QU: u8 = b'"'; // \x22
const BS: u8 = b'\\'; // \x5C
const BB: u8 = b'b'; // \x08
const TT: u8 = b't'; // \x09
const NN: u8 = b'n'; // \x0A
const FF: u8 = b'f'; // \x0C
const RR: u8 = b'r'; // \x0D
const UU: u8 = b'u'; // \x00...\x1F except the ones above

// Lookup table of escape sequences. A value of b'x' at index i means that byte
// i is escaped as "\x" in JSON. A value of 0 means that byte i is not escaped.
#[rustfmt::skip]
static ESCAPE: [u8; 256] = [
    //   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
    UU, UU, UU, UU, UU, UU, UU, UU, BB, TT, NN, UU, FF, RR, UU, UU, // 0
    UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, // 1
     0,  0, QU,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // 2
     0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // 3
     0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // 4
     0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, BS,  0,  0,  0, // 5
     0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // 6
     0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // 7
     0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // 8
     0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // 9
     0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // A
     0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // B
     0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // C
     0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // D
     0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // E
     0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // F
];

static HEX: &[u8; 16] = b"0123456789abcdef";

/// Feed the escaped body of `text` (no surrounding quotes) to `f`, one run
/// at a time: either a maximal stretch of bytes that need no escaping, or a
/// single escape sequence.
pub fn for_each_escaped_run<F: FnMut(&[u8])>(text: &str, mut f: F) {
    escape_runs(text.as_bytes(), &mut f);
}

/// Like [`for_each_escaped_run`], for bytes of unknown encoding. The whole
/// input is checked first, so `f` is never called for malformed text.
pub fn try_for_each_escaped_run<F: FnMut(&[u8])>(bytes: &[u8], mut f: F) -> Result<()> {
    check_utf8(bytes)?;
    escape_runs(bytes, &mut f);
    Ok(())
}

/// Write `text` as a quoted JSON string.
pub fn write_escaped(sink: &mut ByteSink, text: &Text<'_>) -> Result<()> {
    let bytes = text.as_bytes();
    if !text.is_known_utf8() {
        check_utf8(bytes)?;
    }
    write_quoted(sink, bytes);
    Ok(())
}

pub fn write_escaped_str(sink: &mut ByteSink, text: &str) {
    write_quoted(sink, text.as_bytes());
}

fn write_quoted(sink: &mut ByteSink, bytes: &[u8]) {
    sink.push(b'"');
    escape_runs(bytes, &mut |run: &[u8]| sink.extend_from_slice(run));
    sink.push(b'"');
}

fn check_utf8(bytes: &[u8]) -> Result<()> {
    core::str::from_utf8(bytes).map(|_| ()).map_err(|e| {
        Error::new(
            ErrorKind::InvalidText,
            format!("malformed UTF-8 at byte {}", e.valid_up_to()),
        )
    })
}

fn escape_runs<F: FnMut(&[u8])>(bytes: &[u8], f: &mut F) {
    let mut start = 0;

    for (i, &byte) in bytes.iter().enumerate() {
        let escape = ESCAPE[byte as usize];
        if escape == 0 {
            continue;
        }

        if start < i {
            f(&bytes[start..i]);
        }

        if escape == UU {
            let seq = [
                b'\\',
                b'u',
                b'0',
                b'0',
                HEX[(byte >> 4) as usize],
                HEX[(byte & 0xF) as usize],
            ];
            f(&seq);
        } else {
            f(&[b'\\', escape]);
        }

        start = i + 1;
    }

    if start != bytes.len() {
        f(&bytes[start..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quoted(s: &str) -> String {
        let mut sink = ByteSink::new();
        write_escaped_str(&mut sink, s);
        String::from_utf8(sink.into_bytes()).unwrap()
    }

    #[test]
    fn short_escapes() {
        assert_eq!(quoted("a\"b\\c"), r#""a\"b\\c""#);
        assert_eq!(quoted("\n\r\t\u{8}\u{c}"), r#""\n\r\t\b\f""#);
    }

    #[test]
    fn other_controls_use_lowercase_hex() {
        assert_eq!(quoted("\u{0}\u{1f}\u{b}"), r#""\u0000\u001f\u000b""#);
    }

    #[test]
    fn slash_del_and_non_ascii_pass_through() {
        assert_eq!(quoted("a/b\u{7f}"), "\"a/b\u{7f}\"");
        assert_eq!(quoted("héllo ✓ 𝄞"), "\"héllo ✓ 𝄞\"");
    }

    #[test]
    fn runs_are_maximal() {
        let mut runs: Vec<Vec<u8>> = Vec::new();
        for_each_escaped_run("abc\ndef\u{1}", |r| runs.push(r.to_vec()));
        assert_eq!(
            runs,
            vec![
                b"abc".to_vec(),
                b"\\n".to_vec(),
                b"def".to_vec(),
                b"\\u0001".to_vec()
            ]
        );
    }

    #[test]
    fn empty_text_yields_no_runs() {
        let mut calls = 0;
        for_each_escaped_run("", |_| calls += 1);
        assert_eq!(calls, 0);
        assert_eq!(quoted(""), "\"\"");
    }

    #[test]
    fn malformed_utf8_is_reported_before_any_output() {
        let mut calls = 0;
        let err = try_for_each_escaped_run(b"ok\xffno", |_| calls += 1).unwrap_err();
        assert_eq!(calls, 0);
        assert_eq!(err.kind(), ErrorKind::InvalidText);
        assert!(err.message().contains("byte 2"));

        let mut sink = ByteSink::new();
        let err = write_escaped(&mut sink, &Text::raw(b"\xc3")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidText);
        assert!(sink.is_empty());
    }

    #[test]
    fn raw_text_that_is_valid_is_escaped_normally() {
        let mut sink = ByteSink::new();
        write_escaped(&mut sink, &Text::raw("tab\there".as_bytes())).unwrap();
        assert_eq!(sink.as_bytes(), br#""tab\there""#);
    }
}
