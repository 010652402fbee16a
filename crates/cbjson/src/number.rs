use crate::encode::sink::ByteSink;
use crate::error::{Error, ErrorKind, Result};
use crate::options::FloatStyle;

pub(crate) fn write_i64(sink: &mut ByteSink, value: i64) {
    let mut buf = itoa::Buffer::new();
    sink.extend_from_slice(buf.format(value).as_bytes());
}

pub(crate) fn write_u64(sink: &mut ByteSink, value: u64) {
    let mut buf = itoa::Buffer::new();
    sink.extend_from_slice(buf.format(value).as_bytes());
}

/// Write a float as a JSON number. NaN and the infinities are rejected.
///
/// `f32` input is formatted at its own width, so `0.1f32` is `0.1`.
pub(crate) fn write_float<F>(sink: &mut ByteSink, value: F, style: FloatStyle) -> Result<()>
where
    F: ryu::Float + Into<f64> + Copy,
{
    let wide: f64 = value.into();
    if !wide.is_finite() {
        return Err(Error::new(
            ErrorKind::NonFiniteNumber,
            format!("{} has no JSON representation", wide),
        ));
    }
    let mut buf = ryu::Buffer::new();
    let raw = buf.format_finite(value);
    match style {
        FloatStyle::Shortest => sink.extend_from_slice(raw.as_bytes()),
        FloatStyle::Plain => write_plain(sink, raw, wide),
    }
    Ok(())
}

/// Plain decimal form of a finite f64:
/// - no exponent notation
/// - no trailing fractional zeros (decimal point dropped if none remain)
/// - no leading zeros except a single zero before the decimal point
/// - -0 normalized to 0
///
/// `raw` is ryu's output for the value, `wide` the value itself.
fn write_plain(sink: &mut ByteSink, raw: &str, wide: f64) {
    if wide == 0.0 {
        sink.push(b'0');
        return;
    }
    let raw = match raw.strip_prefix('-') {
        Some(magnitude) => {
            sink.push(b'-');
            magnitude
        }
        None => raw,
    };
    match raw.find(['e', 'E']) {
        Some(exp_index) => {
            let exp: i32 = raw[exp_index + 1..].parse().unwrap_or(0);
            write_expanded(sink, &raw[..exp_index], exp);
        }
        None => {
            let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw, ""));
            sink.extend_from_slice(int_part.as_bytes());
            write_fraction(sink, frac_part.as_bytes());
        }
    }
}

fn write_expanded(sink: &mut ByteSink, mantissa: &str, exp: i32) {
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits: Vec<u8> = int_part.bytes().chain(frac_part.bytes()).collect();
    let point = int_part.len() as i64 + exp as i64;

    if point <= 0 {
        sink.push(b'0');
        sink.push(b'.');
        for _ in 0..-point {
            sink.push(b'0');
        }
        sink.extend_from_slice(trim_trailing_zeros(&digits));
    } else if point as usize >= digits.len() {
        sink.extend_from_slice(&digits);
        for _ in digits.len()..point as usize {
            sink.push(b'0');
        }
    } else {
        let (whole, frac) = digits.split_at(point as usize);
        sink.extend_from_slice(whole);
        write_fraction(sink, frac);
    }
}

fn write_fraction(sink: &mut ByteSink, frac: &[u8]) {
    let frac = trim_trailing_zeros(frac);
    if !frac.is_empty() {
        sink.push(b'.');
        sink.extend_from_slice(frac);
    }
}

fn trim_trailing_zeros(digits: &[u8]) -> &[u8] {
    let end = digits.iter().rposition(|&d| d != b'0').map_or(0, |i| i + 1);
    &digits[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F: ryu::Float + Into<f64> + Copy>(value: F, style: FloatStyle) -> String {
        let mut sink = ByteSink::new();
        write_float(&mut sink, value, style).unwrap();
        String::from_utf8(sink.into_bytes()).unwrap()
    }

    #[test]
    fn shortest_keeps_ryu_form() {
        assert_eq!(render(1.0, FloatStyle::Shortest), "1.0");
        assert_eq!(render(1.5, FloatStyle::Shortest), "1.5");
        assert_eq!(render(1e100, FloatStyle::Shortest), "1e100");
        assert_eq!(render(-0.0, FloatStyle::Shortest), "-0.0");
        assert_eq!(render(0.1 + 0.2, FloatStyle::Shortest), "0.30000000000000004");
    }

    #[test]
    fn plain_expands_exponents() {
        assert_eq!(render(1.0, FloatStyle::Plain), "1");
        assert_eq!(render(-0.0, FloatStyle::Plain), "0");
        assert_eq!(render(-0.5, FloatStyle::Plain), "-0.5");
        assert_eq!(render(1e21, FloatStyle::Plain), "1000000000000000000000");
        assert_eq!(render(1.5e-7, FloatStyle::Plain), "0.00000015");
        assert_eq!(render(1.25e17, FloatStyle::Plain), "125000000000000000");
        assert_eq!(render(123.456, FloatStyle::Plain), "123.456");
    }

    #[test]
    fn plain_round_trips() {
        for v in [1.5e-7, 6.02214076e23, -2.5e-300, 1.7976931348623157e308, 5e-324] {
            let s = render(v, FloatStyle::Plain);
            assert!(!s.contains('e'), "{s}");
            assert_eq!(s.parse::<f64>().unwrap(), v);
        }
    }

    #[test]
    fn f32_uses_its_own_shortest_form() {
        assert_eq!(render(0.1f32, FloatStyle::Shortest), "0.1");
        assert_eq!(render(-1.5e-7f32, FloatStyle::Shortest), "-1.5e-7");
        assert_eq!(render(3.4028235e38f32, FloatStyle::Shortest), "3.4028235e38");
        assert_eq!(render(0.1f32, FloatStyle::Plain), "0.1");
        assert_eq!(render(-1.5e-7f32, FloatStyle::Plain), "-0.00000015");
        assert_eq!(render(-0.0f32, FloatStyle::Plain), "0");
    }

    #[test]
    fn non_finite_is_an_error() {
        let mut sink = ByteSink::new();
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = write_float(&mut sink, v, FloatStyle::Shortest).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NonFiniteNumber);
        }
        let err = write_float(&mut sink, f32::NAN, FloatStyle::Plain).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NonFiniteNumber);
        assert!(sink.is_empty());
    }

    #[test]
    fn integers() {
        let mut sink = ByteSink::new();
        write_i64(&mut sink, i64::MIN);
        sink.push(b' ');
        write_u64(&mut sink, u64::MAX);
        sink.push(b' ');
        write_i64(&mut sink, 0);
        assert_eq!(sink.as_bytes(), b"-9223372036854775808 18446744073709551615 0");
    }
}
