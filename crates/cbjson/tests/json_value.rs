#![cfg(feature = "json")]
use serde_json::{Value, json};

fn assert_matches_serde_json(v: &Value) -> Result<(), Box<dyn std::error::Error>> {
    let ours = cbjson::encode(v)?;
    let theirs = serde_json::to_vec(v)?;
    assert_eq!(String::from_utf8(ours)?, String::from_utf8(theirs)?);
    Ok(())
}

#[test]
fn output_matches_serde_json_compact_form() -> Result<(), Box<dyn std::error::Error>> {
    assert_matches_serde_json(&json!(null))?;
    assert_matches_serde_json(&json!({"a": 1, "b": [true, "x"], "c": {}}))?;
    assert_matches_serde_json(&json!([0.1, -2.5e-8, 3.0, -0.0]))?;
    assert_matches_serde_json(&json!([i64::MIN, u64::MAX, 0]))?;
    assert_matches_serde_json(&json!({"ctl": "\u{0}\u{1}\u{1f}\u{7f}", "esc": "\"\\/\n\r\t\u{8}\u{c}"}))?;
    assert_matches_serde_json(&json!({"zeta": 1, "alpha": 2, "mid": 3}))?;
    assert_matches_serde_json(&json!({"ключ": "значение", "emoji": "🦀", "": ""}))?;
    Ok(())
}

#[test]
fn large_exponents_have_no_plus_sign() -> Result<(), Box<dyn std::error::Error>> {
    // serde_json writes `1e+300`; both parse to the same number
    let v = json!([1e300, 1.5e21, -2e100]);
    let bytes = cbjson::encode(&v)?;
    assert_eq!(bytes, b"[1e300,1.5e21,-2e100]");
    let back: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(back, v);
    Ok(())
}

#[test]
fn parses_back_to_the_same_value() -> Result<(), Box<dyn std::error::Error>> {
    let v = json!({
        "id": 9007199254740993u64,
        "ratio": 0.30000000000000004,
        "nested": [[[]], [{"k": null}]],
        "text": "line\nbreak \u{2028} sep"
    });
    let bytes = cbjson::encode(&v)?;
    let back: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(back, v);
    Ok(())
}
