#![no_main]
use cbjson::{FloatStyle, Options};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        // serde_json's own parser caps nesting at 128, well inside the default bound
        let bytes = cbjson::encode(&value).expect("parsed JSON always encodes");
        let back: serde_json::Value =
            serde_json::from_slice(&bytes).expect("encoder output must parse");
        assert_eq!(back, value);

        let plain = Options::default().with_float_style(FloatStyle::Plain);
        let _ = cbjson::encode_with(&value, &plain);
    }
});
