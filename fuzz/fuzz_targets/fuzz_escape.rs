#![no_main]
use cbjson::{ErrorKind, RawText};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    match cbjson::encode(&RawText(data)) {
        Ok(bytes) => {
            let original = std::str::from_utf8(data).expect("accepted text must be UTF-8");
            let back: String = serde_json::from_slice(&bytes).expect("escaped text must parse");
            assert_eq!(back, original);
        }
        Err(err) => {
            assert_eq!(err.kind(), ErrorKind::InvalidText);
            assert!(std::str::from_utf8(data).is_err());
        }
    }
});
