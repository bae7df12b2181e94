#![no_main]

use libfuzzer_sys::fuzz_target;
use metrum::scan;

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        let char_count = source.chars().count();
        let mut previous_end = 0;
        for token in scan(source) {
            assert!(token.span.start >= previous_end);
            assert!(token.span.start < token.span.end);
            assert!(token.span.end <= char_count);
            previous_end = token.span.end;
        }
    }
});
