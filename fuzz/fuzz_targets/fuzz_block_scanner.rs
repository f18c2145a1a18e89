#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Every `{` must either close on a `}` or report unterminated
        for (open, _) in text.match_indices('{') {
            if let Some(close) = infracheck::blocks::matching_brace(text, open) {
                assert!(close > open);
                assert_eq!(text.as_bytes()[close], b'}');
            }
        }

        let _ = infracheck::blocks::find_block(text, "variable", "node_groups");
        let _ = infracheck::blocks::find_object(text, "system");
    }
});
