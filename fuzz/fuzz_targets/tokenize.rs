#![no_main]

use libfuzzer_sys::fuzz_target;

use rexplain::token::tokenize;

// Tokenization must be total and must tile the input exactly, no matter
// how malformed the pattern is.
fuzz_target!(|data: &[u8]| {
    let Ok(pattern) = std::str::from_utf8(data) else {
        return;
    };
    let tokens = tokenize(pattern);
    let mut expected = 0usize;
    for token in &tokens {
        assert_eq!(token.start, expected);
        assert!(token.end > token.start);
        expected = token.end;
    }
    assert_eq!(expected, pattern.len());
});
