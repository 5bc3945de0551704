#![no_main]

use libfuzzer_sys::fuzz_target;

use rexplain::group::extract_groups;

// Group extraction must never panic and must keep indices dense from 1.
fuzz_target!(|data: &[u8]| {
    let Ok(pattern) = std::str::from_utf8(data) else {
        return;
    };
    let groups = extract_groups(pattern);
    for (i, group) in groups.iter().enumerate() {
        assert_eq!(group.index, i + 1);
        assert!(group.start < group.end);
        assert!(group.end <= pattern.len());
    }
});
