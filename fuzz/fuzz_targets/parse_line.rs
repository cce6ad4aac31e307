#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };

    // Anything that parses must print back to a line that parses the same.
    if let Ok(Some(op)) = trace::parse_line(line) {
        let printed = op.to_string();
        assert_eq!(trace::parse_line(&printed), Ok(Some(op)));
    }
});
