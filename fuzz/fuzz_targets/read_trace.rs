#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(trace) = trace::read_trace(data) {
        assert_eq!(trace.iter().last(), Some(&trace::Operation::Range(trace.range())));
    }
});
