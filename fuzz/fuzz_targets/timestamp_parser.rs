#![no_main]

use libfuzzer_sys::fuzz_target;
use satzone::input::parse_timestamps;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing must never panic; successful parses must infer or fail cleanly
        if let Ok(stamps) = parse_timestamps(input) {
            let _ = satzone::infer_time_zone_offset(&stamps);
        }
    }
});
