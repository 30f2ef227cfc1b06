#![no_main]

use libfuzzer_sys::fuzz_target;
use scenario_index::stream::{Framing, MessageReader};

fuzz_target!(|data: &[u8]| {
    // Length prefixes must never trigger allocations past the limit
    let reader =
        MessageReader::new(data, Framing::LengthPrefixed).with_max_message_bytes(64 * 1024);
    for update in reader {
        if update.is_err() {
            break;
        }
    }
});
