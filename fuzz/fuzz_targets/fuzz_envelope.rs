#![no_main]

use libfuzzer_sys::fuzz_target;
use scenario_index::stream::{Framing, MessageReader};
use scenario_index::{QueryExecutor, SourceIndex};

fuzz_target!(|data: &[u8]| {
    // Decode arbitrary bytes as NDJSON and apply whatever parses
    let mut index = SourceIndex::new();
    for update in MessageReader::new(data, Framing::Ndjson).with_max_message_bytes(64 * 1024) {
        let Ok(update) = update else { break };
        if index.update(&update).is_err() {
            break;
        }
    }

    let query = QueryExecutor::new(&index);
    for uri in query.uris() {
        let _ = query.artifact_ids(uri);
        let _ = query.artifact_ids_at_line(uri, 1);
        let _ = query.artifact_step_ids_at_line(uri, 1);
    }
});
