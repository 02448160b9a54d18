#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = grubscan_core::config::handoff::decode_entries(data);
});
