// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

#![no_main]

use grubscan_core::config::{
    RequireBootTarget,
    parsers::{Dialect, grub::parse_bytes},
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for dialect in Dialect::SCAN_ORDER {
        let _ = parse_bytes(dialect, data, "/mnt", &RequireBootTarget);
    }
});
