// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for the TAP summarizer
//!
//! Feeds arbitrary bytes through `drain` with strict checks on, then
//! renders the report. Neither step may panic.

#![no_main]

use libfuzzer_sys::fuzz_target;

use tapem_tap::{Glyphs, Report, Summarizer, drain};

fuzz_target!(|data: &[u8]| {
    let mut echo = Vec::new();

    // Invalid UTF-8 is a read error, not a panic
    if let Ok(summary) = drain(data, &mut echo, Summarizer::strict()) {
        assert!(echo.starts_with(data));
        let _ = Report::new(&summary, Glyphs::EMOJI).lines();
        let _ = summary.exit_code();
    }
});
