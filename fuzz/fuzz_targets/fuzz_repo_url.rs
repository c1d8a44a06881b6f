// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Repository link parsing must never panic on arbitrary input

#![no_main]

use libfuzzer_sys::fuzz_target;
use repovault::types::Forge;
use repovault::workflow::parse_repo_url;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    match parse_repo_url(input) {
        Ok(parsed) => {
            assert_eq!(Forge::from_url(&parsed.url), Some(parsed.forge));
            assert!(!parsed.owner.contains('/'));
            assert!(!parsed.name.contains('/'));
        }
        Err(_) => assert!(Forge::from_url(input.trim()).is_none()),
    }
});
