// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Stored vault data of any shape must load without panicking

#![no_main]

use libfuzzer_sys::fuzz_target;
use repovault::store::{MemoryStorage, Storage, VaultStore, RECORDS_KEY, THEME_KEY};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut storage = MemoryStorage::new();
    if storage.set(RECORDS_KEY, text).is_err() || storage.set(THEME_KEY, text).is_err() {
        return;
    }

    let mut store = VaultStore::new(storage);
    let records = store.load();
    let _ = store.load_theme();

    // Whatever loaded must survive a save/load cycle unchanged
    if store.save(&records).is_ok() {
        assert_eq!(store.load(), records);
    }
});
