// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

#![no_main]

//! Arbitrary commit messages must classify without panicking and always
//! produce a non-empty single-line title.

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(message) = std::str::from_utf8(data) {
        let classification = changelog_core::classify(message);
        assert!(!classification.title.is_empty());
        assert!(!classification.title.contains('\n'));
    }
});
