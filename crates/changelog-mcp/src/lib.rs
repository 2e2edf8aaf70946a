// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! changelog-mcp library
//!
//! This module exports the core functionality of changelog-mcp for use in
//! integration tests and as a library.

pub mod config;
pub mod handlers;
pub mod server;
pub mod templates;
