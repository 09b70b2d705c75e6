// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Ran: a personal running log.
//!
//! This crate ingests GPX recordings of runs, derives per-kilometer splits,
//! stores each activity deduplicated by the digest of its raw file, and
//! serves them back over a small read-only HTTP API.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::ActivityStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: ActivityStore,
}
