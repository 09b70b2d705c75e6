// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod split;
pub mod track;

pub use activity::{Activity, NewActivity};
pub use split::Split;
pub use track::{Recording, Segment, Track, TrackPoint};
