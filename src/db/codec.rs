// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Splits blob encoding.
//!
//! Splits are stored as MessagePack with field names, so the blob is
//! self-describing and survives field reordering.

use crate::error::AppError;
use crate::models::Split;

/// Encode a split sequence for the `splits` column.
pub fn encode_splits(splits: &[Split]) -> Result<Vec<u8>, AppError> {
    rmp_serde::to_vec_named(splits)
        .map_err(|e| AppError::Codec(format!("Failed to encode splits: {}", e)))
}

/// Decode a `splits` column value.
pub fn decode_splits(blob: &[u8]) -> Result<Vec<Split>, AppError> {
    rmp_serde::from_slice(blob)
        .map_err(|e| AppError::Decode(format!("Failed to decode splits: {}", e)))
}
