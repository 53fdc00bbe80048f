//! Defines the ASCII-art bitmap font encoding and a read-only view over the encoded glyph blob.
//!
//! Includes both the encoding and the reading interfaces.
#![cfg_attr(not(feature = "std"), no_std)]

pub mod glyph;
pub mod row;
