//! eve2gns Core Types and Definitions
//!
//! This crate provides the foundational types shared by the eve2gns reader
//! and converter. It includes:
//!
//! - **Geometry**: 2D value types for canvas math ([`geometry`] module)
//! - **Identifiers**: Typed source-record identifiers ([`identifier`] module)
//! - **Records**: The flat lab records handed from the reader to the
//!   converter ([`record`] module)

pub mod geometry;
pub mod identifier;
pub mod record;
