//! hadro Event - Particle stack view and event record
//!
//! This crate implements the event-record abstraction:
//! - [`RawStack`]: a read-only projection of one backend's native per-event
//!   arrays into the common schema (pure reshape, no logic)
//! - [`EventRecord`]: an owned snapshot of one collision, with selection,
//!   lazily derived charges, and lineage queries

pub mod record;
pub mod stack;

pub use record::*;
pub use stack::*;
