//! hadro Session - Generator lifecycle over an arbitrary backend
//!
//! This crate implements the generator-session abstraction:
//! - [`Backend`]: the control-and-stack contract one engine family adapter
//!   implements
//! - [`GeneratorSession`]: the configure → initialize → step state machine,
//!   cross-section queries, and decay-table edits
//! - [`FamilyGuard`]: process-wide guard for non-reentrant engine families

pub mod backend;
pub mod family;
pub mod session;

pub use backend::*;
pub use family::*;
pub use session::*;
