//! Live parameter store: named, typed, range-checked knobs with synchronous
//! change reactions.
//!
//! Writes are validated before they are committed; a rejected write leaves
//! the previous value in place. Reactions run on the caller's thread before
//! `set` returns, so a reader never observes a half-applied change.

mod knobs;
mod store;
mod value;

pub use knobs::{names, standard_specs};
pub use store::{InvalidParameter, InvalidReason, ParameterStore, Reaction};
pub use value::{Color, ParamKind, ParamSpec, ParamValue};
