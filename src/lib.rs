//! # random-events-core
//!
//! Exact symbolic manipulation of random events over mixed continuous,
//! integer and symbolic domains.
//!
//! An event is a measurable subset of a product space of typed variables.
//! This crate implements the sigma-algebra engine underneath such events:
//! the generic disjoint-union Boolean algebra over "simple sets", its
//! specialization to one-dimensional real intervals and to finite symbolic
//! sets, and the product algebra that lifts both to multi-variable events —
//! every result is a finite disjoint union of simple product rectangles.
//!
//! ## Modules
//!
//! - [`bound`]: the open/closed tag of an interval endpoint.
//! - [`simple_set`]: the `SimpleSet` atom contract (C1).
//! - [`composite`]: the generic disjoint-union engine, `CompositeSet<A>` (C2).
//! - [`interval`]: one-dimensional real intervals (C3).
//! - [`symbolic`]: finite symbolic domains (C4).
//! - [`variable`]: typed variables and their domains (C5).
//! - [`simple_event`]: a single product rectangle (C6).
//! - [`event`]: disjoint unions of product rectangles (C7).
//! - [`envelope`]: tagged JSON (de)serialization (C8).
//! - [`error`]: the error types surfaced at the boundaries of the algebra.
//!
//! ## Usage
//!
//! ```rust
//! use random_events_core::interval;
//!
//! let event = interval::closed(0.0, 1.0).union(&interval::closed(0.5, 1.5));
//! println!("{event}");
//! ```

pub mod bound;
pub mod composite;
pub mod envelope;
pub mod error;
pub mod event;
pub mod interval;
pub mod simple_event;
pub mod simple_set;
pub mod symbolic;
pub mod variable;

pub use bound::Bound;
pub use composite::CompositeSet;
pub use error::CoreError;
pub use event::ProductEvent;
pub use interval::{Interval, SimpleInterval};
pub use simple_event::SimpleProductEvent;
pub use simple_set::SimpleSet;
pub use symbolic::{Ambient, Set, SymbolicElement};
pub use variable::{Assignment, Value, Variable, VariableKind, VariableMap};
