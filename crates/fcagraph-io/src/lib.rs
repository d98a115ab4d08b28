#![forbid(unsafe_code)]
//! fcagraph-io: serializers for fcagraph graphs.
//!
//! # Overview
//!
//! Writers implement [`GraphWriter`] and are looked up by format tag (a file
//! extension such as `dot`) in a [`WriterRegistry`]. Registration is an
//! explicit call; there is no discovery.
//!
//! Output is reproducible: the core iterates nodes in identifier order and
//! edges grouped by source in `(from, to)` order, and writers emit in that
//! order.
//!
//! # Conventions
//!
//! - **Errors**: [`WriteError`] (`thiserror`) so callers can match on an
//!   unknown format versus an I/O failure.
//! - **Logging**: `tracing` events at `debug` for every dispatched write.

pub mod dot;
pub mod error;
pub mod registry;

pub use dot::DotWriter;
pub use error::WriteError;
pub use registry::{GraphWriter, WriterRegistry};
