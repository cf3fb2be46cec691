//! Flat row model produced by the conversion.
//!
//! The walk over the document body appends [`Row`]s in document order;
//! [`forward_fill`] is the single post-pass that carries chapter context
//! down to rows that do not set it themselves.

mod row;

pub use row::*;
