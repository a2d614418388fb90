// src/process/mod.rs
//
// Table transforms applied between load and write: the column gate, numeric
// coercion of dirty columns, and binary target encoding.

pub mod clean;
pub mod encode;
pub mod utils;
pub mod validate;

pub use clean::{coerce_numeric, DEFAULT_NUMERIC};
pub use encode::{encode_label, encode_target};
pub use validate::{missing_columns, validate_columns};
