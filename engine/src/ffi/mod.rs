//! FFI layer: Python bindings for the costing engine
//!
//! The boundary is intentionally minimal: reference tables and inputs come
//! in as plain dicts, results go out as plain dicts, and every money value
//! crosses as a string (the Django `DecimalField` convention). No panics
//! cross the boundary; malformed configuration raises `ValueError`.

pub mod engine;
pub mod types;

pub use engine::PyCostingEngine;
