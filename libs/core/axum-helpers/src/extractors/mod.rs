//! Custom extractors for Axum handlers.
//!
//! They standardize rejection bodies so handlers only see well-formed input.

pub mod object_id_path;

pub use object_id_path::ObjectIdPath;
