//! Vesper Codegen - C Backend Text Encoding
//!
//! This crate turns constant payloads into C source text:
//! - `encode_literal` emits byte-exact C string literals, chunked for
//!   parser limits
//! - `encode_identifier` / `decode_identifier` map source-level names to
//!   reversible C identifiers

mod cstring;

pub use cstring::{decode_identifier, encode_identifier, encode_literal, encode_literal_value};
