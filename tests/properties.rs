//! Property-based tests for name mangling and header rendering.

#[path = "properties/headers.rs"]
mod headers;
#[path = "properties/mangling.rs"]
mod mangling;
