//! Domain Layer
//!
//! Pure bridge logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Declarations, headers, artifacts
//! - `value_objects/` - Java types, platform tags, hashes, package prefixes
//! - `services/` - Name mangling, header rendering, staleness, stage graph
//! - `policies/` - Packaging conflict resolution
//! - `ports/` - Interface definitions for infrastructure

pub mod entities;
pub mod policies;
pub mod ports;
pub mod services;
pub mod value_objects;
