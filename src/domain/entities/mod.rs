//! Domain Entities
//!
//! - `EntryPointDeclaration` - a `native` method found in managed source
//! - `DeclarationSet` - deduplicated declarations keyed by identity
//! - `GeneratedHeader` - a rendered JNI header for one class
//! - `BuildArtifact` / `PackagedResource` - native binary and its bundle slot

mod artifact;
mod declaration;
mod declaration_set;
mod header;

pub use artifact::{BuildArtifact, PackagedResource};
pub use declaration::{EntryPointDeclaration, NativeMethod};
pub use declaration_set::DeclarationSet;
pub use header::GeneratedHeader;
