//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod hash;
mod java_type;
mod native_step;
mod package_prefix;
mod platform;

pub use hash::ContentHash;
pub use java_type::{method_descriptor, throwable_classes, JavaType, PrimitiveType};
pub use native_step::NativeStep;
pub use package_prefix::PackagePrefix;
pub use platform::PlatformTag;
