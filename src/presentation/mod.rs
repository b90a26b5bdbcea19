//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//! - Output formatting (text/JSON)
//!
//! ## Structure
//!
//! - `cli` - Argument definitions
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `output` - Output rendering
//!
//! ## Usage
//!
//! ```ignore
//! use bridgewright::presentation::factory;
//!
//! let use_case = factory::create_pipeline_use_case(&config);
//! let report = use_case.execute(&options, Goal::Build, sink.as_ref())?;
//! ```

pub mod cli;
pub mod factory;
pub mod output;

pub use factory::{create_event_sink, create_pipeline_use_case};
