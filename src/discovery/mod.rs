//! Job schema discovery engine.
//!
//! A discovery pass resolves every catalog class against the configured
//! handler interface, extracts the parameter schema of each resolved request
//! type, and assembles a frozen registry. The pass is a single synchronous
//! walk over an immutable catalog snapshot.

pub mod classify;
pub mod extractor;
pub mod orchestrator;
pub mod resolver;

pub use classify::{classify_type_name, classify_type_ref, Classified};
pub use extractor::{AnalyzedParameters, ParameterSchemaExtractor};
pub use orchestrator::discover_all;
pub use resolver::TypeResolver;
