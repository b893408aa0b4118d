//! Lectern routing - pattern resolution and processor dispatch
//!
//! The second half of the Lectern pipeline:
//!
//! - **Resolve**: [`PatternResolver`] turns a scanned field bag into a
//!   canonical [`PatternRequest`], via the alias table and per-processor
//!   pattern inference
//! - **Route**: [`ProcessorRouter`] picks the processor and validates the
//!   pattern's required fields
//! - **Registries**: immutable process-wide tables, built once and shared
//!   read-only
//!
//! # Example
//!
//! ```rust
//! use lectern_routing::route_message;
//!
//! let routed = route_message("### Pattern: explain_code\n```swift\nlet x = 1\n```")?;
//! assert_eq!(routed.processor, "code");
//! assert_eq!(routed.request.language, "Swift");
//! # Ok::<(), lectern_routing::PipelineError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod error;
pub mod pipeline;
pub mod registry;
pub mod request;
pub mod resolver;
pub mod router;

// Re-exports for convenience
pub use error::{PipelineError, ResolveError, RouteError};
pub use pipeline::{route_message, Pipeline, RoutingDecision};
pub use registry::{ProcessorDescriptor, Registry};
pub use request::{PatternRequest, Routed};
pub use resolver::PatternResolver;
pub use router::ProcessorRouter;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with Lectern routing
    pub use crate::error::{PipelineError, ResolveError, RouteError};
    pub use crate::pipeline::{route_message, Pipeline, RoutingDecision};
    pub use crate::registry::Registry;
    pub use crate::request::{PatternRequest, Routed};
    pub use lectern_directive::prelude::*;
}
