//! Processor routing
//!
//! Matches a resolved [`PatternRequest`] to a processor: honors an explicit
//! `processor` declaration, otherwise auto-selects the first registered
//! processor that owns the pattern, then checks the pattern's required
//! fields are present and non-empty.

use crate::error::RouteError;
use crate::registry::Registry;
use crate::request::{PatternRequest, Routed};
use tracing::debug;

/// Router from resolved requests to processors
#[derive(Debug, Clone, Copy)]
pub struct ProcessorRouter<'a> {
    registry: &'a Registry,
}

impl<'a> ProcessorRouter<'a> {
    /// Create new router over a registry
    #[inline]
    #[must_use]
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Route a request to its processor
    ///
    /// The request is not mutated here; on success it is handed over as-is
    /// inside the [`Routed`] value.
    pub fn route(&self, request: PatternRequest) -> Result<Routed, RouteError> {
        let processor = match &request.processor {
            Some(declared) => {
                let descriptor = self
                    .registry
                    .processor(declared)
                    .ok_or_else(|| RouteError::UnknownProcessor(declared.clone()))?;
                if !descriptor.allows(&request.pattern) {
                    return Err(RouteError::PatternProcessorMismatch {
                        processor: declared.clone(),
                        pattern: request.pattern.clone(),
                    });
                }
                descriptor.name.clone()
            }
            None => self.auto_select(&request.pattern)?,
        };

        let missing = self.missing_fields(&request);
        if !missing.is_empty() {
            return Err(RouteError::MissingRequiredFields {
                pattern: request.pattern,
                missing,
            });
        }

        debug!(processor = %processor, pattern = %request.pattern, "request routed");
        Ok(Routed { processor, request })
    }

    /// First processor in declaration order that owns the pattern
    fn auto_select(&self, pattern: &str) -> Result<String, RouteError> {
        self.registry
            .processors()
            .iter()
            .find(|descriptor| descriptor.allows(pattern))
            .map(|descriptor| descriptor.name.clone())
            .ok_or_else(|| RouteError::NoProcessorForPattern(pattern.to_string()))
    }

    /// Required fields absent or empty on the request
    fn missing_fields(&self, request: &PatternRequest) -> Vec<String> {
        self.registry
            .required_fields(&request.pattern)
            .iter()
            .filter(|field| !request.has_field(field))
            .cloned()
            .collect()
    }
}
