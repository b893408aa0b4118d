//! End-to-end message pipeline
//!
//! Wires the pieces together: scan → keyword fallback → resolve → route.
//! Each call is a pure function of the input text plus the immutable
//! registry; nothing is shared between invocations, so calls may run
//! concurrently without synchronization.

use crate::error::PipelineError;
use crate::registry::Registry;
use crate::request::Routed;
use crate::resolver::PatternResolver;
use crate::router::ProcessorRouter;
use lectern_directive::{DirectiveScanner, LegacyKeywordDetector};
use tracing::debug;

/// Final outcome of routing one message: the processor dispatch on
/// success, a typed failure otherwise
pub type RoutingDecision = Result<Routed, PipelineError>;

/// Scan-resolve-route pipeline over a registry
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'a> {
    registry: &'a Registry,
}

impl<'a> Pipeline<'a> {
    /// Create new pipeline over a registry
    #[inline]
    #[must_use]
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Route a single chat message
    ///
    /// The header scanner runs first; when it finds no fields, or fields
    /// that name neither a `pattern` nor a `processor`, the legacy keyword
    /// detector gets a chance. Both coming up empty is
    /// [`PipelineError::NoDirectivesFound`].
    pub fn route_message(&self, text: &str) -> RoutingDecision {
        let mut fields = DirectiveScanner::new().scan(text);

        if fields.is_empty() || !(fields.contains("pattern") || fields.contains("processor")) {
            match LegacyKeywordDetector::new().detect(text) {
                Some(bag) => {
                    debug!("falling back to legacy keyword detection");
                    fields = bag;
                }
                None if fields.is_empty() => return Err(PipelineError::NoDirectivesFound),
                // Headers exist but name no pattern; let the resolver
                // report the precise failure.
                None => {}
            }
        }

        let request = PatternResolver::new(self.registry).resolve(fields)?;
        let routed = ProcessorRouter::new(self.registry).route(request)?;
        Ok(routed)
    }
}

/// Route a message against the built-in registry
pub fn route_message(text: &str) -> RoutingDecision {
    Pipeline::new(Registry::builtin()).route_message(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ResolveError, RouteError};
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_chat_is_no_directives() {
        let err = route_message("good morning, nothing to do here").unwrap_err();
        assert_eq!(err, PipelineError::NoDirectivesFound);
    }

    #[test]
    fn headers_without_pattern_is_no_pattern() {
        let err = route_message("### Rules: be brief").unwrap_err();
        assert_eq!(err, PipelineError::Resolve(ResolveError::NoPattern));
    }

    #[test]
    fn header_path_routes() {
        let routed = route_message("### Pattern: custom\n### Prompt: say hi").unwrap();
        assert_eq!(routed.processor, "code");
        assert_eq!(routed.request.pattern, "custom");
    }

    #[test]
    fn legacy_path_routes() {
        let routed = route_message("write_code in python: sum a list").unwrap();
        assert_eq!(routed.processor, "code");
        assert_eq!(routed.request.pattern, "generate_function");
        assert_eq!(routed.request.task.as_deref(), Some("sum a list"));
    }

    #[test]
    fn scanner_fields_win_over_keywords() {
        // The message mentions write_code, but the header path found a
        // pattern, so the fallback never fires.
        let text = "please do not write_code\n### Pattern: explain_code\n```\nx = 1\n```";
        let routed = route_message(text).unwrap();
        assert_eq!(routed.request.pattern, "explain_code");
    }

    #[test]
    fn routing_failures_surface_as_data() {
        let err = route_message("### Pattern: fix_bug\n### Issue: broken").unwrap_err();
        assert_eq!(
            err,
            PipelineError::Route(RouteError::MissingRequiredFields {
                pattern: "fix_bug".to_string(),
                missing: vec!["code".to_string()],
            })
        );
    }

    #[test]
    fn custom_registry_pipeline() {
        let registry = Registry::new()
            .with_processor("echo", &["custom"])
            .with_requirement("custom", &["prompt"]);
        let pipeline = Pipeline::new(&registry);
        let routed = pipeline
            .route_message("### Pattern: custom\n### Prompt: hi")
            .unwrap();
        assert_eq!(routed.processor, "echo");
    }
}
