use crate::domain::{Diagnostics, ExportError, RequestContext};

// Production diagnostics: forwards everything to tracing.
#[derive(Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn input_recovered(&self, field: &str, raw: &str, reason: &str) {
        tracing::warn!(field, raw, reason, "unusable request input, using default");
    }

    fn request_failed(&self, request: &RequestContext, error: &ExportError) {
        tracing::error!(
            error = %error,
            http_request.method = %request.method,
            http_request.url = %request.url,
            http_request.user_agent = %request.user_agent,
            http_request.referrer = %request.referrer,
            "unable to process request"
        );
    }
}
