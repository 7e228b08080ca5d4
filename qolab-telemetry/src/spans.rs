//! Span helpers for the evaluation pipeline

use tracing::Span;

/// Span covering generation and scoring of one (variant, temperature) sample.
///
/// # Example
/// ```
/// use qolab_telemetry::sample_span;
/// let span = sample_span("Direct & minimal", 0.7);
/// let _enter = span.enter();
/// ```
pub fn sample_span(variant_name: &str, temperature: f64) -> Span {
    tracing::info_span!("sample.evaluate", variant.name = variant_name, temperature)
}

/// Span for one judge oracle call.
pub fn judge_call_span(model_name: &str) -> Span {
    tracing::info_span!("judge.call", model.name = model_name, otel.kind = "client")
}

/// Span for one generation call.
pub fn generation_span(model_name: &str, temperature: f64) -> Span {
    tracing::info_span!(
        "generation.call",
        model.name = model_name,
        temperature,
        otel.kind = "client"
    )
}

/// Span covering a whole experiment run.
pub fn run_span(run_id: &str, case_name: &str) -> Span {
    tracing::info_span!("experiment.run", run.id = run_id, case.name = case_name)
}
