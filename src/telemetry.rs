use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Initialize structured logging.
///
/// JSON output gives the correlation ids and structured fields needed
/// when the tracker runs unattended; plain output is friendlier at an
/// interactive console.
pub fn init_telemetry(log_level: &str, json: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    if json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true),
            )
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .with(filter)
            .init();
    }

    tracing::debug!("Retrofit tracker telemetry initialized");
    Ok(())
}

/// Generate a correlation ID for linking related operations
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Create a span with common transition attributes
pub fn create_transition_span(
    operation: &str,
    participant_id: &str,
    actor: Option<&str>,
) -> tracing::Span {
    tracing::info_span!(
        "participant_transition",
        operation = operation,
        participant.id = participant_id,
        actor = actor,
    )
}
