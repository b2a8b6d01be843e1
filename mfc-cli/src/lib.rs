//! Shared plumbing for the metric forest completion CLI binaries: logging
//! setup, trial-shape helpers, and the exit-code mapping every binary uses.

pub mod logging;
pub mod trial;

/// Reports a CLI argument-parsing failure. Clap already renders a complete
/// usage message into its `Display` output.
#[expect(
    clippy::print_stderr,
    reason = "usage errors must reach the user before structured logging can be assumed reliable"
)]
pub fn report_usage_error(err: &clap::Error) {
    eprintln!("{err}");
}

/// Reports an input-loading failure (a provider or loader error) via
/// structured logging.
pub fn report_provider_error(err: &(impl std::error::Error + 'static)) {
    tracing::error!(error = %err, "failed to load input");
}
