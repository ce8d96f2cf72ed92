use std::io::{self, IsTerminal};

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{Layer, filter, fmt};

/// Target prefix of events emitted by this crate.
pub const TARGET_PREFIX: &str = "cohere_service";

/// Target prefixes of every crate in the backend workspace.
pub const WORKSPACE_TARGETS: [&str; 5] = [
    "wiki_rag_backend",
    "api",
    "pipeline",
    "wiki_search",
    TARGET_PREFIX,
];

/// RFC3339 UTC timer implemented via `chrono`.
/// Example output: `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        let s = now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&s)
    }
}

/// Formatting layer that renders events whose target starts with any of `prefixes`.
///
/// - RFC3339 UTC timestamps
/// - Compact single-line format with `file:line` and target
/// - Span close events (duration of instrumented client calls)
/// - ANSI colors only when stdout is a terminal
pub fn layer_for<S>(prefixes: &'static [&'static str]) -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let use_ansi = io::stdout().is_terminal();

    let only_ours = filter::filter_fn(move |meta| {
        prefixes
            .iter()
            .any(|prefix| meta.target().starts_with(prefix))
    });

    fmt::layer()
        .with_ansi(use_ansi)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(
            fmt::format()
                .compact()
                .with_timer(ChronoRfc3339Utc)
                .with_level(true)
                .with_target(true)
                .with_source_location(true),
        )
        .with_filter(only_ours)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_writes_rfc3339_utc_seconds() {
        let mut out = String::new();
        ChronoRfc3339Utc.format_time(&mut Writer::new(&mut out)).unwrap();
        assert!(out.ends_with('Z'), "{out}");
        assert!(chrono::DateTime::parse_from_rfc3339(&out).is_ok(), "{out}");
    }
}
