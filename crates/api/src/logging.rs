//! Logging setup: console, append-only file, and Sentry.
//!
//! The file sink receives this crate's events at INFO and above, one line
//! per event:
//!
//! ```text
//! 2026/10/15 09:30:00 [INFO] User created request_id=4f0c… user_id=1
//! ```
//!
//! Control characters in messages and fields are escaped (`\n` is written
//! as the two characters `\` `n`), so a value supplied by a client cannot
//! start a line of its own.
//!
//! The file is opened once per process. If it cannot be opened the service
//! does not start.

use std::fmt::Write as _;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use sentry::integrations::tracing as sentry_tracing;
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Console filter used when `RUST_LOG` is not set.
const DEFAULT_CONSOLE_FILTER: &str = "roster_api=info,tower_http=debug";

/// Timestamp layout of file lines.
const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Errors raised while setting up logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("cannot open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("tracing subscriber already installed: {0}")]
    Init(#[from] TryInitError),
}

/// Event formatter producing `timestamp [LEVEL] message fields`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLineFormat;

impl<S, N> FormatEvent<S, N> for LogLineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let now = Utc::now().format(TIMESTAMP_FORMAT);
        write!(writer, "{now} [{}] ", event.metadata().level())?;

        let mut fields = String::new();
        ctx.field_format().format_fields(Writer::new(&mut fields), event)?;
        write_escaped(&mut writer, &fields)?;
        writeln!(writer)
    }
}

/// Write `text` with control characters escaped, so one event stays one line.
fn write_escaped(writer: &mut Writer<'_>, text: &str) -> std::fmt::Result {
    for c in text.chars() {
        if c.is_control() {
            write!(writer, "{}", c.escape_default())?;
        } else {
            writer.write_char(c)?;
        }
    }
    Ok(())
}

/// Open (or create) the log file for appending.
///
/// # Errors
///
/// Returns `LoggingError::Open` if the file cannot be opened.
pub fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Layer writing this crate's INFO+ events to `file`.
pub fn file_layer<S>(file: File) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .event_format(LogLineFormat)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .with_filter(Targets::new().with_target("roster_api", LevelFilter::INFO))
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Install the global subscriber.
///
/// Console output honours `RUST_LOG`; the file sink and Sentry have fixed
/// filters.
///
/// # Errors
///
/// Returns `LoggingError` if the log file cannot be opened or a subscriber
/// is already installed.
pub fn init(log_file: &Path) -> Result<(), LoggingError> {
    let file = open_log_file(log_file)?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_CONSOLE_FILTER.into());

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter))
        .with(file_layer(file))
        .with(
            sentry_tracing::layer()
                .event_filter(sentry_event_filter)
                .with_filter(LevelFilter::INFO),
        )
        .try_init()?;

    Ok(())
}
