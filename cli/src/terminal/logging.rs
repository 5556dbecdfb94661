use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::registry::LookupSpan;

/// Installs the global subscriber. `RUST_LOG` overrides the `info` default.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(WakewatchFormatter)
        .init();
}

/// Timestamped line format for a long-running listener.
pub struct WakewatchFormatter;

impl<S, N> FormatEvent<S, N> for WakewatchFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        let glyph: ColoredString = match *meta.level() {
            Level::TRACE => " .".dimmed(),
            Level::DEBUG => " ?".cyan(),
            Level::INFO => " >".green().bold(),
            Level::WARN => " !".yellow().bold(),
            Level::ERROR => "xx".red().bold(),
        };

        SystemTime.format_time(&mut writer)?;
        write!(writer, " {} ", glyph)?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}
