use crate::terminal::progress;
use colored::*;
use std::io::{self, Write};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent};
use tracing_subscriber::registry::LookupSpan;

/// One line per event: level symbol, engine stage for debug output, fields
pub struct DomsimFormatter;

impl<S, N> FormatEvent<S, N> for DomsimFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        let symbol = match *meta.level() {
            Level::ERROR => "[-]".red().bold(),
            Level::WARN => "[*]".yellow().bold(),
            Level::INFO => "[+]".green().bold(),
            Level::DEBUG => "[?]".blue(),
            Level::TRACE => "[ ]".dimmed(),
        };
        write!(writer, "{} ", symbol)?;

        // "domsim_engine::app::classifier" -> "classifier"
        if *meta.level() >= Level::DEBUG {
            let stage = meta.target().rsplit("::").next().unwrap_or(meta.target());
            write!(writer, "{} ", format!("{}:", stage).dimmed())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// stderr writer that hides the active progress bar while a line is printed
struct BarAwareWriter;

impl Write for BarAwareWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        progress::suspend_active(|| io::stderr().write_all(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// Install the global subscriber; `RUST_LOG` overrides the `info` default
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(|| BarAwareWriter)
        .event_format(DomsimFormatter)
        .init();
}
