use std::fmt::{self, Write as _};

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    fmt::{
        format::{self, FormatEvent, FormatFields},
        FmtContext,
    },
    registry::LookupSpan,
};

use crate::command::WorkflowCommand;

/// Renders each event as a single line the Actions runner understands.
///
/// | level          | rendered as        |
/// |----------------|--------------------|
/// | ERROR          | `::error::msg`     |
/// | WARN           | `::warning::msg`   |
/// | INFO           | `msg`              |
/// | DEBUG, TRACE   | `::debug::msg`     |
#[derive(Clone, Copy, Debug, Default)]
pub struct WorkflowCommandFormat;

impl<S, N> FormatEvent<S, N> for WorkflowCommandFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut message = String::new();
        ctx.field_format()
            .format_fields(format::Writer::new(&mut message), event)?;

        let line = match *event.metadata().level() {
            Level::ERROR => WorkflowCommand::new("error").message(message).to_string(),
            Level::WARN => WorkflowCommand::new("warning").message(message).to_string(),
            Level::INFO => message,
            _ => WorkflowCommand::new("debug").message(message).to_string(),
        };
        writer.write_str(&line)?;
        writer.write_char('\n')
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use speculoos::prelude::*;
    use tracing::Level;
    use tracing_subscriber::fmt::MakeWriter;

    use super::WorkflowCommandFormat;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture(level: Level, emit: impl FnOnce()) -> String {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .event_format(WorkflowCommandFormat)
            .with_writer(captured.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, emit);
        captured.contents()
    }

    #[test]
    fn levels_map_to_workflow_commands() {
        let output = capture(Level::DEBUG, || {
            tracing::error!("Subscription is not valid.");
            tracing::warn!("GITHUB_REPOSITORY is not set");
            tracing::info!("Getting teams for octocat in org github.");
            tracing::debug!("received a page of teams");
            tracing::trace!("filtered out");
        });

        assert_that!(output).is_equal_to(
            "::error::Subscription is not valid.\n\
             ::warning::GITHUB_REPOSITORY is not set\n\
             Getting teams for octocat in org github.\n\
             ::debug::received a page of teams\n"
                .to_string(),
        );
    }

    #[test]
    fn multi_line_errors_stay_on_one_line() {
        let output = capture(Level::INFO, || {
            tracing::error!("Request failed due to following response errors:\n - nope");
        });

        assert_that!(output).is_equal_to(
            "::error::Request failed due to following response errors:%0A - nope\n".to_string(),
        );
    }

    #[test]
    fn structured_fields_follow_the_message() {
        let output = capture(Level::INFO, || {
            tracing::info!(teams = 2, "resolved");
        });

        assert_that!(output).is_equal_to("resolved teams=2\n".to_string());
    }
}
