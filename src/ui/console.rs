use super::style;
use super::{Notice, UiSink, UiState};
use std::io::{self, Write};

/// Terminal rendering of the companion widgets: the score badge and alert
/// next to the field, the destination hint, both histories and the toggles.
pub struct ConsoleUi<W: Write + Send> {
    out: W,
}

impl ConsoleUi<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> ConsoleUi<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_state(&mut self, state: &UiState) -> io::Result<()> {
        let out = &mut self.out;
        writeln!(out)?;

        let badge = state
            .current_score
            .map_or_else(|| style::dim("[--]"), style::score_badge);
        let alert = if state.pii_alert {
            format!("  {}", style::alert("! sensitive content"))
        } else {
            String::new()
        };
        writeln!(out, "{} {badge}{alert}", style::label("field"))?;

        if let Some(dest) = &state.suggestion {
            writeln!(
                out,
                "{} {} {}",
                style::label("try"),
                style::accent(&dest.suggested),
                style::dim(format!("({})", dest.reason))
            )?;
        }

        writeln!(out, "{}", style::header("Scored prompts"))?;
        if state.score_history.is_empty() {
            writeln!(out, "  {}", style::dim("(none yet)"))?;
        }
        for (i, record) in state.score_history.iter().enumerate() {
            writeln!(
                out,
                "  {}. {} {}",
                i + 1,
                style::score_badge(record.score),
                record.text
            )?;
        }

        writeln!(out, "{}", style::header("Submitted prompts"))?;
        if state.submitted_history.is_empty() {
            writeln!(out, "  {}", style::dim("(none yet)"))?;
        }
        for (i, record) in state.submitted_history.iter().enumerate() {
            writeln!(out, "  {}. {}", i + 1, record.text)?;
        }

        let s = &state.settings;
        writeln!(
            out,
            "{} score {}  pii {}  style {}",
            style::dim("settings:"),
            style::toggle(s.score_detection_enabled),
            style::toggle(s.pii_detection_enabled),
            s.suggestion_style
        )?;
        out.flush()
    }

    fn write_notice(&mut self, notice: &Notice) -> io::Result<()> {
        match notice {
            Notice::Input(err) => writeln!(self.out, "{}", style::warning(err))?,
            Notice::Info(msg) => writeln!(self.out, "{}", style::success(msg))?,
        }
        self.out.flush()
    }
}

impl<W: Write + Send> UiSink for ConsoleUi<W> {
    fn render(&mut self, state: &UiState) {
        if let Err(e) = self.write_state(state) {
            tracing::warn!(error = %e, "ui.render_failed");
        }
    }

    fn notify(&mut self, notice: &Notice) {
        if let Err(e) = self.write_notice(notice) {
            tracing::warn!(error = %e, "ui.notify_failed");
        }
    }
}
