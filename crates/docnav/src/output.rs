//! Colored terminal output utilities.

use console::{Style, Term};

/// Terminal output formatter.
///
/// Results go to stdout, diagnostics to stderr.
pub(crate) struct Output {
    out: Term,
    err: Term,
    green: Style,
    yellow: Style,
    red: Style,
    bold: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            bold: Style::new().bold(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print a result line (stdout).
    pub(crate) fn print(&self, msg: &str) {
        let _ = self.out.write_line(msg);
    }

    /// Print a bold result line (stdout).
    pub(crate) fn print_bold(&self, msg: &str) {
        let _ = self.out.write_line(&self.bold.apply_to(msg).to_string());
    }

    /// Print a highlighted result line (stdout, cyan bold).
    pub(crate) fn print_highlight(&self, msg: &str) {
        let _ = self.out.write_line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.err.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.err.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.err.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.err.write_line(&self.red.apply_to(msg).to_string());
    }
}
