//! Traceback rendering
//!
//! When a run aborts, the interpreter renders one traceback: a header, the
//! module frame, one line per active call frame (outermost first), then the
//! error's position and message. Output is color-aware and respects the
//! NO_COLOR environment variable.

use crate::interpreter::StackFrame;
use crate::value::RuntimeError;
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Color mode for traceback output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Always use colors
    Always,
    /// Never use colors
    Never,
    /// Auto-detect terminal capabilities
    Auto,
}

impl ColorMode {
    /// Resolve to a termcolor ColorChoice
    pub fn to_color_choice(self) -> ColorChoice {
        // Always respect NO_COLOR (https://no-color.org)
        if std::env::var("NO_COLOR").is_ok() {
            return ColorChoice::Never;
        }
        match self {
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
            ColorMode::Auto => ColorChoice::Auto,
        }
    }
}

/// Traceback renderer with color support
pub struct TracebackRenderer {
    color_mode: ColorMode,
}

impl TracebackRenderer {
    /// Create a renderer with the given color mode
    pub fn new(color_mode: ColorMode) -> Self {
        Self { color_mode }
    }

    /// Create a renderer that auto-detects color support
    pub fn auto() -> Self {
        Self::new(ColorMode::Auto)
    }

    /// Create a plain (no color) renderer
    pub fn plain() -> Self {
        Self::new(ColorMode::Never)
    }

    /// Render the traceback to a plain string.
    ///
    /// `stack` must be the call stack as it stood at failure time,
    /// outermost frame first.
    pub fn render_to_string(&self, stack: &[StackFrame], err: &RuntimeError) -> String {
        let mut output = String::new();
        output.push_str("Traceback (most recent call last):\n");
        output.push_str("  in <module>:\n");
        for frame in stack {
            output.push_str(&format!("  in function {}:\n", frame.function_name()));
        }
        output.push_str(&format!("at {} - {}\n", err.span(), err));
        output
    }

    /// Render the traceback with colors to stderr.
    pub fn emit(&self, stack: &[StackFrame], err: &RuntimeError) {
        let mut stream = StandardStream::stderr(self.color_mode.to_color_choice());
        let _ = self.write_traceback(&mut stream, stack, err);
    }

    /// Render the traceback to a WriteColor sink.
    pub fn write_traceback(
        &self,
        w: &mut impl WriteColor,
        stack: &[StackFrame],
        err: &RuntimeError,
    ) -> std::io::Result<()> {
        writeln!(w, "Traceback (most recent call last):")?;
        writeln!(w, "  in <module>:")?;
        for frame in stack {
            writeln!(w, "  in function {}:", frame.function_name())?;
        }

        w.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(w, "at {} - {}", err.span(), err)?;
        w.reset()?;
        writeln!(w)
    }
}
