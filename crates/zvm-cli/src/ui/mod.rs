//! Console output and progress rendering.

pub mod progress;

pub use progress::ConsoleReporter;

use crossterm::style::Stylize;

/// Styled console messages.
#[derive(Debug, Default, Clone, Copy)]
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn info(&self, msg: &str) {
        println!("  {msg}");
    }

    pub fn success(&self, msg: &str) {
        println!("  {}", msg.green());
    }

    pub fn warning(&self, msg: &str) {
        println!("  {}", msg.yellow());
    }

    pub fn error(&self, msg: &str) {
        eprintln!("  {} {}", "error:".bold().red(), msg);
    }
}

/// Render a byte count the way release pages do: decimal units, one
/// fractional digit (`44225901` → `"44.2M"`).
pub fn human_bytes(n: u64) -> String {
    let mut n = n as f64;
    for symbol in ["K", "M", "G", "T"] {
        n /= 1000.0;
        if n < 1000.0 {
            return format!("{n:.1}{symbol}");
        }
    }
    format!("{:.1}P", n / 1000.0)
}
