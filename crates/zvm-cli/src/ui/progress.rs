//! Byte-progress rendering for archive downloads.

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use crossterm::style::Stylize;
use zvm_core::Reporter;

use super::{human_bytes, Output};

const BAR_WIDTH: u64 = 30;

/// Renders core progress events on the console.
///
/// Cache decisions are narrated only in verbose mode; the progress line is
/// redrawn only when the displayed percentage actually changes.
#[derive(Debug)]
pub struct ConsoleReporter {
    output: Output,
    verbose: bool,
    last_percent: AtomicU64,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self {
            output: Output::new(),
            verbose,
            last_percent: AtomicU64::new(u64::MAX),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn downloading(&self, archive: &str, current: u64, total: Option<u64>) {
        let Some(total) = total.filter(|t| *t > 0) else {
            return;
        };
        let percent = (current * 100 / total).min(100);
        if self.last_percent.swap(percent, Ordering::Relaxed) == percent {
            return;
        }

        let filled = (percent * BAR_WIDTH / 100) as usize;
        let bar = format!("{}{}", "=".repeat(filled), " ".repeat(BAR_WIDTH as usize - filled));
        print!(
            "\r  {archive} [{bar}] {} / {}",
            human_bytes(current),
            human_bytes(total)
        );
        let _ = std::io::stdout().flush();
    }

    fn downloaded(&self, _archive: &str, bytes: u64) {
        // clear the progress line before the summary
        print!("\r{:width$}\r", "", width = 80);
        println!("  {}", format!("Downloaded {}", human_bytes(bytes)).dim());
    }

    fn cache_hit(&self, archive: &str) {
        if self.verbose {
            self.output.info(&format!("using cached archive {archive}"));
        }
    }

    fn cache_stale(&self, archive: &str) {
        if self.verbose {
            self.output
                .info(&format!("cached archive {archive} is stale, downloading again"));
        }
    }

    fn info(&self, msg: &str) {
        self.output.info(msg);
    }

    fn success(&self, msg: &str) {
        self.output.success(msg);
    }

    fn warning(&self, msg: &str) {
        self.output.warning(msg);
    }

    fn error(&self, msg: &str) {
        self.output.error(msg);
    }
}
