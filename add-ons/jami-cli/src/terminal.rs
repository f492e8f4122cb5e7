//! Terminal implementation of the host capabilities.

use jami_core::{project, ChartCache, HostBridge};
use std::io::Write;

/// Busy indicator and notices go to stderr; the results view is the rendered chart on stdout.
pub struct TerminalHost {
    cache: ChartCache,
    quiet: bool,
}

impl TerminalHost {
    pub fn new(cache: ChartCache, quiet: bool) -> Self {
        Self { cache, quiet }
    }
}

impl HostBridge for TerminalHost {
    fn show_busy(&self) {
        if !self.quiet {
            eprint!("Calculating chart... ");
            let _ = std::io::stderr().flush();
        }
    }

    fn hide_busy(&self) {
        if !self.quiet {
            eprintln!("done");
        }
    }

    fn navigate_to_results(&self) {
        print!("{}", project(self.cache.get().as_deref()));
    }

    fn show_error(&self, title: &str, message: &str) {
        eprintln!("{}: {}", title, message);
    }
}
