//! Terminal printer for streamed chat fragments

use crate::chat::FragmentCallback;
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Prints each fragment as soon as it arrives
#[derive(Debug, Default)]
pub struct TerminalFragmentPrinter {
    printed: AtomicUsize,
}

impl TerminalFragmentPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fragments printed so far
    pub fn printed(&self) -> usize {
        self.printed.load(Ordering::SeqCst)
    }

    /// End the streamed line, if anything was printed
    pub fn finish(&self) {
        if self.printed() > 0 {
            println!();
        }
    }
}

impl FragmentCallback for TerminalFragmentPrinter {
    fn on_fragment(&self, fragment: &str) {
        print!("{}", fragment);
        let _ = io::stdout().flush();
        self.printed.fetch_add(1, Ordering::SeqCst);
    }
}
