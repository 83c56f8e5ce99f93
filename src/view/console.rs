use log::warn;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use super::{Page, Snapshot, View, ViewError};
use crate::widget::{ElementIds, VOTED_CLASS};

/// Prints the page after every change, one line per change.
///
/// The output lock is held from the write until the line is printed, so
/// lines come out in write order and each one shows a single page state.
pub struct ConsoleView {
    page: Arc<Page>,
    ids: ElementIds,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleView {
    pub fn new(page: Arc<Page>, ids: ElementIds) -> Self {
        Self::with_output(page, ids, Box::new(io::stdout()))
    }

    pub fn with_output(page: Arc<Page>, ids: ElementIds, out: Box<dyn Write + Send>) -> Self {
        Self {
            page,
            ids,
            out: Mutex::new(out),
        }
    }

    pub fn render(&self, snapshot: &Snapshot) -> String {
        let mut parts: Vec<String> = self
            .ids
            .choices()
            .iter()
            .map(|choice| {
                let text = snapshot.text(&ElementIds::percentage(choice)).unwrap_or("");
                let marker = if snapshot.has_class(&ElementIds::button(choice), VOTED_CLASS) {
                    " *"
                } else {
                    ""
                };
                format!("{}: {}{}", choice, display_or_dash(text), marker)
            })
            .collect();

        let total = snapshot.text(ElementIds::total()).unwrap_or("");
        parts.push(format!("total votes: {}", display_or_dash(total)));

        match snapshot.last_update() {
            Some(at) => format!("{} (updated {})", parts.join(" | "), at.format("%H:%M:%S")),
            None => parts.join(" | "),
        }
    }

    fn update<F>(&self, apply: F) -> Result<(), ViewError>
    where
        F: FnOnce(&Page) -> Result<(), ViewError>,
    {
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        apply(&self.page)?;

        let line = self.render(&self.page.snapshot());
        if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
            warn!("Failed to print results: {}", e);
        }
        Ok(())
    }
}

fn display_or_dash(text: &str) -> &str {
    if text.is_empty() { "-" } else { text }
}

impl View for ConsoleView {
    fn set_texts(&self, writes: &[(String, String)]) -> Result<(), ViewError> {
        self.update(|page| page.set_texts(writes))
    }

    fn add_class(&self, id: &str, class: &str) -> Result<(), ViewError> {
        self.update(|page| page.add_class(id, class))
    }

    fn remove_class(&self, id: &str, class: &str) -> Result<(), ViewError> {
        self.update(|page| page.remove_class(id, class))
    }
}
