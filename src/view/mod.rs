//! Element tree the widget writes into.
//!
//! The widget only ever touches elements by id: it replaces text content and
//! toggles classes. [`Page`] keeps that state in memory and [`ConsoleView`]
//! prints it whenever it changes.

mod console;
mod page;

use thiserror::Error;

pub use console::ConsoleView;
pub use page::{Page, Snapshot};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ViewError {
    #[error("No element with id {0:?}")]
    MissingElement(String),
}

pub trait View: Send + Sync {
    /// Replaces the text content of every listed element as one update.
    /// If any id is missing nothing is written.
    fn set_texts(&self, writes: &[(String, String)]) -> Result<(), ViewError>;

    fn add_class(&self, id: &str, class: &str) -> Result<(), ViewError>;

    fn remove_class(&self, id: &str, class: &str) -> Result<(), ViewError>;
}
