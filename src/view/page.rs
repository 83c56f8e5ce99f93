use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use super::{View, ViewError};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub text: String,
    pub classes: BTreeSet<String>,
}

#[derive(Debug, Clone, Default)]
struct PageState {
    elements: BTreeMap<String, Element>,
    last_update: Option<DateTime<Utc>>,
}

/// Copy of the whole page taken under one lock.
#[derive(Debug, Clone)]
pub struct Snapshot {
    state: PageState,
}

impl Snapshot {
    pub fn text(&self, id: &str) -> Option<&str> {
        self.state.elements.get(id).map(|e| e.text.as_str())
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.state
            .elements
            .get(id)
            .is_some_and(|e| e.classes.contains(class))
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.state.last_update
    }
}

/// In-memory page. All mutation goes through one lock, so a batch of text
/// writes is never observed half-applied.
#[derive(Default)]
pub struct Page {
    state: Mutex<PageState>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_elements<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let page = Self::new();
        for id in ids {
            page.insert(id);
        }
        page
    }

    pub fn insert(&self, id: impl Into<String>) {
        self.lock().elements.entry(id.into()).or_default();
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.lock().clone(),
        }
    }

    // A poisoned lock only means a writer panicked mid-update; the element
    // map itself is still usable.
    fn lock(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl View for Page {
    fn set_texts(&self, writes: &[(String, String)]) -> Result<(), ViewError> {
        let mut state = self.lock();

        if let Some((missing, _)) = writes.iter().find(|(id, _)| !state.elements.contains_key(id)) {
            return Err(ViewError::MissingElement(missing.clone()));
        }

        for (id, text) in writes {
            if let Some(element) = state.elements.get_mut(id) {
                element.text = text.clone();
            }
        }
        state.last_update = Some(Utc::now());
        Ok(())
    }

    fn add_class(&self, id: &str, class: &str) -> Result<(), ViewError> {
        let mut state = self.lock();
        let element = state
            .elements
            .get_mut(id)
            .ok_or_else(|| ViewError::MissingElement(id.to_string()))?;
        element.classes.insert(class.to_string());
        Ok(())
    }

    fn remove_class(&self, id: &str, class: &str) -> Result<(), ViewError> {
        let mut state = self.lock();
        let element = state
            .elements
            .get_mut(id)
            .ok_or_else(|| ViewError::MissingElement(id.to_string()))?;
        element.classes.remove(class);
        Ok(())
    }
}
