pub const TOTAL_VOTES_ID: &str = "total-votes";
pub const VOTED_CLASS: &str = "voted";

/// Maps choice ids onto the element ids of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementIds {
    choices: Vec<String>,
}

impl ElementIds {
    pub fn new<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn contains(&self, choice: &str) -> bool {
        self.choices.iter().any(|c| c == choice)
    }

    pub fn button(choice: &str) -> String {
        format!("vote-{}", choice)
    }

    pub fn percentage(choice: &str) -> String {
        format!("{}-percentage", choice)
    }

    pub fn total() -> &'static str {
        TOTAL_VOTES_ID
    }

    /// Every element id the widget reads or writes.
    pub fn all(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::with_capacity(self.choices.len() * 2 + 1);
        for choice in &self.choices {
            ids.push(Self::button(choice));
            ids.push(Self::percentage(choice));
        }
        ids.push(TOTAL_VOTES_ID.to_string());
        ids
    }
}
