use std::fmt;

use serde::{Deserialize, Serialize};

/// Marking recorded for one item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Unmarked,
    Good,
    Bad,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Unmarked => "unmarked",
            Status::Good => "good",
            Status::Bad => "bad",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the source list.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub position: usize,
    /// Line content exactly as read from the source.
    pub label: String,
    pub status: Status,
}

impl Item {
    pub fn new(position: usize, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
            status: Status::Unmarked,
        }
    }

    /// Label with surrounding whitespace removed, as shown to users.
    pub fn display_label(&self) -> &str {
        self.label.trim()
    }

    /// True if `query` names this item, ignoring surrounding whitespace on both sides.
    pub fn matches(&self, query: &str) -> bool {
        self.label.trim() == query.trim()
    }
}

/// Ordered list of items under bisection.
///
/// Serializes as a bare JSON array of items.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Sequence {
    items: Vec<Item>,
}

impl Sequence {
    /// Build a fresh, fully unmarked sequence in source order.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = labels
            .into_iter()
            .enumerate()
            .map(|(position, label)| Item::new(position, label))
            .collect();
        Self { items }
    }

    /// Wrap stored items, restoring position order.
    pub fn from_items(items: Vec<Item>) -> Self {
        let mut sequence = Self { items };
        sequence.sort_by_position();
        sequence
    }

    pub fn sort_by_position(&mut self) {
        self.items.sort_by_key(|item| item.position);
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `position`. Relies on positions being dense and sorted.
    pub fn get(&self, position: usize) -> Option<&Item> {
        self.items
            .get(position)
            .filter(|item| item.position == position)
    }

    /// First item whose trimmed label equals the trimmed `label`.
    pub fn find(&self, label: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.matches(label))
    }

    pub fn find_mut(&mut self, label: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.matches(label))
    }
}
