//! In-memory, insertion-ordered collection of saved roasts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{RoastError, RoastResult};

/// A roast the user chose to keep.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRoast {
    /// Roast text.
    pub roast: String,
    /// Name the roast was generated for.
    pub name: String,
    /// Interests the roast was generated for.
    pub interests: String,
    /// When the roast was saved.
    pub saved_at: DateTime<Utc>,
}

/// Ordered saved-roast store. Removal is by position.
#[derive(Clone, Debug, Default)]
pub struct SavedRoasts {
    items: Vec<SavedRoast>,
}

impl SavedRoasts {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a roast and return its index.
    pub fn add(
        &mut self,
        roast: impl Into<String>,
        name: impl Into<String>,
        interests: impl Into<String>,
    ) -> usize {
        self.items.push(SavedRoast {
            roast: roast.into(),
            name: name.into(),
            interests: interests.into(),
            saved_at: Utc::now(),
        });
        self.items.len() - 1
    }

    /// Remove the roast at `index`, shifting later entries down.
    ///
    /// # Errors
    /// Returns [`RoastError::SavedIndexOutOfRange`] if `index >= len`.
    pub fn remove(&mut self, index: usize) -> RoastResult<SavedRoast> {
        if index >= self.items.len() {
            return Err(RoastError::SavedIndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Saved roasts, oldest first.
    #[must_use]
    pub fn list(&self) -> &[SavedRoast] {
        &self.items
    }

    /// Roast at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SavedRoast> {
        self.items.get(index)
    }

    /// Number of saved roasts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.list().len()
    }

    /// Whether nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> SavedRoasts {
        let mut saved = SavedRoasts::new();
        saved.add("first", "Ann", "art");
        saved.add("second", "Bob", "bikes");
        saved.add("third", "Cy", "chess");
        saved
    }

    #[test]
    fn test_add_preserves_order() {
        let saved = seeded();
        let roasts: Vec<&str> = saved.list().iter().map(|s| s.roast.as_str()).collect();
        assert_eq!(roasts, ["first", "second", "third"]);
        assert_eq!(saved.get(1).map(|s| s.name.as_str()), Some("Bob"));
    }

    #[test]
    fn test_remove_middle() {
        let mut saved = seeded();
        let removed = saved.remove(1);
        assert_eq!(removed.ok().map(|s| s.roast).as_deref(), Some("second"));
        assert_eq!(saved.len(), 2);
        assert_eq!(saved.list()[0].roast, "first");
        assert_eq!(saved.list()[1].roast, "third");
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut saved = seeded();
        assert!(matches!(
            saved.remove(3),
            Err(RoastError::SavedIndexOutOfRange { index: 3, len: 3 })
        ));
        assert_eq!(saved.len(), 3);

        let mut empty = SavedRoasts::new();
        assert!(empty.is_empty());
        assert!(empty.remove(0).is_err());
    }
}
