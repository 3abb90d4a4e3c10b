//! Indexed display slots for an external overlay.
//!
//! The core writes short status lines here and never reads them back.
use log::trace;

use crate::constants::INFO_SLOTS;

/// Fixed set of display lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspector {
    slots: Vec<String>,
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new(INFO_SLOTS)
    }
}

impl Inspector {
    /// Creates an inspector with `slots` empty lines.
    #[must_use]
    pub fn new(slots: usize) -> Self {
        Self {
            slots: vec![String::new(); slots],
        }
    }

    /// Replaces the line at `index`. Writes past the last slot are dropped.
    pub fn set_info(&mut self, index: usize, info: impl Into<String>) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = info.into();
        } else {
            trace!("dropping inspector write to slot {index}");
        }
    }

    /// Line at `index`; empty for unwritten or missing slots.
    #[must_use]
    pub fn info(&self, index: usize) -> &str {
        self.slots.get(index).map_or("", String::as_str)
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` when the inspector has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Non-blank lines with their slot index.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| (index, line.as_str()))
    }
}
