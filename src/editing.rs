//! Immutable list edits.
//!
//! Every edit returns a new [`ListPayload`]; the original is never touched.

use crate::models::ListPayload;
use thiserror::Error;

/// Errors from list edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("position {index} is out of range for a list of {len} items")]
    OutOfRange { index: usize, len: usize },
}

impl ListPayload {
    /// Move the item at `from` so that it ends up at `to` (0-based).
    pub fn move_item(&self, from: usize, to: usize) -> Result<ListPayload, EditError> {
        let len = self.items.len();
        for index in [from, to] {
            if index >= len {
                return Err(EditError::OutOfRange { index, len });
            }
        }

        let mut items = self.items.clone();
        let moved = items.remove(from);
        items.insert(to, moved);

        Ok(ListPayload {
            title: self.title.clone(),
            items,
        })
    }

    /// Append trimmed items, skipping blank ones.
    pub fn with_items<I, S>(&self, new_items: I) -> ListPayload
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut items = self.items.clone();
        items.extend(
            new_items
                .into_iter()
                .map(|s| s.as_ref().trim().to_string())
                .filter(|s| !s.is_empty()),
        );

        ListPayload {
            title: self.title.clone(),
            items,
        }
    }

    /// Remove the item at `index` (0-based).
    pub fn without_item(&self, index: usize) -> Result<ListPayload, EditError> {
        if index >= self.items.len() {
            return Err(EditError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }

        let items = self
            .items
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, item)| item.clone())
            .collect();

        Ok(ListPayload {
            title: self.title.clone(),
            items,
        })
    }
}

/// Split pasted text into items.
///
/// Text containing a comma is read as comma-separated values where double
/// quotes group text that itself contains commas (the quotes are dropped).
/// Line breaks outside quotes also separate items. Text without a comma is
/// read as one item per line. Items are trimmed and blank ones dropped.
pub fn parse_bulk_input(input: &str) -> Vec<String> {
    if !input.contains(',') {
        return input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
    }

    let mut items = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in input.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' | '\n' | '\r' if !in_quotes => push_trimmed(&mut items, &mut current),
            _ => current.push(c),
        }
    }
    push_trimmed(&mut items, &mut current);

    items
}

fn push_trimmed(items: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        items.push(trimmed.to_string());
    }
    current.clear();
}
