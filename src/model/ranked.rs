//! Ranked list of owned items.
//!
//! Rank is 1-based and always a dense `1..=len` permutation: it is the item's
//! index plus one and is never stored. [`RankedList::move_to`] is the only way
//! to change the relative order of existing items.

use serde::{Deserialize, Serialize};

use crate::error::{PtzError, Result};

/// An ordered collection whose order is its ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedList<T> {
    items: Vec<T>,
}

impl<T> Default for RankedList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> RankedList<T> {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ranked items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `rank` (1-based).
    #[must_use]
    pub fn get(&self, rank: usize) -> Option<&T> {
        rank.checked_sub(1).and_then(|idx| self.items.get(idx))
    }

    /// Mutable item at `rank` (1-based).
    pub fn get_mut(&mut self, rank: usize) -> Option<&mut T> {
        rank.checked_sub(1).and_then(move |idx| self.items.get_mut(idx))
    }

    /// Iterate in rank order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Iterate as `(rank, item)` pairs.
    pub fn iter_ranked(&self) -> impl Iterator<Item = (usize, &T)> {
        self.items.iter().enumerate().map(|(idx, item)| (idx + 1, item))
    }

    /// Rank of the first item matching `pred`.
    pub fn rank_where<F>(&self, pred: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.items.iter().position(pred).map(|idx| idx + 1)
    }

    /// Append at the lowest rank and return that rank.
    pub fn push(&mut self, item: T) -> usize {
        self.items.push(item);
        self.items.len()
    }

    /// Remove and return the item at `rank`; ranks below it close the gap.
    pub fn remove(&mut self, rank: usize) -> Option<T> {
        if rank == 0 || rank > self.items.len() {
            return None;
        }
        Some(self.items.remove(rank - 1))
    }

    /// Move the item at `from` to `to`, preserving the relative order of
    /// every other item.
    ///
    /// # Errors
    ///
    /// Returns [`PtzError::InvalidPosition`] if either rank is outside
    /// `[1, len]`; the list is left unchanged.
    pub fn move_to(&mut self, from: usize, to: usize) -> Result<()> {
        let count = self.items.len();
        for rank in [from, to] {
            if rank == 0 || rank > count {
                return Err(PtzError::InvalidPosition {
                    position: rank,
                    count,
                });
            }
        }
        if from != to {
            let item = self.items.remove(from - 1);
            self.items.insert(to - 1, item);
        }
        Ok(())
    }
}

impl<T> From<Vec<T>> for RankedList<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for RankedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RankedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> RankedList<char> {
        "abcde".chars().collect()
    }

    #[test]
    fn test_ranks_are_one_based() {
        let list = letters();
        assert_eq!(list.get(1), Some(&'a'));
        assert_eq!(list.get(5), Some(&'e'));
        assert_eq!(list.get(0), None);
        assert_eq!(list.get(6), None);
        assert_eq!(list.rank_where(|c| *c == 'c'), Some(3));
    }

    #[test]
    fn test_push_appends_at_lowest_rank() {
        let mut list = letters();
        assert_eq!(list.push('f'), 6);
        assert_eq!(list.get(6), Some(&'f'));
    }

    #[test]
    fn test_move_up_preserves_relative_order() {
        let mut list = letters();
        list.move_to(5, 1).unwrap();
        assert_eq!(list.iter().collect::<String>(), "eabcd");
    }

    #[test]
    fn test_move_down_preserves_relative_order() {
        let mut list = letters();
        list.move_to(1, 4).unwrap();
        assert_eq!(list.iter().collect::<String>(), "bcdae");
    }

    #[test]
    fn test_move_out_of_range_is_rejected_without_change() {
        let mut list = letters();
        let err = list.move_to(2, 6).unwrap_err();
        assert!(matches!(
            err,
            PtzError::InvalidPosition {
                position: 6,
                count: 5
            }
        ));
        assert!(list.move_to(2, 0).is_err());
        assert_eq!(list.iter().collect::<String>(), "abcde");
    }

    #[test]
    fn test_remove_closes_gap() {
        let mut list = letters();
        assert_eq!(list.remove(2), Some('b'));
        assert_eq!(list.remove(0), None);
        assert_eq!(list.remove(9), None);
        let ranked: Vec<_> = list.iter_ranked().collect();
        assert_eq!(ranked, vec![(1, &'a'), (2, &'c'), (3, &'d'), (4, &'e')]);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let list: RankedList<u8> = vec![3, 1, 2].into();
        assert_eq!(serde_json::to_string(&list).unwrap(), "[3,1,2]");
        let back: RankedList<u8> = serde_json::from_str("[3,1,2]").unwrap();
        assert_eq!(back, list);
    }
}
