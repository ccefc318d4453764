//! Multi-select answer sets with unique members.

use serde::{Deserialize, Deserializer, Serialize};

use crate::options::LabelledOption;

/// An insertion-ordered set of selected options.
///
/// Members are unique; records that arrive with duplicates collapse them on load.
/// Equality compares membership only, so selection order never matters.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct OptionSet<T> {
    members: Vec<T>,
}

impl<T> Default for OptionSet<T> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
        }
    }
}

impl<T: PartialEq> PartialEq for OptionSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.members.len() == other.members.len()
            && self.members.iter().all(|member| other.contains(member))
    }
}

impl<T: Eq> Eq for OptionSet<T> {}

impl<T: PartialEq> OptionSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.members.contains(value)
    }

    /// Returns `true` when any of `candidates` is selected.
    pub fn intersects(&self, candidates: &[T]) -> bool {
        candidates.iter().any(|candidate| self.contains(candidate))
    }

    /// Flips membership of `value`, returning whether it is selected afterwards.
    pub fn toggle(&mut self, value: T) -> bool {
        if let Some(index) = self.members.iter().position(|member| *member == value) {
            self.members.remove(index);
            false
        } else {
            self.members.push(value);
            true
        }
    }

    /// Adds `value` unless already present. Returns `true` when newly added.
    pub fn insert(&mut self, value: T) -> bool {
        if self.contains(&value) {
            return false;
        }
        self.members.push(value);
        true
    }

    /// Removes `value` if present. Returns `true` when something was removed.
    pub fn remove(&mut self, value: &T) -> bool {
        let before = self.members.len();
        self.members.retain(|member| member != value);
        before != self.members.len()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.members.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.members
    }
}

impl<T: LabelledOption + PartialEq> OptionSet<T> {
    /// Returns `true` when at least one known option is selected.
    ///
    /// Unrecognised values carried over from storage never count.
    pub fn any_recognized(&self) -> bool {
        self.members.iter().any(LabelledOption::is_recognized)
    }
}

impl<T: PartialEq> FromIterator<T> for OptionSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = OptionSet::default();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<'a, T> IntoIterator for &'a OptionSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<'de, T> Deserialize<'de> for OptionSet<T>
where
    T: Deserialize<'de> + PartialEq,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<T>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}
