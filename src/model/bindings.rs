//! Ordered variable bindings.

use indexmap::IndexSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An insertion-ordered mapping from variable name to integer value.
///
/// Names live in an [`IndexSet`], values in a parallel vector. The set
/// gives constant-time name lookup and keeps first-insertion order, and
/// its index of a name is that name's slot in the value slice, so
/// expressions bound to the names evaluate directly over the values.
///
/// # Examples
///
/// ```
/// use u_discrete_ascent::model::Bindings;
///
/// let mut b = Bindings::new();
/// b.insert("x2", 4);
/// b.insert("x1", 1);
/// b.insert("x2", 7); // overwrite keeps position
///
/// assert!(b.names().iter().eq(["x2", "x1"]));
/// assert_eq!(b.values(), [7, 1]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bindings {
    names: IndexSet<String>,
    values: Vec<i64>,
}

impl Bindings {
    /// Creates an empty binding set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, returning the previous value if the name
    /// was already bound. A new name goes to the end.
    pub fn insert(&mut self, name: impl Into<String>, value: i64) -> Option<i64> {
        let (index, added) = self.names.insert_full(name.into());
        if added {
            self.values.push(value);
            None
        } else {
            Some(std::mem::replace(&mut self.values[index], value))
        }
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.position(name).and_then(|i| self.values.get(i).copied())
    }

    /// Index of `name` in registration order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.get_index_of(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &IndexSet<String> {
        &self.names
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut [i64] {
        &mut self.values
    }

    /// `(name, value)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        let mut bindings = Bindings::new();
        for (name, value) in iter {
            bindings.insert(name, value);
        }
        bindings
    }
}
