// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type-keyed bag of application data attached to a view.

use core::any::{Any, TypeId};
use core::fmt;

use hashbrown::HashMap;

trait Tag: Any + fmt::Debug {
    fn clone_tag(&self) -> Box<dyn Tag>;
    fn eq_tag(&self, other: &dyn Tag) -> bool;
}

impl<T: Any + fmt::Debug + Clone + PartialEq> Tag for T {
    fn clone_tag(&self) -> Box<dyn Tag> {
        Box::new(self.clone())
    }

    fn eq_tag(&self, other: &dyn Tag) -> bool {
        let other: &dyn Any = other;
        other.downcast_ref::<T>() == Some(self)
    }
}

/// Arbitrary values keyed by their type; at most one value per type.
///
/// Tags let application code hang its own data off a view (a model id, a
/// drag payload) without the view knowing about it. Two `Tags` are equal when
/// they hold equal values for the same set of types.
///
/// ```rust
/// use trellis_view::Tags;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct ItemId(u32);
///
/// let tags = Tags::new().with(ItemId(7));
/// assert_eq!(tags.get::<ItemId>(), Some(&ItemId(7)));
/// assert_eq!(tags.get::<String>(), None);
/// ```
#[derive(Default)]
pub struct Tags {
    values: HashMap<TypeId, Box<dyn Tag>>,
}

impl Tags {
    /// Empty tag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Self::set`].
    #[must_use]
    pub fn with<T: Any + fmt::Debug + Clone + PartialEq>(mut self, value: T) -> Self {
        self.set(value);
        self
    }

    /// Value of type `T`, if present.
    pub fn get<T: Any>(&self) -> Option<&T> {
        let value: &dyn Tag = &**self.values.get(&TypeId::of::<T>())?;
        let value: &dyn Any = value;
        value.downcast_ref()
    }

    /// Store `value`, replacing any previous value of the same type.
    pub fn set<T: Any + fmt::Debug + Clone + PartialEq>(&mut self, value: T) {
        self.values.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Remove and return the value of type `T`.
    pub fn remove<T: Any>(&mut self) -> Option<T> {
        let value: Box<dyn Any> = self.values.remove(&TypeId::of::<T>())?;
        value.downcast().ok().map(|value| *value)
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no values are stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Clone for Tags {
    fn clone(&self) -> Self {
        Self {
            values: self
                .values
                .iter()
                .map(|(key, value)| (*key, value.clone_tag()))
                .collect(),
        }
    }
}

impl PartialEq for Tags {
    fn eq(&self, other: &Self) -> bool {
        self.values.len() == other.values.len()
            && self.values.iter().all(|(key, value)| {
                other
                    .values
                    .get(key)
                    .is_some_and(|other| value.eq_tag(&**other))
            })
    }
}

impl fmt::Debug for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values.values()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row(usize);

    #[test]
    fn set_get_remove() {
        let mut tags = Tags::new();
        assert!(tags.is_empty());
        tags.set(Row(1));
        tags.set(String::from("payload"));
        assert_eq!(tags.len(), 2);
        tags.set(Row(2));
        assert_eq!(tags.get::<Row>(), Some(&Row(2)));
        assert_eq!(tags.remove::<Row>(), Some(Row(2)));
        assert_eq!(tags.get::<Row>(), None);
        assert_eq!(tags.get::<String>().map(String::as_str), Some("payload"));
    }

    #[test]
    fn equality_compares_values() {
        let a = Tags::new().with(Row(1)).with(3_u8);
        let b = Tags::new().with(3_u8).with(Row(1));
        let c = Tags::new().with(Row(2)).with(3_u8);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Tags::new().with(Row(1)));
        assert_eq!(a.clone(), a);
    }
}
