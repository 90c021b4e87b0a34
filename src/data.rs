use alloc::{borrow::Cow, boxed::Box, collections::BTreeMap, string::String};

use crate::utils::thread_safety::{BoxAnyThreadSafety, SendSafety, SyncSafety};

/// Key of an entry in [`Data`]: either the zero-based position of a parameter or its name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Key {
    Position(usize),
    Name(Cow<'static, str>),
}

impl From<usize> for Key {
    #[inline]
    fn from(position: usize) -> Self {
        Self::Position(position)
    }
}

impl From<&'static str> for Key {
    #[inline]
    fn from(name: &'static str) -> Self {
        Self::Name(Cow::Borrowed(name))
    }
}

impl From<String> for Key {
    #[inline]
    fn from(name: String) -> Self {
        Self::Name(Cow::Owned(name))
    }
}

impl From<Cow<'static, str>> for Key {
    #[inline]
    fn from(name: Cow<'static, str>) -> Self {
        Self::Name(name)
    }
}

/// Explicit argument values supplied by the caller of a resolution.
///
/// Entries are addressed by parameter position or parameter name and are never checked
/// against the declared type of the parameter that takes them.
/// Entries that no parameter asks for are ignored.
#[derive(Default)]
pub struct Data {
    pub(crate) map: BTreeMap<Key, BoxAnyThreadSafety>,
}

impl Data {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { map: BTreeMap::new() }
    }

    #[inline]
    #[must_use]
    pub fn with_position<T: SendSafety + SyncSafety + 'static>(mut self, position: usize, value: T) -> Self {
        self.insert(Key::Position(position), value);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_name<T: SendSafety + SyncSafety + 'static>(mut self, name: impl Into<Cow<'static, str>>, value: T) -> Self {
        self.insert(Key::Name(name.into()), value);
        self
    }

    /// Inserts a value, returning the previous boxed value under the same key
    #[inline]
    pub fn insert<T: SendSafety + SyncSafety + 'static>(&mut self, key: impl Into<Key>, value: T) -> Option<BoxAnyThreadSafety> {
        self.insert_boxed(key, Box::new(value))
    }

    #[inline]
    pub fn insert_boxed(&mut self, key: impl Into<Key>, value: BoxAnyThreadSafety) -> Option<BoxAnyThreadSafety> {
        self.map.insert(key.into(), value)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, key: &Key) -> bool {
        self.map.contains_key(key)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub(crate) fn take_position(&mut self, position: usize) -> Option<BoxAnyThreadSafety> {
        self.map.remove(&Key::Position(position))
    }

    #[inline]
    pub(crate) fn take_name(&mut self, name: &Cow<'static, str>) -> Option<BoxAnyThreadSafety> {
        self.map.remove(&Key::Name(name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::{Data, Key};

    use alloc::{borrow::Cow, string::String};

    #[test]
    fn test_position_and_name_are_distinct_keys() {
        let mut data = Data::new().with_position(0, "A").with_name("x", "B");
        assert_eq!(data.len(), 2);

        let positional = data.take_position(0).unwrap();
        assert_eq!(*positional.downcast::<&str>().unwrap(), "A");
        assert!(data.take_position(0).is_none());

        let named = data.take_name(&Cow::Borrowed("x")).unwrap();
        assert_eq!(*named.downcast::<&str>().unwrap(), "B");
        assert!(data.is_empty());
    }

    #[test]
    fn test_insert_replaces_previous_value() {
        let mut data = Data::new();
        assert!(data.insert(String::from("n"), 1u8).is_none());

        let previous = data.insert("n", 2u8).unwrap();
        assert_eq!(*previous.downcast::<u8>().unwrap(), 1);
        assert!(data.contains(&Key::Name(Cow::Borrowed("n"))));
        assert!(!data.contains(&Key::Position(0)));
    }
}
