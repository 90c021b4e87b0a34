use alloc::{
    borrow::Cow,
    collections::{btree_map, BTreeMap},
    string::String,
};
use parking_lot::RwLock;

use crate::utils::thread_safety::{RcAnyThreadSafety, RcThreadSafety, SendSafety, SyncSafety};

/// Key under which the alias table is stored in a [`Locator`]
pub const ALIASES_KEY: &str = "config.aliases";

/// Read side of a key-value service locator
pub trait Locator {
    #[must_use]
    fn has(&self, key: &str) -> bool;

    #[must_use]
    fn get(&self, key: &str) -> Option<RcAnyThreadSafety>;
}

impl<L: Locator + ?Sized> Locator for &L {
    #[inline]
    fn has(&self, key: &str) -> bool {
        (**self).has(key)
    }

    #[inline]
    fn get(&self, key: &str) -> Option<RcAnyThreadSafety> {
        (**self).get(key)
    }
}

impl<L: Locator + ?Sized> Locator for RcThreadSafety<L> {
    #[inline]
    fn has(&self, key: &str) -> bool {
        (**self).has(key)
    }

    #[inline]
    fn get(&self, key: &str) -> Option<RcAnyThreadSafety> {
        (**self).get(key)
    }
}

/// Mapping from a requested class identifier to the identifier actually instantiated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aliases {
    map: BTreeMap<Cow<'static, str>, Cow<'static, str>>,
}

impl Aliases {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { map: BTreeMap::new() }
    }

    #[inline]
    #[must_use]
    pub fn alias(mut self, requested: impl Into<Cow<'static, str>>, actual: impl Into<Cow<'static, str>>) -> Self {
        self.insert(requested, actual);
        self
    }

    #[inline]
    pub fn insert(
        &mut self,
        requested: impl Into<Cow<'static, str>>,
        actual: impl Into<Cow<'static, str>>,
    ) -> Option<Cow<'static, str>> {
        self.map.insert(requested.into(), actual.into())
    }

    #[inline]
    #[must_use]
    pub fn get(&self, requested: &str) -> Option<&str> {
        self.map.get(requested).map(|actual| &**actual)
    }

    #[inline]
    pub fn iter(&self) -> btree_map::Iter<'_, Cow<'static, str>, Cow<'static, str>> {
        self.map.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Aliases
where
    K: Into<Cow<'static, str>>,
    V: Into<Cow<'static, str>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().map(|(requested, actual)| (requested.into(), actual.into())).collect(),
        }
    }
}

/// In-memory [`Locator`] that can be populated through a shared reference
#[derive(Default)]
pub struct MemoryLocator {
    map: RwLock<BTreeMap<String, RcAnyThreadSafety>>,
}

impl MemoryLocator {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: RwLock::new(BTreeMap::new()),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_aliases(aliases: Aliases) -> Self {
        let locator = Self::new();
        locator.set_aliases(aliases);
        locator
    }

    #[inline]
    pub fn set<T: SendSafety + SyncSafety + 'static>(&self, key: impl Into<String>, value: T) -> Option<RcAnyThreadSafety> {
        self.set_rc(key, RcThreadSafety::new(value))
    }

    #[inline]
    pub fn set_rc<T: SendSafety + SyncSafety + 'static>(&self, key: impl Into<String>, value: RcThreadSafety<T>) -> Option<RcAnyThreadSafety> {
        self.map.write().insert(key.into(), value)
    }

    #[inline]
    pub fn set_aliases(&self, aliases: Aliases) -> Option<RcAnyThreadSafety> {
        self.set(ALIASES_KEY, aliases)
    }

    #[must_use]
    pub fn get_as<T: SendSafety + SyncSafety + 'static>(&self, key: &str) -> Option<RcThreadSafety<T>> {
        self.get(key).and_then(|value| value.downcast().ok())
    }

    #[inline]
    pub fn remove(&self, key: &str) -> Option<RcAnyThreadSafety> {
        self.map.write().remove(key)
    }
}

impl Locator for MemoryLocator {
    #[inline]
    fn has(&self, key: &str) -> bool {
        self.map.read().contains_key(key)
    }

    #[inline]
    fn get(&self, key: &str) -> Option<RcAnyThreadSafety> {
        self.map.read().get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::{Aliases, Locator as _, MemoryLocator, ALIASES_KEY};

    #[test]
    fn test_set_get() {
        let locator = MemoryLocator::new();
        assert!(!locator.has("db.url"));

        locator.set("db.url", "sqlite::memory:");
        assert!(locator.has("db.url"));
        assert_eq!(*locator.get_as::<&str>("db.url").unwrap(), "sqlite::memory:");
        assert!(locator.get_as::<u8>("db.url").is_none());

        assert!(locator.remove("db.url").is_some());
        assert!(locator.get("db.url").is_none());
    }

    #[test]
    fn test_aliases() {
        let locator = MemoryLocator::with_aliases(Aliases::new().alias("IFoo", "ConcreteFoo"));
        assert!(locator.has(ALIASES_KEY));

        let aliases = locator.get_as::<Aliases>(ALIASES_KEY).unwrap();
        assert_eq!(aliases.get("IFoo"), Some("ConcreteFoo"));
        assert_eq!(aliases.get("ConcreteFoo"), None);

        let collected: Aliases = [("IBar", "Bar")].into_iter().collect();
        assert_eq!(collected.iter().count(), 1);
    }
}
