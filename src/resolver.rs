use alloc::{string::String, vec::Vec};

use crate::{locator::Locator, registry::Registry};

/// State of one top-level resolution call.
///
/// `building` holds the canonical names of the classes under construction,
/// outermost first, and is only used to detect cyclic dependencies.
pub(crate) struct Resolver<'a, L: ?Sized> {
    pub(crate) registry: &'a Registry,
    pub(crate) locator: &'a L,
    pub(crate) building: Vec<String>,
}

impl<'a, L: Locator + ?Sized> Resolver<'a, L> {
    #[inline]
    #[must_use]
    pub(crate) fn new(registry: &'a Registry, locator: &'a L) -> Self {
        Self {
            registry,
            locator,
            building: Vec::new(),
        }
    }
}
