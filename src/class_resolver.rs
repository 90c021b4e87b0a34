use alloc::borrow::ToOwned as _;
use tracing::{debug, warn};

use crate::{
    errors::ResolveErrorKind,
    locator::{Aliases, Locator, ALIASES_KEY},
    registry::ClassDefinition,
    resolver::Resolver,
    utils::thread_safety::RcThreadSafety,
};

impl<'a, L: Locator + ?Sized> Resolver<'a, L> {
    /// Looks the identifier up in the alias table (one level only), then in the registry
    pub(crate) fn resolve_class(&self, identifier: &str) -> Result<&'a ClassDefinition, ResolveErrorKind> {
        let aliases = self.aliases();
        let identifier = match aliases.as_deref().and_then(|aliases| aliases.get(identifier)) {
            Some(actual) => {
                debug!(requested = identifier, actual, "Alias applied");
                actual
            }
            None => identifier,
        };

        match self.registry.class(identifier) {
            Some(class) => Ok(class),
            None => {
                let err = ResolveErrorKind::ClassNotFound {
                    identifier: identifier.to_owned(),
                };
                warn!("{}", err);
                Err(err)
            }
        }
    }

    fn aliases(&self) -> Option<RcThreadSafety<Aliases>> {
        let value = self.locator.get(ALIASES_KEY)?;
        match value.downcast::<Aliases>() {
            Ok(aliases) => Some(aliases),
            Err(_) => {
                warn!(key = ALIASES_KEY, "Locator entry isn't an alias table, ignoring it");
                None
            }
        }
    }
}
