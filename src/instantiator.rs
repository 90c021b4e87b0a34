use alloc::{borrow::ToOwned as _, boxed::Box};
use core::any::type_name;
use tracing::{debug, error, info_span};

use crate::{
    arguments::Arguments,
    data::Data,
    errors::{InstantiateErrorKind, ResolveErrorKind},
    locator::Locator,
    registry::ClassDefinition,
    resolver::Resolver,
    service::{service_fn, BoxService, Service as _},
    utils::thread_safety::{BoxAnyThreadSafety, SendSafety, SyncSafety},
};

pub(crate) type BoxedInstantiator = BoxService<Arguments, BoxAnyThreadSafety, InstantiateErrorKind>;

#[must_use]
pub(crate) fn boxed_instantiator<F, T>(instantiator: F) -> BoxedInstantiator
where
    F: Fn(Arguments) -> Result<T, InstantiateErrorKind> + Send + Sync + 'static,
    T: SendSafety + SyncSafety + 'static,
{
    BoxService::new(service_fn(move |arguments: Arguments| -> Result<BoxAnyThreadSafety, InstantiateErrorKind> {
        let instance = instantiator(arguments)?;

        debug!("Instantiated");

        Ok(Box::new(instance) as BoxAnyThreadSafety)
    }))
}

impl<'a, L: Locator + ?Sized> Resolver<'a, L> {
    /// Resolves the class and instantiates it, resolving its constructor arguments from `data` first.
    ///
    /// `optional` only tolerates the class itself being unknown: `Ok(None)` is returned instead of
    /// [`ResolveErrorKind::ClassNotFound`]. Failures while resolving the constructor arguments propagate regardless.
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::ClassNotFound`] if the class isn't registered and `optional` is `false`
    /// - Returns [`ResolveErrorKind::CyclicDependency`] if the class is already being built higher in the chain
    /// - Returns [`ResolveErrorKind::Instantiate`] if the instantiator fails
    /// - Propagates argument resolution errors unchanged
    pub(crate) fn build(&mut self, identifier: &str, data: Data, optional: bool) -> Result<Option<BoxAnyThreadSafety>, ResolveErrorKind> {
        let span = info_span!("build", class = identifier, optional);
        let _guard = span.enter();

        let class = match self.resolve_class(identifier) {
            Ok(class) => class,
            Err(ResolveErrorKind::ClassNotFound { .. }) if optional => {
                debug!("Optional class not found, null returned");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        self.build_class(class, data).map(Some)
    }

    /// Typed variant of [`Self::build`] for required classes
    pub(crate) fn build_as<T: 'static>(&mut self, identifier: &str, data: Data) -> Result<T, ResolveErrorKind> {
        let span = info_span!("build", class = identifier, expected = type_name::<T>());
        let _guard = span.enter();

        let class = self.resolve_class(identifier)?;
        match self.build_class(class, data)?.downcast::<T>() {
            Ok(instance) => Ok(*instance),
            Err(_) => {
                let err = ResolveErrorKind::IncorrectType {
                    identifier: identifier.to_owned(),
                    expected: type_name::<T>(),
                };
                error!("{}", err);
                Err(err)
            }
        }
    }

    fn build_class(&mut self, class: &'a ClassDefinition, data: Data) -> Result<BoxAnyThreadSafety, ResolveErrorKind> {
        if self.building.iter().any(|name| *name == class.name) {
            let mut path = self.building.clone();
            path.push(class.name.clone().into_owned());

            let err = ResolveErrorKind::CyclicDependency {
                path: path.into_boxed_slice(),
            };
            error!("{}", err);
            return Err(err);
        }

        self.building.push(class.name.clone().into_owned());
        let instance = self.instantiate(class, data);
        self.building.pop();

        instance
    }

    fn instantiate(&mut self, class: &'a ClassDefinition, data: Data) -> Result<BoxAnyThreadSafety, ResolveErrorKind> {
        let arguments = match &class.constructor {
            Some(signature) => self.resolve_arguments(signature.parameters(), data)?,
            None => {
                if !data.is_empty() {
                    debug!(unused = data.len(), "Class has no constructor, data ignored");
                }
                Arguments::empty()
            }
        };

        match class.instantiator.call(arguments) {
            Ok(instance) => Ok(instance),
            Err(err) => {
                error!(class = class.name(), "{}", err);
                Err(ResolveErrorKind::Instantiate(err))
            }
        }
    }
}
