use alloc::borrow::ToOwned as _;
use core::any::Any;
use tracing::{debug, error, info_span, warn};

use crate::{data::Data, errors::ResolveErrorKind, locator::Locator, resolver::Resolver, utils::thread_safety::BoxAnyThreadSafety};

impl<L: Locator + ?Sized> Resolver<'_, L> {
    /// Resolves the arguments of the function registered under `name` and calls it.
    /// A failure raised by the function body is returned as [`ResolveErrorKind::Instantiate`].
    pub(crate) fn invoke_function(&mut self, name: &str, data: Data) -> Result<BoxAnyThreadSafety, ResolveErrorKind> {
        let span = info_span!("invoke_function", function = name);
        let _guard = span.enter();

        let Some(function) = self.registry.function(name) else {
            let err = ResolveErrorKind::FunctionNotFound { name: name.to_owned() };
            warn!("{}", err);
            return Err(err);
        };

        let arguments = self.resolve_arguments(function.signature().parameters(), data)?;
        function.call(arguments).map_err(|err| {
            error!("{}", err);
            ResolveErrorKind::Instantiate(err)
        })
    }

    /// Resolves the arguments of the method registered for the dynamic type of `target` and calls it
    pub(crate) fn invoke_method(&mut self, target: &dyn Any, name: &str, data: Data) -> Result<BoxAnyThreadSafety, ResolveErrorKind> {
        let receiver = Any::type_id(target);

        let span = info_span!("invoke_method", method = name, receiver = ?receiver);
        let _guard = span.enter();

        let Some(method) = self.registry.method(receiver, name) else {
            let err = ResolveErrorKind::MethodNotFound {
                name: name.to_owned(),
                target: receiver,
            };
            warn!("{}", err);
            return Err(err);
        };

        debug!(receiver = method.receiver(), "Method found");

        let arguments = self.resolve_arguments(method.signature().parameters(), data)?;
        method.call(target, arguments).map_err(|err| {
            error!("{}", err);
            ResolveErrorKind::Instantiate(err)
        })
    }
}
