use core::any::Any;

use crate::{
    arguments::Arguments,
    data::Data,
    errors::ResolveErrorKind,
    locator::{Locator, MemoryLocator},
    parameter::Parameter,
    registry::{ClassDefinition, Registry},
    resolver::Resolver,
    utils::thread_safety::{BoxAnyThreadSafety, RcThreadSafety},
};

/// Autowiring entry point: a [`Registry`] of classes, functions and methods
/// combined with the [`Locator`] holding the alias table.
///
/// Every call is a single stateless resolution pass. Nothing built by the container is cached or retained.
pub struct Container<L = MemoryLocator> {
    pub(crate) inner: RcThreadSafety<ContainerInner<L>>,
}

pub(crate) struct ContainerInner<L> {
    pub(crate) registry: Registry,
    pub(crate) locator: L,
}

impl<L> Clone for Container<L> {
    #[inline]
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl Container {
    /// Creates container with an empty [`MemoryLocator`]
    #[inline]
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self::new_with_locator(registry, MemoryLocator::new())
    }
}

impl<L: Locator> Container<L> {
    #[inline]
    #[must_use]
    pub fn new_with_locator(registry: Registry, locator: L) -> Self {
        Self {
            inner: RcThreadSafety::new(ContainerInner { registry, locator }),
        }
    }

    #[inline]
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    #[inline]
    #[must_use]
    pub fn locator(&self) -> &L {
        &self.inner.locator
    }

    /// Builds a new instance of the class registered under `identifier` (after alias substitution).
    ///
    /// Constructor arguments are taken from `data` by position, then by name,
    /// then built from their declared class, then from their default value.
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::ClassNotFound`] if the class isn't registered, unless `optional` is `true`,
    ///   in which case `Ok(None)` is returned
    /// - Returns [`ResolveErrorKind::MissingArgument`] if a constructor argument can't be resolved, even if `optional` is `true`
    /// - Returns [`ResolveErrorKind::CyclicDependency`] if the constructor arguments depend on the class being built
    /// - Returns [`ResolveErrorKind::Instantiate`] if a constructor fails
    pub fn build(&self, identifier: &str, data: Data, optional: bool) -> Result<Option<BoxAnyThreadSafety>, ResolveErrorKind> {
        self.resolver().build(identifier, data, optional)
    }

    /// Builds a required instance and downcasts it to `T`
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::IncorrectType`] if the built instance isn't a `T`
    /// - see [`Self::build`] for the rest
    pub fn build_as<T: 'static>(&self, identifier: &str, data: Data) -> Result<T, ResolveErrorKind> {
        self.resolver().build_as(identifier, data)
    }

    /// Calls the method `name` registered for the dynamic type of `target`.
    ///
    /// # Warning
    /// Pass the instance itself, not its box: `&*instance` for a `Box<dyn Any>`,
    /// otherwise the box type is used to look the method up.
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::MethodNotFound`] if no such method is registered for the receiver type
    /// - Returns [`ResolveErrorKind::Instantiate`] with the method's own error if it fails
    /// - Propagates argument resolution errors
    pub fn invoke_method(&self, target: &dyn Any, name: &str, data: Data) -> Result<BoxAnyThreadSafety, ResolveErrorKind> {
        self.resolver().invoke_method(target, name, data)
    }

    /// Calls the function registered under `name`
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::FunctionNotFound`] if no such function is registered
    /// - Returns [`ResolveErrorKind::Instantiate`] with the function's own error if it fails
    /// - Propagates argument resolution errors
    pub fn invoke_function(&self, name: &str, data: Data) -> Result<BoxAnyThreadSafety, ResolveErrorKind> {
        self.resolver().invoke_function(name, data)
    }

    /// Resolves `identifier` through the alias table and the registry without building anything
    ///
    /// # Errors
    /// Returns [`ResolveErrorKind::ClassNotFound`] if the (possibly aliased) class isn't registered
    pub fn resolve_class(&self, identifier: &str) -> Result<&ClassDefinition, ResolveErrorKind> {
        self.resolver().resolve_class(identifier)
    }

    /// Resolves arguments for an arbitrary parameter list, each parameter positioned at its index in `parameters`
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::MissingArgument`] if an argument can't be resolved
    /// - Propagates errors of the nested builds
    pub fn resolve_arguments(&self, parameters: &[Parameter], data: Data) -> Result<Arguments, ResolveErrorKind> {
        self.resolver().resolve_arguments(parameters, data)
    }

    #[inline]
    fn resolver(&self) -> Resolver<'_, L> {
        Resolver::new(&self.inner.registry, &self.inner.locator)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::Container;
    use crate::{
        data::Data,
        errors::ResolveErrorKind,
        locator::{Aliases, MemoryLocator},
        parameter::Parameter,
        registry::RegistryBuilder,
        utils::thread_safety::RcThreadSafety,
    };

    use alloc::{
        format,
        string::{String, ToString as _},
    };
    use tracing_test::traced_test;

    struct Config {
        dsn: &'static str,
    }
    struct Pool(Config);
    struct Repository(Pool, u32);

    fn container() -> Container {
        Container::new_with_locator(
            RegistryBuilder::new()
                .provide("Config", || Ok(Config { dsn: "sqlite::memory:" }))
                .provide_with_constructor("Pool", [Parameter::typed("config", "Config")], |mut args| Ok(Pool(args.take(0)?)))
                .provide_with_constructor(
                    "Repository",
                    [Parameter::typed("pool", "Pool"), Parameter::new("page_size").with_default(20u32)],
                    |mut args| Ok(Repository(args.take(0)?, args.take(1)?)),
                )
                .build(),
            MemoryLocator::with_aliases(Aliases::new().alias("IRepository", "Repository")),
        )
    }

    #[test]
    #[traced_test]
    fn test_build_graph() {
        let container = container();

        let Repository(Pool(config), page_size) = container.build_as::<Repository>("IRepository", Data::new()).unwrap();
        assert_eq!(config.dsn, "sqlite::memory:");
        assert_eq!(page_size, 20);

        let Repository(_, page_size) = container
            .build_as::<Repository>("Repository", Data::new().with_name("page_size", 50u32))
            .unwrap();
        assert_eq!(page_size, 50);
    }

    #[test]
    #[traced_test]
    fn test_build_optional() {
        let container = container();

        assert!(container.build("Cache", Data::new(), true).unwrap().is_none());
        assert!(matches!(
            container.build("Cache", Data::new(), false),
            Err(ResolveErrorKind::ClassNotFound { identifier }) if identifier == "Cache",
        ));
        assert!(container.build("Pool", Data::new(), true).unwrap().is_some());
    }

    #[test]
    #[traced_test]
    fn test_alias_table_is_read_per_call() {
        let container = container();
        assert!(container.resolve_class("IPool").is_err());

        container.locator().set_aliases(Aliases::new().alias("IPool", "Pool"));
        assert_eq!(container.resolve_class("IPool").unwrap().name(), "Pool");
        assert!(container.resolve_class("IRepository").is_err());
    }

    #[test]
    #[traced_test]
    fn test_shared_locator() {
        let locator = RcThreadSafety::new(MemoryLocator::new());
        let container = Container::new_with_locator(RegistryBuilder::new().provide("Config", || Ok(Config { dsn: "" })).build(), locator.clone());

        locator.set_aliases(Aliases::new().alias("IConfig", "Config"));
        assert!(container.build_as::<Config>("IConfig", Data::new()).is_ok());
    }

    #[test]
    #[traced_test]
    #[cfg(feature = "thread_safe")]
    fn test_concurrent_builds() {
        use std::thread;

        let container = container();

        let handles: std::vec::Vec<_> = (0..4u32)
            .map(|page_size| {
                let container = container.clone();
                thread::spawn(move || {
                    container
                        .build_as::<Repository>("Repository", Data::new().with_position(1, page_size))
                        .map(|Repository(_, page_size)| page_size)
                })
            })
            .collect();

        let mut page_sizes: std::vec::Vec<_> = handles.into_iter().map(|handle| handle.join().unwrap().unwrap()).collect();
        page_sizes.sort_unstable();
        assert_eq!(page_sizes, [0, 1, 2, 3]);
    }
}
