use alloc::{borrow::Cow, boxed::Box, collections::BTreeMap};
use core::any::{type_name, Any, TypeId};
use tracing::debug;

use crate::{
    arguments::Arguments,
    errors::{ArgumentErrorKind, InstantiateErrorKind},
    instantiator::{boxed_instantiator, BoxedInstantiator},
    parameter::{Parameter, Signature},
    service::Service as _,
    utils::thread_safety::{BoxAnyThreadSafety, RcThreadSafety, SendSafety, SyncSafety},
};

/// Class registered under a string identifier
#[derive(Clone)]
pub struct ClassDefinition {
    pub(crate) name: Cow<'static, str>,
    pub(crate) constructor: Option<Signature>,
    pub(crate) instantiator: BoxedInstantiator,
}

impl ClassDefinition {
    /// Canonical name, the identifier the class is registered under
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Constructor signature, `None` if the class has no constructor
    #[inline]
    #[must_use]
    pub fn constructor(&self) -> Option<&Signature> {
        self.constructor.as_ref()
    }
}

/// Free-standing function registered under a string identifier
#[derive(Clone)]
pub struct Function {
    pub(crate) signature: Signature,
    pub(crate) body: BoxedInstantiator,
}

impl Function {
    #[inline]
    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    #[inline]
    pub(crate) fn call(&self, arguments: Arguments) -> Result<BoxAnyThreadSafety, InstantiateErrorKind> {
        self.body.call(arguments)
    }
}

type BoxedMethodBody = RcThreadSafety<dyn Fn(&dyn Any, Arguments) -> Result<BoxAnyThreadSafety, InstantiateErrorKind> + Send + Sync>;

/// Method registered for a receiver type
#[derive(Clone)]
pub struct Method {
    pub(crate) receiver: &'static str,
    pub(crate) signature: Signature,
    pub(crate) body: BoxedMethodBody,
}

impl Method {
    #[inline]
    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    #[inline]
    #[must_use]
    pub fn receiver(&self) -> &'static str {
        self.receiver
    }

    #[inline]
    pub(crate) fn call(&self, target: &dyn Any, arguments: Arguments) -> Result<BoxAnyThreadSafety, InstantiateErrorKind> {
        (self.body)(target, arguments)
    }
}

#[must_use]
fn boxed_method<T, F, R>(body: F) -> BoxedMethodBody
where
    T: 'static,
    F: Fn(&T, Arguments) -> Result<R, InstantiateErrorKind> + Send + Sync + 'static,
    R: SendSafety + SyncSafety + 'static,
{
    RcThreadSafety::new(move |target: &dyn Any, arguments: Arguments| -> Result<BoxAnyThreadSafety, InstantiateErrorKind> {
        let Some(target) = target.downcast_ref::<T>() else {
            return Err(ArgumentErrorKind::IncorrectType {
                position: 0,
                expected: type_name::<T>(),
            }
            .into());
        };
        let response = body(target, arguments)?;

        debug!("Method called");

        Ok(Box::new(response) as BoxAnyThreadSafety)
    })
}

pub struct RegistryBuilder {
    classes: BTreeMap<Cow<'static, str>, ClassDefinition>,
    functions: BTreeMap<Cow<'static, str>, Function>,
    methods: BTreeMap<TypeId, BTreeMap<Cow<'static, str>, Method>>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            classes: BTreeMap::new(),
            functions: BTreeMap::new(),
            methods: BTreeMap::new(),
        }
    }

    /// Registers a class without a constructor.
    /// The instantiator is called with no arguments and any data passed to the build is ignored.
    #[inline]
    #[must_use]
    pub fn provide<F, T>(mut self, name: impl Into<Cow<'static, str>>, instantiator: F) -> Self
    where
        F: Fn() -> Result<T, InstantiateErrorKind> + Send + Sync + 'static,
        T: SendSafety + SyncSafety + 'static,
    {
        self.add_class(name.into(), None, boxed_instantiator(move |_| instantiator()));
        self
    }

    /// Registers a class with a constructor.
    /// The instantiator receives one argument per parameter, in declaration order.
    #[inline]
    #[must_use]
    pub fn provide_with_constructor<F, T>(
        mut self,
        name: impl Into<Cow<'static, str>>,
        parameters: impl IntoIterator<Item = Parameter>,
        instantiator: F,
    ) -> Self
    where
        F: Fn(Arguments) -> Result<T, InstantiateErrorKind> + Send + Sync + 'static,
        T: SendSafety + SyncSafety + 'static,
    {
        self.add_class(name.into(), Some(Signature::new(parameters)), boxed_instantiator(instantiator));
        self
    }

    #[inline]
    #[must_use]
    pub fn function<F, R>(mut self, name: impl Into<Cow<'static, str>>, parameters: impl IntoIterator<Item = Parameter>, body: F) -> Self
    where
        F: Fn(Arguments) -> Result<R, InstantiateErrorKind> + Send + Sync + 'static,
        R: SendSafety + SyncSafety + 'static,
    {
        self.functions.insert(
            name.into(),
            Function {
                signature: Signature::new(parameters),
                body: boxed_instantiator(body),
            },
        );
        self
    }

    /// Registers a method callable on any receiver of type `T`
    #[inline]
    #[must_use]
    pub fn method<T, F, R>(mut self, name: impl Into<Cow<'static, str>>, parameters: impl IntoIterator<Item = Parameter>, body: F) -> Self
    where
        T: 'static,
        F: Fn(&T, Arguments) -> Result<R, InstantiateErrorKind> + Send + Sync + 'static,
        R: SendSafety + SyncSafety + 'static,
    {
        self.methods.entry(TypeId::of::<T>()).or_default().insert(
            name.into(),
            Method {
                receiver: type_name::<T>(),
                signature: Signature::new(parameters),
                body: boxed_method(body),
            },
        );
        self
    }

    #[inline]
    #[must_use]
    pub fn build(self) -> Registry {
        Registry {
            classes: self.classes,
            functions: self.functions,
            methods: self.methods,
        }
    }
}

impl RegistryBuilder {
    #[inline]
    pub(crate) fn add_class(
        &mut self,
        name: Cow<'static, str>,
        constructor: Option<Signature>,
        instantiator: BoxedInstantiator,
    ) -> Option<ClassDefinition> {
        self.classes.insert(
            name.clone(),
            ClassDefinition {
                name,
                constructor,
                instantiator,
            },
        )
    }
}

/// Immutable set of classes, functions and methods available for autowiring
#[derive(Clone, Default)]
pub struct Registry {
    classes: BTreeMap<Cow<'static, str>, ClassDefinition>,
    functions: BTreeMap<Cow<'static, str>, Function>,
    methods: BTreeMap<TypeId, BTreeMap<Cow<'static, str>, Method>>,
}

impl Registry {
    #[inline]
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    #[inline]
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ClassDefinition> {
        self.classes.get(name)
    }

    #[inline]
    #[must_use]
    pub fn contains_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    #[inline]
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    #[inline]
    #[must_use]
    pub fn method(&self, receiver: TypeId, name: &str) -> Option<&Method> {
        self.methods.get(&receiver).and_then(|methods| methods.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::{Registry, RegistryBuilder};
    use crate::{
        arguments::{Argument, Arguments},
        parameter::Parameter,
    };

    use alloc::{boxed::Box, vec};
    use core::any::{Any, TypeId};

    struct Bar;
    struct Foo(#[allow(dead_code)] Bar);

    #[test]
    fn test_build_empty() {
        let registry = RegistryBuilder::new().build();
        assert!(!registry.contains_class("Foo"));
        assert!(registry.function("main").is_none());
    }

    #[test]
    fn test_build_classes() {
        let registry = Registry::builder()
            .provide("Bar", || Ok(Bar))
            .provide_with_constructor("Foo", [Parameter::typed("bar", "Bar")], |mut args| Ok(Foo(args.take(0)?)))
            .provide("Bar", || Ok(Bar))
            .build();

        let bar = registry.class("Bar").unwrap();
        assert_eq!(bar.name(), "Bar");
        assert!(bar.constructor().is_none());

        let foo = registry.class("Foo").unwrap();
        let constructor = foo.constructor().unwrap();
        assert_eq!(constructor.len(), 1);
        assert_eq!(constructor.parameters()[0].declared_type(), Some("Bar"));
    }

    #[test]
    fn test_methods_are_keyed_by_receiver() {
        struct Counter(u32);

        let registry = RegistryBuilder::new()
            .method("add", [Parameter::new("n")], |counter: &Counter, mut args| Ok(counter.0 + args.take::<u32>(0)?))
            .build();

        assert!(registry.method(TypeId::of::<Bar>(), "add").is_none());

        let method = registry.method(TypeId::of::<Counter>(), "add").unwrap();
        assert!(method.receiver().ends_with("Counter"));

        let target: &dyn Any = &Counter(1);
        let result = method
            .call(target, Arguments::new(vec![Argument::Value(Box::new(2u32))]))
            .unwrap();
        assert_eq!(*result.downcast::<u32>().unwrap(), 3);
    }
}
