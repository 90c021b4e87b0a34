use alloc::{borrow::Cow, boxed::Box, vec::Vec};
use core::fmt::{self, Debug, Formatter};

use crate::{
    arguments::Argument,
    utils::thread_safety::{BoxAnyThreadSafety, RcThreadSafety, SendSafety, SyncSafety},
};

#[cfg(feature = "thread_safe")]
type DefaultFactory = RcThreadSafety<dyn Fn() -> BoxAnyThreadSafety + Send + Sync>;
#[cfg(not(feature = "thread_safe"))]
type DefaultFactory = RcThreadSafety<dyn Fn() -> BoxAnyThreadSafety>;

/// Default value of an optional parameter
#[derive(Clone)]
pub enum DefaultValue {
    Null,
    Value(DefaultFactory),
}

impl DefaultValue {
    #[must_use]
    pub fn new<T: Clone + SendSafety + SyncSafety + 'static>(value: T) -> Self {
        Self::Value(RcThreadSafety::new(move || Box::new(value.clone()) as BoxAnyThreadSafety))
    }

    /// Each call produces a fresh copy of the declared default
    #[inline]
    #[must_use]
    pub(crate) fn produce(&self) -> Argument {
        match self {
            Self::Null => Argument::Null,
            Self::Value(factory) => Argument::Value(factory()),
        }
    }
}

impl Debug for DefaultValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Value(_) => f.write_str("Value(..)"),
        }
    }
}

/// Structural view of one formal parameter of a constructor, function or method
#[derive(Debug, Clone)]
pub struct Parameter {
    pub(crate) position: usize,
    pub(crate) name: Cow<'static, str>,
    pub(crate) declared_type: Option<Cow<'static, str>>,
    pub(crate) default: Option<DefaultValue>,
}

impl Parameter {
    /// Creates a required parameter without a declared class.
    /// The position is assigned when the parameter is collected into a [`Signature`];
    /// a bare parameter slice is resolved by slice index instead.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            position: 0,
            name: name.into(),
            declared_type: None,
            default: None,
        }
    }

    /// Creates a required parameter constrained to the class registered under `class`
    #[inline]
    #[must_use]
    pub fn typed(name: impl Into<Cow<'static, str>>, class: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name).with_type(class)
    }

    #[inline]
    #[must_use]
    pub fn with_type(mut self, class: impl Into<Cow<'static, str>>) -> Self {
        self.declared_type = Some(class.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_default<T: Clone + SendSafety + SyncSafety + 'static>(mut self, value: T) -> Self {
        self.default = Some(DefaultValue::new(value));
        self
    }

    /// Marks the parameter optional with null as its default
    #[inline]
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.default = Some(DefaultValue::Null);
        self
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn declared_type(&self) -> Option<&str> {
        self.declared_type.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.default.is_some()
    }

    #[inline]
    #[must_use]
    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }
}

/// Ordered parameter list of a callable. Positions follow the declaration order.
#[derive(Debug, Clone, Default)]
pub struct Signature {
    parameters: Box<[Parameter]>,
}

impl Signature {
    #[must_use]
    pub fn new(parameters: impl IntoIterator<Item = Parameter>) -> Self {
        let parameters: Vec<_> = parameters
            .into_iter()
            .enumerate()
            .map(|(position, parameter)| Parameter { position, ..parameter })
            .collect();

        Self {
            parameters: parameters.into_boxed_slice(),
        }
    }

    #[inline]
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}
