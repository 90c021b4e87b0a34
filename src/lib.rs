#![no_std]

extern crate alloc;

pub(crate) mod argument_resolver;
pub(crate) mod arguments;
pub(crate) mod class_resolver;
pub(crate) mod container;
pub(crate) mod data;
pub(crate) mod errors;
pub(crate) mod instantiator;
pub(crate) mod invoker;
pub(crate) mod locator;
pub(crate) mod parameter;
pub(crate) mod registry;
pub(crate) mod resolver;
pub(crate) mod service;

pub mod utils;

pub use arguments::{Argument, Arguments};
pub use container::Container;
pub use data::{Data, Key};
pub use errors::{ArgumentErrorKind, InstantiateErrorKind, InstantiateResult, ResolveErrorKind};
pub use locator::{Aliases, Locator, MemoryLocator, ALIASES_KEY};
pub use parameter::{DefaultValue, Parameter, Signature};
pub use registry::{ClassDefinition, Function, Method, Registry, RegistryBuilder};
pub use utils::thread_safety::BoxAnyThreadSafety as Instance;
