use alloc::{borrow::Cow, boxed::Box, string::String};
use core::any::TypeId;

use super::instantiate::InstantiateErrorKind;

#[derive(thiserror::Error, Debug)]
pub enum ResolveErrorKind {
    #[error("Class `{identifier}` not found in registry")]
    ClassNotFound { identifier: String },
    #[error("Missing argument `{name}` at position {position}")]
    MissingArgument { name: Cow<'static, str>, position: usize },
    #[error("Cyclic dependency detected: {}", .path.join(" -> "))]
    CyclicDependency { path: Box<[String]> },
    #[error("Function `{name}` not found in registry")]
    FunctionNotFound { name: String },
    #[error("Method `{name}` not found for receiver {target:?}")]
    MethodNotFound { name: String, target: TypeId },
    #[error("Incorrect instance type of class `{identifier}`. Expected: {expected}")]
    IncorrectType { identifier: String, expected: &'static str },
    #[error(transparent)]
    Instantiate(#[from] InstantiateErrorKind),
}
