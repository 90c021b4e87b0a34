use super::argument::ArgumentErrorKind;

/// Error returned by constructors, functions and methods registered in [`crate::Registry`].
///
/// Both variants are transparent, so a failure raised by user code reaches the caller
/// with its original message and source chain.
#[derive(thiserror::Error, Debug)]
pub enum InstantiateErrorKind {
    #[error(transparent)]
    Argument(#[from] ArgumentErrorKind),
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}
