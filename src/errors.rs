mod argument;
mod instantiate;
mod resolve;

pub use argument::ArgumentErrorKind;
pub use instantiate::InstantiateErrorKind;
pub use resolve::ResolveErrorKind;

pub type InstantiateResult<T> = Result<T, InstantiateErrorKind>;
