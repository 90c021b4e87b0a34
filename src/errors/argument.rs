#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentErrorKind {
    #[error("Argument position {position} is out of range. Arguments count: {len}")]
    OutOfRange { position: usize, len: usize },
    #[error("Argument at position {position} has already been taken")]
    Taken { position: usize },
    #[error("Argument at position {position} is null")]
    Null { position: usize },
    #[error("Incorrect argument type at position {position}. Expected: {expected}")]
    IncorrectType { position: usize, expected: &'static str },
}
