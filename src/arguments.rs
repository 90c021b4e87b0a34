use alloc::vec::Vec;
use core::any::type_name;

use crate::{errors::ArgumentErrorKind, utils::thread_safety::BoxAnyThreadSafety};

/// One resolved argument
pub enum Argument {
    Value(BoxAnyThreadSafety),
    /// Produced for an optional parameter whose class isn't registered,
    /// or for a nullable parameter without a concrete default
    Null,
}

impl Argument {
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Ordered argument list handed to a constructor, function or method.
///
/// Holds exactly one slot per declared parameter. Values are moved out with [`Self::take`]
/// or [`Self::take_optional`], which check the requested type against the stored value.
pub struct Arguments {
    slots: Vec<Option<Argument>>,
}

impl Arguments {
    #[inline]
    #[must_use]
    pub fn new(arguments: Vec<Argument>) -> Self {
        Self {
            slots: arguments.into_iter().map(Some).collect(),
        }
    }

    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self { slots: Vec::new() }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Takes a non-null argument.
    ///
    /// # Errors
    /// - [`ArgumentErrorKind::Null`] if the argument was resolved to null
    /// - see [`Self::take_optional`] for the rest
    pub fn take<T: 'static>(&mut self, position: usize) -> Result<T, ArgumentErrorKind> {
        self.take_optional(position)?.ok_or(ArgumentErrorKind::Null { position })
    }

    /// Takes an argument that may be null.
    /// On a type mismatch the value stays in place, so it can be taken again with the right type.
    ///
    /// # Errors
    /// - [`ArgumentErrorKind::OutOfRange`] if there is no parameter at `position`
    /// - [`ArgumentErrorKind::Taken`] if the argument has been taken before
    /// - [`ArgumentErrorKind::IncorrectType`] if the value isn't a `T`
    pub fn take_optional<T: 'static>(&mut self, position: usize) -> Result<Option<T>, ArgumentErrorKind> {
        let len = self.slots.len();
        let Some(slot) = self.slots.get_mut(position) else {
            return Err(ArgumentErrorKind::OutOfRange { position, len });
        };

        match slot.take() {
            None => Err(ArgumentErrorKind::Taken { position }),
            Some(Argument::Null) => Ok(None),
            Some(Argument::Value(value)) => match value.downcast::<T>() {
                Ok(value) => Ok(Some(*value)),
                Err(value) => {
                    *slot = Some(Argument::Value(value));
                    Err(ArgumentErrorKind::IncorrectType {
                        position,
                        expected: type_name::<T>(),
                    })
                }
            },
        }
    }

    /// Borrows an argument without taking it. Returns `None` for null, taken, missing or mistyped values.
    #[must_use]
    pub fn get<T: 'static>(&self, position: usize) -> Option<&T> {
        match self.slots.get(position)? {
            Some(Argument::Value(value)) => value.downcast_ref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_null(&self, position: usize) -> bool {
        matches!(self.slots.get(position), Some(Some(Argument::Null)))
    }
}

#[cfg(test)]
mod tests {
    use super::{Argument, Arguments};
    use crate::errors::ArgumentErrorKind;

    use alloc::{boxed::Box, string::String, vec};

    #[test]
    fn test_take() {
        let mut arguments = Arguments::new(vec![Argument::Value(Box::new(String::from("A"))), Argument::Null]);
        assert_eq!(arguments.len(), 2);
        assert_eq!(arguments.get::<String>(0).map(String::as_str), Some("A"));
        assert!(arguments.is_null(1));

        assert_eq!(arguments.take::<String>(0).unwrap(), "A");
        assert_eq!(arguments.take::<String>(0), Err(ArgumentErrorKind::Taken { position: 0 }));
        assert_eq!(arguments.take_optional::<String>(1), Ok(None));
        assert_eq!(arguments.take::<String>(2), Err(ArgumentErrorKind::OutOfRange { position: 2, len: 2 }));
    }

    #[test]
    fn test_take_null() {
        let mut arguments = Arguments::new(vec![Argument::Null]);
        assert_eq!(arguments.take::<u8>(0), Err(ArgumentErrorKind::Null { position: 0 }));
    }

    #[test]
    fn test_incorrect_type_keeps_value() {
        let mut arguments = Arguments::new(vec![Argument::Value(Box::new(42i32))]);

        assert!(matches!(
            arguments.take::<u8>(0),
            Err(ArgumentErrorKind::IncorrectType { position: 0, .. })
        ));
        assert_eq!(arguments.take::<i32>(0), Ok(42));
    }
}
