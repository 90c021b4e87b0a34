use alloc::vec::Vec;
use tracing::{debug, debug_span, warn};

use crate::{
    arguments::{Argument, Arguments},
    data::Data,
    errors::ResolveErrorKind,
    locator::Locator,
    parameter::Parameter,
    resolver::Resolver,
};

impl<L: Locator + ?Sized> Resolver<'_, L> {
    /// Produces one argument per parameter. A parameter's position is its index in `parameters`.
    /// For each parameter the first matching source wins:
    /// 1. the data entry keyed by its position
    /// 2. the data entry keyed by its name
    /// 3. an instance of its declared class, built with empty data.
    ///    The parameter's optionality is passed on, so an optional parameter of an unknown class resolves to null
    /// 4. its default value
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::MissingArgument`] if no source matches
    /// - Propagates any error of a nested build unchanged
    pub(crate) fn resolve_arguments(&mut self, parameters: &[Parameter], mut data: Data) -> Result<Arguments, ResolveErrorKind> {
        let mut arguments = Vec::with_capacity(parameters.len());
        for (position, parameter) in parameters.iter().enumerate() {
            let span = debug_span!("resolve", parameter = parameter.name(), position);
            let _guard = span.enter();

            arguments.push(self.resolve_argument(position, parameter, &mut data)?);
        }

        if !data.is_empty() {
            debug!(unused = data.len(), "Unused data entries ignored");
        }

        Ok(Arguments::new(arguments))
    }

    fn resolve_argument(&mut self, position: usize, parameter: &Parameter, data: &mut Data) -> Result<Argument, ResolveErrorKind> {
        if let Some(value) = data.take_position(position) {
            debug!("Found in data by position");
            return Ok(Argument::Value(value));
        }
        if let Some(value) = data.take_name(&parameter.name) {
            debug!("Found in data by name");
            return Ok(Argument::Value(value));
        }
        if let Some(class) = parameter.declared_type() {
            debug!(class, "Building declared type");
            return match self.build(class, Data::new(), parameter.is_optional())? {
                Some(instance) => Ok(Argument::Value(instance)),
                None => Ok(Argument::Null),
            };
        }
        if let Some(default) = parameter.default_value() {
            debug!("Default value used");
            return Ok(default.produce());
        }

        let err = ResolveErrorKind::MissingArgument {
            name: parameter.name.clone(),
            position,
        };
        warn!("{}", err);
        Err(err)
    }
}
