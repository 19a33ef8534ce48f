//! Provider trait - the driver entry point.

use async_trait::async_trait;
use serde_json::Value;

use crate::command::DbCommand;
use crate::conn::DbConnection;
use crate::error::DataError;
use crate::param::{ParamStyle, ParamType, Parameter};

/// Factory for connections and parameters of one concrete store.
///
/// A provider fixes the store's parameter naming scheme, so pipeline code
/// can speak in column names and let [`param_name`](Self::param_name)
/// produce the placeholder each driver expects.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// The sigil scheme this store uses for parameter placeholders.
    fn param_style(&self) -> ParamStyle;

    /// Opens a connection using the provider's default target.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Connection`] when the store cannot be reached.
    async fn connect(&self) -> Result<Box<dyn DbConnection>, DataError>;

    /// Opens a connection to an explicit target.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Connection`] when `dsn` is malformed or the
    /// store cannot be reached.
    async fn connect_to(&self, dsn: &str) -> Result<Box<dyn DbConnection>, DataError>;

    /// Derives the placeholder name for `column`.
    fn param_name(&self, column: &str) -> String {
        self.param_style().decorate(column)
    }

    /// Creates a parameter associated with `column`, named per the
    /// provider's style.
    fn parameter(&self, column: &str) -> Parameter {
        Parameter::new(column, self.param_name(column))
    }

    /// Creates a typed parameter associated with `column`.
    fn typed_parameter(&self, column: &str, ty: ParamType) -> Parameter {
        self.parameter(column).with_type(ty)
    }

    /// Creates a typed, sized parameter associated with `column`.
    fn sized_parameter(&self, column: &str, ty: ParamType, size: u32) -> Parameter {
        self.parameter(column).with_type(ty).with_size(size)
    }

    /// Sets the value of the parameter derived from `column` on `command`.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::UnknownParameter`] when the derived name is
    /// not registered on the command.
    fn set_value(
        &self,
        command: &mut dyn DbCommand,
        column: &str,
        value: Value,
    ) -> Result<(), DataError> {
        command.set_param(&self.param_name(column), value)
    }

    /// Sets parameter values positionally, in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::IndexOutOfRange`] when more values are given
    /// than the command has parameters.
    fn set_values(
        &self,
        command: &mut dyn DbCommand,
        values: Vec<Value>,
    ) -> Result<(), DataError> {
        for (index, value) in values.into_iter().enumerate() {
            command.set_param_at(index, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param::ParamSet;
    use ferry_core::Schema;
    use ferry_transport::RecordCursor;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    struct ColonProvider;

    #[async_trait]
    impl DataProvider for ColonProvider {
        fn param_style(&self) -> ParamStyle {
            ParamStyle::ColonPrefix
        }

        async fn connect(&self) -> Result<Box<dyn DbConnection>, DataError> {
            Err(DataError::connection("not backed by a store"))
        }

        async fn connect_to(&self, _dsn: &str) -> Result<Box<dyn DbConnection>, DataError> {
            Err(DataError::connection("not backed by a store"))
        }
    }

    #[derive(Debug)]
    struct ParamOnlyCommand {
        params: ParamSet,
    }

    #[async_trait]
    impl DbCommand for ParamOnlyCommand {
        fn text(&self) -> &str {
            ""
        }

        fn params(&self) -> &[Parameter] {
            self.params.as_slice()
        }

        fn add_param(&mut self, param: Parameter) -> Result<(), DataError> {
            self.params.add(param)
        }

        fn set_param(&mut self, name: &str, value: Value) -> Result<(), DataError> {
            self.params.set(name, value)
        }

        fn set_param_at(&mut self, index: usize, value: Value) -> Result<(), DataError> {
            self.params.set_at(index, value)
        }

        async fn schema(&mut self) -> Result<Schema, DataError> {
            Err(DataError::query("no schema"))
        }

        async fn query(&mut self) -> Result<Box<dyn RecordCursor>, DataError> {
            Err(DataError::query("not executable"))
        }

        async fn execute(&mut self) -> Result<u64, DataError> {
            Err(DataError::query("not executable"))
        }
    }

    #[test]
    fn parameters_follow_the_provider_style() {
        let provider = ColonProvider;
        assert_eq!(provider.param_name("amount"), ":amount");

        let param = provider.parameter("amount");
        assert_eq!(param.column(), "amount");
        assert_eq!(param.name(), ":amount");

        let typed = provider.typed_parameter("id", ParamType::Int);
        assert_eq!(typed.ty(), Some(ParamType::Int));
        assert_eq!(typed.size(), None);

        let sized = provider.sized_parameter("name", ParamType::Text, 32);
        assert_eq!(sized.ty(), Some(ParamType::Text));
        assert_eq!(sized.size(), Some(32));
    }

    #[test]
    fn set_value_addresses_by_derived_name() {
        let provider = ColonProvider;
        let mut command = ParamOnlyCommand {
            params: ParamSet::new(),
        };
        command.add_param(provider.parameter("id")).unwrap();

        provider.set_value(&mut command, "id", json!(7)).unwrap();
        assert_eq!(command.params()[0].value(), &json!(7));

        let err = provider
            .set_value(&mut command, "missing", json!(0))
            .unwrap_err();
        assert!(matches!(err, DataError::UnknownParameter { name } if name == ":missing"));
    }

    #[test]
    fn set_values_is_positional() {
        let provider = ColonProvider;
        let mut command = ParamOnlyCommand {
            params: ParamSet::new(),
        };
        command.add_param(provider.parameter("id")).unwrap();
        command.add_param(provider.parameter("name")).unwrap();

        provider
            .set_values(&mut command, vec![json!(7), json!("x")])
            .unwrap();
        assert_eq!(command.params()[0].value(), &json!(7));
        assert_eq!(command.params()[1].value(), &json!("x"));

        let err = provider
            .set_values(&mut command, vec![json!(1), json!(2), json!(3)])
            .unwrap_err();
        assert!(matches!(err, DataError::IndexOutOfRange { index: 2, .. }));
    }
}
