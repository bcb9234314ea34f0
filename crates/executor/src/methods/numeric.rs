//! Numeric coercion methods: `asInteger`, `asLong`, `asFloat`, `asDouble`.
//!
//! All four share one shape:
//! - a number is narrowed or widened to the target width
//! - any other non-null value is rendered as text, trimmed and parsed
//! - null stays null

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;

use orbis_core::{Record, Value};

use super::MethodFunction;
use crate::context::CommandContext;
use crate::{Error, Result};

/// A numeric type a value can be coerced to.
pub trait NumericTarget: Copy + FromStr + fmt::Debug + Send + Sync + 'static {
    /// Method name producing this type.
    const METHOD: &'static str;
    /// Type name used in error messages.
    const TYPE_NAME: &'static str;

    /// Convert an already-numeric value. `None` if `value` is not a number.
    fn cast(value: &Value) -> Option<Self>;

    /// Wrap into a [`Value`] of matching width.
    fn into_value(self) -> Value;
}

macro_rules! numeric_target {
    ($ty:ty, $method:literal, $type_name:literal, $variant:ident) => {
        impl NumericTarget for $ty {
            const METHOD: &'static str = $method;
            const TYPE_NAME: &'static str = $type_name;

            fn cast(value: &Value) -> Option<Self> {
                match value {
                    Value::Integer(n) => Some(*n as $ty),
                    Value::Long(n) => Some(*n as $ty),
                    Value::Float(n) => Some(*n as $ty),
                    Value::Double(n) => Some(*n as $ty),
                    _ => None,
                }
            }

            fn into_value(self) -> Value {
                Value::$variant(self)
            }
        }
    };
}

numeric_target!(i32, "asInteger", "integer", Integer);
numeric_target!(i64, "asLong", "long", Long);
numeric_target!(f32, "asFloat", "float", Float);
numeric_target!(f64, "asDouble", "double", Double);

/// The coercion method for target type `T`.
pub struct NumericCoercion<T> {
    _target: PhantomData<fn() -> T>,
}

impl<T: NumericTarget> NumericCoercion<T> {
    /// Create the method.
    pub fn new() -> Self {
        NumericCoercion {
            _target: PhantomData,
        }
    }

    /// Coerce one value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] when the text form is not a valid `T`.
    pub fn coerce(&self, value: Value) -> Result<Value> {
        if let Some(n) = T::cast(&value) {
            return Ok(n.into_value());
        }
        if value.is_null() {
            return Ok(Value::Null);
        }
        let text = value.to_string();
        let trimmed = text.trim();
        trimmed
            .parse::<T>()
            .map(NumericTarget::into_value)
            .map_err(|_| Error::Parse {
                input: trimmed.to_string(),
                target: T::TYPE_NAME.to_string(),
            })
    }
}

impl<T: NumericTarget> Default for NumericCoercion<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: NumericTarget> fmt::Debug for NumericCoercion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NumericCoercion").field(&T::METHOD).finish()
    }
}

impl<T: NumericTarget> MethodFunction for NumericCoercion<T> {
    fn name(&self) -> &'static str {
        T::METHOD
    }

    fn apply(
        &self,
        _ctx: &CommandContext,
        _row: Option<&Record>,
        value: Value,
        _args: &[Value],
    ) -> Result<Value> {
        self.coerce(value)
    }
}

pub(super) fn builtin() -> Vec<Arc<dyn MethodFunction>> {
    vec![
        Arc::new(NumericCoercion::<i32>::new()),
        Arc::new(NumericCoercion::<i64>::new()),
        Arc::new(NumericCoercion::<f32>::new()),
        Arc::new(NumericCoercion::<f64>::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn as_float(v: impl Into<Value>) -> Result<Value> {
        NumericCoercion::<f32>::new().coerce(v.into())
    }

    #[test]
    fn test_as_float_numeric_passthrough() {
        assert_eq!(as_float(3i32).unwrap(), Value::Float(3.0));
        assert_eq!(as_float(7i64).unwrap(), Value::Float(7.0));
        assert_eq!(as_float(0.5f64).unwrap(), Value::Float(0.5));
        assert_eq!(as_float(1.25f32).unwrap(), Value::Float(1.25));
    }

    #[test]
    fn test_as_float_parses_trimmed_text() {
        assert_eq!(as_float(" 3.14 ").unwrap(), Value::Float(3.14));
        assert_eq!(as_float("-2").unwrap(), Value::Float(-2.0));
    }

    #[test]
    fn test_as_float_null_propagates() {
        assert_eq!(as_float(Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn test_as_float_rejects_garbage() {
        assert_eq!(
            as_float("abc"),
            Err(Error::Parse {
                input: "abc".into(),
                target: "float".into()
            })
        );
        assert!(as_float(true).is_err());
    }

    #[test]
    fn test_as_integer_truncates_and_parses_strictly() {
        let m = NumericCoercion::<i32>::new();
        assert_eq!(m.coerce(Value::Double(9.99)).unwrap(), Value::Integer(9));
        assert_eq!(m.coerce(Value::from(" 42")).unwrap(), Value::Integer(42));
        assert!(matches!(m.coerce(Value::from("4.2")), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_as_long_and_as_double() {
        let long = NumericCoercion::<i64>::new();
        assert_eq!(long.coerce(Value::Integer(-5)).unwrap(), Value::Long(-5));
        assert_eq!(
            long.coerce(Value::from("9000000000")).unwrap(),
            Value::Long(9_000_000_000)
        );

        let double = NumericCoercion::<f64>::new();
        assert_eq!(double.coerce(Value::Float(0.5)).unwrap(), Value::Double(0.5));
        assert_eq!(double.coerce(Value::Null).unwrap(), Value::Null);
    }

    proptest! {
        #[test]
        fn prop_as_float_never_fails_on_numbers(n in any::<i64>()) {
            let out = as_float(n).unwrap();
            prop_assert_eq!(out, Value::Float(n as f32));
        }

        #[test]
        fn prop_as_long_parses_own_rendering(n in any::<i64>()) {
            let long = NumericCoercion::<i64>::new();
            let text = format!("  {}  ", n);
            prop_assert_eq!(long.coerce(Value::from(text)).unwrap(), Value::Long(n));
        }
    }
}
