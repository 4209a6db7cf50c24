//! String-to-type converters keyed by type identity.
//!
//! Registration is generic over the target type, so the boxed converter
//! stored under `TypeId::of::<T>()` always produces a `T`. Lookup happens at
//! dispatch time, which lets callers add converters after registering the
//! commands that need them.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt::{self, Display};
use std::str::FromStr;

use tracing::debug;

use crate::error::{DispatchError, Result};

type ConvertFn<T> = Box<dyn Fn(&str) -> std::result::Result<T, String>>;

/// Registry of converters from a single token to a typed value.
pub struct ConverterRegistry {
    converters: HashMap<TypeId, Box<dyn Any>>,
}

impl ConverterRegistry {
    /// Create a registry with converters for `i32`, `f32`, `f64` and `String`.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_parse::<i32>();
        registry.register_parse::<f32>();
        registry.register_parse::<f64>();
        registry.register(|token: &str| Ok::<_, Infallible>(token.to_string()));
        registry
    }

    /// Create a registry with no converters at all.
    pub fn empty() -> Self {
        Self {
            converters: HashMap::new(),
        }
    }

    /// Store the converter for `T`, replacing any previous one.
    pub fn register<T, E, F>(&mut self, converter: F)
    where
        T: 'static,
        E: Display,
        F: Fn(&str) -> std::result::Result<T, E> + 'static,
    {
        let convert: ConvertFn<T> =
            Box::new(move |token: &str| converter(token).map_err(|e| e.to_string()));

        if self
            .converters
            .insert(TypeId::of::<T>(), Box::new(convert))
            .is_some()
        {
            debug!(type_name = type_name::<T>(), "replaced converter");
        } else {
            debug!(type_name = type_name::<T>(), "registered converter");
        }
    }

    /// Register `str::parse` as the converter for `T`.
    pub fn register_parse<T>(&mut self)
    where
        T: FromStr + 'static,
        T::Err: Display,
    {
        self.register(|token: &str| token.parse::<T>());
    }

    /// Convert a token into a `T` using the registered converter.
    pub fn convert<T: 'static>(&self, token: &str) -> Result<T> {
        let convert = self
            .converters
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast_ref::<ConvertFn<T>>())
            .ok_or(DispatchError::UnknownType {
                type_name: type_name::<T>(),
            })?;

        convert(token).map_err(|reason| DispatchError::ConversionFailure {
            token: token.to_string(),
            type_name: type_name::<T>(),
            reason,
        })
    }

    /// Check whether a converter exists for `T`.
    pub fn contains<T: 'static>(&self) -> bool {
        self.converters.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("converters", &self.converters.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[derive(Debug, PartialEq)]
    struct Celsius(i32);

    #[test]
    fn defaults_cover_numbers_and_strings() {
        let registry = ConverterRegistry::new();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.convert::<i32>("-12").unwrap(), -12);
        assert_eq!(registry.convert::<f32>("1.5").unwrap(), 1.5f32);
        assert_eq!(registry.convert::<f64>("2.25").unwrap(), 2.25f64);
        assert_eq!(registry.convert::<String>("hello").unwrap(), "hello");
    }

    #[test]
    fn string_converter_accepts_anything() {
        let registry = ConverterRegistry::new();
        assert_eq!(registry.convert::<String>("").unwrap(), "");
        assert_eq!(registry.convert::<String>("not a number").unwrap(), "not a number");
    }

    #[test]
    fn malformed_numbers_fail_to_convert() {
        let registry = ConverterRegistry::new();

        let err = registry.convert::<i32>("x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConversionFailure);
        match err {
            DispatchError::ConversionFailure { token, type_name, .. } => {
                assert_eq!(token, "x");
                assert_eq!(type_name, "i32");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(registry.convert::<f64>("1.2.3").is_err());
        assert!(registry.convert::<i32>("3.5").is_err());
    }

    #[test]
    fn missing_converter_is_unknown_type() {
        let registry = ConverterRegistry::new();
        let err = registry.convert::<Celsius>("20").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownType);
        assert!(!registry.contains::<Celsius>());
    }

    #[test]
    fn custom_converter_is_used() {
        let mut registry = ConverterRegistry::new();
        registry.register(|token: &str| match token.strip_suffix('C') {
            Some(degrees) => degrees.parse::<i32>().map(Celsius).map_err(|_| "bad degrees"),
            None => Err("missing unit"),
        });

        assert!(registry.contains::<Celsius>());
        assert_eq!(registry.convert::<Celsius>("21C").unwrap(), Celsius(21));

        let err = registry.convert::<Celsius>("21").unwrap_err();
        assert_eq!(
            err,
            DispatchError::ConversionFailure {
                token: "21".to_string(),
                type_name: std::any::type_name::<Celsius>(),
                reason: "missing unit".to_string(),
            }
        );
    }

    #[test]
    fn registering_again_overwrites() {
        let mut registry = ConverterRegistry::new();
        registry.register(|token: &str| token.len().to_string().parse::<i32>());

        assert_eq!(registry.len(), 4);
        assert_eq!(registry.convert::<i32>("abcd").unwrap(), 4);
    }

    #[test]
    fn empty_registry_knows_nothing() {
        let registry = ConverterRegistry::empty();
        assert!(registry.is_empty());
        assert_eq!(
            registry.convert::<String>("a").unwrap_err().kind(),
            ErrorKind::UnknownType
        );
    }
}
