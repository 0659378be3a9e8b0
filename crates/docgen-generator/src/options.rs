//! Typed access to field rule options.
//!
//! Options arrive as arbitrary JSON. Numbers may be given as JSON integers,
//! integral floats or numeric strings; `null` counts as absent.

use crate::error::SynthesisError;
use docgen_core::Options;
use serde_json::Value;

/// Reads options for one type tag, producing `InvalidOption` errors that
/// name the tag and option involved.
pub struct OptionReader<'a> {
    tag: &'a str,
    options: &'a Options,
}

impl<'a> OptionReader<'a> {
    pub fn new(tag: &'a str, options: &'a Options) -> Self {
        Self { tag, options }
    }

    fn value(&self, key: &str) -> Option<&'a Value> {
        self.options.get(key).filter(|v| !v.is_null())
    }

    /// Build an `InvalidOption` error for `key`.
    pub fn invalid(&self, key: &str, reason: impl Into<String>) -> SynthesisError {
        SynthesisError::invalid_option(self.tag, key, reason)
    }

    /// Integer option, or `None` when absent.
    pub fn opt_int(&self, key: &str) -> Result<Option<i64>, SynthesisError> {
        match self.value(key) {
            None => Ok(None),
            Some(value) => parse_int(value)
                .map(Some)
                .ok_or_else(|| self.invalid(key, format!("expected an integer, got {value}"))),
        }
    }

    /// Integer option with a default.
    pub fn int(&self, key: &str, default: i64) -> Result<i64, SynthesisError> {
        Ok(self.opt_int(key)?.unwrap_or(default))
    }

    /// String option, or `None` when absent.
    pub fn opt_str(&self, key: &str) -> Result<Option<&'a str>, SynthesisError> {
        match self.value(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(self.invalid(key, format!("expected a string, got {other}"))),
        }
    }

    /// String option with a default.
    pub fn str(&self, key: &str, default: &'a str) -> Result<&'a str, SynthesisError> {
        Ok(self.opt_str(key)?.unwrap_or(default))
    }

    /// List-of-strings option, or `None` when absent.
    pub fn opt_str_list(&self, key: &str) -> Result<Option<Vec<&'a str>>, SynthesisError> {
        match self.value(key) {
            None => Ok(None),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str().ok_or_else(|| {
                        self.invalid(key, format!("expected a list of strings, found {item}"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            Some(other) => Err(self.invalid(key, format!("expected a list of strings, got {other}"))),
        }
    }
}

fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
