//! Conversion of `@CsvSource` literals into typed arguments

use testrig_csv::split_fields;
use testrig_model::{ConfigError, Method, ParamType, Value};

/// A test with parameters but nothing to bind them from
///
/// Not a configuration error: the test is still planned and fails only when
/// its turn comes.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("wrong number of arguments for {method}: expected {expected}, got 0")]
pub struct MissingArguments {
    pub method: String,
    pub expected: usize,
}

/// Arguments a test method is invoked with
///
/// With `@CsvSource`, the literal must yield exactly one field per declared
/// parameter. Without it, the method is called with no arguments; see
/// [`missing_arguments`] for methods that cannot take that call.
///
/// # Errors
///
/// `ArgumentCountMismatch`, `UnsupportedParameterType` or `InvalidLiteral`
pub fn bind_arguments(method: &Method, trim_fields: bool) -> Result<Vec<Value>, ConfigError> {
    let Some(literal) = method.csv_source() else {
        return Ok(Vec::new());
    };

    let params = method.params();
    let fields = split_fields(literal);
    if fields.len() != params.len() {
        return Err(ConfigError::ArgumentCountMismatch {
            method: method.name().to_string(),
            expected: params.len(),
            actual: fields.len(),
        });
    }

    fields
        .into_iter()
        .zip(params)
        .enumerate()
        .map(|(index, (field, ty))| {
            let field = if trim_fields { field.trim() } else { field };
            convert(method, index, field, ty)
        })
        .collect()
}

/// Declared parameters left unbound by a method without `@CsvSource`
#[must_use]
pub fn missing_arguments(method: &Method) -> Option<MissingArguments> {
    if method.csv_source().is_some() || method.params().is_empty() {
        return None;
    }
    Some(MissingArguments {
        method: method.name().to_string(),
        expected: method.params().len(),
    })
}

/// Convert one literal to the declared parameter type
///
/// Booleans never fail: anything other than a case-insensitive `true` is `false`.
///
/// # Errors
///
/// `UnsupportedParameterType` for [`ParamType::Other`], `InvalidLiteral` when a
/// numeric literal does not parse
pub fn convert(
    method: &Method,
    index: usize,
    literal: &str,
    ty: &ParamType,
) -> Result<Value, ConfigError> {
    let invalid = || ConfigError::InvalidLiteral {
        method: method.name().to_string(),
        index,
        literal: literal.to_string(),
        ty: ty.to_string(),
    };

    match ty {
        ParamType::Int => literal.parse().map(Value::Int).map_err(|_| invalid()),
        ParamType::Boolean => Ok(Value::Bool(literal.eq_ignore_ascii_case("true"))),
        ParamType::Double => parse_double(literal).map(Value::Double).ok_or_else(invalid),
        ParamType::Long => literal.parse().map(Value::Long).map_err(|_| invalid()),
        ParamType::Text => Ok(Value::Text(literal.to_string())),
        ParamType::Other(name) => Err(ConfigError::UnsupportedParameterType {
            method: method.name().to_string(),
            ty: name.clone(),
        }),
    }
}

/// Decimal literal in the usual source-code form
///
/// Surrounding control characters and spaces are ignored, one trailing `d`/`f`
/// type suffix is allowed, and the only spelled-out values are `NaN` and
/// `Infinity` (optionally signed), matched exactly.
fn parse_double(literal: &str) -> Option<f64> {
    let literal = literal.trim_matches(|c: char| c <= ' ');
    let (negative, unsigned) = match literal.as_bytes().first() {
        Some(b'-') => (true, &literal[1..]),
        Some(b'+') => (false, &literal[1..]),
        _ => (false, literal),
    };

    match unsigned {
        "NaN" => return Some(f64::NAN),
        "Infinity" if negative => return Some(f64::NEG_INFINITY),
        "Infinity" => return Some(f64::INFINITY),
        _ => {}
    }

    let number = literal
        .strip_suffix(['d', 'D', 'f', 'F'])
        .unwrap_or(literal);
    // Rules out the `inf`/`nan` spellings `f64::from_str` also accepts
    if number.chars().any(|c| c.is_alphabetic() && !matches!(c, 'e' | 'E')) {
        return None;
    }
    number.parse().ok()
}
