// Argument schemas and validation for tool calls
//
// A `ParameterSchema` is both the validator for untrusted arguments and the
// source of the JSON Schema advertised in `tools/list`.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;

/// Type and constraints of a single argument.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Number { min: Option<f64>, max: Option<f64> },
    Integer { min: Option<i64>, max: Option<i64> },
    Boolean,
    String { min_len: usize, max_len: Option<usize> },
    Enum(&'static [&'static str]),
    /// ISO-3166-1 alpha-2 code, upper-cased on the way in.
    CountryCode,
    /// Calendar date as `YYYY-MM-DD`.
    Date,
    /// List of API variable names, e.g. `temperature_2m`.
    VariableList,
    /// A single number or an array of numbers.
    NumberList { min: f64, max: f64, max_items: usize },
}

impl FieldKind {
    /// Short description of the expected type, used in error messages.
    pub fn expected(&self) -> String {
        match self {
            Self::Number { .. } => "number".to_string(),
            Self::Integer { .. } => "integer".to_string(),
            Self::Boolean => "boolean".to_string(),
            Self::String { .. } => "string".to_string(),
            Self::Enum(allowed) => format!("one of: {}", allowed.join(", ")),
            Self::CountryCode => "two-letter country code".to_string(),
            Self::Date => "date (YYYY-MM-DD)".to_string(),
            Self::VariableList => "array of variable names".to_string(),
            Self::NumberList { .. } => "number or array of numbers".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<Value>,
}

impl FieldSpec {
    pub fn new(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind,
            required: false,
            default: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    fn json_schema(&self) -> Value {
        let mut schema = match &self.kind {
            FieldKind::Number { min, max } => {
                let mut s = serde_json::json!({"type": "number"});
                if let Some(min) = min {
                    s["minimum"] = serde_json::json!(min);
                }
                if let Some(max) = max {
                    s["maximum"] = serde_json::json!(max);
                }
                s
            }
            FieldKind::Integer { min, max } => {
                let mut s = serde_json::json!({"type": "integer"});
                if let Some(min) = min {
                    s["minimum"] = serde_json::json!(min);
                }
                if let Some(max) = max {
                    s["maximum"] = serde_json::json!(max);
                }
                s
            }
            FieldKind::Boolean => serde_json::json!({"type": "boolean"}),
            FieldKind::String { min_len, max_len } => {
                let mut s = serde_json::json!({"type": "string"});
                if *min_len > 0 {
                    s["minLength"] = serde_json::json!(min_len);
                }
                if let Some(max_len) = max_len {
                    s["maxLength"] = serde_json::json!(max_len);
                }
                s
            }
            FieldKind::Enum(allowed) => serde_json::json!({"type": "string", "enum": allowed}),
            FieldKind::CountryCode => serde_json::json!({
                "type": "string",
                "pattern": "^[A-Za-z]{2}$"
            }),
            FieldKind::Date => serde_json::json!({
                "type": "string",
                "format": "date",
                "pattern": "^\\d{4}-\\d{2}-\\d{2}$"
            }),
            FieldKind::VariableList => serde_json::json!({
                "type": "array",
                "items": {"type": "string"}
            }),
            FieldKind::NumberList {
                min,
                max,
                max_items,
            } => {
                let number = serde_json::json!({"type": "number", "minimum": min, "maximum": max});
                serde_json::json!({
                    "anyOf": [
                        number,
                        {"type": "array", "items": number, "minItems": 1, "maxItems": max_items}
                    ]
                })
            }
        };

        schema["description"] = Value::String(self.description.to_string());
        if let Some(default) = &self.default {
            schema["default"] = default.clone();
        }
        schema
    }
}

/// Constraints spanning more than one field.
#[derive(Debug, Clone, PartialEq)]
pub enum CrossFieldRule {
    /// Both dates or neither, and `start <= end`.
    DateRange {
        start: &'static str,
        end: &'static str,
    },
    /// Two list fields must have the same number of items.
    SameLength(&'static str, &'static str),
}

/// Argument contract for one operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSchema {
    fields: Vec<FieldSpec>,
    rules: Vec<CrossFieldRule>,
}

impl ParameterSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn rule(mut self, rule: CrossFieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect()
    }

    /// JSON Schema object advertised as the tool's `inputSchema`.
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.to_string(), f.json_schema()))
            .collect();

        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": self.required_fields()
        })
    }
}

/// One violated constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every constraint the arguments broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violations: vec![Violation {
                field: field.into(),
                message: message.into(),
            }],
        }
    }

    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.violations.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Arguments that passed validation, with defaults filled in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedParams(Map<String, Value>);

impl ValidatedParams {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Deserialize into a typed parameter object.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.into_value())
    }
}

/// Check raw arguments against a schema.
///
/// `null` arguments count as an empty object, and `null` field values count
/// as absent. Unknown fields are dropped.
pub fn validate(schema: &ParameterSchema, raw: &Value) -> Result<ValidatedParams, ValidationError> {
    let empty = Map::new();
    let input = match raw {
        Value::Object(map) => map,
        Value::Null => &empty,
        other => {
            return Err(ValidationError::single(
                "arguments",
                format!("expected object, got {}", type_name(other)),
            ))
        }
    };

    for key in input.keys() {
        if schema.get(key).is_none() {
            tracing::debug!(field = %key, "Dropping unknown argument");
        }
    }

    let mut output = Map::new();
    let mut violations = Vec::new();

    for field in &schema.fields {
        match input.get(field.name).filter(|v| !v.is_null()) {
            Some(value) => match check(&field.kind, value) {
                Ok(value) => {
                    output.insert(field.name.to_string(), value);
                }
                Err(message) => violations.push(Violation {
                    field: field.name.to_string(),
                    message,
                }),
            },
            None if field.required => violations.push(Violation {
                field: field.name.to_string(),
                message: format!("required field missing (expected {})", field.kind.expected()),
            }),
            None => {
                if let Some(default) = &field.default {
                    output.insert(field.name.to_string(), default.clone());
                }
            }
        }
    }

    // Cross-field rules only look at fields that passed on their own.
    let failed: Vec<String> = violations.iter().map(|v| v.field.clone()).collect();
    for rule in &schema.rules {
        check_rule(rule, &output, &failed, &mut violations);
    }

    if violations.is_empty() {
        Ok(ValidatedParams(output))
    } else {
        Err(ValidationError { violations })
    }
}

fn check_rule(
    rule: &CrossFieldRule,
    output: &Map<String, Value>,
    failed: &[String],
    violations: &mut Vec<Violation>,
) {
    let skip = |name: &str| failed.iter().any(|f| f == name);

    match rule {
        CrossFieldRule::DateRange { start, end } => {
            if skip(start) || skip(end) {
                return;
            }
            let parse = |name: &str| {
                output
                    .get(name)
                    .and_then(Value::as_str)
                    .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            };
            match (parse(start), parse(end)) {
                (Some(s), Some(e)) if s > e => violations.push(Violation {
                    field: start.to_string(),
                    message: format!("must not be after {} ({} > {})", end, s, e),
                }),
                (Some(_), None) => violations.push(Violation {
                    field: end.to_string(),
                    message: format!("required when {} is set", start),
                }),
                (None, Some(_)) => violations.push(Violation {
                    field: start.to_string(),
                    message: format!("required when {} is set", end),
                }),
                _ => {}
            }
        }
        CrossFieldRule::SameLength(a, b) => {
            if skip(a) || skip(b) {
                return;
            }
            let len = |name: &str| output.get(name).and_then(Value::as_array).map(Vec::len);
            if let (Some(la), Some(lb)) = (len(a), len(b)) {
                if la != lb {
                    violations.push(Violation {
                        field: b.to_string(),
                        message: format!(
                            "must have the same number of items as {} ({} vs {})",
                            a, lb, la
                        ),
                    });
                }
            }
        }
    }
}

fn check(kind: &FieldKind, value: &Value) -> Result<Value, String> {
    match kind {
        FieldKind::Number { min, max } => {
            let n = coerce_f64(value)?;
            check_bounds(n, *min, *max)?;
            Ok(serde_json::json!(n))
        }
        FieldKind::Integer { min, max } => {
            let n = coerce_i64(value)?;
            check_bounds(n, *min, *max)?;
            Ok(serde_json::json!(n))
        }
        FieldKind::Boolean => match value {
            Value::Bool(b) => Ok(Value::Bool(*b)),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),
            other => Err(format!("expected boolean, got {}", type_name(other))),
        },
        FieldKind::String { min_len, max_len } => {
            let s = value
                .as_str()
                .ok_or_else(|| format!("expected string, got {}", type_name(value)))?;
            let len = s.trim().chars().count();
            if len < *min_len {
                return Err(format!("must be at least {} characters long", min_len));
            }
            if let Some(max_len) = max_len {
                if len > *max_len {
                    return Err(format!("must be at most {} characters long", max_len));
                }
            }
            Ok(Value::String(s.trim().to_string()))
        }
        FieldKind::CountryCode => {
            let s = value
                .as_str()
                .ok_or_else(|| format!("expected string, got {}", type_name(value)))?
                .trim();
            if s.len() == 2 && s.chars().all(|c| c.is_ascii_alphabetic()) {
                Ok(Value::String(s.to_ascii_uppercase()))
            } else {
                Err(format!("must be two ASCII letters (got \"{}\")", s))
            }
        }
        FieldKind::Enum(allowed) => {
            let s = value
                .as_str()
                .ok_or_else(|| format!("expected string, got {}", type_name(value)))?;
            if allowed.contains(&s) {
                Ok(Value::String(s.to_string()))
            } else {
                Err(format!("must be one of: {} (got \"{}\")", allowed.join(", "), s))
            }
        }
        FieldKind::Date => {
            let s = value
                .as_str()
                .ok_or_else(|| format!("expected date string, got {}", type_name(value)))?;
            let valid = s.len() == 10 && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok();
            if valid {
                Ok(Value::String(s.to_string()))
            } else {
                Err(format!("must be a valid date in YYYY-MM-DD format (got \"{}\")", s))
            }
        }
        FieldKind::VariableList => {
            let items: Vec<String> = match value {
                Value::String(s) => s
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
                Value::Array(values) => values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| {
                        v.as_str().map(|s| s.trim().to_string()).ok_or_else(|| {
                            format!("item {} must be a string, got {}", i, type_name(v))
                        })
                    })
                    .collect::<Result<_, _>>()?,
                other => return Err(format!("expected array of strings, got {}", type_name(other))),
            };
            if items.is_empty() {
                return Err("must contain at least one variable".to_string());
            }
            if let Some(bad) = items.iter().find(|s| !is_variable_name(s)) {
                return Err(format!("invalid variable name \"{}\"", bad));
            }
            Ok(serde_json::json!(items))
        }
        FieldKind::NumberList {
            min,
            max,
            max_items,
        } => {
            let numbers: Vec<f64> = match value {
                Value::Array(values) => values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| coerce_f64(v).map_err(|e| format!("item {}: {}", i, e)))
                    .collect::<Result<_, _>>()?,
                Value::String(s) if s.contains(',') => s
                    .split(',')
                    .enumerate()
                    .map(|(i, part)| {
                        coerce_f64(&Value::String(part.trim().to_string()))
                            .map_err(|e| format!("item {}: {}", i, e))
                    })
                    .collect::<Result<_, _>>()?,
                single => vec![coerce_f64(single)?],
            };
            if numbers.is_empty() {
                return Err("must contain at least one number".to_string());
            }
            if numbers.len() > *max_items {
                return Err(format!(
                    "must contain at most {} items (got {})",
                    max_items,
                    numbers.len()
                ));
            }
            for (i, n) in numbers.iter().enumerate() {
                check_bounds(*n, Some(*min), Some(*max)).map_err(|e| format!("item {}: {}", i, e))?;
            }
            Ok(serde_json::json!(numbers))
        }
    }
}

fn coerce_f64(value: &Value) -> Result<f64, String> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match n {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(format!("expected number, got {}", describe(value))),
    }
}

fn coerce_i64(value: &Value) -> Result<i64, String> {
    let n = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && f.abs() < 1e15).map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.fract() == 0.0 && f.abs() < 1e15)
                    .map(|f| f as i64)
            })
        }
        _ => None,
    };
    n.ok_or_else(|| format!("expected integer, got {}", describe(value)))
}

fn check_bounds<T: PartialOrd + fmt::Display + Copy>(
    n: T,
    min: Option<T>,
    max: Option<T>,
) -> Result<(), String> {
    match (min, max) {
        (Some(min), Some(max)) if n < min || n > max => {
            Err(format!("must be between {} and {} (got {})", min, max, n))
        }
        (Some(min), None) if n < min => Err(format!("must be at least {} (got {})", min, n)),
        (None, Some(max)) if n > max => Err(format!("must be at most {} (got {})", max, n)),
        _ => Ok(()),
    }
}

fn is_variable_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        other => type_name(other).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coordinates() -> ParameterSchema {
        ParameterSchema::new()
            .field(
                FieldSpec::new(
                    "latitude",
                    FieldKind::Number {
                        min: Some(-90.0),
                        max: Some(90.0),
                    },
                    "Latitude",
                )
                .required(),
            )
            .field(
                FieldSpec::new(
                    "longitude",
                    FieldKind::Number {
                        min: Some(-180.0),
                        max: Some(180.0),
                    },
                    "Longitude",
                )
                .required(),
            )
    }

    fn forecast_like() -> ParameterSchema {
        coordinates()
            .field(FieldSpec::new("hourly", FieldKind::VariableList, "Hourly variables"))
            .field(
                FieldSpec::new(
                    "temperature_unit",
                    FieldKind::Enum(&["celsius", "fahrenheit"]),
                    "Unit",
                )
                .with_default("celsius"),
            )
            .field(FieldSpec::new(
                "forecast_days",
                FieldKind::Integer {
                    min: Some(0),
                    max: Some(16),
                },
                "Days",
            ))
            .field(FieldSpec::new("start_date", FieldKind::Date, "Start"))
            .field(FieldSpec::new("end_date", FieldKind::Date, "End"))
            .rule(CrossFieldRule::DateRange {
                start: "start_date",
                end: "end_date",
            })
    }

    #[test]
    fn test_valid_minimal_arguments_get_defaults() {
        let params = validate(&forecast_like(), &json!({"latitude": 52.5, "longitude": 13.4})).unwrap();

        assert_eq!(params.get("latitude"), Some(&json!(52.5)));
        assert_eq!(params.get("temperature_unit"), Some(&json!("celsius")));
        assert!(params.get("forecast_days").is_none());
        assert!(params.get("hourly").is_none());
    }

    #[test]
    fn test_missing_required_field() {
        let err = validate(&forecast_like(), &json!({"latitude": 52.5})).unwrap_err();

        assert_eq!(err.fields(), vec!["longitude"]);
        assert_eq!(
            err.to_string(),
            "longitude: required field missing (expected number)"
        );
    }

    #[test]
    fn test_null_arguments_are_empty_object() {
        let err = validate(&coordinates(), &Value::Null).unwrap_err();
        assert_eq!(err.fields(), vec!["latitude", "longitude"]);
    }

    #[test]
    fn test_non_object_arguments() {
        let err = validate(&coordinates(), &json!([1, 2])).unwrap_err();
        assert_eq!(err.to_string(), "arguments: expected object, got array");
    }

    #[test]
    fn test_out_of_range_numbers() {
        let err = validate(&coordinates(), &json!({"latitude": 120, "longitude": -181})).unwrap_err();

        assert_eq!(err.violations.len(), 2);
        assert_eq!(
            err.violations[0].to_string(),
            "latitude: must be between -90 and 90 (got 120)"
        );
        assert!(err.violations[1].message.contains("-180 and 180"));
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let params = validate(
            &forecast_like(),
            &json!({"latitude": "52.5", "longitude": " 13.4 ", "forecast_days": "3"}),
        )
        .unwrap();

        assert_eq!(params.get("latitude"), Some(&json!(52.5)));
        assert_eq!(params.get("longitude"), Some(&json!(13.4)));
        assert_eq!(params.get("forecast_days"), Some(&json!(3)));
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        let err = validate(
            &forecast_like(),
            &json!({"latitude": "north", "longitude": true, "forecast_days": 2.5}),
        )
        .unwrap_err();

        assert_eq!(err.fields(), vec!["latitude", "longitude", "forecast_days"]);
        assert_eq!(err.violations[0].message, "expected number, got \"north\"");
        assert_eq!(err.violations[1].message, "expected number, got boolean");
        assert_eq!(err.violations[2].message, "expected integer, got number");
    }

    #[test]
    fn test_integer_accepts_whole_floats() {
        let params = validate(
            &forecast_like(),
            &json!({"latitude": 0, "longitude": 0, "forecast_days": 7.0}),
        )
        .unwrap();
        assert_eq!(params.get("forecast_days"), Some(&json!(7)));
    }

    #[test]
    fn test_enum_rejects_unknown_value() {
        let err = validate(
            &forecast_like(),
            &json!({"latitude": 0, "longitude": 0, "temperature_unit": "kelvin"}),
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "temperature_unit: must be one of: celsius, fahrenheit (got \"kelvin\")"
        );
    }

    #[test]
    fn test_variable_list_forms() {
        let schema = forecast_like();

        let from_array = validate(
            &schema,
            &json!({"latitude": 0, "longitude": 0, "hourly": ["temperature_2m", "rain"]}),
        )
        .unwrap();
        let from_string = validate(
            &schema,
            &json!({"latitude": 0, "longitude": 0, "hourly": "temperature_2m, rain"}),
        )
        .unwrap();
        assert_eq!(from_array, from_string);

        let err = validate(
            &schema,
            &json!({"latitude": 0, "longitude": 0, "hourly": ["temperature 2m"]}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid variable name"));

        let err = validate(&schema, &json!({"latitude": 0, "longitude": 0, "hourly": []})).unwrap_err();
        assert_eq!(err.violations[0].message, "must contain at least one variable");
    }

    #[test]
    fn test_dates() {
        let schema = forecast_like();

        let err = validate(
            &schema,
            &json!({"latitude": 0, "longitude": 0, "start_date": "2024-02-30", "end_date": "2024-3-1"}),
        )
        .unwrap_err();
        assert_eq!(err.fields(), vec!["start_date", "end_date"]);

        let err = validate(
            &schema,
            &json!({"latitude": 0, "longitude": 0, "start_date": "2024-03-10", "end_date": "2024-03-01"}),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "start_date: must not be after end_date (2024-03-10 > 2024-03-01)"
        );

        let err = validate(
            &schema,
            &json!({"latitude": 0, "longitude": 0, "start_date": "2024-03-01"}),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "end_date: required when start_date is set");

        assert!(validate(
            &schema,
            &json!({"latitude": 0, "longitude": 0, "start_date": "2024-03-01", "end_date": "2024-03-01"}),
        )
        .is_ok());
    }

    #[test]
    fn test_number_list() {
        let schema = ParameterSchema::new()
            .field(
                FieldSpec::new(
                    "latitude",
                    FieldKind::NumberList {
                        min: -90.0,
                        max: 90.0,
                        max_items: 3,
                    },
                    "Latitudes",
                )
                .required(),
            )
            .field(
                FieldSpec::new(
                    "longitude",
                    FieldKind::NumberList {
                        min: -180.0,
                        max: 180.0,
                        max_items: 3,
                    },
                    "Longitudes",
                )
                .required(),
            )
            .rule(CrossFieldRule::SameLength("latitude", "longitude"));

        let params = validate(&schema, &json!({"latitude": 52.5, "longitude": [13.4]})).unwrap();
        assert_eq!(params.get("latitude"), Some(&json!([52.5])));

        let params = validate(&schema, &json!({"latitude": "1,2", "longitude": [3, "4"]})).unwrap();
        assert_eq!(params.get("latitude"), Some(&json!([1.0, 2.0])));
        assert_eq!(params.get("longitude"), Some(&json!([3.0, 4.0])));

        let err = validate(&schema, &json!({"latitude": [1, 2], "longitude": [3]})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "longitude: must have the same number of items as latitude (1 vs 2)"
        );

        let err = validate(&schema, &json!({"latitude": [1, 2, 3, 4], "longitude": [1]})).unwrap_err();
        assert_eq!(err.fields(), vec!["latitude"]);

        let err = validate(&schema, &json!({"latitude": [1, 95], "longitude": [1, 2]})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "latitude: item 1: must be between -90 and 90 (got 95)"
        );
    }

    #[test]
    fn test_unknown_and_null_fields_are_dropped() {
        let params = validate(
            &forecast_like(),
            &json!({"latitude": 1, "longitude": 2, "api_key": "secret", "hourly": null}),
        )
        .unwrap();

        assert!(params.get("api_key").is_none());
        assert!(params.get("hourly").is_none());
    }

    #[test]
    fn test_string_length() {
        let schema = ParameterSchema::new().field(
            FieldSpec::new(
                "name",
                FieldKind::String {
                    min_len: 2,
                    max_len: None,
                },
                "Name",
            )
            .required(),
        );

        let err = validate(&schema, &json!({"name": " B "})).unwrap_err();
        assert_eq!(err.to_string(), "name: must be at least 2 characters long");

        let params = validate(&schema, &json!({"name": " Berlin "})).unwrap();
        assert_eq!(params.get("name"), Some(&json!("Berlin")));
    }

    #[test]
    fn test_json_schema_generation() {
        let schema = forecast_like().to_json_schema();

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["latitude", "longitude"]));
        assert_eq!(schema["properties"]["latitude"]["minimum"], -90.0);
        assert_eq!(schema["properties"]["temperature_unit"]["enum"], json!(["celsius", "fahrenheit"]));
        assert_eq!(schema["properties"]["temperature_unit"]["default"], "celsius");
        assert_eq!(schema["properties"]["hourly"]["type"], "array");
        assert_eq!(schema["properties"]["start_date"]["format"], "date");
    }

    #[test]
    fn test_decode_into_typed_params() {
        #[derive(serde::Deserialize)]
        struct Coordinates {
            latitude: f64,
            longitude: f64,
        }

        let params = validate(&coordinates(), &json!({"latitude": "10", "longitude": 20})).unwrap();
        let decoded: Coordinates = params.decode().unwrap();

        assert_eq!(decoded.latitude, 10.0);
        assert_eq!(decoded.longitude, 20.0);
    }

    #[test]
    fn test_integer_strings_with_zero_fraction() {
        let schema = ParameterSchema::new().field(FieldSpec::new(
            "forecast_days",
            FieldKind::Integer {
                min: Some(0),
                max: Some(16),
            },
            "Days",
        ));

        let params = validate(&schema, &json!({"forecast_days": "3.0"})).unwrap();
        assert_eq!(params.get("forecast_days"), Some(&json!(3)));

        let params = validate(&schema, &json!({"forecast_days": 3.0})).unwrap();
        assert_eq!(params.get("forecast_days"), Some(&json!(3)));

        let err = validate(&schema, &json!({"forecast_days": "3.5"})).unwrap_err();
        assert_eq!(err.fields(), vec!["forecast_days"]);
    }

    #[test]
    fn test_country_code() {
        let schema = ParameterSchema::new().field(FieldSpec::new(
            "country_code",
            FieldKind::CountryCode,
            "Country",
        ));

        let params = validate(&schema, &json!({"country_code": "de"})).unwrap();
        assert_eq!(params.get("country_code"), Some(&json!("DE")));

        for bad in ["1!", "D3", "DEU", "D"] {
            let err = validate(&schema, &json!({"country_code": bad})).unwrap_err();
            assert_eq!(err.fields(), vec!["country_code"], "{}", bad);
        }

        let advertised = schema.to_json_schema();
        assert_eq!(advertised["properties"]["country_code"]["pattern"], "^[A-Za-z]{2}$");
    }
}
