//! Request validation.
//!
//! Walks a declared schema against an object value. Failures carry the
//! dotted path to the offending field, the declared type, and the actual
//! tag (or `missing`), so a host can turn them into precise 4xx bodies.

use rulang_par::ast::{FieldType, ValidationField};
use rulang_util::RuntimeError;

use crate::value::Value;

/// Validates `target` against `fields`.
///
/// The target must be an object; each declared field must be present
/// (unless `optional`) and match its declared type. Nested schemas on
/// `object` fields recurse with a dotted path.
pub fn validate_object(target: &Value, fields: &[ValidationField]) -> Result<(), RuntimeError> {
    let object = match target {
        Value::Object(object) => object,
        other => {
            return Err(RuntimeError::type_error(format!(
                "validate target must be an object, got {}",
                other.type_name()
            )))
        },
    };

    validate_fields(&object.borrow(), fields, "")
}

fn validate_fields(
    object: &indexmap::IndexMap<String, Value>,
    fields: &[ValidationField],
    prefix: &str,
) -> Result<(), RuntimeError> {
    for field in fields {
        let path = if prefix.is_empty() {
            field.name.clone()
        } else {
            format!("{}.{}", prefix, field.name)
        };

        let value = object.get(&field.name);

        let value = match value {
            None => {
                if field.optional {
                    continue;
                }
                return Err(failure(&path, field.ty, "missing"));
            },
            Some(Value::Null) => {
                if field.optional {
                    continue;
                }
                return Err(failure(&path, field.ty, "null"));
            },
            Some(value) => value,
        };

        if !tag_matches(field.ty, value) {
            return Err(failure(&path, field.ty, value.type_name()));
        }

        if let (FieldType::Object, Some(nested)) = (field.ty, &field.nested) {
            if let Value::Object(inner) = value {
                validate_fields(&inner.borrow(), nested, &path)?;
            }
        }
    }
    Ok(())
}

fn tag_matches(ty: FieldType, value: &Value) -> bool {
    matches!(
        (ty, value),
        (FieldType::String, Value::String(_))
            | (FieldType::Number, Value::Number(_))
            | (FieldType::Boolean, Value::Bool(_))
            | (FieldType::Array, Value::Array(_))
            | (FieldType::Object, Value::Object(_))
    )
}

fn failure(path: &str, expected: FieldType, actual: &str) -> RuntimeError {
    RuntimeError::Validation {
        path: path.to_string(),
        expected: expected.as_str().to_string(),
        actual: actual.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, ty: FieldType, optional: bool) -> ValidationField {
        ValidationField {
            name: name.to_string(),
            ty,
            optional,
            nested: None,
        }
    }

    fn schema() -> Vec<ValidationField> {
        vec![
            field("name", FieldType::String, false),
            field("age", FieldType::Number, true),
        ]
    }

    #[test]
    fn test_complete_object_passes() {
        let target = Value::object(vec![
            ("name".to_string(), Value::String("A".to_string())),
            ("age".to_string(), Value::Number(1.0)),
        ]);
        assert!(validate_object(&target, &schema()).is_ok());
    }

    #[test]
    fn test_missing_optional_field_passes() {
        let target = Value::object(vec![(
            "name".to_string(),
            Value::String("A".to_string()),
        )]);
        assert!(validate_object(&target, &schema()).is_ok());
    }

    #[test]
    fn test_wrong_tag_fails_with_path_and_types() {
        let target = Value::object(vec![("name".to_string(), Value::Number(1.0))]);
        let err = validate_object(&target, &schema()).unwrap_err();
        assert_eq!(
            err,
            RuntimeError::Validation {
                path: "name".to_string(),
                expected: "string".to_string(),
                actual: "number".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_required_field_fails() {
        let target = Value::object(vec![("age".to_string(), Value::Number(1.0))]);
        let err = validate_object(&target, &schema()).unwrap_err();
        assert_eq!(
            err,
            RuntimeError::Validation {
                path: "name".to_string(),
                expected: "string".to_string(),
                actual: "missing".to_string(),
            }
        );
    }

    #[test]
    fn test_null_counts_as_missing_for_required_fields() {
        let target = Value::object(vec![("name".to_string(), Value::Null)]);
        let err = validate_object(&target, &schema()).unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::Validation { actual, .. } if actual == "null"
        ));
    }

    #[test]
    fn test_optional_field_present_must_still_match() {
        let target = Value::object(vec![
            ("name".to_string(), Value::String("A".to_string())),
            ("age".to_string(), Value::String("old".to_string())),
        ]);
        let err = validate_object(&target, &schema()).unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::Validation { path, .. } if path == "age"
        ));
    }

    #[test]
    fn test_nested_schema_uses_dotted_path() {
        let fields = vec![ValidationField {
            name: "address".to_string(),
            ty: FieldType::Object,
            optional: false,
            nested: Some(vec![field("city", FieldType::String, false)]),
        }];

        let target = Value::object(vec![(
            "address".to_string(),
            Value::object(vec![("city".to_string(), Value::Number(1.0))]),
        )]);

        let err = validate_object(&target, &fields).unwrap_err();
        assert_eq!(
            err,
            RuntimeError::Validation {
                path: "address.city".to_string(),
                expected: "string".to_string(),
                actual: "number".to_string(),
            }
        );
    }

    #[test]
    fn test_non_object_target_is_a_type_error() {
        let err = validate_object(&Value::Number(1.0), &schema()).unwrap_err();
        assert!(matches!(err, RuntimeError::Type(_)));
    }

    #[test]
    fn test_array_and_boolean_tags() {
        let fields = vec![
            field("tags", FieldType::Array, false),
            field("active", FieldType::Boolean, false),
        ];
        let target = Value::object(vec![
            ("tags".to_string(), Value::array(vec![])),
            ("active".to_string(), Value::Bool(false)),
        ]);
        assert!(validate_object(&target, &fields).is_ok());
    }
}
