//! Extracts the language binding from a caller-supplied scope descriptor.
//!
//! Accepted shapes:
//! - no descriptor, or `null`: no language
//! - an object whose `languageId` is a string: that language
//! - an object whose `languageId` is `null`: no language
//!
//! Anything else is rejected with the offending descriptor in the error.

use serde_json::Value;

use crate::error::{ConfigError, Result};

pub const LANGUAGE_ID_FIELD: &str = "languageId";

pub fn language_id_from_scope(scope: Option<&Value>) -> Result<Option<String>> {
    let Some(scope) = scope else {
        return Ok(None);
    };

    match scope {
        Value::Null => Ok(None),
        Value::Object(fields) => match fields.get(LANGUAGE_ID_FIELD) {
            Some(Value::String(language_id)) => Ok(Some(language_id.clone())),
            Some(Value::Null) => Ok(None),
            _ => Err(unsupported(scope)),
        },
        _ => Err(unsupported(scope)),
    }
}

fn unsupported(scope: &Value) -> ConfigError {
    ConfigError::UnsupportedScopeDescriptor {
        descriptor: scope.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_descriptor_has_no_language() {
        assert_eq!(language_id_from_scope(None).unwrap(), None);
        assert_eq!(language_id_from_scope(Some(&Value::Null)).unwrap(), None);
    }

    #[test]
    fn reads_language_id() {
        let scope = json!({"languageId": "go", "uri": "file:///main.go"});
        assert_eq!(
            language_id_from_scope(Some(&scope)).unwrap().as_deref(),
            Some("go")
        );
    }

    #[test]
    fn rejects_descriptor_without_language_id() {
        let scope = json!({"uri": "file:///main.go"});
        let err = language_id_from_scope(Some(&scope)).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScopeDescriptor { .. }));
        assert!(err.to_string().contains("file:///main.go"));
    }

    #[test]
    fn rejects_non_object_descriptor() {
        let scope = json!("file:///main.go");
        assert!(language_id_from_scope(Some(&scope)).is_err());
    }
}
