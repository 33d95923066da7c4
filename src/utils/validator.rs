use validator::Validate;

use crate::error::{AppError, AppResult};

/// Validate a request struct using the validator crate
pub fn validate_request<T: Validate>(request: &T) -> AppResult<()> {
    request.validate().map_err(|e| {
        let errors: Vec<String> = e
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |err| {
                    format!(
                        "{}: {}",
                        field,
                        err.message.clone().unwrap_or_else(|| "Invalid value".into())
                    )
                })
            })
            .collect();

        AppError::ValidationError(errors.join(", "))
    })
}

/// Validate a `#rrggbb` hex color
pub fn is_valid_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Check that a custom-field value conforms to its field type.
///
/// Values are stored as text; conformance is what keeps a `number` field
/// filterable and a `dropdown` field constrained to its options.
pub fn is_valid_field_value(field_type: &str, value: &str, options: &[String]) -> bool {
    match field_type {
        "text" => true,
        "number" => value.parse::<f64>().map(|n| n.is_finite()).unwrap_or(false),
        "date" => chrono::DateTime::parse_from_rfc3339(value).is_ok(),
        "checkbox" => value == "true" || value == "false",
        "dropdown" => options.iter().any(|o| o == value),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct SampleRequest {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
    }

    #[test]
    fn validate_request_surfaces_field_messages() {
        let err = validate_request(&SampleRequest {
            name: String::new(),
        })
        .unwrap_err();
        match err {
            AppError::ValidationError(msg) => assert!(msg.contains("Name is required")),
            other => panic!("unexpected error: {}", other),
        }

        assert!(validate_request(&SampleRequest {
            name: "Sprint board".to_string(),
        })
        .is_ok());
    }

    #[test]
    fn hex_color_checks() {
        assert!(is_valid_hex_color("#aabbcc"));
        assert!(is_valid_hex_color("#00FF00"));
        assert!(!is_valid_hex_color("aabbcc"));
        assert!(!is_valid_hex_color("#abc"));
        assert!(!is_valid_hex_color("#aabbcg"));
        assert!(!is_valid_hex_color("#aabbccdd"));
    }

    #[test]
    fn field_value_conformance() {
        assert!(is_valid_field_value("text", "anything at all", &[]));

        assert!(is_valid_field_value("number", "42", &[]));
        assert!(is_valid_field_value("number", "-3.5", &[]));
        assert!(!is_valid_field_value("number", "forty-two", &[]));
        assert!(!is_valid_field_value("number", "NaN", &[]));

        assert!(is_valid_field_value(
            "date",
            "2025-06-01T12:00:00+00:00",
            &[]
        ));
        assert!(!is_valid_field_value("date", "next tuesday", &[]));

        assert!(is_valid_field_value("checkbox", "true", &[]));
        assert!(is_valid_field_value("checkbox", "false", &[]));
        assert!(!is_valid_field_value("checkbox", "yes", &[]));

        let options = vec!["todo".to_string(), "doing".to_string()];
        assert!(is_valid_field_value("dropdown", "todo", &options));
        assert!(!is_valid_field_value("dropdown", "done", &options));

        assert!(!is_valid_field_value("rating", "5", &[]));
    }
}
