pub mod product;

use validator::ValidationErrors;

/// Flattens field errors into `field: message; field: message`, sorted by
/// field name so the text is stable.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    let messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| match error.code.as_ref() {
                        "length" => "Invalid length".to_string(),
                        "range" => "Value out of range".to_string(),
                        _ => format!("Invalid {field}"),
                    });
                format!("{field}: {message}")
            })
        })
        .collect();

    if messages.is_empty() {
        "Validation failed".to_string()
    } else {
        format!("Validation failed: {}", messages.join("; "))
    }
}
