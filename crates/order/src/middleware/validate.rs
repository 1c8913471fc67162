use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, axum::Json<Value>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(json_value) =
            axum::Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| {
                    let status = if rejection.status() == StatusCode::UNPROCESSABLE_ENTITY {
                        StatusCode::BAD_REQUEST
                    } else {
                        rejection.status()
                    };
                    let payload = json!({
                        "status": "error",
                        "message": format!("Invalid JSON: {}", rejection.body_text()),
                    });
                    (status, axum::Json(payload))
                })?;

        json_value.validate().map_err(|validation_errors| {
            let details = collect_errors(&validation_errors);
            let summary = details
                .iter()
                .map(|(field, message)| format!("{field}: {message}"))
                .collect::<Vec<_>>()
                .join("; ");

            let payload = json!({
                "status": "error",
                "message": if summary.is_empty() { "Validation failed".to_string() } else { summary },
                "details": details_map(&details),
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload))
        })?;

        Ok(Self(json_value))
    }
}

fn describe(field: &str, error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| match error.code.as_ref() {
            "length" => "Invalid length".to_string(),
            "range" => "Value out of range".to_string(),
            "custom" => "Custom validation failed".to_string(),
            _ => format!("Invalid {field}"),
        })
}

/// Flattens nested struct and list errors into `(path, message)` pairs,
/// e.g. `address.pincode`.
fn collect_errors(errors: &ValidationErrors) -> Vec<(String, String)> {
    let mut out = Vec::new();
    walk(errors, "", &mut out);
    out.sort();
    out
}

fn walk(errors: &ValidationErrors, prefix: &str, out: &mut Vec<(String, String)>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    out.push((path.clone(), describe(field, error)));
                }
            }
            ValidationErrorsKind::Struct(inner) => walk(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    walk(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

fn details_map(details: &[(String, String)]) -> Value {
    let mut map = serde_json::Map::new();

    for (field, message) in details {
        let entry = map
            .entry(field.clone())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(messages) = entry {
            messages.push(Value::String(message.clone()));
        }
    }

    Value::Object(map)
}
