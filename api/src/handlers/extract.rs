//! Extractor configuration and DTO validation
//!
//! Malformed JSON, query strings and path segments are answered with the
//! same `validation_error` body as failed `validator` rules.

use actix_web::{error::JsonPayloadError, web, HttpRequest};
use validator::{Validate, ValidationErrors};

use super::error::ApiError;

/// Run `validator` rules on a request body
pub fn validated<T: Validate>(payload: T) -> Result<T, ApiError> {
    payload.validate().map_err(ApiError::from)?;
    Ok(payload)
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let reason = errors
                    .first()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .unwrap_or_default();
                (field.to_string(), reason)
            })
            .collect();
        fields.sort();

        ApiError::BadRequest {
            message: "Invalid request data".to_string(),
            fields,
        }
    }
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            ApiError::bad_request(format!("Invalid JSON body: {}", err)).into()
        })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::bad_request(format!("Invalid query string: {}", err)).into()
    })
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        ApiError::bad_request(format!("Invalid path parameter: {}", err)).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(email(message = "must be a valid email"))]
        email: String,
    }

    #[test]
    fn test_validation_errors_become_bad_request() {
        let result = validated(Probe {
            email: "nope".to_string(),
        });

        match result {
            Err(ApiError::BadRequest { fields, .. }) => {
                assert_eq!(
                    fields,
                    vec![("email".to_string(), "must be a valid email".to_string())]
                );
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }
}
