//! Error body of the API, shaped as RFC 7807 Problem Details.

use serde::{Deserialize, Serialize};

/// Problem document returned with every 4xx/5xx response that has a body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// One entry per rejected input, for validation failures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ErrorResponse {
    /// A problem with the standard title for `status`.
    pub fn for_status(status: u16) -> Self {
        let title = match status {
            400 => "Bad Request",
            422 => "Validation Failed",
            _ => "Internal Server Error",
        };

        Self {
            error_type: "about:blank".to_string(),
            title: title.to_string(),
            status,
            detail: None,
            errors: Vec::new(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            ..Self::for_status(400)
        }
    }

    pub fn validation(errors: Vec<String>) -> Self {
        Self {
            detail: Some("Request input could not be parsed".to_string()),
            errors,
            ..Self::for_status(422)
        }
    }

    /// Internal details stay in the logs.
    pub fn internal() -> Self {
        Self::for_status(500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_problem_fields() {
        let body = serde_json::to_value(ErrorResponse::bad_request("Post 3 does not exist")).unwrap();

        assert_eq!(body["type"], "about:blank");
        assert_eq!(body["title"], "Bad Request");
        assert_eq!(body["status"], 400);
        assert_eq!(body["detail"], "Post 3 does not exist");
        assert!(body.get("errors").is_none());
    }

    #[test]
    fn internal_error_hides_detail() {
        let body = serde_json::to_value(ErrorResponse::internal()).unwrap();

        assert_eq!(body["status"], 500);
        assert_eq!(body["title"], "Internal Server Error");
        assert!(body.get("detail").is_none());
    }

    #[test]
    fn validation_lists_each_error() {
        let problem = ErrorResponse::validation(vec!["missing field `content`".to_string()]);

        assert_eq!(problem.status, 422);
        assert_eq!(problem.title, "Validation Failed");
        assert_eq!(problem.errors, ["missing field `content`"]);
    }
}
