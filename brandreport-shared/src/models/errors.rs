use serde::{Deserialize, Serialize};

/// One field-level validation failure reported by the server.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct FieldMessage {
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Error body returned by the reports API on non-2xx responses.
///
/// Validation failures arrive as `details: [{msg}]`, other failures as a
/// single `error` or `message` string.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<Vec<FieldMessage>>,
}

impl ApiErrorBody {
    /// Creates a body carrying just a top-level error.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Best human-readable summary of the failure.
    ///
    /// Field-level messages win over the top-level string; an empty details
    /// list counts as absent.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        if let Some(details) = self.details.as_ref().filter(|details| !details.is_empty()) {
            return Some(
                details
                    .iter()
                    .map(|detail| detail.msg.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            );
        }
        self.error
            .as_ref()
            .or(self.message.as_ref())
            .filter(|text| !text.trim().is_empty())
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_are_joined() {
        let json = r#"{"error":"Validation failed","details":[{"msg":"Brand is required","path":"brand"},{"msg":"At least one deliverable"}]}"#;
        let body: ApiErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(
            body.summary().as_deref(),
            Some("Brand is required, At least one deliverable")
        );
    }

    #[test]
    fn falls_back_to_error_then_message() {
        assert_eq!(
            ApiErrorBody::new("Report limit reached").summary().as_deref(),
            Some("Report limit reached")
        );

        let body: ApiErrorBody = serde_json::from_str(r#"{"message":"Invalid token"}"#).unwrap();
        assert_eq!(body.summary().as_deref(), Some("Invalid token"));
    }

    #[test]
    fn empty_body_has_no_summary() {
        let body: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.summary(), None);

        let body: ApiErrorBody = serde_json::from_str(r#"{"details":[],"error":"  "}"#).unwrap();
        assert_eq!(body.summary(), None);
    }
}
