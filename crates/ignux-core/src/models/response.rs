//! Generic `{success, message, data, error}` envelope used by action endpoints

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<D> {
    pub success: bool,
    pub message: String,
    #[serde(default = "Option::default")]
    pub data: Option<D>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<D> ApiResponse<D> {
    /// Payload of a successful response, if the server sent one.
    pub fn into_data(self) -> Option<D> {
        if self.success {
            self.data
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unsuccessful_response_yields_no_data() {
        let response: ApiResponse<String> = serde_json::from_value(json!({
            "success": false,
            "message": "nope",
            "data": "ignored",
            "error": "bad"
        }))
        .unwrap();
        assert_eq!(response.into_data(), None);
    }

    #[test]
    fn missing_data_is_none() {
        let response: ApiResponse<String> =
            serde_json::from_value(json!({"success": true, "message": "ok"})).unwrap();
        assert_eq!(response.into_data(), None);
    }
}
