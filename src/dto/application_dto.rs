use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::application::{is_valid_application_status, Application};

fn validate_status(status: &str) -> Result<(), ValidationError> {
    if is_valid_application_status(status) {
        Ok(())
    } else {
        Err(ValidationError::new("status"))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateApplicationStatusPayload {
    #[validate(custom(function = "validate_status"))]
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplySubmittedResponse {
    pub message: String,
    pub application: Application,
}
