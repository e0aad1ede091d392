use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::models::user::is_valid_role;

fn validate_role(role: &str) -> Result<(), ValidationError> {
    if is_valid_role(role) {
        Ok(())
    } else {
        Err(ValidationError::new("role"))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserRolePayload {
    #[validate(custom(function = "validate_role"))]
    pub role: String,
}
