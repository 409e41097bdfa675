use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Registration body. Blank identity fields count as absent.
///
/// The phone number is checked by the service after normalization, so
/// formatted input such as "+998 90 123-45-67" is accepted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address; at least one of email and phone number is required
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,

    /// Phone number, international or national, e.g. "+61412345678"
    #[serde(default, deserialize_with = "blank_as_none")]
    pub phone_number: Option<String>,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    /// Whether the confirmation code was handed to the email provider
    pub code_sent: bool,
    pub message: String,
}

/// Email plus code, used for both registration confirmation and login
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,

    #[validate(length(min = 1, max = 6, message = "Code must be at most 6 characters."))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRegistrationResponse {
    pub user_id: Uuid,
    pub username: String,
    pub is_active: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginCodeRequest {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCodeResponse {
    pub code_sent: bool,
    pub message: String,
}

/// Logout body. A missing token is treated like an unknown one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest {
    #[serde(default, alias = "refresh")]
    pub refresh_token: String,
}
