//! Types for verification service results

use crate::domain::entities::verification_code::VerificationCode;

/// Outcome of issuing a code
#[derive(Debug, Clone)]
pub struct IssuedCode {
    /// The persisted code record
    pub verification_code: VerificationCode,
    /// Whether the notification channel accepted the message
    pub delivered: bool,
    /// Provider message ID when delivery succeeded
    pub message_id: Option<String>,
}
