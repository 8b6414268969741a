//! Types for code service results

use std::time::Duration;

/// Result of sending a verification code
///
/// The code itself never leaves the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendCodeResult {
    /// How long the issued code stays valid
    pub expires_in: Duration,
    /// When the destination may request another code
    pub resend_after: Duration,
}
