//! Throttled verification code entity.
//!
//! A code is identified by its business context and destination. The
//! record carries the attempt budget; its lifetime is tracked by the store
//! that holds it.

use constant_time_eq::constant_time_eq;
use rand::rngs::OsRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use vg_shared::config::{CodeThrottleConfig, SuccessPolicy};

/// Maximum number of verification attempts allowed per issued code
pub const MAX_ATTEMPTS: u32 = 3;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Generates a uniformly distributed, zero-padded code
///
/// # Returns
///
/// A string of exactly `CODE_LENGTH` ASCII digits
pub fn generate_code() -> String {
    let code: u32 = OsRng.gen_range(0..10u32.pow(CODE_LENGTH as u32));
    format!("{:0width$}", code, width = CODE_LENGTH)
}

/// Identity of a throttled code: one live code per (business context, destination)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeIdentity {
    /// Business context, e.g. `login`
    pub biz: String,

    /// Phone number or e-mail address the code is delivered to
    pub destination: String,
}

impl CodeIdentity {
    pub fn new(biz: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            biz: biz.into(),
            destination: destination.into(),
        }
    }

    /// Store key holding the code itself
    pub fn code_key(&self) -> String {
        format!("phone_code:{}:{}", self.biz, self.destination)
    }

    /// Store key holding the remaining attempt counter
    pub fn counter_key(&self) -> String {
        format!("{}:cnt", self.code_key())
    }
}

/// Result of comparing a candidate against a stored code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Matched,

    /// Wrong code, missing record, or a record already consumed
    Mismatched,

    /// No attempts left; nothing was consumed
    Exhausted,
}

/// Verification code record with its attempt budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottledCode {
    pub identity: CodeIdentity,

    /// The 6-digit code
    pub code: String,

    /// Verification attempts left before the code locks
    pub attempts_remaining: u32,

    /// Set once a single-use code has been matched
    pub consumed: bool,
}

impl ThrottledCode {
    /// Creates a fresh record with a full attempt budget
    ///
    /// # Arguments
    ///
    /// * `identity` - Business context and destination
    /// * `code` - The code that was issued
    /// * `max_attempts` - Attempt budget for this code
    pub fn new(identity: CodeIdentity, code: String, max_attempts: u32) -> Self {
        Self {
            identity,
            code,
            attempts_remaining: max_attempts,
            consumed: false,
        }
    }

    /// Whether a resend must be refused given the record's remaining lifetime
    ///
    /// A record blocks resends while its remaining TTL is above
    /// `code_ttl - cooldown`, i.e. during the first cooldown after issue.
    pub fn blocks_resend(remaining_ttl: Duration, config: &CodeThrottleConfig) -> bool {
        remaining_ttl > config.resend_threshold()
    }

    /// Spends one attempt and compares the candidate
    ///
    /// # Arguments
    ///
    /// * `candidate` - The code submitted by the user
    /// * `policy` - What happens to the record after a match
    ///
    /// # Returns
    ///
    /// The outcome of the check. `Exhausted` leaves the record untouched.
    pub fn check(&mut self, candidate: &str, policy: SuccessPolicy) -> CheckOutcome {
        if self.consumed {
            return CheckOutcome::Mismatched;
        }
        if self.attempts_remaining == 0 {
            return CheckOutcome::Exhausted;
        }

        self.attempts_remaining -= 1;
        if constant_time_eq(self.code.as_bytes(), candidate.as_bytes()) {
            if policy == SuccessPolicy::SingleUse {
                self.consumed = true;
            }
            CheckOutcome::Matched
        } else {
            CheckOutcome::Mismatched
        }
    }
}
