/// Verification token time-to-live in seconds (24 hours).
pub const VERIFICATION_TTL_SECS: u64 = 60 * 60 * 24;

/// Suffix appended to the email address to form the store key.
pub const STORE_KEY_SUFFIX: &str = "email_verify";

/// Store key holding the pending token for `email`.
pub fn store_key(email: &str) -> String {
    format!("{email}:{STORE_KEY_SUFFIX}")
}

/// What to do when a token is already pending for an address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PendingPolicy {
    /// Replace the pending token; the previous link stops working.
    #[default]
    Overwrite,
    /// Refuse to issue until the pending token is consumed or expires.
    ///
    /// This includes a token whose mail was never delivered: retries report
    /// `AlreadyPending` until its TTL runs out.
    Reject,
}

/// Result of an atomic delete-if-equals on the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumeResult {
    /// Value matched and the key was deleted.
    Deleted,
    /// No key (expired or never issued).
    Absent,
    /// Key exists with another value; left untouched.
    Different,
}

/// Outcome of a verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Matched,
    Mismatched,
    NotFound,
}

/// Outcome of an issuance request that reached the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueOutcome {
    Sent { message: String },
    AlreadyPending,
}

/// A rendered message ready for the mail transport.
#[derive(Debug, Clone)]
pub struct OutgoingMail {
    pub to_address: String,
    pub to_name: String,
    pub subject: String,
    pub html: String,
}
