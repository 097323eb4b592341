use std::fmt;

/// Asks whether the repository's subscription is in good standing
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubscriptionCheckRequest {
    /// `owner/repo`
    pub repository: String,
}

/// What the subscription service said, reduced to what the caller acts on
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubscriptionStatus {
    /// The service confirmed the subscription
    Active,
    /// The service refused the repository with `403 Forbidden`
    Inactive,
    /// No verdict: timeout, network failure, or any other status
    Unverified { reason: String },
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionStatus::Active => f.write_str("active"),
            SubscriptionStatus::Inactive => f.write_str("inactive"),
            SubscriptionStatus::Unverified { reason } => write!(f, "unverified ({reason})"),
        }
    }
}
