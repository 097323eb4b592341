mod service;
mod types;

pub use service::{SubscriptionCheck, DEFAULT_SUBSCRIPTION_API_URL, SUBSCRIPTION_TIMEOUT};
pub use types::{SubscriptionCheckRequest, SubscriptionStatus};
