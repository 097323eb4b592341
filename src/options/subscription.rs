use clap::Parser;

#[derive(Debug, Clone, Parser)]
pub struct SubscriptionOpt {
    /// Verify the repository's subscription before checking membership
    #[arg(long = "validate-subscription", env = "INPUT_VALIDATE-SUBSCRIPTION")]
    pub validate_subscription: bool,
}
