/// Paginated lookup of the teams a user belongs to
pub mod membership;

/// Licensing check against the subscription service
pub mod subscription;
