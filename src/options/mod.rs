mod membership;
mod subscription;

pub use membership::MembershipOpts;
pub use subscription::SubscriptionOpt;

use thiserror::Error;

/// A step input is missing or unusable
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Input required and not supplied: {name}")]
    Missing { name: String },

    #[error(
        "Input required and not supplied: organization (GITHUB_REPOSITORY is not set either, so there is no repository owner to fall back on)"
    )]
    MissingOrganization,
}

/// Trims an input and discards it when nothing is left
pub(crate) fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Like [`non_blank`], but fails with [`InputError::Missing`] naming the input
pub(crate) fn required(value: &Option<String>, name: &str) -> Result<String, InputError> {
    non_blank(value).ok_or_else(|| InputError::Missing {
        name: name.to_string(),
    })
}
