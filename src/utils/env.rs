use std::collections::HashMap;
use std::{env, fmt, io};

use heck::ToShoutySnakeCase;

/// GateEnv allows us to mock environment variables while
/// running tests. That way we can run our tests in parallel,
/// and the environment of the runner executing them (which may
/// itself be a GitHub Actions job) does not leak into them.
#[derive(Debug, Clone)]
pub struct GateEnv {
    mock_store: Option<HashMap<String, String>>,
}

impl Default for GateEnv {
    fn default() -> GateEnv {
        GateEnv::new()
    }
}

impl GateEnv {
    /// creates a new environment variable store
    pub fn new() -> GateEnv {
        let mock_store = if cfg!(test) {
            Some(HashMap::new())
        } else {
            None
        };

        GateEnv { mock_store }
    }

    /// returns the value of the environment variable if it exists and is not blank
    pub fn get(&self, key: GateEnvKey) -> io::Result<Option<String>> {
        let key_str = key.to_string();
        tracing::trace!("Checking for ${}", &key_str);
        let result = match &self.mock_store {
            Some(mock_store) => mock_store.get(&key_str).cloned(),
            None => match env::var(&key_str) {
                Ok(data) => Some(data),
                Err(env::VarError::NotPresent) => None,
                Err(env::VarError::NotUnicode(_)) => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!(
                            "The value of the environment variable \"{}\" is not valid Unicode.",
                            &key_str
                        ),
                    ));
                }
            },
        };

        // the runner exports unset values as empty strings
        let result = result.filter(|value| !value.trim().is_empty());
        match &result {
            Some(value) => tracing::debug!("read environment variable ${} = {}", &key_str, value),
            None => tracing::trace!("could not find ${}", &key_str),
        }

        Ok(result)
    }

    /// sets a variable in the mock store
    #[cfg(test)]
    pub fn insert(&mut self, key: GateEnvKey, value: &str) {
        if let Some(mock_store) = &mut self.mock_store {
            mock_store.insert(key.to_string(), value.into());
        }
    }

    /// unsets a variable in the mock store
    #[cfg(test)]
    pub fn remove(&mut self, key: GateEnvKey) {
        if let Some(mock_store) = &mut self.mock_store {
            mock_store.remove(&key.to_string());
        }
    }
}

/// GateEnvKey defines the ambient environment variables team-gate reads.
/// Inputs are handled by the command line parser; these are the values the
/// runner itself provides, plus the subscription endpoint override.
/// Each name is the variant converted from CamelCase to SHOUTY_SNAKE_CASE,
/// so `GateEnvKey::GithubOutput.to_string()` becomes `GITHUB_OUTPUT`.
#[derive(Debug, Copy, Clone)]
pub enum GateEnvKey {
    GithubRepository,
    GithubGraphqlUrl,
    GithubOutput,
    TeamGateSubscriptionUrl,
}

impl fmt::Display for GateEnvKey {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(&format!("{:?}", self).to_shouty_snake_case())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(GateEnvKey::GithubRepository, "GITHUB_REPOSITORY")]
    #[case(GateEnvKey::GithubGraphqlUrl, "GITHUB_GRAPHQL_URL")]
    #[case(GateEnvKey::GithubOutput, "GITHUB_OUTPUT")]
    #[case(GateEnvKey::TeamGateSubscriptionUrl, "TEAM_GATE_SUBSCRIPTION_URL")]
    fn it_names_keys(#[case] key: GateEnvKey, #[case] expected: &str) {
        assert_eq!(&key.to_string(), expected);
    }

    #[test]
    fn it_can_set_and_read_from_mock() {
        let expected_value = "octo-org/octo-repo";
        let key = GateEnvKey::GithubRepository;
        let mut env_store = GateEnv::new();
        env_store.insert(key, expected_value);
        let actual_value = env_store.get(key).unwrap().unwrap();
        assert_eq!(expected_value, &actual_value)
    }

    #[test]
    fn it_can_remove_from_mock() {
        let key = GateEnvKey::GithubOutput;
        let mut env_store = GateEnv::new();
        env_store.insert(key, "/tmp/output");
        env_store.remove(key);
        assert_eq!(None, env_store.get(key).unwrap());
    }

    #[test]
    fn it_treats_blank_values_as_unset() {
        let key = GateEnvKey::GithubOutput;
        let mut env_store = GateEnv::new();
        env_store.insert(key, "  ");
        assert_eq!(None, env_store.get(key).unwrap());
    }
}
