use thiserror::Error;

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, mapping an absent value to a structured
/// error that names the variable.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    std::env::var(name).map_err(|_| MissingEnvVarError(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_var_names_the_variable() {
        let err = get_env_var("BAR_ARCHIVE_TEST_VAR_THAT_DOES_NOT_EXIST").unwrap_err();
        assert!(
            err.to_string()
                .contains("BAR_ARCHIVE_TEST_VAR_THAT_DOES_NOT_EXIST")
        );
    }
}
