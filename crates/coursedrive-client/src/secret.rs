//! Secret references in configuration values.
//!
//! A value may point at a secret kept outside `config.toml`:
//!
//! - `pass::path/in/store` reads the first line of `pass show path/in/store`
//! - `env::VAR_NAME` reads `$VAR_NAME`
//! - anything else is the secret itself

/// Where a secret comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretRef<'a> {
    Pass(&'a str),
    Env(&'a str),
    Plain(&'a str),
}

impl<'a> SecretRef<'a> {
    pub fn parse(value: &'a str) -> Self {
        if let Some(path) = value.strip_prefix("pass::") {
            Self::Pass(path)
        } else if let Some(var) = value.strip_prefix("env::") {
            Self::Env(var)
        } else {
            Self::Plain(value)
        }
    }

    /// Returns true when the value lives outside the config file.
    pub fn is_indirect(&self) -> bool {
        !matches!(self, Self::Plain(_))
    }

    /// Looks the secret up.
    pub fn resolve(&self) -> Result<String, String> {
        match *self {
            Self::Pass(path) => from_pass(path),
            Self::Env(var) => std::env::var(var)
                .map_err(|_| format!("environment variable `{}` is not set", var)),
            Self::Plain(value) => Ok(value.to_string()),
        }
    }
}

/// Resolves a configuration value that may be a secret reference.
pub fn resolve(value: &str) -> Result<String, String> {
    SecretRef::parse(value).resolve()
}

fn from_pass(path: &str) -> Result<String, String> {
    let output = std::process::Command::new("pass")
        .args(["show", path])
        .output()
        .map_err(|e| format!("failed to run `pass show {}`: {}", path, e))?;

    if !output.status.success() {
        return Err(format!(
            "`pass show {}` failed ({}): {}",
            path,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(str::to_string)
        .ok_or_else(|| format!("`pass show {}` produced no output", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_prefixes() {
        assert_eq!(SecretRef::parse("pass::drive/key"), SecretRef::Pass("drive/key"));
        assert_eq!(SecretRef::parse("env::DRIVE_KEY"), SecretRef::Env("DRIVE_KEY"));
        assert_eq!(SecretRef::parse("AIzaPlain"), SecretRef::Plain("AIzaPlain"));
        assert!(SecretRef::parse("env::X").is_indirect());
        assert!(!SecretRef::parse("X").is_indirect());
    }

    #[test]
    fn plain_value_passes_through() {
        assert_eq!(resolve("AIza-key").unwrap(), "AIza-key");
    }

    #[test]
    fn env_reference_resolves() {
        unsafe {
            std::env::set_var("_COURSEDRIVE_TEST_SECRET", "from-env");
        }
        assert_eq!(resolve("env::_COURSEDRIVE_TEST_SECRET").unwrap(), "from-env");
        unsafe {
            std::env::remove_var("_COURSEDRIVE_TEST_SECRET");
        }
    }

    #[test]
    fn missing_env_var_errors() {
        let err = resolve("env::_COURSEDRIVE_MISSING_VAR_98765").unwrap_err();
        assert!(err.contains("not set"));
    }

    #[test]
    fn failing_pass_lookup_errors() {
        assert!(resolve("pass::coursedrive/does/not/exist/98765").is_err());
    }
}
