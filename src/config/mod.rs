pub mod prompt;

pub use prompt::{Prompter, StdinPrompter};

use crate::utils::errors::{Result, UploaderError};
use std::path::PathBuf;

/// Values from flags or, when a flag is absent, its environment variable
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub vault_url: Option<String>,
    pub configmap_file: Option<String>,
    pub vault_path: Option<String>,
}

/// Fully resolved settings for one upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub vault_url: String,
    pub configmap_file: PathBuf,
    pub vault_path: String,
}

#[derive(Debug, Clone, Copy)]
enum Field {
    VaultUrl,
    ConfigMapFile,
    VaultPath,
}

impl Field {
    fn env_var(self) -> &'static str {
        match self {
            Field::VaultUrl => "VAULT_URL",
            Field::ConfigMapFile => "CONFIGMAP_FILE",
            Field::VaultPath => "VAULT_PATH",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Field::VaultUrl => "Vault URL",
            Field::ConfigMapFile => "ConfigMap file",
            Field::VaultPath => "Vault path",
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Configuration {
    /// Fill whatever the command line and environment left empty from the prompter.
    ///
    /// Empty strings count as absent. All fields are resolved before
    /// reporting, so the error names everything that is missing.
    pub fn resolve(overrides: ConfigOverrides, prompter: &mut dyn Prompter) -> Result<Self> {
        let mut missing = Vec::new();
        let mut lookup = |field: Field, given: Option<String>| -> Result<Option<String>> {
            if let Some(value) = non_empty(given) {
                tracing::debug!("{} taken from flag or ${}", field.label(), field.env_var());
                return Ok(Some(value));
            }
            let answer = non_empty(prompter.prompt(&format!("Enter {}", field.label()))?);
            if answer.is_none() {
                missing.push(field.env_var());
            }
            Ok(answer)
        };

        let vault_url = lookup(Field::VaultUrl, overrides.vault_url)?;
        let configmap_file = lookup(Field::ConfigMapFile, overrides.configmap_file)?;
        let vault_path = lookup(Field::VaultPath, overrides.vault_path)?;

        match (vault_url, configmap_file, vault_path) {
            (Some(vault_url), Some(configmap_file), Some(vault_path)) => Ok(Self {
                vault_url,
                configmap_file: PathBuf::from(configmap_file),
                vault_path,
            }),
            _ => Err(UploaderError::MissingConfiguration(missing)),
        }
    }

    /// Resolve, prompting on stdin
    pub fn resolve_interactive(overrides: ConfigOverrides) -> Result<Self> {
        Self::resolve(overrides, &mut StdinPrompter)
    }

    /// Fails unless the ConfigMap path names an existing regular file
    pub fn validate_file(&self) -> Result<()> {
        if self.configmap_file.is_file() {
            Ok(())
        } else {
            Err(UploaderError::FileNotFound(self.configmap_file.clone()))
        }
    }

    /// Rows for the pre-flight summary
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Vault URL:", self.vault_url.clone()),
            ("ConfigMap file:", self.configmap_file.display().to_string()),
            ("Vault path:", self.vault_path.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::{CommandFactory, FromArgMatches};
    use std::env;

    /// Answers from a fixed list and records every question asked
    struct ScriptedPrompter {
        answers: Vec<Option<String>>,
        asked: Vec<String>,
    }

    impl ScriptedPrompter {
        fn new(answers: &[Option<&str>]) -> Self {
            Self {
                answers: answers.iter().rev().map(|&a| a.map(String::from)).collect(),
                asked: Vec::new(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn prompt(&mut self, label: &str) -> Result<Option<String>> {
            self.asked.push(label.to_string());
            Ok(self.answers.pop().flatten())
        }
    }

    /// Parse `args` with each setting bound to a variable only this test uses
    fn parse(args: &[&str], vars: [&'static str; 3]) -> ConfigOverrides {
        let matches = Cli::command()
            .mut_arg("vault_url", |arg| arg.env(vars[0]))
            .mut_arg("configmap_file", |arg| arg.env(vars[1]))
            .mut_arg("vault_path", |arg| arg.env(vars[2]))
            .try_get_matches_from(args)
            .unwrap();
        Cli::from_arg_matches(&matches).unwrap().overrides()
    }

    #[test]
    fn test_flag_beats_environment() {
        let vars = ["CMV_FLAG_URL", "CMV_FLAG_FILE", "CMV_FLAG_PATH"];
        env::set_var(vars[0], "http://env:8200");
        env::set_var(vars[1], "env.yaml");
        env::set_var(vars[2], "secret/env");

        let overrides = parse(
            &[
                "configmap-vault",
                "-u",
                "http://flag:8200",
                "-c",
                "flag.yaml",
                "-p",
                "secret/flag",
            ],
            vars,
        );
        let mut prompter = ScriptedPrompter::new(&[]);
        let config = Configuration::resolve(overrides, &mut prompter).unwrap();

        assert_eq!(config.vault_url, "http://flag:8200");
        assert_eq!(config.configmap_file, PathBuf::from("flag.yaml"));
        assert_eq!(config.vault_path, "secret/flag");
        assert!(prompter.asked.is_empty());
    }

    #[test]
    fn test_environment_beats_prompt() {
        let vars = ["CMV_ENV_URL", "CMV_ENV_FILE", "CMV_ENV_PATH"];
        env::set_var(vars[0], "http://env:8200");
        env::set_var(vars[2], "secret/env");

        let overrides = parse(&["configmap-vault"], vars);
        let mut prompter = ScriptedPrompter::new(&[Some("prompted.yaml")]);
        let config = Configuration::resolve(overrides, &mut prompter).unwrap();

        assert_eq!(config.vault_url, "http://env:8200");
        assert_eq!(config.configmap_file, PathBuf::from("prompted.yaml"));
        assert_eq!(config.vault_path, "secret/env");
        assert_eq!(prompter.asked, vec!["Enter ConfigMap file"]);
    }

    #[test]
    fn test_prompt_is_last_resort_for_each_field() {
        let overrides = parse(
            &["configmap-vault"],
            ["CMV_PROMPT_URL", "CMV_PROMPT_FILE", "CMV_PROMPT_PATH"],
        );
        let mut prompter = ScriptedPrompter::new(&[
            Some("http://prompt:8200"),
            Some("cm.yaml"),
            Some("secret/prompt"),
        ]);

        let config = Configuration::resolve(overrides, &mut prompter).unwrap();

        assert_eq!(config.vault_url, "http://prompt:8200");
        assert_eq!(config.vault_path, "secret/prompt");
        assert_eq!(prompter.asked.len(), 3);
    }

    #[test]
    fn test_empty_values_fall_through() {
        let vars = ["CMV_EMPTY_URL", "CMV_EMPTY_FILE", "CMV_EMPTY_PATH"];
        env::set_var(vars[2], "");

        let overrides = parse(
            &["configmap-vault", "-u", "http://flag:8200", "-c", ""],
            vars,
        );
        let mut prompter = ScriptedPrompter::new(&[Some("cm.yaml"), Some("secret/prompt")]);
        let config = Configuration::resolve(overrides, &mut prompter).unwrap();

        assert_eq!(config.configmap_file, PathBuf::from("cm.yaml"));
        assert_eq!(config.vault_path, "secret/prompt");
        assert_eq!(prompter.asked, vec!["Enter ConfigMap file", "Enter Vault path"]);
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let mut prompter = ScriptedPrompter::new(&[None, Some("  "), None]);

        let err = Configuration::resolve(ConfigOverrides::default(), &mut prompter).unwrap_err();

        match err {
            UploaderError::MissingConfiguration(fields) => {
                assert_eq!(fields, vec!["VAULT_URL", "CONFIGMAP_FILE", "VAULT_PATH"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let dir = tempfile::tempdir().unwrap();

        let mut config = Configuration {
            vault_url: "http://127.0.0.1:8200".to_string(),
            configmap_file: file.path().to_path_buf(),
            vault_path: "secret/app".to_string(),
        };
        assert!(config.validate_file().is_ok());

        config.configmap_file = dir.path().join("missing.yaml");
        assert!(matches!(
            config.validate_file(),
            Err(UploaderError::FileNotFound(_))
        ));

        // Directories are not ConfigMaps
        config.configmap_file = dir.path().to_path_buf();
        assert!(config.validate_file().is_err());
    }
}
