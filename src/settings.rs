//! Run settings
//!
//! Layered from lowest to highest precedence: defaults, a JSON config file
//! given with `--config`, then the remaining command line flags.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Settings loading failures
#[derive(Debug)]
pub enum SettingsError {
    /// Config file couldn't be read
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Config file isn't valid settings JSON
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Bad or incomplete command line argument
    BadArgument(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io { path, source } => {
                write!(f, "failed to read config {}: {}", path.display(), source)
            }
            SettingsError::Json { path, source } => {
                write!(f, "invalid config {}: {}", path.display(), source)
            }
            SettingsError::BadArgument(msg) => write!(f, "bad argument: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io { source, .. } => Some(source),
            SettingsError::Json { source, .. } => Some(source),
            SettingsError::BadArgument(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gap placement seed; random when absent
    pub seed: Option<u64>,
    /// Directory of PNG sprites; built-in art when absent
    pub assets_dir: Option<PathBuf>,
    /// Also print the run summary as JSON on exit
    pub print_summary_json: bool,
}

pub const USAGE: &str =
    "usage: flappy-pipes [--config <file.json>] [--seed <n>] [--assets <dir>] [--json]";

impl Settings {
    /// Read settings from a JSON file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&json).map_err(|source| SettingsError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Build settings from command line arguments (program name excluded)
    ///
    /// Unknown flags are skipped with a warning.
    pub fn from_args<I, S>(args: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();

        // The config file is the base layer whatever its position
        let mut settings = match flag_value(&args, "--config")? {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--config" => {
                    iter.next();
                }
                "--seed" => {
                    let value = next_value(&mut iter, "--seed")?;
                    let seed = value.parse().map_err(|_| {
                        SettingsError::BadArgument(format!(
                            "--seed expects a number, got '{}'",
                            value
                        ))
                    })?;
                    settings.seed = Some(seed);
                }
                "--assets" => {
                    settings.assets_dir = Some(PathBuf::from(next_value(&mut iter, "--assets")?));
                }
                "--json" => settings.print_summary_json = true,
                other => log::warn!("Ignoring unknown argument '{}'", other),
            }
        }

        Ok(settings)
    }
}

fn next_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<&'a String, SettingsError> {
    iter.next()
        .ok_or_else(|| SettingsError::BadArgument(format!("{} needs a value", flag)))
}

/// Value following the last occurrence of `flag`
fn flag_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a String>, SettingsError> {
    let mut found = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == flag {
            found = Some(next_value(&mut iter, flag)?);
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str, json: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "flappy-pipes-{}-{}.json",
            name,
            std::process::id()
        ));
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_args(Vec::<String>::new()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.seed, None);
        assert!(!settings.print_summary_json);
    }

    #[test]
    fn test_command_line_flags() {
        let settings = Settings::from_args(["--seed", "42", "--assets", "art", "--json"]).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.assets_dir, Some(PathBuf::from("art")));
        assert!(settings.print_summary_json);
    }

    #[test]
    fn test_bad_arguments() {
        let err = Settings::from_args(["--seed", "forty"]).unwrap_err();
        assert!(matches!(err, SettingsError::BadArgument(_)));
        assert!(err.to_string().contains("forty"));

        let err = Settings::from_args(["--assets"]).unwrap_err();
        assert!(matches!(err, SettingsError::BadArgument(_)));
    }

    #[test]
    fn test_unknown_argument_is_skipped() {
        let settings = Settings::from_args(["--fullscreen", "--seed", "7"]).unwrap();
        assert_eq!(settings.seed, Some(7));
    }

    #[test]
    fn test_flags_override_config_file() {
        let path = temp_config("override", r#"{"seed": 1, "print_summary_json": true}"#);
        let args = [
            "--seed".to_string(),
            "9".to_string(),
            "--config".to_string(),
            path.display().to_string(),
        ];
        let settings = Settings::from_args(args).unwrap();
        assert_eq!(settings.seed, Some(9));
        assert!(settings.print_summary_json);
        assert_eq!(settings.assets_dir, None);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_errors() {
        let missing = std::env::temp_dir().join("flappy-pipes-no-such-config.json");
        assert!(matches!(
            Settings::load(&missing),
            Err(SettingsError::Io { .. })
        ));

        let path = temp_config("broken", "{ seed: ");
        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Json { .. }));
        assert!(std::error::Error::source(&err).is_some());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_settings_json_shape() {
        let settings = Settings {
            seed: Some(5),
            assets_dir: None,
            print_summary_json: false,
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"seed":5,"assets_dir":null,"print_summary_json":false}"#);
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
