//! Scanner settings file.
//!
//! Values are layered: command-line flag, then `EXTREMA_*` environment
//! variable (both resolved by clap), then this file, then the built-in
//! default. The file is TOML with the same keys as the long flags:
//!
//! ```toml
//! expr = "-(x - 1)^2"
//! expected = 1.0
//! kind = "maximum"
//! start = -6.0
//! end = 6.0
//! step = 0.01
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use extrema_math::extremum::ExtremumKind;
use serde::Deserialize;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Settings read from a TOML file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ScanSettings {
    /// Function expression in `x`.
    pub expr: Option<String>,
    /// Location of the extremum the scan looks for.
    pub expected: Option<f64>,
    /// Kind of the extremum.
    pub kind: Option<ExtremumKind>,
    /// First starting guess.
    pub start: Option<f64>,
    /// Last starting guess.
    pub end: Option<f64>,
    /// Mean spacing between guesses.
    pub step: Option<f64>,
    /// Precision for every stage and for matching `expected`.
    pub prec: Option<f64>,
    /// Newton tolerance and derivative step.
    pub newton_prec: Option<f64>,
    /// Classifier tolerance.
    pub classifier_prec: Option<f64>,
    /// Search round budget.
    pub max_iters: Option<u32>,
    /// Newton iteration budget.
    pub newton_max_iters: Option<u32>,
    /// Seed for the guess jitter.
    pub seed: Option<u64>,
}

impl ScanSettings {
    /// Parses settings from TOML text.
    pub fn from_toml(text: &str, path: &Path) -> CliResult<Self> {
        toml::from_str(text).map_err(|source| CliError::SettingsFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads settings.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used if a file is there, and empty settings otherwise.
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_path() {
                Some(path) if path.is_file() => path,
                _ => return Ok(Self::default()),
            },
        };

        debug!("loading settings from {}", path.display());
        let text = fs::read_to_string(&path).map_err(|source| CliError::SettingsIo {
            path: path.clone(),
            source,
        })?;
        Self::from_toml(&text, &path)
    }
}

/// Default settings file location, `<config_dir>/extrema/ranges.toml`.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("extrema").join("ranges.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_all_keys() {
        let text = r#"
            expr = "x^2"
            expected = 0.0
            kind = "minimum"
            start = -1.0
            end = 1.0
            step = 0.05
            prec = 1e-6
            newton-prec = 1e-8
            classifier-prec = 1e-4
            max-iters = 10
            newton-max-iters = 30
            seed = 7
        "#;
        let settings = ScanSettings::from_toml(text, Path::new("test.toml")).unwrap();
        assert_eq!(settings.expr.as_deref(), Some("x^2"));
        assert_eq!(settings.kind, Some(ExtremumKind::Minimum));
        assert_eq!(settings.newton_prec, Some(1e-8));
        assert_eq!(settings.classifier_prec, Some(1e-4));
        assert_eq!(settings.max_iters, Some(10));
        assert_eq!(settings.newton_max_iters, Some(30));
        assert_eq!(settings.seed, Some(7));
    }

    #[test]
    fn test_partial_file() {
        let settings = ScanSettings::from_toml("step = 0.5", Path::new("test.toml")).unwrap();
        assert_eq!(settings.step, Some(0.5));
        assert_eq!(settings.expr, None);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = ScanSettings::from_toml("stepp = 0.5", Path::new("test.toml")).unwrap_err();
        assert!(matches!(err, CliError::SettingsFormat { .. }));
    }

    #[test]
    fn test_bad_kind_rejected() {
        let err = ScanSettings::from_toml("kind = \"saddle\"", Path::new("test.toml")).unwrap_err();
        assert!(matches!(err, CliError::SettingsFormat { .. }));
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "expected = -1.0").unwrap();

        let settings = ScanSettings::load(Some(file.path())).unwrap();
        assert_eq!(settings.expected, Some(-1.0));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ScanSettings::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, CliError::SettingsIo { .. }));
    }
}
