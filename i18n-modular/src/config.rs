//! Engine options and rc-file discovery.
//!
//! Options come from three layers with descending precedence: explicit
//! values (CLI flags or library callers), an optional `.i18n-modular-rc.json`
//! in the context directory, and built-in defaults. Relative paths are
//! rebased onto the context directory, which itself can be redirected with
//! the `I18N_MODULAR_CONTEXT` environment variable.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::dictionary::LOCALE_PLACEHOLDER;
use crate::error::Error;

/// Name of the optional configuration file looked up in the context dir.
pub const RC_FILE_NAME: &str = ".i18n-modular-rc.json";

/// Environment variable redirecting the context directory.
pub const ENV_CONTEXT: &str = "I18N_MODULAR_CONTEXT";

pub const DEFAULT_KEYS_ROOT: &str = "./";
pub const DEFAULT_MODULE_ENDING: &str = ".translations.json";

/// Fully resolved options the sync engine runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Directory under which module files are searched.
    pub keys_root: PathBuf,
    /// Filename suffix identifying module files.
    pub module_ending: String,
    /// Dictionary path template containing `[locale_code]`.
    pub dictionary_pattern: PathBuf,
}

/// One layer of options, all fields optional so layers can be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialOptions {
    pub keys_root: Option<PathBuf>,
    pub module_ending: Option<String>,
    pub dictionary_pattern: Option<PathBuf>,
}

impl PartialOptions {
    /// Loads a layer from an rc file. A missing file is an empty layer.
    pub fn from_rc_file(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|source| Error::parse_error(path, source))
    }

    /// Fills unset fields from a lower-precedence layer.
    pub fn or(mut self, fallback: Self) -> Self {
        self.keys_root = self.keys_root.or(fallback.keys_root);
        self.module_ending = self.module_ending.or(fallback.module_ending);
        self.dictionary_pattern = self.dictionary_pattern.or(fallback.dictionary_pattern);
        self
    }

    /// Applies defaults, rebases paths onto `context`, and normalizes the
    /// dictionary pattern. `dictionaryPattern` has no default and must be
    /// present in some layer.
    pub fn resolve(self, context: &Path) -> Result<SyncOptions, Error> {
        let keys_root = self
            .keys_root
            .unwrap_or_else(|| PathBuf::from(DEFAULT_KEYS_ROOT));
        let module_ending = self
            .module_ending
            .unwrap_or_else(|| DEFAULT_MODULE_ENDING.to_string());
        let dictionary_pattern = self
            .dictionary_pattern
            .ok_or_else(|| Error::Config("dictionaryPattern is required".to_string()))?;

        Ok(SyncOptions {
            keys_root: rebase(context, &keys_root),
            module_ending,
            dictionary_pattern: normalize_pattern(rebase(context, &dictionary_pattern)),
        })
    }
}

/// Resolves a possibly relative path against the context directory.
pub fn rebase(context: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        context.join(path)
    }
}

/// The directory all relative options are resolved against: the current
/// directory, optionally redirected by `I18N_MODULAR_CONTEXT`.
pub fn context_dir() -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    match std::env::var_os(ENV_CONTEXT) {
        Some(redirect) => rebase(&cwd, Path::new(&redirect)),
        None => cwd,
    }
}

/// A pattern without the locale placeholder names a directory; dictionaries
/// default to `<dir>/[locale_code].json` inside it.
fn normalize_pattern(pattern: PathBuf) -> PathBuf {
    if pattern.to_string_lossy().contains(LOCALE_PLACEHOLDER) {
        pattern
    } else {
        pattern.join(format!("{}.json", LOCALE_PLACEHOLDER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_applies_defaults_and_rebases() {
        let options = PartialOptions {
            dictionary_pattern: Some(PathBuf::from("locales/[locale_code].json")),
            ..PartialOptions::default()
        }
        .resolve(Path::new("/project"))
        .unwrap();

        assert_eq!(options.keys_root, Path::new("/project"));
        assert_eq!(options.module_ending, ".translations.json");
        assert_eq!(
            options.dictionary_pattern,
            Path::new("/project/locales/[locale_code].json")
        );
    }

    #[test]
    fn test_resolve_requires_a_dictionary_pattern() {
        let result = PartialOptions::default().resolve(Path::new("/project"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_resolve_expands_directory_patterns() {
        let options = PartialOptions {
            dictionary_pattern: Some(PathBuf::from("/project/locales")),
            ..PartialOptions::default()
        }
        .resolve(Path::new("/project"))
        .unwrap();

        assert_eq!(
            options.dictionary_pattern,
            Path::new("/project/locales/[locale_code].json")
        );
    }

    #[test]
    fn test_or_prefers_the_higher_precedence_layer() {
        let flags = PartialOptions {
            module_ending: Some(".strings.json".to_string()),
            ..PartialOptions::default()
        };
        let rc = PartialOptions {
            module_ending: Some(".translations.json".to_string()),
            dictionary_pattern: Some(PathBuf::from("/locales")),
            ..PartialOptions::default()
        };

        let merged = flags.or(rc);
        assert_eq!(merged.module_ending.as_deref(), Some(".strings.json"));
        assert_eq!(
            merged.dictionary_pattern.as_deref(),
            Some(Path::new("/locales"))
        );
    }

    #[test]
    fn test_rebase_keeps_absolute_paths() {
        assert_eq!(
            rebase(Path::new("/ctx"), Path::new("/abs/path")),
            Path::new("/abs/path")
        );
        assert_eq!(
            rebase(Path::new("/ctx"), Path::new("rel/path")),
            Path::new("/ctx/rel/path")
        );
    }

    #[test]
    fn test_missing_rc_file_is_an_empty_layer() {
        let layer = PartialOptions::from_rc_file(Path::new("/nonexistent/.i18n-modular-rc.json"))
            .unwrap();
        assert!(layer.keys_root.is_none());
        assert!(layer.dictionary_pattern.is_none());
    }
}
