//! Identifier codec: the reversible mapping between a module file's path and
//! its flat dictionary key.
//!
//! A module at `<keys_root>/components/button.translations.json` becomes the
//! identifier `module:components:button`. Both path separators and dots are
//! rewritten to `:`, so identifiers never collide with the `.`-joined lookup
//! paths the consuming application uses inside a translation tree, and `:`
//! cannot appear in a file name so the rewrite never clashes with real names.
//! Decoding maps each `:` back to a path separator; module files are expected
//! to carry no dots besides the configured ending.

use std::path::{Path, PathBuf};

use crate::error::Error;

/// Prefix marking a dictionary key as engine-owned.
pub const ID_PREFIX: &str = "module:";

/// Encodes a module file path into its dictionary identifier.
///
/// `file_path` must live under `keys_root` and end with `module_ending`;
/// callers filter candidates before encoding.
pub fn encode_module_id(keys_root: &Path, module_ending: &str, file_path: &Path) -> String {
    let relative = file_path
        .strip_prefix(keys_root)
        .unwrap_or(file_path)
        .to_string_lossy();
    let trimmed = relative
        .strip_suffix(module_ending)
        .unwrap_or(&relative)
        .trim_start_matches(std::path::MAIN_SEPARATOR);

    let encoded = trimmed
        .replace(std::path::MAIN_SEPARATOR, ":")
        .replace('.', ":");
    format!("{}{}", ID_PREFIX, encoded)
}

/// Decodes a dictionary identifier back into the module file path it was
/// produced from, given the same `keys_root` and `module_ending`.
pub fn decode_module_id(
    id: &str,
    keys_root: &Path,
    module_ending: &str,
) -> Result<PathBuf, Error> {
    let encoded = id
        .strip_prefix(ID_PREFIX)
        .ok_or_else(|| Error::InvalidIdentifier(id.to_string()))?;

    let mut path = keys_root.to_path_buf();
    for segment in encoded.split(':') {
        path.push(segment);
    }

    let file_name = match path.file_name() {
        Some(name) => format!("{}{}", name.to_string_lossy(), module_ending),
        None => return Err(Error::InvalidIdentifier(id.to_string())),
    };
    path.set_file_name(file_name);

    Ok(path)
}
