//! The synchronization engine: the three operations that move data between
//! module files and per-language dictionaries.
//!
//! Each operation is stateless between runs and re-reads everything from
//! disk. Writes are not transactional across files; a parse or validation
//! failure aborts the run and leaves earlier writes in place.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::SyncOptions;
use crate::dictionary::{dictionary_path, dictionary_regex, generated_entries, seed_entries};
use crate::error::Error;
use crate::id::{decode_module_id, encode_module_id};
use crate::module::{read_module, write_language_tree};
use crate::sort::{deep_sorted_value, sorted_map};

/// Outcome of a [`build`] run.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// When the operation started, for elapsed-time reporting.
    pub started: Instant,
    /// Number of module files read.
    pub modules: usize,
    /// Number of dictionary files written.
    pub languages: usize,
}

/// Outcome of an [`update`] run.
#[derive(Debug, Clone)]
pub struct UpdateReport {
    pub started: Instant,
    /// Number of module files overwritten.
    pub updated: usize,
    /// Identifiers whose decoded module path no longer exists on disk.
    pub skipped: Vec<String>,
}

/// Outcome of a [`clean`] run.
#[derive(Debug, Clone)]
pub struct CleanReport {
    pub started: Instant,
    /// Number of dictionary files rewritten.
    pub cleaned: usize,
}

/// Builds every language's dictionary from the module files under
/// `keys_root`.
///
/// Seed entries in existing dictionaries are preserved; generated entries
/// are replaced wholesale. Output is canonically sorted, so repeated runs
/// over unchanged inputs produce byte-identical files. A language that no
/// module mentions is left untouched.
pub fn build(options: &SyncOptions) -> Result<BuildReport, Error> {
    let started = Instant::now();
    debug!("attempting to build dictionaries");

    if !options.keys_root.is_dir() {
        return Err(Error::MissingSource(options.keys_root.clone()));
    }

    let module_files = module_files(options)?;

    // generated[language][id] = that module's tree for the language
    let mut generated: BTreeMap<String, Map<String, Value>> = BTreeMap::new();
    for path in &module_files {
        let id = encode_module_id(&options.keys_root, &options.module_ending, path);
        let raw = fs::read_to_string(path)?;

        for (language, tree) in read_module(&raw, path)? {
            generated
                .entry(language)
                .or_default()
                .insert(id.clone(), tree);
        }
    }

    debug!(
        modules = module_files.len(),
        "found module files, updating dictionaries"
    );

    let languages = generated.len();
    for (language, entries) in generated {
        let path = dictionary_path(&options.dictionary_pattern, &language);

        let mut dictionary = existing_seed(&path)?;
        dictionary.extend(entries);

        let content = write_language_tree(&Value::Object(sorted_map(&dictionary)))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        debug!(language = %language, path = %path.display(), "saved dictionary");
    }

    debug!("dictionaries updated successfully");
    Ok(BuildReport {
        started,
        modules: module_files.len(),
        languages,
    })
}

/// Pushes dictionary edits back into the module files they came from.
///
/// All dictionaries are read and accumulated per identifier before any
/// module file is written, so a module is never overwritten with a partial
/// set of languages. An identifier whose decoded path no longer exists is
/// skipped and recorded; dictionaries routinely outlive deleted source
/// files. Module files are never created here.
pub fn update(options: &SyncOptions) -> Result<UpdateReport, Error> {
    let started = Instant::now();
    debug!("attempting to update module files");

    let regex = dictionary_regex(&options.dictionary_pattern)?;
    let dictionary_files = dictionary_files(options)?;

    // updates[id][language] = the dictionary entry for that language
    let mut updates: BTreeMap<String, Map<String, Value>> = BTreeMap::new();
    for path in &dictionary_files {
        let Some(language) = regex
            .captures(&path.to_string_lossy())
            .and_then(|captures| captures.get(1))
            .map(|locale| locale.as_str().to_string())
        else {
            continue;
        };

        let raw = fs::read_to_string(path)?;
        let dictionary: Map<String, Value> =
            serde_json::from_str(&raw).map_err(|source| Error::parse_error(path, source))?;

        for (id, value) in generated_entries(&dictionary) {
            updates.entry(id).or_default().insert(language.clone(), value);
        }
    }

    debug!(ids = updates.len(), "found module ids in dictionaries");

    // Accumulation above is a full barrier: no module write happens until
    // every dictionary has contributed its languages.
    let mut updated = 0;
    let mut skipped = Vec::new();
    for (id, per_language) in updates {
        let path = decode_module_id(&id, &options.keys_root, &options.module_ending)?;
        if !path.is_file() {
            warn!(id = %id, path = %path.display(), "module no longer exists, skipping");
            skipped.push(id);
            continue;
        }

        let content = write_language_tree(&deep_sorted_value(&Value::Object(per_language)))?;
        fs::write(&path, content)?;
        debug!(id = %id, path = %path.display(), "saved module");
        updated += 1;
    }

    debug!("modules updated successfully");
    Ok(UpdateReport {
        started,
        updated,
        skipped,
    })
}

/// Strips every generated entry from every dictionary, leaving only seed
/// keys.
///
/// The result is what an external translation tool should see. Running it
/// twice is idempotent.
pub fn clean(options: &SyncOptions) -> Result<CleanReport, Error> {
    let started = Instant::now();
    debug!("attempting to clean");

    let mut cleaned = 0;
    for path in dictionary_files(options)? {
        let raw = fs::read_to_string(&path)?;
        let dictionary: Map<String, Value> =
            serde_json::from_str(&raw).map_err(|source| Error::parse_error(&path, source))?;

        let content = write_language_tree(&Value::Object(seed_entries(&dictionary)))?;
        fs::write(&path, content)?;
        debug!(path = %path.display(), "cleaned dictionary");
        cleaned += 1;
    }

    debug!("dictionaries cleaned successfully");
    Ok(CleanReport { started, cleaned })
}

fn module_files(options: &SyncOptions) -> Result<Vec<PathBuf>, Error> {
    let ending = options.module_ending.clone();
    collect_files(&options.keys_root, &move |path: &Path| {
        path.to_string_lossy().ends_with(&ending)
    })
}

fn dictionary_files(options: &SyncOptions) -> Result<Vec<PathBuf>, Error> {
    let root = options
        .dictionary_pattern
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            Error::InvalidPattern(options.dictionary_pattern.to_string_lossy().into_owned())
        })?;
    let regex = dictionary_regex(&options.dictionary_pattern)?;

    collect_files(&root, &move |path: &Path| {
        regex.is_match(&path.to_string_lossy())
    })
}

/// Recursive walk with sorted directory entries, so every run visits files
/// in the same order regardless of how the OS returns them.
fn collect_files(dir: &Path, matches: &dyn Fn(&Path) -> bool) -> Result<Vec<PathBuf>, Error> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<_, _>>()?;
    entries.sort();

    let mut files = Vec::new();
    for path in entries {
        if path.is_dir() {
            files.extend(collect_files(&path, matches)?);
        } else if matches(&path) {
            files.push(path);
        }
    }

    Ok(files)
}

fn existing_seed(path: &Path) -> Result<Map<String, Value>, Error> {
    match fs::read_to_string(path) {
        Ok(raw) => {
            let existing: Map<String, Value> =
                serde_json::from_str(&raw).map_err(|source| Error::parse_error(path, source))?;
            Ok(seed_entries(&existing))
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
        Err(err) => Err(err.into()),
    }
}
