use std::fs;
use std::path::Path;
use tracing::debug;

use crate::constants::BATCH_FILE_EXTENSION;
use crate::utils::PokedexError;

/// Turn the raw `input` argument into the list of identifiers to look up.
///
/// An input without an extension is a single identifier. A `.txt` input is
/// a batch file read line by line; every line is trimmed and lower-cased,
/// and blank lines are kept so the output has one block per line. Any other
/// extension is rejected. No network I/O happens here.
pub fn resolve(input: &str) -> Result<Vec<String>, PokedexError> {
    let path = Path::new(input);

    match path.extension() {
        None => Ok(vec![input.trim().to_lowercase()]),
        Some(ext) if ext.eq_ignore_ascii_case(BATCH_FILE_EXTENSION) => read_batch_file(path),
        Some(_) => Err(PokedexError::InvalidFile(input.to_string())),
    }
}

fn read_batch_file(path: &Path) -> Result<Vec<String>, PokedexError> {
    if !path.exists() {
        return Err(PokedexError::FileNotFound(path.to_path_buf()));
    }

    if fs::metadata(path)?.len() == 0 {
        return Err(PokedexError::EmptyFile(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let queries: Vec<String> = content
        .lines()
        .map(|line| line.trim().to_lowercase())
        .collect();

    debug!("Read {} queries from {}", queries.len(), path.display());
    Ok(queries)
}
