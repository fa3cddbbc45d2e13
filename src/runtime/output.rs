use colored::Colorize;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use super::pipeline::QueryEvent;
use super::request::OutputTarget;
use crate::constants::SPRITE_FILE_EXTENSION;
use crate::utils::PokedexError;

/// Send the accumulated results to their target
pub fn emit(target: &OutputTarget, results: &str) -> Result<(), PokedexError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    emit_to(target, results, &mut handle)
}

/// Like [`emit`], with the console replaced by `console`
pub fn emit_to<W: Write>(
    target: &OutputTarget,
    results: &str,
    console: &mut W,
) -> Result<(), PokedexError> {
    match target {
        OutputTarget::Print => {}
        OutputTarget::File(path) => {
            fs::write(path, results)?;
            info!("Results written to {}", path.display());
            return Ok(());
        }
        OutputTarget::Unsupported(raw) => {
            debug!("Unsupported output target '{}'", raw);
            eprintln!(
                "{}",
                "The output file should be a .txt file. The results will be printed to the console instead."
                    .yellow()
            );
        }
    }

    console.write_all(results.as_bytes())?;
    console.flush()?;
    Ok(())
}

/// Writes the sprite carried by a query event into a directory
pub struct SpriteSaver {
    dir: PathBuf,
}

impl SpriteSaver {
    /// Create the saver, creating `dir` if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, PokedexError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Save the event's sprite as `<name>.png`; returns the written path
    pub fn save(&self, event: &QueryEvent) -> Result<Option<PathBuf>, PokedexError> {
        let Some(sprite) = &event.sprite else {
            return Ok(None);
        };

        let path = self
            .dir
            .join(format!("{}.{}", sprite.name, SPRITE_FILE_EXTENSION));
        fs::write(&path, &sprite.bytes)?;
        info!("Saved sprite {}", path.display());
        Ok(Some(path))
    }
}
