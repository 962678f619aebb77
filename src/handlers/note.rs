use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use super::{raw_param, Handler, Parameters};
use crate::clock::Clock;
use crate::error::{Error, Result};

const KEYWORDS: &[&str] = &["note", "write", "create note", "save note"];

/// How many same-second suffixes to try before giving up
const MAX_COLLISIONS: usize = 100;

/// Writes each note to its own timestamped file under `notes_dir`
pub struct NoteHandler {
    notes_dir: PathBuf,
    clock: Arc<dyn Clock>,
}

impl NoteHandler {
    pub fn new(notes_dir: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            notes_dir: notes_dir.into(),
            clock,
        }
    }

    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    /// Save `content` and return the path it was written to
    pub fn save(&self, content: &str) -> Result<PathBuf> {
        // Created lazily so an unused notes store never touches the disk
        fs::create_dir_all(&self.notes_dir).map_err(|source| Error::NotesDir {
            path: self.notes_dir.clone(),
            source,
        })?;

        let stamp = self.clock.now().format("%Y%m%d_%H%M%S").to_string();
        let (path, mut file) = self.create_unique(&stamp)?;

        // `file` is closed when it drops, on success and on error alike
        file.write_all(content.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|source| Error::NoteWrite {
                path: path.clone(),
                source,
            })?;

        Ok(path)
    }

    fn create_unique(&self, stamp: &str) -> Result<(PathBuf, File)> {
        let mut last_err = None;
        for n in 0..MAX_COLLISIONS {
            let name = if n == 0 {
                format!("note_{}.txt", stamp)
            } else {
                format!("note_{}_{}.txt", stamp, n)
            };
            let path = self.notes_dir.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    last_err = Some((path, e));
                }
                Err(source) => return Err(Error::NoteWrite { path, source }),
            }
        }

        let (path, source) = last_err.unwrap_or_else(|| {
            (
                self.notes_dir.clone(),
                io::Error::new(io::ErrorKind::AlreadyExists, "no free note name"),
            )
        });
        Err(Error::NoteWrite { path, source })
    }
}

impl Handler for NoteHandler {
    fn name(&self) -> &'static str {
        "note"
    }

    fn keywords(&self) -> &[&'static str] {
        KEYWORDS
    }

    fn execute(&self, _command: &str, parameters: Option<&Parameters>) -> String {
        // Blank content is a missing note; anything else is written verbatim
        let Some(content) = raw_param(parameters, "content") else {
            return "What would you like me to write in the note?".to_string();
        };

        match self.save(content) {
            Ok(path) => {
                info!(path = %path.display(), "note saved");
                format!("I've created a note with your content: {}", content)
            }
            Err(e) => {
                warn!(error = %e, "note failed");
                format!("Sorry, I couldn't save the note. Error: {}", e)
            }
        }
    }
}
