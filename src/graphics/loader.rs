//! Reading shader sources from disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read file {}: file does not exist", .path.display())]
    NotFound { path: PathBuf },

    #[error("could not read file {}: {}", .path.display(), .source)]
    Io { path: PathBuf, source: io::Error },
}

/// Reads a shader source file, ending every line with `\n`.
pub fn try_read_shader<P: AsRef<Path>>(path: P) -> Result<String, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound { path: path.to_owned() },
        _ => LoadError::Io { path: path.to_owned(), source },
    })?;

    Ok(text.lines().flat_map(|line| line.chars().chain(Some('\n'))).collect())
}

/// Like [`try_read_shader`], but a missing or unreadable file only logs a warning and yields an
/// empty source. The shader built from it then fails to compile and reports that instead.
pub fn read_shader<P: AsRef<Path>>(path: P) -> String {
    match try_read_shader(path) {
        Ok(source) => source,
        Err(e) => {
            warn!("{}", e);
            String::new()
        }
    }
}
