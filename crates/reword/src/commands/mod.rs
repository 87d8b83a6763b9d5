//! Subcommands of the `reword` binary.

pub mod languages;
pub mod outline;
pub mod translate;
pub mod typegen;

use crate::error::Error;
use std::io::Read;
use std::path::Path;

/// Read a file, or stdin when `path` is `-`.
pub(crate) fn read_input(path: &Path) -> Result<String, Error> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| Error::Read {
                path: path.to_path_buf(),
                source,
            })?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `content` to `path`, creating parent directories.
pub(crate) fn write_output(path: &Path, content: &str) -> Result<(), Error> {
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, content).map_err(write_err)
}
