//! Shared plumbing for the `translate`, `assemble`, and `execute` binaries.

pub mod error;

use error::Error;
use std::fs;
use std::path::Path;

pub fn read_to_string(path: impl AsRef<Path>) -> Result<String, Error> {
    fs::read_to_string(path.as_ref()).map_err(|e| Error::io(path.as_ref(), e))
}

pub fn write(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<(), Error> {
    fs::write(path.as_ref(), contents).map_err(|e| Error::io(path.as_ref(), e))
}
