//! Files as sources and destinations of the transfer operations.
//!
//! Unlike the stream primitives, these functions open the files
//! themselves, so they also close them before returning.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use crate::{Result, TransferConfig};

/// Copy `reader` into the file at `path`, creating missing parent
/// directories and truncating an existing file. `reader` is not closed.
pub fn copy_to_file<R: Read + ?Sized>(
    reader: &mut R,
    path: impl AsRef<Path>,
) -> Result<u64> {
    TransferConfig::default().copy_to_file(reader, path)
}

/// Copy the content of one file to another, see [`copy_to_file`].
pub fn copy_file(
    from: impl AsRef<Path>,
    to: impl AsRef<Path>,
) -> Result<u64> {
    TransferConfig::default().copy_file(from, to)
}

pub fn write_bytes(bytes: &[u8], path: impl AsRef<Path>) -> Result<()> {
    let mut file = create_destination(path.as_ref())?;
    crate::copy::copy_bytes(bytes, &mut file)
}

pub fn read_bytes(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let file = File::open(path.as_ref())?;
    crate::copy::copy_to_bytes(Some(file))
}

impl TransferConfig {
    pub fn copy_to_file<R: Read + ?Sized>(
        &self,
        reader: &mut R,
        path: impl AsRef<Path>,
    ) -> Result<u64> {
        let path = path.as_ref();
        let mut file = create_destination(path)?;
        let copied = self.copy(reader, &mut file)?;

        log::debug!("{} bytes written to {}", copied, path.display());
        Ok(copied)
    }

    pub fn copy_file(
        &self,
        from: impl AsRef<Path>,
        to: impl AsRef<Path>,
    ) -> Result<u64> {
        let mut source = File::open(from.as_ref())?;
        self.copy_to_file(&mut source, to)
    }
}

fn create_destination(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            log::debug!("creating parent directory {}", parent.display());
            fs::create_dir_all(parent)?;
        }
    }
    Ok(File::create(path)?)
}
