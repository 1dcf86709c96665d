//! External collaborators the recovery subsystem consumes but does not own:
//! the virtual filesystem seam.
//!
//! `Vfs` is the trait boundary recovery calls through for every directory
//! and file operation; `StdVfs` is the default implementation over
//! `std::fs`, and tests substitute other implementations to inject faults
//! that are hard to reproduce against a real filesystem (a rename that
//! fails halfway, a read_dir that reports a file that then vanishes).

use std::{
    fs,
    io::Read,
    path::{Path, PathBuf},
};

use crate::{err_at, Error, Result};

/// Filesystem operations recovery needs, kept narrow on purpose: one
/// directory listing primitive, one atomic rename, one unlink, one create,
/// one open-for-read, one existence check, one mkdir.
pub trait Vfs {
    fn exists(&self, path: &Path) -> bool;

    fn mkdir(&self, path: &Path) -> Result<()>;

    /// Names only, in whatever order the OS returns them — ordering is not
    /// a recovery invariant; the id each name encodes is.
    fn read_dir(&self, path: &Path) -> Result<Vec<String>>;

    fn rename(&self, from: &Path, to: &Path) -> Result<()>;

    fn unlink(&self, path: &Path) -> Result<()>;

    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;

    fn write_new_file(&self, path: &Path, data: &[u8]) -> Result<()>;
}

/// Default `Vfs` over `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdVfs;

impl Vfs for StdVfs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn mkdir(&self, path: &Path) -> Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            let mut builder = fs::DirBuilder::new();
            builder.mode(0o755);
            err_at!(Io, path, builder.create(path))
        }
        #[cfg(not(unix))]
        {
            err_at!(Io, path, fs::create_dir(path))
        }
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<String>> {
        let entries = err_at!(Io, path, fs::read_dir(path))?;
        let mut names = vec![];
        for entry in entries {
            let entry = err_at!(Io, path, entry)?;
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        err_at!(Io, from, fs::rename(from, to))
    }

    fn unlink(&self, path: &Path) -> Result<()> {
        err_at!(Io, path, fs::remove_file(path))
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let mut file = err_at!(Io, path, fs::File::open(path))?;
        let mut buf = vec![];
        err_at!(Io, path, file.read_to_end(&mut buf))?;
        Ok(buf)
    }

    fn write_new_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        use std::io::Write;

        let mut file = err_at!(Io, path, fs::OpenOptions::new().write(true).create_new(true).open(path))?;
        err_at!(Io, path, file.write_all(data))?;
        err_at!(Io, path, file.sync_all())
    }
}

/// Join a directory and a filename, the one helper every stage needs.
pub fn join(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}
