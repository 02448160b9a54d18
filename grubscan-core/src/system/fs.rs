//! Filesystem backends for the configuration scanner.
//!
//! The scanner only ever needs to read whole files, so every backend implements the small [`FileSystem`] trait:
//!
//! - [`MemoryFileSystem`] keeps files in memory. This is useful for tests, and for callers that already have the
//!   configuration files in hand.
//! - [`HostFileSystem`] (feature `std`) reads from the filesystem of the host operating system, where the partition to
//!   scan is usually already mounted somewhere.
//! - [`UefiFileSystem`] (feature `uefi`) wraps the UEFI [`SimpleFileSystem`](uefi::proto::media::fs::SimpleFileSystem)
//!   protocol. Paths are given with `/` separators and converted to the `\` separators that UEFI expects.
//!
//! Paths passed to [`FileSystem::read`] are always `/` separated, as produced by
//! [`join_path`](crate::system::helper::join_path).

use alloc::{borrow::ToOwned, collections::BTreeMap, string::String, vec::Vec};
use thiserror::Error;

use crate::system::helper::clean_path;

/// An error that may result from performing filesystem operations
#[derive(Error, Debug)]
pub enum FsError {
    /// The file does not exist.
    #[error("File \"{0}\" does not exist")]
    NotFound(String),

    /// The file could not be read from the host filesystem.
    #[cfg(feature = "std")]
    #[error("Failed to read file \"{path}\": {source}")]
    Io {
        /// The path that was attempted to be read.
        path: String,

        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The path could not be converted into a UEFI path.
    #[cfg(feature = "uefi")]
    #[error("Path \"{0}\" is not a valid UEFI path")]
    InvalidPath(String),

    /// A file could not be opened.
    #[cfg(feature = "uefi")]
    #[error("Failed to open file")]
    OpenErr(uefi::Status),

    /// A file could not be read.
    #[cfg(feature = "uefi")]
    #[error("Failed to read file")]
    ReadErr(uefi::Status),
}

/// A filesystem that configuration files can be read from.
pub trait FileSystem {
    /// Reads the entire content of a file into a [`Vec<u8>`].
    ///
    /// # Errors
    ///
    /// May return an `Error` if the file does not exist, or could not be read for any reason.
    fn read(&mut self, path: &str) -> Result<Vec<u8>, FsError>;
}

/// A [`FileSystem`] that is held entirely in memory.
///
/// Paths are cleaned before they are stored and looked up, so `/boot//grub.cfg` and `/boot/grub.cfg` are the same file.
#[derive(Clone, Debug, Default)]
pub struct MemoryFileSystem {
    /// The files, keyed by their cleaned path.
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryFileSystem {
    /// Create a new, empty [`MemoryFileSystem`].
    #[must_use = "Has no effect if the result is unused"]
    pub const fn new() -> Self {
        Self {
            files: BTreeMap::new(),
        }
    }

    /// Adds a file to the [`MemoryFileSystem`], replacing it if it already exists.
    pub fn insert(&mut self, path: &str, content: impl Into<Vec<u8>>) {
        self.files.insert(clean_path(path), content.into());
    }

    /// Adds a file to the [`MemoryFileSystem`], returning the [`MemoryFileSystem`] for chaining.
    #[must_use = "Has no effect if the result is unused"]
    pub fn with_file(mut self, path: &str, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    /// Checks if a file exists.
    #[must_use = "Has no effect if the result is unused"]
    pub fn exists(&self, path: &str) -> bool {
        self.files.contains_key(&clean_path(path))
    }
}

impl FileSystem for MemoryFileSystem {
    fn read(&mut self, path: &str) -> Result<Vec<u8>, FsError> {
        self.files
            .get(&clean_path(path))
            .cloned()
            .ok_or_else(|| FsError::NotFound(path.to_owned()))
    }
}

/// A [`FileSystem`] backed by the filesystem of the host operating system.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug, Default)]
pub struct HostFileSystem;

#[cfg(feature = "std")]
impl HostFileSystem {
    /// Create a new [`HostFileSystem`].
    #[must_use = "Has no effect if the result is unused"]
    pub const fn new() -> Self {
        Self
    }
}

#[cfg(feature = "std")]
impl FileSystem for HostFileSystem {
    fn read(&mut self, path: &str) -> Result<Vec<u8>, FsError> {
        std::fs::read(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                FsError::NotFound(path.to_owned())
            } else {
                FsError::Io {
                    path: path.to_owned(),
                    source,
                }
            }
        })
    }
}

#[cfg(feature = "uefi")]
pub use uefi_fs::UefiFileSystem;

/// The UEFI [`FileSystem`] backend.
#[cfg(feature = "uefi")]
mod uefi_fs {
    use alloc::{borrow::ToOwned, vec, vec::Vec};
    use uefi::{
        CStr16, Handle, Status,
        boot::{self, ScopedProtocol},
        proto::media::{
            file::{File, FileAttribute, FileInfo, FileMode, RegularFile},
            fs::SimpleFileSystem,
        },
    };

    use super::{FileSystem, FsError};
    use crate::system::helper::str_to_uefi_path;

    /// The size of one gigabyte in bytes. This is the default value if a file is too big to be read.
    const ONE_GIGABYTE: usize = 1024 * 1024 * 1024;

    /// A rust-ier wrapper around [`SimpleFileSystem`].
    pub struct UefiFileSystem(ScopedProtocol<SimpleFileSystem>);

    impl UefiFileSystem {
        /// Create a new [`UefiFileSystem`].
        #[must_use = "Has no effect if the result is unused"]
        pub const fn new(fs: ScopedProtocol<SimpleFileSystem>) -> Self {
            Self(fs)
        }

        /// Create a new [`UefiFileSystem`] from a handle that supports [`SimpleFileSystem`].
        ///
        /// # Errors
        ///
        /// May return an `Error` if the handle does not actually support [`SimpleFileSystem`].
        pub fn from_handle(handle: Handle) -> Result<Self, FsError> {
            let fs = boot::open_protocol_exclusive(handle).map_err(|e| FsError::OpenErr(e.status()))?;
            Ok(Self(fs))
        }

        /// Gets a handle to a [`RegularFile`] in the filesystem.
        ///
        /// # Errors
        ///
        /// May return an `Error` if the volume couldn't be opened, or the path does not point to a file.
        fn get_regular_file(&mut self, path: &CStr16) -> Result<RegularFile, FsError> {
            let mut root = self
                .0
                .open_volume()
                .map_err(|e| FsError::OpenErr(e.status()))?;
            root.open(path, FileMode::Read, FileAttribute::empty())
                .map_err(|e| FsError::OpenErr(e.status()))?
                .into_regular_file()
                .ok_or(FsError::OpenErr(Status::INVALID_PARAMETER))
        }
    }

    impl FileSystem for UefiFileSystem {
        fn read(&mut self, path: &str) -> Result<Vec<u8>, FsError> {
            let uefi_path =
                str_to_uefi_path(path).map_err(|_| FsError::InvalidPath(path.to_owned()))?;
            let mut file = self.get_regular_file(&uefi_path).map_err(|e| match e {
                FsError::OpenErr(status) if status == Status::NOT_FOUND => {
                    FsError::NotFound(path.to_owned())
                }
                e => e,
            })?;

            let info = file
                .get_boxed_info::<FileInfo>()
                .map_err(|e| FsError::ReadErr(e.status()))?;

            let size = usize::try_from(info.file_size()).unwrap_or(ONE_GIGABYTE);

            let mut buf = vec![0; size];
            let read = file
                .read(&mut buf)
                .map_err(|e| FsError::ReadErr(e.status()))?;
            buf.truncate(read);

            Ok(buf)
        }
    }
}
