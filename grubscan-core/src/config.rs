//! Provides [`BootEntry`], the main boot entry struct.
//!
//! This will generally represent a single `menuentry` in a GRUB configuration file.

use alloc::{string::String, vec::Vec};
use serde::{Deserialize, Serialize};

pub mod builder;
pub mod handoff;
pub mod parsers;
pub mod scanner;

/// A boot entry that was discovered from a GRUB configuration.
///
/// Every path in the entry is already joined onto the base directory that the configuration was scanned from. An empty
/// [`String`] means that the field was never set by the configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootEntry {
    /// The display name of the entry, as written after `menuentry`.
    pub name: String,

    /// The path to the kernel image.
    pub kernel: String,

    /// The command line passed to the kernel.
    pub kernel_args: String,

    /// The path to the initial ramdisk.
    pub initramfs: String,

    /// The path to the multiboot image.
    pub multiboot: String,

    /// The command line passed to the multiboot image.
    pub multiboot_args: String,

    /// The modules loaded with the multiboot image, each one being a path optionally followed by its arguments.
    pub modules: Vec<String>,
}

impl BootEntry {
    /// Creates a new, empty [`BootEntry`] with the given name.
    #[must_use = "Has no effect if the result is unused"]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Checks if the [`BootEntry`] has a kernel set.
    #[must_use = "Has no effect if the result is unused"]
    pub fn has_kernel(&self) -> bool {
        !self.kernel.is_empty()
    }

    /// Checks if the [`BootEntry`] has a multiboot image set.
    #[must_use = "Has no effect if the result is unused"]
    pub fn has_multiboot(&self) -> bool {
        !self.multiboot.is_empty()
    }
}

/// Decides whether a [`BootEntry`] is complete enough to be kept.
///
/// This is queried once for every `menuentry` when it is finished. Entries that are rejected are dropped silently.
pub trait EntryValidator {
    /// Returns `true` if the [`BootEntry`] should be kept.
    fn is_valid(&self, entry: &BootEntry) -> bool;
}

impl<F> EntryValidator for F
where
    F: Fn(&BootEntry) -> bool,
{
    fn is_valid(&self, entry: &BootEntry) -> bool {
        self(entry)
    }
}

/// The default [`EntryValidator`], which requires either a kernel or a multiboot image.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequireBootTarget;

impl EntryValidator for RequireBootTarget {
    fn is_valid(&self, entry: &BootEntry) -> bool {
        entry.has_kernel() || entry.has_multiboot()
    }
}

/// Gets every [`BootEntry`] from every GRUB configuration found under `base_dir` on the host filesystem.
///
/// Every configuration that is read is measured with [`crate::system::measure::DigestLog`], and entries are validated
/// with [`RequireBootTarget`]. See [`scanner::scan`] for a version that lets you provide those yourself.
#[cfg(feature = "std")]
#[must_use = "Has no effect if the result is unused"]
pub fn scan_configs(base_dir: &str) -> Vec<BootEntry> {
    let mut fs = crate::system::fs::HostFileSystem::new();
    let mut measure = crate::system::measure::DigestLog::new();
    scanner::scan(&mut fs, base_dir, &mut measure, &RequireBootTarget)
}
