//! Boot entry builder.

use alloc::string::String;

use crate::config::BootEntry;

/// A builder to configure a [`BootEntry`]
///
/// Unlike the parser, the builder does not join paths onto a base directory, so every path should be given as it
/// should appear in the finished [`BootEntry`].
///
/// # Example
///
/// ```
/// use grubscan_core::config::builder::BootEntryBuilder;
///
/// let entry = BootEntryBuilder::new("Linux")
///     .kernel("/mnt/vmlinuz")
///     .kernel_args("root=/dev/sda1 ro")
///     .initramfs("/mnt/initrd.img")
///     .build();
///
/// assert_eq!(entry.kernel_args, "root=/dev/sda1 ro");
/// ```
#[must_use = "Has no effect if the result is unused"]
pub struct BootEntryBuilder {
    /// The inner [`BootEntry`] that the builder operates on.
    entry: BootEntry,
}

impl BootEntryBuilder {
    /// Constructs a new [`BootEntry`] with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            entry: BootEntry::new(name),
        }
    }

    /// Sets the kernel path of a [`BootEntry`].
    pub fn kernel(mut self, kernel: impl Into<String>) -> Self {
        self.entry.kernel = kernel.into();
        self
    }

    /// Sets the kernel command line of a [`BootEntry`].
    pub fn kernel_args(mut self, kernel_args: impl Into<String>) -> Self {
        self.entry.kernel_args = kernel_args.into();
        self
    }

    /// Sets the initramfs path of a [`BootEntry`].
    pub fn initramfs(mut self, initramfs: impl Into<String>) -> Self {
        self.entry.initramfs = initramfs.into();
        self
    }

    /// Sets the multiboot image path of a [`BootEntry`].
    pub fn multiboot(mut self, multiboot: impl Into<String>) -> Self {
        self.entry.multiboot = multiboot.into();
        self
    }

    /// Sets the multiboot command line of a [`BootEntry`].
    pub fn multiboot_args(mut self, multiboot_args: impl Into<String>) -> Self {
        self.entry.multiboot_args = multiboot_args.into();
        self
    }

    /// Appends a module to a [`BootEntry`].
    ///
    /// Modules keep the order in which they were added.
    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.entry.modules.push(module.into());
        self
    }

    /// Builds a [`BootEntry`]
    #[must_use = "Has no effect if the result is unused"]
    pub fn build(self) -> BootEntry {
        self.entry
    }
}
