// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! A parser for GRUB legacy and GRUB2 configuration files.
//!
//! This is not a real parser for the GRUB scripting language. It only looks for lines starting with `menuentry`, and
//! then assigns the directives that follow to that menu entry until the next `menuentry` is found. Braces, conditionals,
//! variables and functions are never interpreted.
//!
//! Example configuration:
//!
//! ```text
//! set timeout=5
//!
//! menuentry 'Arch Linux' --class arch {
//!     linux /vmlinuz-linux root=UUID=e09d636b-0cd9-4e84-8a39-84432cfc2b8e rw
//!     initrd /initramfs-linux.img
//! }
//!
//! menuentry 'Xen' {
//!     multiboot /xen.gz dom0_mem=1024M
//!     module /vmlinuz-linux console=hvc0
//!     module /initramfs-linux.img
//! }
//! ```

use alloc::{format, string::String, vec::Vec};
use log::{debug, warn};

use crate::{
    config::{BootEntry, EntryValidator, parsers::Dialect},
    system::helper::join_path,
};

/// Parses a GRUB configuration into a list of [`BootEntry`], in the same order as they appear in the configuration.
///
/// All kernel, initramfs, multiboot and module paths are joined onto `base_dir`. Entries that are rejected by
/// `validator` are dropped.
#[must_use = "Has no effect if the result is unused"]
pub fn parse<V: EntryValidator + ?Sized>(
    dialect: Dialect,
    content: &str,
    base_dir: &str,
    validator: &V,
) -> Vec<BootEntry> {
    let mut parser = GrubParser::new(dialect, base_dir, validator);

    for line in content.split('\n') {
        parser.feed_line(line);
    }

    parser.finish()
}

/// Parses a GRUB configuration given a numeric GRUB version, where `1` is GRUB legacy and `2` is GRUB2.
///
/// If the version is not supported, a warning is logged and no entries are returned.
#[must_use = "Has no effect if the result is unused"]
pub fn parse_versioned<V: EntryValidator + ?Sized>(
    version: u32,
    content: &str,
    base_dir: &str,
    validator: &V,
) -> Vec<BootEntry> {
    match Dialect::try_from(version) {
        Ok(dialect) => parse(dialect, content, base_dir, validator),
        Err(e) => {
            warn!("[GRUB PARSER]: {e}");
            Vec::new()
        }
    }
}

/// Parses a GRUB configuration given its raw bytes.
///
/// Invalid UTF-8 sequences are replaced with the replacement character instead of failing the whole file.
#[must_use = "Has no effect if the result is unused"]
pub fn parse_bytes<V: EntryValidator + ?Sized>(
    dialect: Dialect,
    content: &[u8],
    base_dir: &str,
    validator: &V,
) -> Vec<BootEntry> {
    parse(
        dialect,
        &String::from_utf8_lossy(content),
        base_dir,
        validator,
    )
}

/// The state of a parse that is in progress.
struct GrubParser<'a, V: ?Sized> {
    /// The dialect used for unescaping arguments.
    dialect: Dialect,

    /// The directory that every path is joined onto.
    base_dir: &'a str,

    /// Decides which finished entries are kept.
    validator: &'a V,

    /// The entries that were finished and accepted so far.
    entries: Vec<BootEntry>,

    /// The entry under construction, if a `menuentry` was found.
    current: Option<BootEntry>,
}

impl<'a, V: EntryValidator + ?Sized> GrubParser<'a, V> {
    /// Creates a new [`GrubParser`] that is outside of any menu entry.
    fn new(dialect: Dialect, base_dir: &'a str, validator: &'a V) -> Self {
        Self {
            dialect,
            base_dir,
            validator,
            entries: Vec::new(),
            current: None,
        }
    }

    /// Processes a single line of the configuration.
    fn feed_line(&mut self, line: &str) {
        let mut tokens = line.trim_start().split_whitespace();
        let Some(keyword) = tokens.next() else {
            return; // blank line
        };

        if keyword == "menuentry" {
            self.flush();
            self.current = Some(BootEntry::new(join_tokens(tokens)));
            return;
        }

        let Some(entry) = &mut self.current else {
            return; // directives outside of a menuentry do not belong to anything
        };

        let Some(path) = tokens.next() else {
            return; // not a directive we can use if it has no argument
        };

        match keyword {
            "linux" | "linux16" | "linuxefi" => {
                entry.kernel = join_path(self.base_dir, path);
                entry.kernel_args = self.dialect.unescape(&join_tokens(tokens)).into_owned();
            }
            "initrd" | "initrd16" | "initrdefi" => {
                entry.initramfs = join_path(self.base_dir, path);
            }
            "multiboot" => {
                entry.multiboot = join_path(self.base_dir, path);
                entry.multiboot_args = self.dialect.unescape(&join_tokens(tokens)).into_owned();
            }
            "module" => {
                let module = join_path(self.base_dir, path);
                let args = join_tokens(tokens);
                let args = self.dialect.unescape(&args);
                if args.is_empty() {
                    entry.modules.push(module);
                } else {
                    entry.modules.push(format!("{module} {args}"));
                }
            }
            _ => (),
        }
    }

    /// Finishes the entry under construction, keeping it only if the validator accepts it.
    fn flush(&mut self) {
        if let Some(entry) = self.current.take() {
            if self.validator.is_valid(&entry) {
                self.entries.push(entry);
            } else {
                debug!("[GRUB PARSER]: Dropping incomplete entry {}", entry.name);
            }
        }
    }

    /// Finishes the last entry, then returns every accepted entry.
    fn finish(mut self) -> Vec<BootEntry> {
        self.flush();
        self.entries
    }
}

/// Joins the remaining tokens of a line with single spaces.
fn join_tokens<'a>(tokens: impl Iterator<Item = &'a str>) -> String {
    tokens.collect::<Vec<_>>().join(" ")
}
