// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! The `grubscan` library crate.
//!
//! This discovers GRUB configuration files (both GRUB legacy and GRUB2) on a mounted filesystem and turns every
//! `menuentry` in them into a [`config::BootEntry`], which a boot execution component may later use to load a kernel,
//! an initramfs, or a multiboot image.
//!
//! The parser is not a GRUB script interpreter. It only recognizes the directives that matter for booting (`linux`,
//! `initrd`, `multiboot`, `module`) and ignores everything else.
//!
//! ## Example
//!
//! ```
//! use grubscan_core::config::{
//!     RequireBootTarget,
//!     parsers::{Dialect, grub::parse},
//! };
//!
//! let cfg = "menuentry Linux {\n  linux /vmlinuz root=/dev/sda1\n  initrd /initrd.img\n}";
//! let entries = parse(Dialect::Grub2, cfg, "/mnt", &RequireBootTarget);
//!
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].kernel, "/mnt/vmlinuz");
//! ```
//!
//! ## Features
//!
//! - `std`: enables the host filesystem backend, the host logger, and [`config::scan_configs`].
//! - `uefi`: enables the UEFI `SimpleFileSystem` backend.
//! - `grub2` and `legacy`: enable scanning of the respective candidate paths. Both are enabled by default.
//!
//! ## MSRV
//!
//! The minimum supported rust version is 1.88.0.

#![cfg_attr(not(any(fuzzing, test, doctest, feature = "std")), no_std)]

/// The primary result type that wraps around [`crate::error::ScanError`].
pub type ScanResult<T> = Result<T, crate::error::ScanError>;

pub mod config;
pub mod error;
pub mod system;

extern crate alloc;
