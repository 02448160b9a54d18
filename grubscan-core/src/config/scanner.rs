// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Discovers GRUB configuration files under a base directory.
//!
//! Every candidate path of every [`Dialect`] is probed in order, GRUB2 first, then GRUB legacy. A missing file is
//! expected (most systems only have one of them), so it is only logged.

use alloc::vec::Vec;
use log::{info, warn};

use crate::{
    ScanResult,
    config::{
        BootEntry, EntryValidator,
        parsers::{Dialect, grub},
    },
    system::{
        fs::FileSystem,
        helper::join_path,
        measure::{Measure, MeasurementKind},
    },
};

/// Gets every [`BootEntry`] from every GRUB configuration found under `base_dir`.
///
/// Each configuration file that is read is passed to `measure` before it is parsed. Paths inside of the entries are
/// joined onto `base_dir` itself, not onto the directory containing the configuration file. The entries keep the order
/// of the configuration files, and the order within each file.
pub fn scan<F, M, V>(fs: &mut F, base_dir: &str, measure: &mut M, validator: &V) -> Vec<BootEntry>
where
    F: FileSystem + ?Sized,
    M: Measure + ?Sized,
    V: EntryValidator + ?Sized,
{
    let mut entries = Vec::new();

    for dialect in Dialect::SCAN_ORDER {
        if dialect.is_enabled() {
            scan_dialect(fs, base_dir, dialect, measure, validator, &mut entries);
        }
    }

    entries
}

/// Pushes the entries of every configuration file of one [`Dialect`] into `entries`.
fn scan_dialect<F, M, V>(
    fs: &mut F,
    base_dir: &str,
    dialect: Dialect,
    measure: &mut M,
    validator: &V,
    entries: &mut Vec<BootEntry>,
) where
    F: FileSystem + ?Sized,
    M: Measure + ?Sized,
    V: EntryValidator + ?Sized,
{
    for candidate in dialect.candidate_paths() {
        let path = join_path(base_dir, candidate);
        info!("Trying to read {path} ({})", dialect.as_str());

        match scan_file(fs, &path, dialect, base_dir, measure, validator) {
            Ok(found) => entries.extend(found),
            Err(e) => warn!("Cannot open {path}: {e}"),
        }
    }
}

/// Reads, measures, then parses a single GRUB configuration file.
///
/// Paths inside of the entries are joined onto `base_dir`, which does not have to be related to `path`.
///
/// # Errors
///
/// May return an `Error` if the file could not be read.
pub fn scan_file<F, M, V>(
    fs: &mut F,
    path: &str,
    dialect: Dialect,
    base_dir: &str,
    measure: &mut M,
    validator: &V,
) -> ScanResult<Vec<BootEntry>>
where
    F: FileSystem + ?Sized,
    M: Measure + ?Sized,
    V: EntryValidator + ?Sized,
{
    let content = fs.read(path)?;
    measure.measure(MeasurementKind::ConfigData, &content, path);
    Ok(grub::parse_bytes(dialect, &content, base_dir, validator))
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec};

    use super::*;
    use crate::{
        config::{RequireBootTarget, builder::BootEntryBuilder},
        error::ScanError,
        system::{
            fs::{FsError, MemoryFileSystem},
            measure::{DigestLog, NoMeasure},
        },
    };

    /// A GRUB configuration with one entry per name.
    ///
    /// There is no `{` after the name, as it would become part of the name.
    fn config_with(names: &[&str]) -> String {
        let mut config = String::new();
        for name in names {
            config.push_str("menuentry ");
            config.push_str(name);
            config.push_str("\n  linux /vmlinuz-");
            config.push_str(name);
            config.push_str(" \\$x\n");
        }
        config
    }

    #[test]
    fn test_brace_is_part_of_name() {
        let mut fs = MemoryFileSystem::new().with_file(
            "/mnt/boot/grub2/grub.cfg",
            "menuentry a {\n  linux /vmlinuz-a\n}\n",
        );
        let entries = scan(&mut fs, "/mnt", &mut NoMeasure, &RequireBootTarget);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "a {");
    }

    #[test]
    fn test_only_legacy() {
        let mut fs = MemoryFileSystem::new().with_file("/mnt/grub/grub.cfg", config_with(&["a"]));
        let entries = scan(&mut fs, "/mnt", &mut NoMeasure, &RequireBootTarget);
        assert_eq!(
            entries,
            vec![
                BootEntryBuilder::new("a")
                    .kernel("/mnt/vmlinuz-a")
                    .kernel_args("\\$x") // legacy does not unescape
                    .build()
            ]
        );
    }

    #[test]
    #[cfg(not(feature = "legacy"))]
    fn test_disabled_legacy_skipped() {
        let mut fs = MemoryFileSystem::new().with_file("/mnt/grub/grub.cfg", config_with(&["a"]));
        let mut measure = DigestLog::new();
        assert!(scan(&mut fs, "/mnt", &mut measure, &RequireBootTarget).is_empty());
        assert!(measure.events().is_empty());
    }

    #[test]
    #[cfg(not(feature = "grub2"))]
    fn test_disabled_grub2_skipped() {
        let mut fs = MemoryFileSystem::new().with_file("/mnt/grub2.cfg", config_with(&["a"]));
        let mut measure = DigestLog::new();
        assert!(scan(&mut fs, "/mnt", &mut measure, &RequireBootTarget).is_empty());
        assert!(measure.events().is_empty());
    }

    #[test]
    fn test_nothing_found() {
        let mut fs = MemoryFileSystem::new().with_file("/other/grub.cfg", config_with(&["a"]));
        assert!(scan(&mut fs, "/mnt", &mut NoMeasure, &RequireBootTarget).is_empty());
    }

    #[test]
    fn test_scan_order() {
        let mut fs = MemoryFileSystem::new()
            .with_file("/mnt/grub.cfg", config_with(&["legacy-root"]))
            .with_file("/mnt/boot/grub/grub.cfg", config_with(&["legacy-boot"]))
            .with_file("/mnt/grub2.cfg", config_with(&["grub2-root"]))
            .with_file("/mnt/boot/grub2/grub.cfg", config_with(&["grub2-a", "grub2-b"]));
        let mut measure = DigestLog::new();

        let entries = scan(&mut fs, "/mnt", &mut measure, &RequireBootTarget);
        let names: Vec<_> = entries.iter().map(|x| &*x.name).collect();
        assert_eq!(
            names,
            ["grub2-a", "grub2-b", "grub2-root", "legacy-boot", "legacy-root"]
        );

        // grub2 files are unescaped, legacy files are not
        assert_eq!(entries[0].kernel_args, "$x");
        assert_eq!(entries[4].kernel_args, "\\$x");

        let measured: Vec<_> = measure.events().iter().map(|x| &*x.path).collect();
        assert_eq!(
            measured,
            [
                "/mnt/boot/grub2/grub.cfg",
                "/mnt/grub2.cfg",
                "/mnt/boot/grub/grub.cfg",
                "/mnt/grub.cfg"
            ]
        );
    }

    #[test]
    fn test_paths_relative_to_base() {
        // the kernel path is relative to the scanned directory, not the directory of the grub.cfg
        let mut fs = MemoryFileSystem::new().with_file(
            "/mnt/boot/grub2/grub.cfg",
            "menuentry Linux\nlinux /boot/vmlinuz\ninitrd /boot/initrd.img",
        );
        let entries = scan(&mut fs, "/mnt/", &mut NoMeasure, &RequireBootTarget);
        assert_eq!(entries[0].kernel, "/mnt/boot/vmlinuz");
        assert_eq!(entries[0].initramfs, "/mnt/boot/initrd.img");
    }

    #[test]
    fn test_scan_file() {
        let mut fs = MemoryFileSystem::new().with_file("/etc/grub.cfg", config_with(&["a", "b"]));
        let entries = scan_file(
            &mut fs,
            "/etc/grub.cfg",
            Dialect::Grub2,
            "/mnt",
            &mut NoMeasure,
            &RequireBootTarget,
        );
        assert!(entries.is_ok_and(|x| x.len() == 2 && x[1].kernel == "/mnt/vmlinuz-b"));

        let missing = scan_file(
            &mut fs,
            "/etc/missing.cfg",
            Dialect::Grub2,
            "/mnt",
            &mut NoMeasure,
            &RequireBootTarget,
        );
        assert!(matches!(
            missing,
            Err(ScanError::FsError(FsError::NotFound(_)))
        ));
    }

    #[test]
    fn test_measured_before_parse() {
        let mut fs = MemoryFileSystem::new().with_file("/boot/grub2.cfg", "menuentry Empty");
        let mut measured = 0;
        let mut measure = |kind: MeasurementKind, data: &[u8], path: &str| {
            assert_eq!(kind, MeasurementKind::ConfigData);
            assert_eq!(data, b"menuentry Empty");
            assert_eq!(path, "/boot/grub2.cfg");
            measured += 1;
        };

        // the file is measured even though it produces no valid entries
        let entries = scan(&mut fs, "/", &mut measure, &RequireBootTarget);
        assert!(entries.is_empty());
        assert_eq!(measured, 1);
    }
}
