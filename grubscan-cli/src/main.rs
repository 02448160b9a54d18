// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! A command line interface frontend to `grubscan`.

use std::{fs, process::ExitCode};

use anyhow::{Context, anyhow, bail};
use getargs::{Arg, Options};
use grubscan_core::{
    config::{BootEntry, RequireBootTarget, handoff::encode_entries, parsers::grub::parse_versioned, scan_configs},
    system::{
        fs::{FileSystem, HostFileSystem},
        log_backend::HostLogger,
        measure::{DigestLog, Measure, MeasurementKind},
    },
};
use log::LevelFilter;

/// The options that were passed on the command line.
#[derive(Default)]
struct Args {
    /// The directory to scan, and that every path is joined onto.
    base_dir: Option<String>,

    /// The GRUB version to parse `file` as, instead of scanning.
    dialect: Option<u32>,

    /// The file to parse when `dialect` is given.
    file: Option<String>,

    /// Where to write the handoff blob to.
    output: Option<String>,

    /// Log at info level instead of warn level.
    verbose: bool,

    /// Print the usage and exit.
    help: bool,
}

/// Parses the command line into [`Args`].
///
/// # Errors
///
/// May return an `Error` if an option is unknown, or an option that requires a value was not given one.
fn parse_args<'a>(args: impl Iterator<Item = &'a str>) -> anyhow::Result<Args> {
    let mut parsed = Args::default();
    let mut opts = Options::new(args);

    while let Some(arg) = opts.next_arg().map_err(|e| anyhow!("{e}"))? {
        match arg {
            Arg::Short('h') | Arg::Long("help") => parsed.help = true,
            Arg::Short('l') | Arg::Long("list") => (), // listing is what happens anyways
            Arg::Short('v') | Arg::Long("verbose") => parsed.verbose = true,
            Arg::Short('d') | Arg::Long("dialect") => {
                let value = opts
                    .value()
                    .ok()
                    .context("A version was not passed into the dialect argument")?;
                parsed.dialect = Some(value.parse().with_context(|| {
                    format!("The value passed to the dialect argument could not be parsed as a number: {value}")
                })?);
            }
            Arg::Short('f') | Arg::Long("file") => {
                let value = opts
                    .value()
                    .ok()
                    .context("A path was not passed into the file argument")?;
                parsed.file = Some(value.to_owned());
            }
            Arg::Short('o') | Arg::Long("output") => {
                let value = opts
                    .value()
                    .ok()
                    .context("A path was not passed into the output argument")?;
                parsed.output = Some(value.to_owned());
            }
            Arg::Positional(dir) if parsed.base_dir.is_none() => {
                parsed.base_dir = Some(dir.to_owned());
            }
            Arg::Short(invalid) => bail!("Unknown short argument: -{invalid}"),
            Arg::Long(invalid) => bail!("Unknown long argument: --{invalid}"),
            Arg::Positional(invalid) => bail!("Unknown positional argument: {invalid}"),
        }
    }

    Ok(parsed)
}

/// Parses a single file as the given GRUB version.
///
/// An unsupported version is not an error. It is logged as a warning, and no entries are returned.
///
/// # Errors
///
/// May return an `Error` if the file could not be read.
fn parse_file(version: u32, file: &str, base_dir: &str) -> anyhow::Result<Vec<BootEntry>> {
    let content = HostFileSystem::new()
        .read(file)
        .with_context(|| format!("Could not read {file}"))?;
    DigestLog::new().measure(MeasurementKind::ConfigData, &content, file);

    Ok(parse_versioned(
        version,
        &String::from_utf8_lossy(&content),
        base_dir,
        &RequireBootTarget,
    ))
}

/// Prints every [`BootEntry`] with its index.
fn print_entries(entries: &[BootEntry]) {
    if entries.is_empty() {
        println!("No boot entries were found");
        return;
    }

    for (i, entry) in entries.iter().enumerate() {
        println!("{i}: {}", entry.name);
        let fields = [
            ("kernel", &entry.kernel),
            ("kernel args", &entry.kernel_args),
            ("initramfs", &entry.initramfs),
            ("multiboot", &entry.multiboot),
            ("multiboot args", &entry.multiboot_args),
        ];
        for (label, value) in fields {
            if !value.is_empty() {
                println!("    {label}: {value}");
            }
        }
        for module in &entry.modules {
            println!("    module: {module}");
        }
    }
}

/// The actual main function of the program, which returns an [`anyhow::Result`].
///
/// # Errors
///
/// May return an `Error` if the arguments were invalid, or a file could not be read or written.
fn main_func(app_name: &str, args: &Args) -> anyhow::Result<()> {
    if args.help {
        println!(
            r"Usage: {app_name} [OPTIONS] <BASEDIR>

-h, --help            display this help and exit
-l, --list            display discovered boot entries (default)
-d, --dialect <N>     parse the file given by --file as GRUB version N (1 or 2) instead of scanning,
                      any other version only warns and finds no entries
-f, --file <PATH>     the file to parse with --dialect
-o, --output <PATH>   write the discovered boot entries to PATH for a boot loader
-v, --verbose         log every probed path and measurement
"
        );
        return Ok(());
    }

    let entries = match (args.dialect, &args.file) {
        (Some(version), Some(file)) => {
            parse_file(version, file, args.base_dir.as_deref().unwrap_or_default())?
        }
        (Some(_), None) => bail!("--dialect requires a file to be passed with --file"),
        (None, Some(_)) => bail!("--file requires a GRUB version to be passed with --dialect"),
        (None, None) => {
            let Some(base_dir) = &args.base_dir else {
                bail!("No base directory was passed to the program (see --help)");
            };
            scan_configs(base_dir)
        }
    };

    print_entries(&entries);

    if let Some(output) = &args.output {
        let blob = encode_entries(&entries)?;
        fs::write(output, blob).with_context(|| format!("Could not write {output}"))?;
    }

    Ok(())
}

/// The main function of the program.
fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().collect();
    let app_name = argv.first().map_or("grubscan", String::as_str);

    let args = match parse_args(argv.iter().skip(1).map(String::as_str)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let level = if args.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    let _ = HostLogger::install(level);

    match main_func(app_name, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
