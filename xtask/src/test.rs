use clap::Subcommand;
use duct::cmd;

#[derive(Subcommand)]
pub enum Test {
    /// Run clippy and the tests of every crate on the host (default)
    Host,

    /// Check the core crate with every combination of features that matters
    Features,
}

pub fn test_crate(command: Option<Test>) -> anyhow::Result<()> {
    match command.unwrap_or(Test::Host) {
        Test::Host => test_on_host(),
        Test::Features => check_features(),
    }
}

fn test_on_host() -> anyhow::Result<()> {
    cmd!("cargo", "clippy", "--workspace", "--exclude", "grubscan-fuzz", "--features", "grubscan-core/std").run()?;
    cmd!("cargo", "test", "-p", "grubscan-core", "--features", "std").run()?;
    cmd!("cargo", "test", "-p", "grubscan-cli").run()?;
    Ok(())
}

fn check_features() -> anyhow::Result<()> {
    let matrix: [&[&str]; 5] = [
        &["--no-default-features"],
        &["--no-default-features", "--features", "grub2"],
        &["--no-default-features", "--features", "legacy"],
        &["--features", "std"],
        &["--features", "uefi"],
    ];

    for features in matrix {
        let mut args = vec!["clippy", "-p", "grubscan-core"];
        args.extend_from_slice(features);
        cmd("cargo", args).run()?;
    }

    // the tests for a disabled dialect only exist without its feature
    for dialect in ["grub2", "legacy"] {
        cmd!("cargo", "test", "-p", "grubscan-core", "--lib", "--no-default-features", "--features", dialect, "--", "dialect", "disabled").run()?;
    }
    cmd!("cargo", "test", "-p", "grubscan-core", "--lib", "--features", "uefi", "--", "uefi_path").run()?;
    Ok(())
}
