use clap::Subcommand;
use duct::cmd;

#[derive(Subcommand)]
pub enum Fuzz {
    /// Run GRUB configuration parser
    Grub,

    /// Run boot entry handoff decoder
    Handoff,
}

pub fn fuzz_parsers(command: Fuzz) -> anyhow::Result<()> {
    let mut args = vec!["fuzz", "run"];
    match command {
        Fuzz::Grub => args.push("grub"),
        Fuzz::Handoff => args.push("handoff"),
    }

    cmd!("cargo", "install", "cargo-fuzz").run()?; // will not install if its already installed
    cmd("cargo", args).current_dir("fuzz").run()?;
    Ok(())
}
