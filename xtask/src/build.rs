use duct::cmd;

pub fn build_all_crates(
    release: bool,
    features: Option<Vec<String>>,
    no_default_features: bool,
) -> anyhow::Result<()> {
    let mut build_args = vec!["build", "--workspace", "--exclude", "grubscan-fuzz"];

    if release {
        build_args.extend(["--profile", "release-lto"]);
    }

    let features = features
        .unwrap_or_default()
        .iter()
        .map(|x| format!("grubscan-core/{x}"))
        .collect::<Vec<_>>()
        .join(",");
    if !features.is_empty() {
        build_args.push("--features");
        build_args.push(&features);
    }

    if no_default_features {
        build_args.push("--no-default-features");
    }

    cmd("cargo", build_args).run()?;
    Ok(())
}
