use std::env;
use std::fs;
use std::path::Path;
use vergen::{BuildBuilder, CargoBuilder, Emitter, RustcBuilder};
use vergen_gitcl::{Emitter as GitEmitter, GitclBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let build = BuildBuilder::default().build_timestamp(true).build()?;

    let cargo = CargoBuilder::default()
        .opt_level(true)
        .target_triple(true)
        .build()?;

    let rustc = RustcBuilder::default().semver(true).channel(true).build()?;

    // Git metadata is optional; build_info falls back when it is absent
    let gitcl = GitclBuilder::default()
        .sha(true)
        .branch(true)
        .dirty(true)
        .build()?;

    Emitter::default()
        .add_instructions(&build)?
        .add_instructions(&cargo)?
        .add_instructions(&rustc)?
        .emit()?;

    GitEmitter::default().add_instructions(&gitcl)?.emit()?;

    copy_configs()?;

    Ok(())
}

fn copy_configs() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = env::var("OUT_DIR")?;
    let profile = env::var("PROFILE")?;

    // OUT_DIR is target/<profile>/build/mini-flight-<hash>/out; configs go
    // to target/<profile>/config so the binary finds them next to itself
    let target_dir = Path::new(&out_dir)
        .ancestors()
        .nth(3)
        .ok_or("Could not determine target directory")?;

    let config_out_dir = target_dir.join("config");
    fs::create_dir_all(&config_out_dir)?;

    // Release builds only ship the release profile
    let profiles: &[&str] = if profile == "release" {
        &["release"]
    } else {
        &["debug", "release"]
    };

    for name in profiles {
        let source = format!("config/{name}.toml");
        let source = Path::new(&source);
        println!("cargo:rerun-if-changed={}", source.display());
        if source.exists() {
            fs::copy(source, config_out_dir.join(format!("{name}.toml")))?;
        }
    }

    Ok(())
}
