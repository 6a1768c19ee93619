//! boreal-policyc — compiles a policy DSL file into a bytecode image plus
//! a companion manifest.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use boreal_policy::{compile, PolicyManifest};

fn print_usage() {
    println!("Usage: boreal-policyc [--out-dir <dir>] <policy.dsl>");
    println!();
    println!("Compiles a policy DSL file into <name>.bc and <name>.manifest.toml,");
    println!("written next to the source file unless --out-dir is given.");
    println!();
    println!("Examples:");
    println!("  boreal-policyc policy.dsl");
    println!("  boreal-policyc --out-dir build policy.dsl");
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut out_dir: Option<PathBuf> = None;
    let mut remaining: Vec<String> = Vec::new();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--out-dir" => {
                i += 1;
                let dir = args.get(i).context("--out-dir requires a value")?;
                out_dir = Some(PathBuf::from(dir));
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            other => remaining.push(other.to_string()),
        }
        i += 1;
    }

    let source_path = match remaining.as_slice() {
        [path] => PathBuf::from(path),
        _ => {
            print_usage();
            bail!("expected exactly one policy DSL file");
        }
    };

    let source = std::fs::read_to_string(&source_path)
        .with_context(|| format!("reading {}", source_path.display()))?;
    let bytecode = compile(&source)
        .with_context(|| format!("compiling {}", source_path.display()))?;

    let stem = source_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("policy");
    let dir = out_dir.unwrap_or_else(|| {
        source_path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    });

    let bc_path = dir.join(format!("{stem}.bc"));
    let manifest_path = dir.join(format!("{stem}.manifest.toml"));

    let source_file = source_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("policy.dsl")
        .to_string();
    let manifest = PolicyManifest::for_bytecode(&bytecode, &source_file);

    std::fs::write(&bc_path, &bytecode)
        .with_context(|| format!("writing {}", bc_path.display()))?;
    std::fs::write(&manifest_path, toml::to_string_pretty(&manifest)?)
        .with_context(|| format!("writing {}", manifest_path.display()))?;

    println!(
        "compiled {} opcodes -> {} ({})",
        manifest.opcode_count,
        bc_path.display(),
        manifest.sha256
    );

    Ok(())
}
