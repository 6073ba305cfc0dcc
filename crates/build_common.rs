// Shared helpers for the workspace's build.rs files.
// Pull them in with: include!("../build_common.rs");
//
// The including build.rs must import:
//   use std::env;
//   use std::fs;
//   use std::path::Path;

/// Rewrite the crate README for rustdoc and drop it in `OUT_DIR`.
///
/// READMEs link to source files (`src/foo.rs`) so they browse well on the
/// repository host; rustdoc wants module paths instead. Links back to the
/// workspace README are pointed at the repository URL from the root manifest
/// so the READMEs themselves stay URL-agnostic.
fn emit_rustdoc_readme(crate_dir: &str) {
    println!("cargo:rerun-if-changed=README.md");
    println!("cargo:rerun-if-changed=../../Cargo.toml");

    let Ok(readme) = fs::read_to_string(Path::new(crate_dir).join("README.md")) else {
        return; // no README, nothing to emit
    };

    let mut doc = readme.replace("](src/", "](").replace(".rs)", ")");
    if let Some(repo) = workspace_repository(crate_dir) {
        doc = doc.replace("](../../README.md", &format!("]({repo}"));
    }

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set by cargo");
    fs::write(Path::new(&out_dir).join("README_RUSTDOC.md"), doc)
        .expect("failed to write processed README");
}

/// Repository URL declared in the workspace manifest, if any.
fn workspace_repository(crate_dir: &str) -> Option<String> {
    let root_manifest = Path::new(crate_dir).parent()?.parent()?.join("Cargo.toml");
    let manifest = fs::read_to_string(root_manifest).ok()?;

    manifest.lines().find_map(|line| {
        let (key, value) = line.split_once('=')?;
        if key.trim() != "repository" {
            return None;
        }
        let value = value.trim().trim_matches('"');
        (!value.is_empty()).then(|| value.to_string())
    })
}
