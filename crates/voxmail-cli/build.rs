use std::env;
use std::fs;
use std::path::Path;

include!("../build_common.rs");

fn main() {
    emit_rustdoc_readme(env!("CARGO_MANIFEST_DIR"));
}
