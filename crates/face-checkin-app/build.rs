use std::fs;
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR should be set by cargo");
    // crates/face-checkin-app -> crates -> workspace root
    Path::new(&manifest_dir)
        .ancestors()
        .nth(2)
        .expect("crate should sit two levels under the workspace root")
        .to_path_buf()
}

fn main() {
    let version_file = workspace_root().join("VERSION");
    println!("cargo:rerun-if-changed={}", version_file.display());

    let version = fs::read_to_string(&version_file)
        .unwrap_or_else(|error| panic!("cannot read {}: {error}", version_file.display()))
        .trim()
        .to_string();
    assert!(!version.is_empty(), "VERSION file is empty");

    println!("cargo:rustc-env=FACE_CHECKIN_VERSION={version}");
}
