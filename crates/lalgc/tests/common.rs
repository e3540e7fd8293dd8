use std::path::{Path, PathBuf};

/// Gets the path of a file in the `lalg_files` directory
pub fn lalg_file(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("lalg_files")
        .join(name)
}

/// Reads a listing back, one instruction per entry, skipping the header row
pub fn instructions(listing: &str) -> Vec<&str> {
    listing.lines().skip(1).collect()
}
