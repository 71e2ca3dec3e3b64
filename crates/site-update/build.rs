//! Build script for embedded version metadata
//!
//! Release builds set SITE_BINARY_VERSION / SITE_SOURCE_VERSION in the
//! environment; local builds fall back to the build timestamp so the
//! binary always carries a comparable identifier.

fn main() {
    let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S").to_string();

    let binary_version = std::env::var("SITE_BINARY_VERSION").unwrap_or_else(|_| stamp.clone());
    let source_version = std::env::var("SITE_SOURCE_VERSION").unwrap_or_else(|_| stamp);

    println!("cargo:rustc-env=SITE_BINARY_VERSION={}", binary_version);
    println!("cargo:rustc-env=SITE_SOURCE_VERSION={}", source_version);

    println!("cargo:rerun-if-env-changed=SITE_BINARY_VERSION");
    println!("cargo:rerun-if-env-changed=SITE_SOURCE_VERSION");
}
