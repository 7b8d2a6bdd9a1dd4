//! Generates `pkg_info.rs` with the package identity used by the CLI help
//! text and the HTTP `User-Agent` header.

use std::{env, fs, path::Path};

use toml::{Table, Value};

fn string_at<'a>(table: &'a Table, key: &str) -> Option<&'a str> {
    table.get(key).and_then(Value::as_str)
}

/// The first `[[bin]]` target wins; without one, cargo names the binary after the package.
fn binary_name<'a>(manifest: &'a Table, package_name: &'a str) -> &'a str {
    manifest
        .get("bin")
        .and_then(Value::as_array)
        .and_then(|bins| bins.first())
        .and_then(Value::as_table)
        .and_then(|bin| string_at(bin, "name"))
        .unwrap_or(package_name)
}

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let manifest_path = Path::new(&manifest_dir).join("Cargo.toml");
    println!("cargo:rerun-if-changed={}", manifest_path.display());

    let content = fs::read_to_string(&manifest_path).expect("Failed to read Cargo.toml");
    let manifest: Table = toml::from_str(&content).expect("Failed to parse Cargo.toml");
    let package = manifest
        .get("package")
        .and_then(Value::as_table)
        .expect("Cargo.toml missing [package]");

    let name = string_at(package, "name").unwrap_or("godot-manager-client");
    let version = string_at(package, "version").unwrap_or("0.0.0");
    let description = string_at(package, "description").unwrap_or_default();
    let bin_name = binary_name(&manifest, name);
    let user_agent = format!("{name}/{version}");

    let constants = [
        ("PKG_NAME", name),
        ("PKG_VERSION", version),
        ("PKG_DESCRIPTION", description),
        ("BIN_NAME", bin_name),
        ("USER_AGENT", user_agent.as_str()),
    ];
    let contents: String = constants
        .iter()
        .map(|(constant, value)| format!("pub const {constant}: &str = {value:?};\n"))
        .collect();

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    fs::write(Path::new(&out_dir).join("pkg_info.rs"), contents)
        .expect("Failed to write pkg_info.rs");
}
