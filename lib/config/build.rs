use serde::Deserialize;
use std::{collections::BTreeMap, env, fs, path::PathBuf};

/// Constants of one board, keyed by constant name.
#[derive(Deserialize)]
#[serde(transparent)]
struct BoardFlags(BTreeMap<String, String>);

fn parse_value(raw: &str) -> Result<u64, std::num::ParseIntError> {
    let clean = raw.trim().replace('_', "");
    match clean.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => clean.parse::<u64>(),
    }
}

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let board = env::var("BSP_BOARD").unwrap_or_else(|_| String::from("rhino"));
    let flags_path = PathBuf::from(manifest_dir).join("../../board.json");
    let flags_str = fs::read_to_string(&flags_path).unwrap();
    let boards: BTreeMap<String, BoardFlags> = serde_json::from_str(&flags_str).unwrap();
    let flags = match boards.get(board.as_str()) {
        Some(value) => value,
        None => panic!("Unknown board '{}'.", board),
    };
    make_flags(&board, flags);
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../../board.json");
    println!("cargo:rerun-if-env-changed=BSP_BOARD");
}

fn make_flags(board: &str, flags: &BoardFlags) {
    let mut s = String::new();
    s += &format!("pub const BOARD_NAME: &str = {:?};\n", board);
    for (key, raw) in &flags.0 {
        let value = parse_value(raw)
            .unwrap_or_else(|err| panic!("Invalid value '{}' for '{}': {:?}", raw, key, err));
        s += &format!("pub const {}: usize = {:#x};\n", key, value);
    }
    let out_dir = env::var("OUT_DIR").unwrap();
    let path = PathBuf::from(out_dir).join("build_flags.rs");
    fs::write(path, s).unwrap();
}
