// RustMotionConfig - Build Script
//
// Generates the known-name hash table from names.list before compilation.

use std::collections::BTreeMap;
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crc::{Crc, CRC_16_XMODEM};

/// Must match `hash::NAME_CRC` in the crate.
const NAME_CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

fn main() {
    // ESP-IDF environment setup (MUST be first!)
    if env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }

    let source = fs::read_to_string("names.list").expect("names.list is missing");

    let mut by_hash: BTreeMap<u16, &str> = BTreeMap::new();
    for name in source.lines().map(str::trim) {
        if name.is_empty() || name.starts_with('#') {
            continue;
        }
        if name.bytes().any(|b| b == b' ' || !b.is_ascii_graphic()) {
            panic!("names.list: '{}' is not a printable name", name);
        }

        let hash = NAME_CRC.checksum(name.as_bytes());
        match by_hash.get(&hash) {
            Some(existing) if *existing == name => {}
            Some(existing) => panic!(
                "names.list: '{}' and '{}' share hash 0x{:04X}; rename one of them",
                existing, name, hash
            ),
            None => {
                by_hash.insert(hash, name);
            }
        }
    }

    let mut out = String::new();
    out.push_str("// @generated by build.rs from names.list. Do not edit.\n\n");
    for (hash, name) in &by_hash {
        let _ = writeln!(out, "/// `{}`", name);
        let _ = writeln!(out, "pub const {}: u16 = 0x{:04X};", const_name(name), hash);
    }
    out.push_str("\n/// Every known name, sorted by hash.\n");
    out.push_str("pub static KNOWN_NAMES: &[(u16, &str)] = &[\n");
    for (hash, name) in &by_hash {
        let _ = writeln!(out, "    (0x{:04X}, {:?}),", hash, name);
    }
    out.push_str("];\n");

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set by cargo");
    fs::write(Path::new(&out_dir).join("known_names.rs"), out)
        .expect("failed to write known_names.rs");

    // Rebuild if the name list changes
    println!("cargo:rerun-if-changed=names.list");
    println!("cargo:rerun-if-changed=build.rs");
}

/// `stepper.alpha.step_pin` -> `STEPPER_ALPHA_STEP_PIN`
fn const_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '.' | '-' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}
