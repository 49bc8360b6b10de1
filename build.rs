//! Build script for the STM32 peripheral library
//!
//! Handles:
//! - Memory layout configuration (memory.x comes from embassy-stm32)
//! - Linker scripts for the demo binary on Cortex-M targets

use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let target = env::var("TARGET").unwrap_or_default();
    let embedded = env::var_os("CARGO_FEATURE_EMBEDDED").is_some();

    // Host builds (tests with `--features std`) need no linker scripts
    if !embedded || !target.starts_with("thumbv") {
        return;
    }

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
