//! Board constants for the bring-up engine.
//! The values are generated at build time from `board.json` at the workspace root;
//! set `BSP_BOARD` to pick a board other than `rhino`.

#![no_std]
#![deny(missing_docs)]

/// Constants generated from `board.json`.
#[allow(missing_docs)]
pub mod build_flags {
    include!(concat!(env!("OUT_DIR"), "/build_flags.rs"));
}
