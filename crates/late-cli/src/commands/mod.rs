// crates/late-cli/src/commands/mod.rs
//
// Command module declarations for the Late Staking CLI.

pub mod inspect;
pub mod simulate;
