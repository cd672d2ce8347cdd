//! Built-in CIN census rules, one module per ruleset year.

pub mod cin2022_23;
pub mod cin2023_24;
