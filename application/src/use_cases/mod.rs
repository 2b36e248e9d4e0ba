//! Use cases (application services)

pub mod compare_latest;
pub mod run_fan_out;
