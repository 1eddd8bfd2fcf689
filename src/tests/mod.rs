//! Scenario tests driven by controllable clocks

pub mod test_utils;

mod core_tests;
