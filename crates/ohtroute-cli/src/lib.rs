//! OHT route planner CLI library.
//!
//! Rendering helpers shared by the `ohtroute-cli` binary and its tests.

pub mod output;
