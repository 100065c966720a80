//! Resource request glue
//!
//! Each submodule wires one cloud resource onto the helper layer: request
//! bodies built from typed input, responses flattened into typed state and
//! long-running jobs polled through [`crate::wait`].

pub mod cce_autopilot;
