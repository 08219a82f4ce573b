//! Application core — pure domain logic, zero I/O.
//!
//! The actuation policy, the shared state cache, and the poll-loop
//! service.  All interaction with hardware happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod events;
pub mod policy;
pub mod ports;
pub mod service;
pub mod state;
