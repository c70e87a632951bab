// Plan-building engine - independent of the CLI host

pub mod core;
pub mod error;
pub mod hardware;
pub mod probe;

pub use core::*;
pub use error::{PlanError, ProbeError};
pub use hardware::{DeviceNodes, DevicePresence, HardwareTier, detect_tier};
