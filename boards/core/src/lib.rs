//! Single-board computer detection.
//!
//! This crate provides:
//! - `BoardId`, the closed set of known boards, and the Pi revision table
//! - `BoardIdentifier`, which answers "is this board X?" and resolves a board name
//! - Sources for raw identifiers: cpuinfo fields, DMI names, release files

mod board;
mod error;
mod identify;
pub mod release;
mod runtime;
mod source;

pub use board::{BoardId, REVISION_CODES};
pub use error::{BoardError, Result};
pub use identify::{BoardIdentifier, DetectedBoard, PI_SOC_FAMILIES};
pub use runtime::Runtime;
pub use source::{
    CpuInfo, DmiPlatform, HardwareInfo, NativePlatform, NoNativePlatform, CPUINFO, DMI_BOARD_NAME,
    MINNOWBOARD_MAX_PLATFORM,
};
