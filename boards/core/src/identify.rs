//! Board identification.
//!
//! Raspberry Pis are recognized by their cpuinfo revision code. Other boards
//! fall back, in order, to the platform string (BeagleBone Black), the native
//! platform helper (MinnowBoard MAX) and the Armbian release file.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::board::BoardId;
use crate::error::Result;
use crate::release::{self, ARMBIAN_RELEASE};
use crate::runtime::Runtime;
use crate::source::{
    CpuInfo, DmiPlatform, HardwareInfo, NativePlatform, NoNativePlatform, MINNOWBOARD_MAX_PLATFORM,
};

/// SoC families reported in the cpuinfo `Hardware` field of a Pi.
/// 2708 is the Pi 1, 2709 the Pi 2, 2835 the Pi 3 (or later) on 4.9+ kernels.
pub const PI_SOC_FAMILIES: [&str; 3] = ["BCM2708", "BCM2709", "BCM2835"];

/// Platform string fragments seen on BeagleBone Black images
const BEAGLEBONE_PLATFORMS: [&str; 3] = [
    "armv7l-with-debian",
    "armv7l-with-ubuntu",
    "armv7l-with-glibc2.4",
];

/// Result of name resolution
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetectedBoard {
    /// One of the known boards
    Known(BoardId),
    /// Raw `BOARD=` value from the Armbian release file
    // TODO: map common Armbian board names onto BoardId once they get pin maps
    Armbian(String),
}

impl DetectedBoard {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(id) => id.as_str(),
            Self::Armbian(name) => name,
        }
    }

    /// The known board, if this is not a raw Armbian name
    pub fn board(&self) -> Option<BoardId> {
        match self {
            Self::Known(id) => Some(*id),
            Self::Armbian(_) => None,
        }
    }
}

impl std::fmt::Display for DetectedBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies the board the process runs on.
///
/// Holds no state besides its sources; every query re-runs against them, so
/// answers are as stable as the sources are.
#[derive(Debug)]
pub struct BoardIdentifier<H, N = NoNativePlatform> {
    hardware: H,
    native: N,
    runtime: Runtime,
    release_file: PathBuf,
}

impl BoardIdentifier<CpuInfo, DmiPlatform> {
    /// Identifier wired to the live system
    pub fn current() -> Self {
        BoardIdentifier::new(CpuInfo::default(), Runtime::current())
            .with_native(DmiPlatform::default())
    }
}

impl<H: HardwareInfo> BoardIdentifier<H> {
    pub fn new(hardware: H, runtime: Runtime) -> Self {
        Self {
            hardware,
            native: NoNativePlatform,
            runtime,
            release_file: PathBuf::from(ARMBIAN_RELEASE),
        }
    }
}

impl<H: HardwareInfo, N: NativePlatform> BoardIdentifier<H, N> {
    /// Use a native platform helper for MinnowBoard detection
    pub fn with_native<M: NativePlatform>(self, native: M) -> BoardIdentifier<H, M> {
        BoardIdentifier {
            hardware: self.hardware,
            native,
            runtime: self.runtime,
            release_file: self.release_file,
        }
    }

    /// Read the Armbian board name from another file
    pub fn with_release_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.release_file = path.into();
        self
    }

    pub fn hardware(&self) -> &H {
        &self.hardware
    }

    pub fn native(&self) -> &N {
        &self.native
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn release_file(&self) -> &Path {
        &self.release_file
    }

    /// Whether the current board is `board`.
    ///
    /// Always false off Linux, without reading any hardware source.
    pub fn supports(&self, board: BoardId) -> bool {
        if !self.runtime.is_linux() {
            return false;
        }
        if board.is_raspberry_pi() {
            return self
                .revision_code()
                .is_some_and(|code| board.revision_codes().contains(&code.as_str()));
        }
        self.name().and_then(|name| name.board()) == Some(board)
    }

    /// [`Self::supports`] for a board identifier string.
    /// Fails on identifiers that name no known board.
    pub fn supports_named(&self, board: &str) -> Result<bool> {
        let board: BoardId = board.parse()?;
        Ok(self.supports(board))
    }

    /// Pi revision code, if the SoC family is a Pi one.
    ///
    /// The code is returned verbatim. Table lookups are case sensitive, so a
    /// board reporting uppercase hex will not match.
    pub fn revision_code(&self) -> Option<String> {
        let hardware = self.hardware.field("Hardware")?;
        if !PI_SOC_FAMILIES.contains(&hardware.as_str()) {
            return None;
        }
        self.hardware.field("Revision")
    }

    pub fn is_any_raspberry_pi(&self) -> bool {
        self.revision_code().is_some()
    }

    /// Best-effort BeagleBone Black check based on the platform string.
    ///
    /// Never true on a Pi. Images with a platform string outside the known
    /// fragments are missed.
    pub fn is_beaglebone_black(&self) -> bool {
        if !self.runtime.is_linux() || self.is_any_raspberry_pi() {
            return false;
        }
        let platform = self.runtime.platform().to_lowercase();
        BEAGLEBONE_PLATFORMS.iter().any(|p| platform.contains(p))
    }

    /// Name of the detected board, or `None` when nothing matched
    pub fn name(&self) -> Option<DetectedBoard> {
        if !self.runtime.is_linux() {
            debug!("not a linux host, skipping board detection");
            return None;
        }

        if let Some(code) = self.revision_code() {
            if let Some(id) = BoardId::from_revision(&code) {
                debug!(revision = %code, board = %id, "matched pi revision code");
                return Some(DetectedBoard::Known(id));
            }
            debug!(revision = %code, "unknown pi revision code");
        }

        if self.is_beaglebone_black() {
            debug!(platform = self.runtime.platform(), "matched beaglebone platform");
            return Some(DetectedBoard::Known(BoardId::BeagleboneBlack));
        }

        match self.native.platform_name() {
            Some(name) if name == MINNOWBOARD_MAX_PLATFORM => {
                debug!("native helper reports minnowboard");
                return Some(DetectedBoard::Known(BoardId::MinnowboardMax));
            },
            Some(name) => debug!(%name, "native helper reports unknown platform"),
            None => debug!("no native platform name"),
        }

        match release::read_board(&self.release_file) {
            Ok(Some(board)) => {
                debug!(%board, "matched armbian release");
                return Some(DetectedBoard::Armbian(board));
            },
            Ok(None) => debug!("no BOARD= line in {}", self.release_file.display()),
            Err(e) => debug!("cannot read {}: {e}", self.release_file.display()),
        }

        None
    }
}
