//! Known board identifiers and the Raspberry Pi revision table.

use std::str::FromStr;

use crate::error::BoardError;

/// A board variant this crate knows how to detect
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoardId {
    RaspberryPiB,
    RaspberryPiBPlus,
    RaspberryPiA,
    RaspberryPiAPlus,
    RaspberryPiCm1,
    RaspberryPiZero,
    RaspberryPiZeroW,
    RaspberryPi2B,
    RaspberryPi3B,
    RaspberryPi3BPlus,
    RaspberryPiCm3,
    RaspberryPi3APlus,
    BeagleboneBlack,
    MinnowboardMax,
}

/// Pi revision codes, in declared board order.
///
/// Codes from <https://www.raspberrypi.org/documentation/hardware/raspberrypi/revision-codes/README.md>.
/// A code must never appear under two boards.
pub static REVISION_CODES: &[(BoardId, &[&str])] = &[
    (
        BoardId::RaspberryPiB,
        &["0002", "0003", "0004", "0005", "0006", "000d", "000e", "000f"],
    ),
    (BoardId::RaspberryPiBPlus, &["0010", "0013", "900032"]),
    (BoardId::RaspberryPiA, &["0007", "0008", "0009"]),
    (BoardId::RaspberryPiAPlus, &["0012", "0015", "900021"]),
    (BoardId::RaspberryPiCm1, &["0011", "0014"]),
    (
        BoardId::RaspberryPiZero,
        &["900092", "920092", "900093", "920093"],
    ),
    (BoardId::RaspberryPiZeroW, &["9000c1"]),
    (
        BoardId::RaspberryPi2B,
        &["a01040", "a01041", "a21041", "a22042"],
    ),
    (BoardId::RaspberryPi3B, &["a22082", "a32082", "a52082"]),
    (BoardId::RaspberryPi3BPlus, &["a020d3"]),
    (BoardId::RaspberryPiCm3, &["a020a0"]),
    (BoardId::RaspberryPi3APlus, &["9020e0"]),
];

impl BoardId {
    /// Every board, in declared order
    pub const ALL: [BoardId; 14] = [
        BoardId::RaspberryPiB,
        BoardId::RaspberryPiBPlus,
        BoardId::RaspberryPiA,
        BoardId::RaspberryPiAPlus,
        BoardId::RaspberryPiCm1,
        BoardId::RaspberryPiZero,
        BoardId::RaspberryPiZeroW,
        BoardId::RaspberryPi2B,
        BoardId::RaspberryPi3B,
        BoardId::RaspberryPi3BPlus,
        BoardId::RaspberryPiCm3,
        BoardId::RaspberryPi3APlus,
        BoardId::BeagleboneBlack,
        BoardId::MinnowboardMax,
    ];

    /// Stable identifier, eg. `raspberry_pi_3b`
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RaspberryPiB => "raspberry_pi_b",
            Self::RaspberryPiBPlus => "raspberry_pi_b_plus",
            Self::RaspberryPiA => "raspberry_pi_a",
            Self::RaspberryPiAPlus => "raspberry_pi_a_plus",
            Self::RaspberryPiCm1 => "raspberry_pi_cm1",
            Self::RaspberryPiZero => "raspberry_pi_zero",
            Self::RaspberryPiZeroW => "raspberry_pi_zero_w",
            Self::RaspberryPi2B => "raspberry_pi_2b",
            Self::RaspberryPi3B => "raspberry_pi_3b",
            Self::RaspberryPi3BPlus => "raspberry_pi_3b_plus",
            Self::RaspberryPiCm3 => "raspberry_pi_cm3",
            Self::RaspberryPi3APlus => "raspberry_pi_3a_plus",
            Self::BeagleboneBlack => "beaglebone_black",
            Self::MinnowboardMax => "minnowboard_max",
        }
    }

    /// Human readable board name
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::RaspberryPiB => "Raspberry Pi Model B",
            Self::RaspberryPiBPlus => "Raspberry Pi Model B+",
            Self::RaspberryPiA => "Raspberry Pi Model A",
            Self::RaspberryPiAPlus => "Raspberry Pi Model A+",
            Self::RaspberryPiCm1 => "Raspberry Pi Compute Module 1",
            Self::RaspberryPiZero => "Raspberry Pi Zero",
            Self::RaspberryPiZeroW => "Raspberry Pi Zero W",
            Self::RaspberryPi2B => "Raspberry Pi 2 Model B",
            Self::RaspberryPi3B => "Raspberry Pi 3 Model B",
            Self::RaspberryPi3BPlus => "Raspberry Pi 3 Model B+",
            Self::RaspberryPiCm3 => "Raspberry Pi Compute Module 3",
            Self::RaspberryPi3APlus => "Raspberry Pi 3 Model A+",
            Self::BeagleboneBlack => "BeagleBone Black",
            Self::MinnowboardMax => "MinnowBoard MAX",
        }
    }

    /// Revision codes registered for this board. Empty for non-Pi boards.
    pub fn revision_codes(&self) -> &'static [&'static str] {
        REVISION_CODES
            .iter()
            .find(|(id, _)| id == self)
            .map(|(_, codes)| *codes)
            .unwrap_or_default()
    }

    /// Whether this board is identified through the revision table
    pub fn is_raspberry_pi(&self) -> bool {
        !self.revision_codes().is_empty()
    }

    /// Look up the board owning a revision code. Exact match only.
    pub fn from_revision(code: &str) -> Option<Self> {
        REVISION_CODES
            .iter()
            .find(|(_, codes)| codes.contains(&code))
            .map(|(id, _)| *id)
    }
}

impl FromStr for BoardId {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| BoardError::UnknownBoard(s.to_string()))
    }
}

impl std::fmt::Display for BoardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
