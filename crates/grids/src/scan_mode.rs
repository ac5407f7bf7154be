//! Scanning mode flags.
//!
//! A scan mode describes how a 2-D field is serialized into a flat array.
//! Bit 0 is the least significant bit:
//!
//! | bit | value | meaning when set                               |
//! |-----|-------|------------------------------------------------|
//! | 0   | 1     | points along a row scan in the -i direction    |
//! | 1   | 2     | rows scan in the +j direction (south to north) |
//! | 2   | 4     | adjacent points are consecutive in j           |
//! | 3   | 8     | every other row scans in the opposite direction|
//! | 4   | 16    | odd rows are offset                            |
//! | 5   | 32    | even rows are offset                           |
//! | 6   | 64    | points are offset in j                         |
//! | 7   | 128   | rows have a reduced number of points           |
//!
//! The codec honours the first four flags; the offset flags are carried
//! and reported but do not move points.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Eight independent scanning flags packed into one byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanMode(u8);

impl ScanMode {
    pub const NEGATIVE_I: u8 = 1 << 0;
    pub const POSITIVE_J: u8 = 1 << 1;
    pub const CONSECUTIVE_J: u8 = 1 << 2;
    pub const OPPOSITE_ROWS: u8 = 1 << 3;
    pub const ODD_ROWS_OFFSET: u8 = 1 << 4;
    pub const EVEN_ROWS_OFFSET: u8 = 1 << 5;
    pub const J_OFFSET: u8 = 1 << 6;
    pub const REDUCED_POINTS: u8 = 1 << 7;

    /// Mask of the flags that change the index encoding.
    pub const CODEC_MASK: u8 =
        Self::NEGATIVE_I | Self::POSITIVE_J | Self::CONSECUTIVE_J | Self::OPPOSITE_ROWS;

    /// West to east, north to south, row-major.
    pub const fn standard() -> Self {
        Self(0)
    }

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Create from the scanning-mode octet of a GRIB2 grid definition,
    /// whose flag 1 is the most significant bit.
    pub const fn from_grib2_flag(flag: u8) -> Self {
        Self(flag.reverse_bits())
    }

    /// The GRIB2 octet for this mode.
    pub const fn to_grib2_flag(self) -> u8 {
        self.0.reverse_bits()
    }

    /// Return a copy with `flag` set or cleared.
    pub const fn with(self, flag: u8, on: bool) -> Self {
        if on {
            Self(self.0 | flag)
        } else {
            Self(self.0 & !flag)
        }
    }

    const fn has(self, flag: u8) -> bool {
        self.0 & flag == flag
    }

    pub const fn is_negative_i(self) -> bool {
        self.has(Self::NEGATIVE_I)
    }

    pub const fn is_positive_j(self) -> bool {
        self.has(Self::POSITIVE_J)
    }

    pub const fn is_consecutive_j(self) -> bool {
        self.has(Self::CONSECUTIVE_J)
    }

    pub const fn is_opposite_rows(self) -> bool {
        self.has(Self::OPPOSITE_ROWS)
    }

    pub const fn is_odd_rows_offset(self) -> bool {
        self.has(Self::ODD_ROWS_OFFSET)
    }

    pub const fn is_even_rows_offset(self) -> bool {
        self.has(Self::EVEN_ROWS_OFFSET)
    }

    pub const fn is_j_offset(self) -> bool {
        self.has(Self::J_OFFSET)
    }

    pub const fn is_reduced_points(self) -> bool {
        self.has(Self::REDUCED_POINTS)
    }

    /// All modes that differ only in the codec flags, `0..16`.
    pub fn codec_combinations() -> impl Iterator<Item = ScanMode> {
        (0..=Self::CODEC_MASK).map(Self)
    }
}

impl From<u8> for ScanMode {
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}

impl From<ScanMode> for u8 {
    fn from(mode: ScanMode) -> Self {
        mode.0
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let i = if self.is_negative_i() { "-i" } else { "+i" };
        let j = if self.is_positive_j() { "+j" } else { "-j" };
        let order = if self.is_consecutive_j() {
            "consecutive j"
        } else {
            "consecutive i"
        };
        write!(f, "{i} scanning, {j} scanning, {order}")?;

        if self.is_opposite_rows() {
            f.write_str(", opposite rows")?;
        }
        if self.is_odd_rows_offset() {
            f.write_str(", odd rows offset")?;
        }
        if self.is_even_rows_offset() {
            f.write_str(", even rows offset")?;
        }
        if self.is_j_offset() {
            f.write_str(", j offset")?;
        }
        if self.is_reduced_points() {
            f.write_str(", reduced points")?;
        }
        Ok(())
    }
}
