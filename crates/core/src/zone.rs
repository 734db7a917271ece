//! Control chart zones
//!
//! A control chart divides the value axis into eight bands around the
//! center line, each one sigma wide except the outermost pair (beyond the
//! 3-sigma control limits). Zone membership, not raw values, is what the
//! run rules consume.

use serde::{Deserialize, Serialize};

/// Which side of the center line a zone lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Upper,
    Lower,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Upper => Side::Lower,
            Side::Lower => Side::Upper,
        }
    }
}

/// One of the eight control chart zones, ordered from lowest value to
/// highest. `Ord` follows the value axis: `BeyondLcl < ZoneALower < ... <
/// BeyondUcl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Below the lower control limit
    BeyondLcl,
    /// Between LCL and 2 sigma below center
    ZoneALower,
    /// Between 2 sigma and 1 sigma below center
    ZoneBLower,
    /// Within 1 sigma below center
    ZoneCLower,
    /// Within 1 sigma above center
    ZoneCUpper,
    /// Between 1 sigma and 2 sigma above center
    ZoneBUpper,
    /// Between 2 sigma above center and the UCL
    ZoneAUpper,
    /// Above the upper control limit
    BeyondUcl,
}

impl Zone {
    /// Which side of the center line this zone lies on.
    ///
    /// A value exactly on the center line classifies as `ZoneCUpper`, so
    /// every zone has a well-defined side.
    pub fn side(&self) -> Side {
        match self {
            Zone::ZoneCUpper | Zone::ZoneBUpper | Zone::ZoneAUpper | Zone::BeyondUcl => Side::Upper,
            Zone::ZoneCLower | Zone::ZoneBLower | Zone::ZoneALower | Zone::BeyondLcl => Side::Lower,
        }
    }

    /// True if the value fell outside the control limits (Nelson Rule 1)
    pub fn is_beyond_limits(&self) -> bool {
        matches!(self, Zone::BeyondUcl | Zone::BeyondLcl)
    }

    /// True if the value lies within one sigma of the center line
    pub fn is_zone_c(&self) -> bool {
        matches!(self, Zone::ZoneCUpper | Zone::ZoneCLower)
    }

    /// True if the value is in zone A or beyond the limits on the given side
    pub fn is_zone_a_or_beyond(&self, side: Side) -> bool {
        match side {
            Side::Upper => matches!(self, Zone::ZoneAUpper | Zone::BeyondUcl),
            Side::Lower => matches!(self, Zone::ZoneALower | Zone::BeyondLcl),
        }
    }

    /// True if the value is at or beyond zone B on the given side
    pub fn is_zone_b_or_beyond(&self, side: Side) -> bool {
        match side {
            Side::Upper => matches!(self, Zone::ZoneBUpper | Zone::ZoneAUpper | Zone::BeyondUcl),
            Side::Lower => matches!(self, Zone::ZoneBLower | Zone::ZoneALower | Zone::BeyondLcl),
        }
    }
}
