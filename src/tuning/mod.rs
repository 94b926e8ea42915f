//! Speed Lookup Engine
//!
//! Analog tuning values for the PHY are characterised at discrete link
//! speeds. Bring-up picks the entry whose speed is nearest the negotiated
//! rate: the lower entry wins when it is at least as close as the upper
//! one. A rate below the first entry still resolves (to the first entry)
//! but is flagged; a rate above the last entry is rejected.
//!
//! # Modules
//!
//! - [`tables`]: two-wire tables (PLL range, PHTW codes, oscillator targets)
//! - [`cphy`]: the three-wire composite tuning table

pub mod cphy;
pub mod tables;

use crate::error::{Error, Result};

// =============================================================================
// Table Types
// =============================================================================

/// Anything keyed by a link speed in Mbps (or Msps for C-PHY)
pub trait SpeedKeyed {
    /// Characterisation speed of this entry
    fn speed(&self) -> u16;
}

/// One `(speed, register value)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpeedEntry {
    /// Characterisation speed in Mbps
    pub mbps: u16,
    /// Register value for this speed
    pub reg: u16,
}

impl SpeedEntry {
    /// Create an entry
    pub const fn new(mbps: u16, reg: u16) -> Self {
        Self { mbps, reg }
    }
}

impl SpeedKeyed for SpeedEntry {
    fn speed(&self) -> u16 {
        self.mbps
    }
}

/// Ascending table of [`SpeedEntry`]
///
/// Speeds are strictly increasing; the end of the slice terminates the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedTable(&'static [SpeedEntry]);

impl SpeedTable {
    /// Wrap a static table
    pub const fn new(entries: &'static [SpeedEntry]) -> Self {
        Self(entries)
    }

    /// Entries in ascending speed order
    pub const fn entries(&self) -> &'static [SpeedEntry] {
        self.0
    }

    /// Register value nearest `mbps`
    pub fn lookup(&self, mbps: u32) -> Result<Match<u16>> {
        nearest(self.0, mbps).map(|m| m.map(|entry| entry.reg))
    }
}

/// Result of a nearest-match query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Match<T> {
    /// Selected value
    pub value: T,
    /// Speed of the selected entry
    pub speed: u16,
    /// Requested speed was below the first entry
    pub below_range: bool,
}

impl<T> Match<T> {
    /// Transform the selected value, keeping the match metadata
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Match<U> {
        Match {
            value: f(self.value),
            speed: self.speed,
            below_range: self.below_range,
        }
    }
}

// =============================================================================
// Lookup
// =============================================================================

/// Find the entry nearest `target`.
///
/// Scans ascending for the first entry at or above `target`, then steps back
/// one entry if the lower neighbour is at least as close.
pub fn nearest<T: SpeedKeyed>(entries: &[T], target: u32) -> Result<Match<&T>> {
    let first = entries.first().ok_or(Error::UnsupportedSpeed(target))?;
    let below_range = target < u32::from(first.speed());
    if below_range {
        warn!("{} Mbps is below the lowest tuning entry ({})", target, first.speed());
    }

    let index = entries
        .iter()
        .position(|entry| u32::from(entry.speed()) >= target)
        .ok_or(Error::UnsupportedSpeed(target))?;

    let mut chosen = &entries[index];
    if index > 0 {
        let lower = &entries[index - 1];
        let distance_low = target - u32::from(lower.speed());
        let distance_high = u32::from(chosen.speed()) - target;
        if distance_low <= distance_high {
            chosen = lower;
        }
    }

    Ok(Match {
        value: chosen,
        speed: chosen.speed(),
        below_range,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
