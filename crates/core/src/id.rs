//! Book identifiers.

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use crate::{GutentextError, Result};

/// Numeric catalog id of a book in the archive.
///
/// Only positivity is checked; an id the archive does not know fails later,
/// during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkId(NonZeroU64);

impl WorkId {
    /// Creates an id, rejecting zero.
    pub fn new(id: u64) -> Result<Self> {
        NonZeroU64::new(id)
            .map(Self)
            .ok_or_else(|| GutentextError::InvalidId(id.to_string()))
    }

    /// Returns the raw numeric value.
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl TryFrom<u64> for WorkId {
    type Error = GutentextError;

    fn try_from(id: u64) -> Result<Self> {
        Self::new(id)
    }
}

impl From<NonZeroU64> for WorkId {
    fn from(id: NonZeroU64) -> Self {
        Self(id)
    }
}

impl FromStr for WorkId {
    type Err = GutentextError;

    fn from_str(s: &str) -> Result<Self> {
        let id = s.parse::<u64>().map_err(|_| GutentextError::InvalidId(s.to_string()))?;
        Self::new(id)
    }
}

impl fmt::Display for WorkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
