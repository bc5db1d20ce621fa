//! Bump scan order.
//!
//! The ledger convention is to try bump 255 first and walk down to 0, so the
//! accepted bump is the "canonical" (highest) one. Other conventions only
//! need a different start or direction.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanDirection {
    Descending,
    Ascending,
}

/// Which bump values to try, and in what order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BumpScan {
    pub start: u8,
    pub direction: ScanDirection,
}

impl BumpScan {
    /// 255 down to 0.
    pub const CANONICAL: BumpScan = BumpScan {
        start: u8::MAX,
        direction: ScanDirection::Descending,
    };

    /// Every bump from `start` to the end of the byte range in `direction`.
    pub fn bumps(&self) -> Bumps {
        Bumps {
            next: Some(self.start),
            direction: self.direction,
        }
    }
}

impl Default for BumpScan {
    fn default() -> Self {
        Self::CANONICAL
    }
}

/// Iterator over candidate bumps, see [`BumpScan::bumps`].
#[derive(Debug, Clone)]
pub struct Bumps {
    next: Option<u8>,
    direction: ScanDirection,
}

impl Iterator for Bumps {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let current = self.next?;
        self.next = match self.direction {
            ScanDirection::Descending => current.checked_sub(1),
            ScanDirection::Ascending => current.checked_add(1),
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = match (self.next, self.direction) {
            (None, _) => 0,
            (Some(b), ScanDirection::Descending) => b as usize + 1,
            (Some(b), ScanDirection::Ascending) => u8::MAX as usize - b as usize + 1,
        };
        (len, Some(len))
    }
}

impl ExactSizeIterator for Bumps {}
