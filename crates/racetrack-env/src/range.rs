use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::EnvError;

/// Inclusive integer range used for accelerations and velocities.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i32,
    pub max: i32,
}

impl IntRange {
    pub const fn new(min: i32, max: i32) -> Self {
        IntRange { min, max }
    }

    /// Reject inverted ranges and ranges that cannot encode zero.
    pub fn validate(&self, name: &'static str) -> Result<(), EnvError> {
        if self.min > self.max {
            return Err(EnvError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        if !self.contains(0) {
            return Err(EnvError::RangeMissingZero {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    pub fn contains(&self, value: i32) -> bool {
        self.min <= value && value <= self.max
    }

    /// Saturate `value` into the range.
    pub fn clamp(&self, value: i32) -> i32 {
        value.max(self.min).min(self.max)
    }

    /// Number of distinct values, i.e. the table axis width.
    pub fn width(&self) -> usize {
        (i64::from(self.max) - i64::from(self.min) + 1).max(0) as usize
    }

    /// Map a signed value to its zero-based bin.
    pub fn bin(&self, value: i32) -> Option<usize> {
        if !self.contains(value) {
            return None;
        }
        Some((i64::from(value) - i64::from(self.min)) as usize)
    }

    /// Inverse of [`IntRange::bin`].
    pub fn value_at(&self, bin: usize) -> Option<i32> {
        if bin >= self.width() {
            return None;
        }
        Some(self.min + bin as i32)
    }

    pub fn values(&self) -> RangeInclusive<i32> {
        self.min..=self.max
    }
}
