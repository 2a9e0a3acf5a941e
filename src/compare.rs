// CLASSIFICATION: COMMUNITY
// Filename: compare.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Whole-record comparison of declared and actual versions.
//!
//! The four fields are compared as one block: each field is laid out
//! as a zero-padded [`PROPERTY_VALUE_MAX`] slot, in [`VersionKey::ALL`]
//! order, and the first differing byte decides. There is no per-field
//! verdict and no ordering; a [`Difference`] only says "not equal".

use std::fmt;
use std::num::NonZeroI32;

use log::{debug, error};

use crate::version::{VersionKey, VersionRecord, PROPERTY_VALUE_MAX};

/// Opaque nonzero differentiator of two unequal records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Difference(NonZeroI32);

impl Difference {
    pub fn new(value: NonZeroI32) -> Self {
        Self(value)
    }

    pub fn get(self) -> i32 {
        self.0.get()
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    NotEqual(Difference),
}

/// Compare `declared` against `actual`.
pub fn compare(declared: &VersionRecord, actual: &VersionRecord) -> Comparison {
    for key in VersionKey::ALL {
        let a = declared.get(key).padded();
        let b = actual.get(key).padded();
        if let Some(diff) = first_difference(&a, &b) {
            error!("Mismatch between versions, difference={diff}");
            return Comparison::NotEqual(Difference(diff));
        }
    }
    debug!("ODM partition matches expectations!");
    Comparison::Equal
}

fn first_difference(
    a: &[u8; PROPERTY_VALUE_MAX],
    b: &[u8; PROPERTY_VALUE_MAX],
) -> Option<NonZeroI32> {
    a.iter()
        .zip(b.iter())
        .find_map(|(&x, &y)| NonZeroI32::new(i32::from(x) - i32::from(y)))
}
