//! Star/planet split of an object identifier
//!
//! The transit table names objects as `<star> <planet letter>`, e.g.
//! "KELT-4A b". Only single-letter planet designators are supported.

use crate::error::{PlannerError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Designation {
    pub star: String,
    pub planet: char,
}

impl Designation {
    /// Split `object` into everything before the final `" <letter>"` and the
    /// letter itself.
    pub fn parse(object: &str) -> Result<Self> {
        let invalid = || PlannerError::InvalidDesignation {
            object: object.to_string(),
        };

        let mut chars = object.chars().rev();
        let planet = chars.next().filter(|c| c.is_alphabetic()).ok_or_else(invalid)?;
        if chars.next() != Some(' ') {
            return Err(invalid());
        }

        let star: String = chars.rev().collect();
        if star.trim().is_empty() {
            return Err(invalid());
        }

        Ok(Self { star, planet })
    }
}
