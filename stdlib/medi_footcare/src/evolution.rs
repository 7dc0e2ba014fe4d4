//! Change of wound measurements between two consecutive assessments.

use std::fmt;

use medi_imaging::{Channel, RegionStatistics};
use serde::{Deserialize, Serialize};

/// A signed difference rendered as `(+0.12)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Delta(pub f64);

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:+.2})", self.0)
    }
}

/// `current - previous`; `None` when there was no previous measurement.
pub fn delta(previous: f64, current: f64) -> Option<Delta> {
    (previous > 0.0).then(|| Delta(current - previous))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Evolution {
    pub area_delta: Option<Delta>,
    pub red_std_dev_delta: Option<Delta>,
}

impl Evolution {
    pub fn between(previous: &RegionStatistics, current: &RegionStatistics) -> Self {
        Self {
            area_delta: delta(previous.area_cm2, current.area_cm2),
            red_std_dev_delta: delta(
                previous.std_dev_of(Channel::Red),
                current.std_dev_of(Channel::Red),
            ),
        }
    }

    /// Suffix for the area reading; empty when there is nothing to compare.
    pub fn area_note(&self) -> String {
        note(self.area_delta)
    }

    pub fn red_std_dev_note(&self) -> String {
        note(self.red_std_dev_delta)
    }
}

fn note(delta: Option<Delta>) -> String {
    delta.map(|d| format!(" {d}")).unwrap_or_default()
}
