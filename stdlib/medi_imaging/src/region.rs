use std::fmt;

use serde::{Deserialize, Serialize};

/// Caller-selected rectangle in pixel coordinates.
///
/// The origin may lie outside the image; only the overlap is analysed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// Part of a [`Region`] that lies inside the image bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clipped {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Intersection with a `width` x `height` image, `None` when they don't overlap.
    pub fn clip_to(&self, width: u32, height: u32) -> Option<Clipped> {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = self.x.saturating_add(i64::from(self.width)).min(i64::from(width));
        let y1 = self.y.saturating_add(i64::from(self.height)).min(i64::from(height));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        // Bounded by the image dimensions, so these fit in u32.
        Some(Clipped {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}x{}", self.x, self.y, self.width, self.height)
    }
}

impl Clipped {
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fully_inside_is_unchanged() {
        let r = Region::new(10, 20, 30, 40);
        assert_eq!(
            r.clip_to(100, 100),
            Some(Clipped { x: 10, y: 20, width: 30, height: 40 })
        );
    }

    #[test]
    fn partial_overlap_is_trimmed() {
        let r = Region::new(-5, 90, 20, 20);
        let c = r.clip_to(100, 100).unwrap();
        assert_eq!(c, Clipped { x: 0, y: 90, width: 15, height: 10 });
        assert_eq!(c.pixel_count(), 150);
    }

    #[test]
    fn disjoint_region_has_no_overlap() {
        assert_eq!(Region::new(200, 0, 10, 10).clip_to(100, 100), None);
        assert_eq!(Region::new(-20, -20, 10, 10).clip_to(100, 100), None);
        assert_eq!(Region::new(100, 0, 10, 10).clip_to(100, 100), None);
    }

    #[test]
    fn far_away_origin_does_not_overflow() {
        assert_eq!(Region::new(i64::MAX - 5, 0, 10, 10).clip_to(100, 100), None);
        assert_eq!(Region::new(0, i64::MAX - 1, 10, u32::MAX).clip_to(100, 100), None);
        assert_eq!(Region::new(i64::MIN, 0, 10, 10).clip_to(100, 100), None);
    }

    #[test]
    fn zero_sized_region_is_degenerate() {
        assert!(Region::new(0, 0, 0, 5).is_degenerate());
        assert!(!Region::new(0, 0, 1, 1).is_degenerate());
        assert_eq!(Region::new(0, 0, 0, 5).clip_to(10, 10), None);
    }

    #[test]
    fn display_shows_origin_and_size() {
        assert_eq!(Region::new(-3, 4, 5, 6).to_string(), "(-3, 4) 5x6");
    }
}
