//! 瓦片矩形：闭区间坐标，`[origin, origin + size - 1]`。

use domain::FloorPlanTile;

/// 瓦片覆盖的闭区间矩形。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileBounds {
    pub x_min: i64,
    pub x_max: i64,
    pub y_min: i64,
    pub y_max: i64,
}

impl TileBounds {
    pub fn new(x_origin: i64, y_origin: i64, x_size: i64, y_size: i64) -> Self {
        Self {
            x_min: x_origin,
            x_max: x_origin + x_size - 1,
            y_min: y_origin,
            y_max: y_origin + y_size - 1,
        }
    }

    pub fn of_tile(tile: &FloorPlanTile) -> Self {
        Self::new(tile.x_origin, tile.y_origin, tile.x_size, tile.y_size)
    }

    /// 两个矩形是否有公共格位。
    pub fn intersects(&self, other: &TileBounds) -> bool {
        interval_overlaps(self.x_min, self.x_max, other.x_min, other.x_max)
            && interval_overlaps(self.y_min, self.y_max, other.y_min, other.y_max)
    }

    /// `other` 是否完整落在本矩形内。
    pub fn contains(&self, other: &TileBounds) -> bool {
        self.x_min <= other.x_min
            && other.x_max <= self.x_max
            && self.y_min <= other.y_min
            && other.y_max <= self.y_max
    }
}

/// 闭区间相交判定。
fn interval_overlaps(a_min: i64, a_max: i64, b_min: i64, b_max: i64) -> bool {
    a_min <= b_max && b_min <= a_max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        let bounds = TileBounds::new(2, 3, 2, 1);
        assert_eq!(bounds.x_max, 3);
        assert_eq!(bounds.y_max, 3);
    }

    #[test]
    fn adjacent_tiles_do_not_intersect() {
        let left = TileBounds::new(1, 1, 2, 2);
        let right = TileBounds::new(3, 1, 2, 2);
        assert!(!left.intersects(&right));

        let touching = TileBounds::new(2, 2, 2, 2);
        assert!(left.intersects(&touching));
    }

    #[test]
    fn containment_requires_full_nesting() {
        let group = TileBounds::new(1, 1, 4, 4);
        let inner = TileBounds::new(2, 2, 2, 2);
        let spilling = TileBounds::new(3, 3, 3, 1);
        assert!(group.contains(&inner));
        assert!(!group.contains(&spilling));
        assert!(group.intersects(&spilling));
    }
}
