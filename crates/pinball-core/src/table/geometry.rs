//! Wall segments generated from a closed path of boundary points.

use glam::Vec2;

/// One straight wall, ready to become a fixed rounded cuboid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSegment {
    pub midpoint: Vec2,
    /// Along-wall extent. One thickness longer than the point distance so that
    /// neighbouring walls overlap at the corners.
    pub length: f32,
    /// Orientation in radians, `atan2(dy, dx)` from the first point to the second.
    pub angle: f32,
    /// Perpendicular extent.
    pub thickness: f32,
    pub chamfer: f32,
}

impl WallSegment {
    /// Build the wall spanning `p1 → p2`.
    pub fn between(p1: Vec2, p2: Vec2, thickness: f32, chamfer: f32) -> Self {
        let delta = p2 - p1;
        Self {
            midpoint: (p1 + p2) / 2.0,
            length: delta.length() + thickness,
            angle: delta.y.atan2(delta.x),
            thickness,
            chamfer,
        }
    }

    /// Half extents of the wall in its own frame.
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.length / 2.0, self.thickness / 2.0)
    }
}

/// Walls for every consecutive pair of `points`, wrapping from the last point
/// back to the first, except the pair starting at `drain_gap.0`.
pub fn generate_walls(
    points: &[Vec2],
    drain_gap: Option<(usize, usize)>,
    thickness: f32,
    chamfer: f32,
) -> Vec<WallSegment> {
    let n = points.len();
    let skip = drain_gap.map(|(start, _)| start);

    (0..n)
        .filter(|&i| Some(i) != skip)
        .map(|i| WallSegment::between(points[i], points[(i + 1) % n], thickness, chamfer))
        .collect()
}
