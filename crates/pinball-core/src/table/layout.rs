use glam::Vec2;

use crate::config::{BumperDescriptor, TableDefinition};

/// A table placed in world space, centered in the viewport (Y down).
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    pub center: Vec2,
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    /// Where the side walls start angling in.
    pub funnel_y: f32,
    /// Drain edges.
    pub funnel_left_x: f32,
    pub funnel_right_x: f32,
    pub left_pivot_x: f32,
    pub right_pivot_x: f32,
    pub flipper_y: f32,
    /// Where the ball appears at start and after draining.
    pub spawn: Vec2,
    /// The ball respawns once its Y exceeds this.
    pub drain_y: f32,
}

impl TableLayout {
    pub fn new(def: &TableDefinition, viewport: Vec2) -> Self {
        let center = viewport / 2.0;
        let t = &def.table;

        let left = center.x - t.width / 2.0;
        let right = center.x + t.width / 2.0;
        let top = center.y - t.height / 2.0;
        let bottom = center.y + t.height / 2.0;
        let funnel_left_x = center.x - t.bottom_width / 2.0;
        let funnel_right_x = center.x + t.bottom_width / 2.0;

        Self {
            center,
            left,
            right,
            top,
            bottom,
            funnel_y: center.y + t.height * t.funnel_start,
            funnel_left_x,
            funnel_right_x,
            left_pivot_x: funnel_left_x + t.pivot_inset,
            right_pivot_x: funnel_right_x - t.pivot_inset,
            flipper_y: bottom - def.flipper.y_offset,
            spawn: Vec2::new(center.x, top + def.ball.spawn_offset),
            drain_y: bottom + def.ball.drain_margin,
        }
    }

    /// Map table-local boundary points (origin at the table center) into world space.
    pub fn boundary_to_world(&self, local: &[Vec2]) -> Vec<Vec2> {
        local.iter().map(|p| self.center + *p).collect()
    }

    /// World position of a bumper described relative to the center line and table top.
    pub fn bumper_position(&self, bumper: &BumperDescriptor) -> Vec2 {
        Vec2::new(self.center.x + bumper.x, self.top + bumper.y)
    }
}
