use glam::Vec2;

use crate::table::TableLayout;

/// Sends a ball that fell through the drain back to the spawn point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrainRule {
    /// The ball has drained once its Y is strictly greater than this.
    pub drain_y: f32,
    pub spawn: Vec2,
}

impl DrainRule {
    pub fn new(drain_y: f32, spawn: Vec2) -> Self {
        Self { drain_y, spawn }
    }

    pub fn from_layout(layout: &TableLayout) -> Self {
        Self::new(layout.drain_y, layout.spawn)
    }

    /// Where to put the ball, if it has drained. The caller also zeroes its velocity.
    pub fn check(&self, ball: Vec2) -> Option<Vec2> {
        (ball.y > self.drain_y).then_some(self.spawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::presets;

    fn classic_rule() -> (DrainRule, TableLayout) {
        let def = presets::classic();
        let layout = TableLayout::new(&def, Vec2::new(1000.0, 800.0));
        (DrainRule::from_layout(&layout), layout)
    }

    #[test]
    fn ball_past_margin_respawns_at_top() {
        let (rule, layout) = classic_rule();
        let ball = Vec2::new(layout.center.x + 3.0, layout.bottom + 51.0);
        assert_eq!(
            rule.check(ball),
            Some(Vec2::new(layout.center.x, layout.top + 50.0))
        );
    }

    #[test]
    fn ball_inside_margin_stays() {
        let (rule, layout) = classic_rule();
        assert_eq!(rule.check(Vec2::new(layout.center.x, layout.bottom + 49.0)), None);
    }

    #[test]
    fn threshold_itself_does_not_drain() {
        let rule = DrainRule::new(800.0, Vec2::new(500.0, 100.0));
        assert_eq!(rule.check(Vec2::new(0.0, 800.0)), None);
        assert!(rule.check(Vec2::new(0.0, 800.01)).is_some());
    }
}
