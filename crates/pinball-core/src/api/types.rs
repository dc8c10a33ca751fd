/// Unique identifier for an entity on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// What a table entity is. Decides its render shape and palette slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Wall,
    Bumper,
    Flipper,
    Ball,
}

impl BodyKind {
    /// Whether the renderer should draw this kind as a circle rather than a box.
    pub fn is_round(self) -> bool {
        matches!(self, BodyKind::Bumper | BodyKind::Ball)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balls_and_bumpers_are_round() {
        assert!(BodyKind::Ball.is_round());
        assert!(BodyKind::Bumper.is_round());
        assert!(!BodyKind::Wall.is_round());
        assert!(!BodyKind::Flipper.is_round());
    }
}
