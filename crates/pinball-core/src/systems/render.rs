use crate::components::entity::Entity;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Rebuild the render buffer from a set of entities, in iteration order.
/// Inactive entities are skipped.
pub fn build_render_buffer<'a>(entities: impl Iterator<Item = &'a Entity>, buffer: &mut RenderBuffer) {
    buffer.clear();

    for entity in entities.filter(|e| e.active) {
        let [r, g, b] = entity.color.to_array();
        buffer.push(RenderInstance {
            x: entity.pos.x,
            y: entity.pos.y,
            rotation: entity.rotation,
            shape: RenderInstance::shape_for(entity.kind),
            width: entity.size.x,
            height: entity.size.y,
            r,
            g,
            b,
            alpha: 1.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{BodyKind, EntityId};
    use crate::config::Rgb;
    use crate::renderer::instance::{SHAPE_BOX, SHAPE_CIRCLE};
    use glam::Vec2;

    #[test]
    fn one_instance_per_active_entity() {
        let mut hidden = Entity::new(EntityId(3), BodyKind::Wall);
        hidden.active = false;
        let entities = vec![
            Entity::new(EntityId(1), BodyKind::Wall)
                .with_pos(Vec2::new(10.0, 20.0))
                .with_rotation(0.5)
                .with_size(Vec2::new(100.0, 20.0))
                .with_color(Rgb::new(0.2, 0.4, 0.6)),
            Entity::new(EntityId(2), BodyKind::Ball)
                .with_pos(Vec2::new(30.0, 40.0))
                .with_size(Vec2::splat(20.0)),
            hidden,
        ];

        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer);

        assert_eq!(buffer.instance_count(), 2);
        let wall = buffer.instances[0];
        assert_eq!((wall.x, wall.y, wall.rotation), (10.0, 20.0, 0.5));
        assert_eq!(wall.shape, SHAPE_BOX);
        assert_eq!((wall.width, wall.height), (100.0, 20.0));
        assert_eq!((wall.r, wall.g, wall.b), (0.2, 0.4, 0.6));
        assert_eq!(buffer.instances[1].shape, SHAPE_CIRCLE);
    }

    #[test]
    fn rebuild_replaces_previous_contents() {
        let entities = vec![Entity::new(EntityId(1), BodyKind::Bumper)];
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer);
        build_render_buffer(entities.iter(), &mut buffer);
        assert_eq!(buffer.instance_count(), 1);
    }
}
