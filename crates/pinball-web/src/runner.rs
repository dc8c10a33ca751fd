use pinball_core::glam::Vec2;
use pinball_core::{
    preset, ConfigError, InputEvent, InputQueue, InputState, KeyBindings, PinballSession,
    RenderBuffer, TableDefinition,
};

/// Wires a session to the host page: queued key events in, render hints out.
///
/// The wasm exports keep one `PinballRunner` in a `thread_local!`, because
/// wasm-bindgen cannot hand a stateful Rust struct to the page loop directly.
pub struct PinballRunner {
    session: PinballSession,
    input: InputQueue,
    state: InputState,
    bindings: KeyBindings,
    render_buffer: RenderBuffer,
}

impl PinballRunner {
    pub fn new(definition: TableDefinition, viewport: Vec2) -> Result<Self, ConfigError> {
        let session = PinballSession::new(definition, viewport)?;
        let mut render_buffer = RenderBuffer::new();
        session.write_render_buffer(&mut render_buffer);
        Ok(Self {
            session,
            input: InputQueue::new(),
            state: InputState::default(),
            bindings: KeyBindings::default(),
            render_buffer,
        })
    }

    /// Build one of the named preset tables.
    pub fn from_preset(name: &str, viewport: Vec2) -> Result<Self, ConfigError> {
        Self::new(preset(name)?, viewport)
    }

    /// Build a table from a JSON definition.
    pub fn from_json(json: &str, viewport: Vec2) -> Result<Self, ConfigError> {
        Self::new(TableDefinition::from_json(json)?, viewport)
    }

    /// Replace the key bindings from JSON such as `{"left": [90], "right": [77]}`.
    /// Flags held under the old bindings are released.
    pub fn set_bindings_json(&mut self, json: &str) -> Result<(), ConfigError> {
        self.bindings = KeyBindings::from_json(json)?;
        self.state = InputState::default();
        Ok(())
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: apply queued input, advance the fixed-step simulation,
    /// rebuild the render buffer.
    pub fn tick(&mut self, dt: f32) {
        for event in self.input.drain() {
            match event {
                InputEvent::ResetBall => self.session.reset_ball(),
                other => self.state.apply(&other, &self.bindings),
            }
        }

        self.session.advance(dt, &self.state);
        self.session.write_render_buffer(&mut self.render_buffer);
    }

    pub fn session(&self) -> &PinballSession {
        &self.session
    }

    pub fn input_state(&self) -> InputState {
        self.state
    }

    // -- Data accessors --

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.render_buffer
    }

    pub fn background_color(&self) -> [f32; 3] {
        self.session.background_color().to_array()
    }

    pub fn drain_count(&self) -> u32 {
        self.session.drain_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinball_core::input::keys;
    use pinball_core::{Side, TICK_DT};

    const VIEWPORT: Vec2 = Vec2::new(1000.0, 800.0);

    #[test]
    fn unknown_preset_is_an_error() {
        assert!(matches!(
            PinballRunner::from_preset("nope", VIEWPORT),
            Err(ConfigError::UnknownTable(name)) if name == "nope"
        ));
    }

    #[test]
    fn render_buffer_is_ready_before_the_first_tick() {
        let runner = PinballRunner::from_preset("classic", VIEWPORT).unwrap();
        assert_eq!(runner.instance_count(), 7 + 5 + 2 + 1);
        assert!(!runner.instances_ptr().is_null());
    }

    #[test]
    fn key_events_reach_the_flippers() {
        let mut runner = PinballRunner::from_preset("wide", VIEWPORT).unwrap();
        runner.push_input(InputEvent::KeyDown { key_code: keys::ARROW_LEFT });
        for _ in 0..10 {
            runner.tick(TICK_DT);
        }
        assert!(runner.input_state().left_active);
        assert!(runner.session().flipper_angle(Side::Left) < -0.5);

        runner.push_input(InputEvent::KeyUp { key_code: keys::A });
        runner.tick(TICK_DT);
        assert!(!runner.input_state().left_active);
    }

    #[test]
    fn custom_bindings_replace_the_defaults() {
        let mut runner = PinballRunner::from_preset("classic", VIEWPORT).unwrap();
        runner.push_input(InputEvent::KeyDown { key_code: keys::ARROW_RIGHT });
        runner.tick(TICK_DT);
        assert!(runner.input_state().right_active);

        runner.set_bindings_json(r#"{ "left": [90], "right": [77] }"#).unwrap();
        assert_eq!(runner.input_state(), InputState::default());

        runner.push_input(InputEvent::KeyDown { key_code: keys::ARROW_RIGHT });
        runner.push_input(InputEvent::KeyDown { key_code: 90 });
        runner.tick(TICK_DT);
        assert_eq!(runner.input_state(), InputState::new(true, false));
    }

    #[test]
    fn malformed_bindings_keep_the_old_ones() {
        let mut runner = PinballRunner::from_preset("classic", VIEWPORT).unwrap();
        assert!(matches!(
            runner.set_bindings_json(r#"{ "left": "z" }"#),
            Err(ConfigError::Json(_))
        ));
        runner.push_input(InputEvent::KeyDown { key_code: keys::A });
        runner.tick(TICK_DT);
        assert!(runner.input_state().left_active);
    }

    #[test]
    fn reset_event_respawns_the_ball() {
        let mut runner = PinballRunner::from_preset("classic", VIEWPORT).unwrap();
        for _ in 0..20 {
            runner.tick(TICK_DT);
        }
        runner.push_input(InputEvent::ResetBall);
        runner.tick(0.0);
        assert_eq!(runner.session().ball_position(), runner.session().layout().spawn);
    }

    #[test]
    fn json_tables_load_with_funnel_defaults() {
        let json = pinball_core::preset("classic").unwrap().to_json().unwrap();
        let runner = PinballRunner::from_json(&json, VIEWPORT).unwrap();
        assert_eq!(runner.session().wall_count(), 7);
        assert!(PinballRunner::from_json("{", VIEWPORT).is_err());
    }
}
