//! Keyboard input for the player box

use bevy::prelude::*;

use ring_runner::InputFrame;

// ============================================================================
// PENDING INPUT
// ============================================================================

/// Input gathered between fixed ticks
///
/// Held keys are resampled every frame. Presses latch until a tick
/// consumes them, so a tap shorter than one tick is never lost.
#[derive(Resource, Default, Debug)]
pub struct PendingInput {
    held: InputFrame,
    pressed: InputFrame,
}

impl PendingInput {
    /// Input for the next tick; clears latched presses.
    pub fn take(&mut self) -> InputFrame {
        let mut frame = self.held;
        frame.merge(self.pressed);
        self.pressed = InputFrame::new();
        frame
    }
}

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Held keys: D/Right nudge right, Q/A/Left nudge left
pub fn held_frame(keyboard: &ButtonInput<KeyCode>) -> InputFrame {
    let mut frame = InputFrame::new();

    frame.set(
        InputFrame::FLAG_NUDGE_LEFT,
        keyboard.any_pressed([KeyCode::KeyQ, KeyCode::KeyA, KeyCode::ArrowLeft]),
    );
    frame.set(
        InputFrame::FLAG_NUDGE_RIGHT,
        keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]),
    );

    frame
}

/// One-shot keys: R reset, Space jump
pub fn pressed_frame(keyboard: &ButtonInput<KeyCode>) -> InputFrame {
    let mut frame = InputFrame::new();

    frame.set(InputFrame::FLAG_RESET, keyboard.just_pressed(KeyCode::KeyR));
    frame.set(InputFrame::FLAG_JUMP, keyboard.just_pressed(KeyCode::Space));

    frame
}

/// Sample the keyboard into the pending input
pub fn gather_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut pending: ResMut<PendingInput>,
) {
    pending.held = held_frame(&keyboard);
    pending.pressed.merge(pressed_frame(&keyboard));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyQ);
        keyboard.press(KeyCode::Space);

        let held = held_frame(&keyboard);
        assert!(held.nudge_left());
        assert!(!held.nudge_right());

        let pressed = pressed_frame(&keyboard);
        assert!(pressed.jump_pressed());
        assert!(!pressed.reset_pressed());
    }

    #[test]
    fn test_azerty_and_arrows() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyA);
        keyboard.press(KeyCode::ArrowRight);

        let held = held_frame(&keyboard);
        assert!(held.nudge_left());
        assert!(held.nudge_right());
    }

    #[test]
    fn test_press_latches_until_taken() {
        let mut pending = PendingInput::default();
        let mut keyboard = ButtonInput::<KeyCode>::default();

        keyboard.press(KeyCode::KeyR);
        pending.pressed.merge(pressed_frame(&keyboard));

        // Next frame: key still down but no longer "just pressed"
        keyboard.clear();
        pending.held = held_frame(&keyboard);
        pending.pressed.merge(pressed_frame(&keyboard));

        assert!(pending.take().reset_pressed());
        assert!(pending.take().is_idle());
    }

    #[test]
    fn test_held_survives_take() {
        let mut pending = PendingInput::default();
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyD);
        pending.held = held_frame(&keyboard);

        assert!(pending.take().nudge_right());
        assert!(pending.take().nudge_right());
    }
}
