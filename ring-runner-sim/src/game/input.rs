//! Input Capture
//!
//! One `InputFrame` per tick. Flags are packed into a byte so recordings
//! stay small and replays are exact.

use serde::{Deserialize, Serialize};

use crate::config::PlayerConfig;

/// Input state for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct InputFrame {
    /// Action flags (packed bits):
    /// - Bit 0: Nudge left held
    /// - Bit 1: Nudge right held
    /// - Bit 2: Reset pressed this tick
    /// - Bit 3: Jump pressed this tick
    /// - Bit 4-7: Reserved
    pub flags: u8,
}

impl InputFrame {
    /// Nudge left flag bit
    pub const FLAG_NUDGE_LEFT: u8 = 0x01;

    /// Nudge right flag bit
    pub const FLAG_NUDGE_RIGHT: u8 = 0x02;

    /// Reset flag bit
    pub const FLAG_RESET: u8 = 0x04;

    /// Jump flag bit
    pub const FLAG_JUMP: u8 = 0x08;

    /// Create a new empty input frame.
    pub const fn new() -> Self {
        Self { flags: 0 }
    }

    /// Create a frame from raw flags.
    pub const fn from_flags(flags: u8) -> Self {
        Self { flags }
    }

    /// Check if nudge left is held.
    #[inline]
    pub fn nudge_left(&self) -> bool {
        self.flags & Self::FLAG_NUDGE_LEFT != 0
    }

    /// Check if nudge right is held.
    #[inline]
    pub fn nudge_right(&self) -> bool {
        self.flags & Self::FLAG_NUDGE_RIGHT != 0
    }

    /// Check if reset was pressed this tick.
    #[inline]
    pub fn reset_pressed(&self) -> bool {
        self.flags & Self::FLAG_RESET != 0
    }

    /// Check if jump was pressed this tick.
    #[inline]
    pub fn jump_pressed(&self) -> bool {
        self.flags & Self::FLAG_JUMP != 0
    }

    /// Check if this is an idle frame (no input).
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.flags == 0
    }

    /// Set or clear a flag.
    #[inline]
    pub fn set(&mut self, flag: u8, on: bool) {
        if on {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }

    /// Merge another frame's flags into this one.
    #[inline]
    pub fn merge(&mut self, other: InputFrame) {
        self.flags |= other.flags;
    }

    /// Apply this frame to a player position.
    ///
    /// Order: nudges, then reset, then jump. Reset wins over nudges in the
    /// same tick; jump lifts whatever position results.
    pub fn apply_to(&self, position: [f32; 3], config: &PlayerConfig) -> [f32; 3] {
        let mut next = position;

        if self.nudge_left() {
            next[0] -= config.nudge_step;
        }
        if self.nudge_right() {
            next[0] += config.nudge_step;
        }
        if self.reset_pressed() {
            next = config.spawn;
        }
        if self.jump_pressed() {
            next[1] = config.jump_height;
        }

        next
    }
}

/// Recorded input stream, one frame per tick.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecording {
    /// RNG seed of the recorded run
    pub seed: u64,
    /// Frames in tick order
    pub frames: Vec<InputFrame>,
}

impl InputRecording {
    /// Start an empty recording for a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            frames: Vec::new(),
        }
    }

    /// Append the frame for the next tick.
    pub fn push(&mut self, frame: InputFrame) {
        self.frames.push(frame);
    }

    /// Frame for a tick index; idle past the end.
    pub fn get(&self, tick: usize) -> InputFrame {
        self.frames.get(tick).copied().unwrap_or_default()
    }

    /// Number of recorded ticks.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_frame_flags() {
        let mut input = InputFrame::new();
        assert!(input.is_idle());

        input.set(InputFrame::FLAG_JUMP, true);
        assert!(input.jump_pressed());
        assert!(!input.nudge_left());

        input.set(InputFrame::FLAG_JUMP, false);
        assert!(input.is_idle());
    }

    #[test]
    fn test_merge_keeps_edges() {
        let mut pending = InputFrame::from_flags(InputFrame::FLAG_NUDGE_RIGHT);
        pending.merge(InputFrame::from_flags(InputFrame::FLAG_RESET));

        assert!(pending.nudge_right());
        assert!(pending.reset_pressed());
    }

    #[test]
    fn test_apply_nudges() {
        let config = PlayerConfig::default();

        let right = InputFrame::from_flags(InputFrame::FLAG_NUDGE_RIGHT)
            .apply_to([0.0, -0.25, 0.0], &config);
        assert_eq!(right, [config.nudge_step, -0.25, 0.0]);

        let left = InputFrame::from_flags(InputFrame::FLAG_NUDGE_LEFT)
            .apply_to([0.0, -0.25, 0.0], &config);
        assert_eq!(left, [-config.nudge_step, -0.25, 0.0]);

        // Both held cancel out
        let config = PlayerConfig {
            nudge_step: 0.5,
            ..PlayerConfig::default()
        };
        let both = InputFrame::from_flags(
            InputFrame::FLAG_NUDGE_LEFT | InputFrame::FLAG_NUDGE_RIGHT,
        )
        .apply_to([1.0, 0.0, 0.0], &config);
        assert_eq!(both, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_apply_reset_and_jump() {
        let config = PlayerConfig::default();

        let reset = InputFrame::from_flags(InputFrame::FLAG_RESET | InputFrame::FLAG_NUDGE_LEFT)
            .apply_to([3.0, 1.0, 2.0], &config);
        assert_eq!(reset, config.spawn);

        let jump = InputFrame::from_flags(InputFrame::FLAG_JUMP).apply_to([1.5, -0.25, 0.0], &config);
        assert_eq!(jump, [1.5, config.jump_height, 0.0]);
    }

    #[test]
    fn test_recording_pads_with_idle() {
        let mut recording = InputRecording::new(42);
        recording.push(InputFrame::from_flags(InputFrame::FLAG_JUMP));

        assert_eq!(recording.len(), 1);
        assert!(recording.get(0).jump_pressed());
        assert!(recording.get(10).is_idle());
    }
}
