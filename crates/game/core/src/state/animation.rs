use super::common::Facing;

/// Facing and walk-cycle position. Derived from movement; never feeds back
/// into collision.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationState {
    pub facing: Facing,
    pub frame: usize,
    pub timer: f32,
    pub moving: bool,
}

impl AnimationState {
    /// Advances the walk cycle by `dt`.
    ///
    /// While moving, the frame steps every `frame_delay` seconds modulo
    /// `frame_count`. A zero `frame_count` leaves the frame where it is.
    /// Stopping resets to frame 0.
    pub fn advance(&mut self, moving: bool, dt: f32, frame_delay: f32, frame_count: usize) {
        self.moving = moving;
        if !moving {
            self.frame = 0;
            self.timer = 0.0;
            return;
        }
        if frame_count == 0 {
            return;
        }

        self.timer += dt;
        if frame_delay <= 0.0 {
            self.frame = (self.frame + 1) % frame_count;
            self.timer = 0.0;
            return;
        }
        while self.timer >= frame_delay {
            self.timer -= frame_delay;
            self.frame = (self.frame + 1) % frame_count;
        }
        self.frame %= frame_count;
    }

    /// The left idle pose reuses the right one, flipped.
    pub fn mirrored(&self) -> bool {
        !self.moving && self.facing == Facing::Left
    }
}
