use crate::core::math::Vec2;
use crate::domain::options::ModesOptions;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerStatus {
    Moving,
    #[default]
    Left,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub position: Option<Vec2>,
    pub status: PointerStatus,
    pub click_position: Option<Vec2>,
}

impl PointerState {
    /// Pointer position while it is over the canvas.
    pub fn hover_position(&self) -> Option<Vec2> {
        match self.status {
            PointerStatus::Moving => self.position,
            PointerStatus::Left => None,
        }
    }
}

/// Click bubble timer. `elapsed` is in seconds since the click.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClickBubble {
    pub clicking: bool,
    pub elapsed: f32,
    pub duration_end: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RepulsePhase {
    #[default]
    Idle,
    Active,
    /// Lasts one frame: every particle restores its initial velocity.
    Releasing,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClickRepulse {
    pub phase: RepulsePhase,
    pub elapsed: f32,
}

/// Pointer state plus the timers of click-driven effects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractivityState {
    pub pointer: PointerState,
    pub bubble: ClickBubble,
    pub repulse: ClickRepulse,
}

impl InteractivityState {
    pub fn pointer_move(&mut self, position: Vec2) {
        self.pointer.position = Some(position);
        self.pointer.status = PointerStatus::Moving;
    }

    pub fn pointer_leave(&mut self) {
        self.pointer.position = None;
        self.pointer.status = PointerStatus::Left;
    }

    pub fn click(&mut self, position: Vec2) {
        self.pointer.click_position = Some(position);
    }

    pub fn start_bubble(&mut self) {
        self.bubble = ClickBubble { clicking: true, elapsed: 0.0, duration_end: false };
    }

    pub fn start_repulse(&mut self) {
        self.repulse = ClickRepulse { phase: RepulsePhase::Active, elapsed: 0.0 };
    }

    /// Advances click timers by one frame.
    pub fn advance(&mut self, seconds: f32, modes: &ModesOptions) {
        if self.bubble.clicking {
            self.bubble.elapsed += seconds;
            let duration = modes.bubble.duration;
            if self.bubble.elapsed > duration * 2.0 {
                self.bubble = ClickBubble::default();
            } else if self.bubble.elapsed > duration {
                self.bubble.duration_end = true;
            }
        }

        match self.repulse.phase {
            RepulsePhase::Idle => {}
            RepulsePhase::Active => {
                self.repulse.elapsed += seconds;
                if self.repulse.elapsed > modes.repulse.duration {
                    self.repulse.phase = RepulsePhase::Releasing;
                }
            }
            RepulsePhase::Releasing => self.repulse = ClickRepulse::default(),
        }
    }
}
