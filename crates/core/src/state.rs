//! Interaction state carried across pointer events. Transitions take the state by value
//! and return the next one.

use crate::point::PointIndex;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mouse {
    #[default]
    Idle,
    Hovering,
    Dragging,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerCursorState {
    pub mouse: Mouse,
    pub point_index: PointIndex,
    /// Whether the current drag moves every point of the visible entries together.
    pub locked_drag: bool,
}

impl MarkerCursorState {
    pub fn using_start_point(&self) -> bool {
        self.point_index == PointIndex::Start
    }

    pub fn using_end_point(&self) -> bool {
        self.point_index == PointIndex::End
    }

    pub fn is_dragging(&self) -> bool {
        self.mouse == Mouse::Dragging
    }

    pub fn move_to_nothing(self) -> Self {
        Self {
            mouse: Mouse::Idle,
            point_index: PointIndex::None,
            locked_drag: false,
        }
    }

    /// Hover updates are ignored while a drag is in progress.
    pub fn move_to_hover(self, point_index: PointIndex) -> Self {
        if self.is_dragging() {
            return self;
        }
        Self {
            mouse: Mouse::Hovering,
            point_index,
            locked_drag: false,
        }
    }

    /// Only a hovered point can be dragged.
    pub fn start_dragging(self, locked_drag: bool) -> Self {
        if self.mouse != Mouse::Hovering || self.point_index.is_none() {
            return self;
        }
        Self {
            mouse: Mouse::Dragging,
            locked_drag,
            ..self
        }
    }

    pub fn finish_dragging(self) -> Self {
        if !self.is_dragging() {
            return self;
        }
        Self {
            mouse: Mouse::Hovering,
            locked_drag: false,
            ..self
        }
    }
}

/// State of the cut tool. `position` is the candidate cut in canvas pixels, set only
/// while it is a valid cut position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarkerScissorsState {
    pub position: Option<f64>,
    /// Set while the modifier that suppresses cutting is held.
    pub disabled: bool,
}

impl MarkerScissorsState {
    pub fn with_position(self, position: Option<f64>) -> Self {
        Self { position, ..self }
    }

    pub fn with_disabled(self, disabled: bool) -> Self {
        Self { disabled, ..self }
    }

    /// The position a release would cut at, if any.
    pub fn active_position(&self) -> Option<f64> {
        if self.disabled { None } else { self.position }
    }
}
