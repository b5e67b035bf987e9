//! Pointer and keyboard input as the marker engine sees it.

/// Modifier keys exactly as reported by the windowing layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawModifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Other
        }
    }
}

/// Platform-independent modifiers. `primary` is Ctrl, or Command on macOS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub primary: bool,
    pub secondary: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn normalize(raw: RawModifiers, platform: Platform) -> Self {
        let (primary, secondary) = match platform {
            Platform::MacOs => (raw.meta, raw.ctrl),
            Platform::Other => (raw.ctrl, raw.meta),
        };
        Self {
            primary,
            secondary,
            shift: raw.shift,
            alt: raw.alt,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerButtons {
    pub primary: bool,
    pub secondary: bool,
    pub middle: bool,
}

impl PointerButtons {
    pub const NONE: Self = Self {
        primary: false,
        secondary: false,
        middle: false,
    };

    pub const PRIMARY: Self = Self {
        primary: true,
        secondary: false,
        middle: false,
    };

    pub fn any_pressed(&self) -> bool {
        self.primary || self.secondary || self.middle
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    Move,
    Press,
    Release,
    Scroll,
}

/// A pointer event in screen coordinates, relative to the visible part of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: (f64, f64),
    pub scroll_delta: (f64, f64),
    pub buttons: PointerButtons,
}

impl PointerEvent {
    pub fn moved(x: f64, y: f64, buttons: PointerButtons) -> Self {
        Self {
            kind: PointerEventKind::Move,
            position: (x, y),
            scroll_delta: (0.0, 0.0),
            buttons,
        }
    }

    pub fn pressed(x: f64, y: f64) -> Self {
        Self {
            kind: PointerEventKind::Press,
            position: (x, y),
            scroll_delta: (0.0, 0.0),
            buttons: PointerButtons::PRIMARY,
        }
    }

    pub fn released(x: f64, y: f64) -> Self {
        Self {
            kind: PointerEventKind::Release,
            position: (x, y),
            scroll_delta: (0.0, 0.0),
            buttons: PointerButtons::NONE,
        }
    }

    pub fn scrolled(dx: f64, dy: f64) -> Self {
        Self {
            kind: PointerEventKind::Scroll,
            position: (0.0, 0.0),
            scroll_delta: (dx, dy),
            buttons: PointerButtons::NONE,
        }
    }

    pub fn x(&self) -> f64 {
        self.position.0
    }

    pub fn y(&self) -> f64 {
        self.position.1
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tool {
    #[default]
    Cursor,
    Scissors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomAction {
    In,
    Out,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_is_primary_off_mac() {
        let raw = RawModifiers {
            ctrl: true,
            ..Default::default()
        };
        let modifiers = Modifiers::normalize(raw, Platform::Other);
        assert!(modifiers.primary);
        assert!(!modifiers.secondary);
    }

    #[test]
    fn test_command_is_primary_on_mac() {
        let raw = RawModifiers {
            meta: true,
            shift: true,
            ..Default::default()
        };
        let modifiers = Modifiers::normalize(raw, Platform::MacOs);
        assert!(modifiers.primary);
        assert!(modifiers.shift);

        let raw = RawModifiers {
            ctrl: true,
            ..Default::default()
        };
        let modifiers = Modifiers::normalize(raw, Platform::MacOs);
        assert!(!modifiers.primary);
        assert!(modifiers.secondary);
    }

    #[test]
    fn test_buttons() {
        assert!(!PointerButtons::NONE.any_pressed());
        assert!(PointerButtons::PRIMARY.any_pressed());
        assert!(PointerEvent::pressed(1.0, 2.0).buttons.any_pressed());
        assert_eq!(PointerEvent::released(1.0, 2.0).x(), 1.0);
    }
}
