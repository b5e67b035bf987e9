use crate::hover::LabelGeometry;
use crate::input::{Modifiers, PointerEvent, PointerEventKind, Tool, ZoomAction};
use crate::marker::MarkerState;
use crate::state::{MarkerCursorState, MarkerScissorsState, Mouse};
use crate::time::ResolutionRange;
use labeler_project::IndexedEntry;

/// Size of the entry name labels drawn along the canvas top, in density-independent pixels.
pub const NAME_LABEL_SIZE: (f64, f64) = (100.0, 20.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// What the session asks of the project store. Positions are in the time domain.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerRequest {
    /// Replace these entries with an in-progress edit.
    EditEntries(Vec<IndexedEntry>),
    /// Commit the edits made since the last submission.
    SubmitEntries,
    Cut { index: usize, position: f64 },
    Rename(usize),
    /// Play the sample between two frames.
    PlaySection { start_frame: f64, end_frame: f64 },
    SwitchEntry(Direction),
    SwitchSample(Direction),
    ChangeResolution(u32),
}

/// Owns the interaction state and turns pointer events into store requests.
///
/// The session never holds a projection. Every event is handled against the
/// `MarkerState` the host built from the current store contents.
pub struct MarkerSession {
    tool: Tool,
    cursor: MarkerCursorState,
    scissors: MarkerScissorsState,
    modifiers: Modifiers,
    resolution_range: ResolutionRange,
    label: LabelGeometry,
}

impl MarkerSession {
    pub fn new(resolution_range: ResolutionRange) -> Self {
        Self {
            tool: Tool::default(),
            cursor: MarkerCursorState::default(),
            scissors: MarkerScissorsState::default(),
            modifiers: Modifiers::default(),
            resolution_range,
            label: LabelGeometry::default(),
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn cursor(&self) -> MarkerCursorState {
        self.cursor
    }

    pub fn scissors(&self) -> MarkerScissorsState {
        self.scissors
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn resolution_range(&self) -> ResolutionRange {
        self.resolution_range
    }

    pub fn set_tool(&mut self, tool: Tool) {
        if tool == self.tool {
            return;
        }
        log::debug!("Switching tool to {tool:?}");
        self.tool = tool;
        self.cursor = MarkerCursorState::default();
        self.scissors = MarkerScissorsState::default().with_disabled(self.modifiers.primary);
    }

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
        self.scissors = self.scissors.with_disabled(modifiers.primary);
    }

    pub fn handle(&mut self, state: &MarkerState, event: PointerEvent) -> Vec<MarkerRequest> {
        match event.kind {
            PointerEventKind::Move => self.on_move(state, event),
            PointerEventKind::Press => {
                self.on_press(state);
                Vec::new()
            }
            PointerEventKind::Release => self.on_release(state, event),
            PointerEventKind::Scroll => self.on_scroll(state, event).into_iter().collect(),
        }
    }

    pub fn zoom(&self, state: &MarkerState, action: ZoomAction) -> Option<MarkerRequest> {
        let range = &self.resolution_range;
        let resolution = state.canvas.resolution;
        match action {
            ZoomAction::In if range.can_decrease(resolution) => {
                Some(MarkerRequest::ChangeResolution(range.decrease_from(resolution)))
            }
            ZoomAction::Out if range.can_increase(resolution) => {
                Some(MarkerRequest::ChangeResolution(range.increase_from(resolution)))
            }
            _ => None,
        }
    }

    /// Event position on the canvas, clamped to its extent.
    fn canvas_position(state: &MarkerState, event: &PointerEvent) -> (f64, f64) {
        let x = (event.x() + state.layout.screen_start)
            .max(0.0)
            .min(state.canvas.length_in_pixel());
        let y = event.y().max(0.0).min(state.layout.height.max(0.0));
        (x, y)
    }

    fn on_move(&mut self, state: &MarkerState, event: PointerEvent) -> Vec<MarkerRequest> {
        let (x, y) = Self::canvas_position(state, &event);
        match self.tool {
            Tool::Cursor => {
                if self.cursor.is_dragging() {
                    if !event.buttons.any_pressed() {
                        // The release was lost, so resolve the drag now
                        return self.finish_drag();
                    }
                    let dragged = state.drag(self.cursor.point_index, x, self.cursor.locked_drag);
                    if dragged == state.entries_in_pixel {
                        return Vec::new();
                    }
                    return vec![MarkerRequest::EditEntries(state.to_millis(&dragged))];
                }
                let point = state.point_index_for_hovering(x, y, &self.label);
                self.cursor = if point.is_none() {
                    self.cursor.move_to_nothing()
                } else {
                    self.cursor.move_to_hover(point)
                };
                Vec::new()
            }
            Tool::Scissors => {
                let position = state.is_valid_cut_position(x).then_some(x);
                self.scissors = self.scissors.with_position(position);
                Vec::new()
            }
        }
    }

    fn on_press(&mut self, state: &MarkerState) {
        if self.tool != Tool::Cursor || self.modifiers.primary || self.cursor.mouse != Mouse::Hovering {
            return;
        }
        let point = self.cursor.point_index;
        let locked = state.locks_by_default(point) ^ self.modifiers.shift;
        self.cursor = self.cursor.start_dragging(locked);
        log::debug!("Started dragging {point:?} (locked: {locked})");
    }

    fn finish_drag(&mut self) -> Vec<MarkerRequest> {
        if !self.cursor.is_dragging() {
            return Vec::new();
        }
        log::debug!("Finished dragging {:?}", self.cursor.point_index);
        self.cursor = self.cursor.finish_dragging();
        vec![MarkerRequest::SubmitEntries]
    }

    fn on_release(&mut self, state: &MarkerState, event: PointerEvent) -> Vec<MarkerRequest> {
        let (x, y) = Self::canvas_position(state, &event);

        if self.modifiers.primary {
            let mut requests = self.finish_drag();
            if let Some((start, end)) = state.clicked_audio_range(x) {
                let converter = &state.converter;
                requests.push(MarkerRequest::PlaySection {
                    start_frame: start.map_or(0.0, |px| converter.to_frame(px)),
                    end_frame: end.map_or(state.canvas.data_length as f64, |px| converter.to_frame(px)),
                });
            }
            return requests;
        }

        match self.tool {
            Tool::Cursor if self.cursor.is_dragging() => self.finish_drag(),
            Tool::Cursor => state
                .name_label_at(x, y, NAME_LABEL_SIZE)
                .map(MarkerRequest::Rename)
                .into_iter()
                .collect(),
            Tool::Scissors => {
                let Some(position) = self.scissors.active_position() else {
                    return Vec::new();
                };
                let Some(index) = state.entry_index_by_cut_position(position) else {
                    return Vec::new();
                };
                let millis = state.converter.to_millis_position(position);
                log::debug!("Requesting cut of entry {index} at {millis}ms");
                self.scissors = self.scissors.with_position(None);
                vec![MarkerRequest::Cut {
                    index,
                    position: millis,
                }]
            }
        }
    }

    fn on_scroll(&self, state: &MarkerState, event: PointerEvent) -> Option<MarkerRequest> {
        let (dx, dy) = event.scroll_delta;
        let switch = |direction| {
            if self.modifiers.primary {
                MarkerRequest::SwitchSample(direction)
            } else {
                MarkerRequest::SwitchEntry(direction)
            }
        };
        if dy > 0.0 {
            return Some(switch(Direction::Next));
        }
        if dy < 0.0 {
            return Some(switch(Direction::Previous));
        }
        if !self.modifiers.primary {
            return None;
        }
        if dx > 0.0 {
            self.zoom(state, ZoomAction::In)
        } else if dx < 0.0 {
            self.zoom(state, ZoomAction::Out)
        } else {
            None
        }
    }
}
