pub mod cut;
pub mod drag;
pub mod hover;
pub mod input;
pub mod marker;
pub mod point;
pub mod projection;
pub mod session;
pub mod state;
pub mod time;

pub use cut::CUT_POINT_EPSILON;
pub use hover::{LabelGeometry, NEAR_RADIUS_CUSTOM, NEAR_RADIUS_START_OR_END, Rect};
pub use input::{
    Modifiers, Platform, PointerButtons, PointerEvent, PointerEventKind, RawModifiers, Tool,
    ZoomAction,
};
pub use marker::{CanvasLayout, MarkerState, Neighbors};
pub use point::PointIndex;
pub use projection::{EntryConverter, EntryInPixel, FieldPoint};
pub use session::{Direction, MarkerRequest, MarkerSession, NAME_LABEL_SIZE};
pub use state::{MarkerCursorState, MarkerScissorsState, Mouse};
pub use time::{CanvasParams, CoordinateTransform, DEFAULT_RESOLUTION, ResolutionRange};
