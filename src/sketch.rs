//! Click-drag bounding box sketching.
//!
//! ```text
//! Disabled --arm--> Armed --pointer_down--> Dragging --pointer_up--> Armed
//!                     ^                        |
//!                     +------cancel_drag-------+
//! ```
//!
//! Pointer positions are in image space; hosts convert surface positions
//! with [`Viewport::to_image`] first. A committed box keeps the label that
//! was armed when the drag started. Changing the label mid-drag is rejected.

use segview_draw::{DrawItem, ItemRole, Primitive, Stroke};
use thiserror::Error;

use crate::constants::decoration;
use crate::model::{BoundingBox, Point};
use crate::palette::LabelColors;
use crate::path_builder::bbox_to_rect;
use crate::viewport::Viewport;

/// Rejected sketch transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SketchError {
    #[error("Cannot change the label while a box is being dragged")]
    DragInProgress,

    #[error("Box sketching is disabled")]
    Disabled,

    #[error("Sketch label must not be empty")]
    EmptyLabel,
}

/// Session state.
#[derive(Debug, Clone, PartialEq)]
pub enum SketchState {
    Disabled,
    Armed { label: String },
    Dragging {
        label: String,
        anchor: Point,
        current: Point,
    },
}

/// A committed box.
#[derive(Debug, Clone, PartialEq)]
pub struct SketchBox {
    /// Session-local id, unique within the session
    pub id: u64,
    pub label: String,
    /// Image-space box, always normalized
    pub bbox: BoundingBox,
}

/// Accumulates user-drawn boxes tagged with the armed label.
#[derive(Debug, Clone)]
pub struct BoxSketchSession {
    state: SketchState,
    boxes: Vec<SketchBox>,
    next_id: u64,
}

impl Default for BoxSketchSession {
    fn default() -> Self {
        Self {
            state: SketchState::Disabled,
            boxes: Vec::new(),
            next_id: 1,
        }
    }
}

impl BoxSketchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SketchState {
        &self.state
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.state, SketchState::Disabled)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SketchState::Dragging { .. })
    }

    /// The armed label, if any.
    pub fn label(&self) -> Option<&str> {
        match &self.state {
            SketchState::Disabled => None,
            SketchState::Armed { label } | SketchState::Dragging { label, .. } => Some(label),
        }
    }

    /// Enable sketching with `label`, or switch the armed label.
    pub fn arm(&mut self, label: impl Into<String>) -> Result<(), SketchError> {
        let label = label.into();
        if label.trim().is_empty() {
            log::warn!("Rejected empty sketch label");
            return Err(SketchError::EmptyLabel);
        }
        if self.is_dragging() {
            log::warn!("Rejected label switch to '{}' during a drag", label);
            return Err(SketchError::DragInProgress);
        }
        log::debug!("Sketch armed with label '{}'", label);
        self.state = SketchState::Armed { label };
        Ok(())
    }

    /// Disable sketching. Drops any drag in progress and all committed boxes.
    pub fn disarm(&mut self) {
        self.state = SketchState::Disabled;
        self.boxes.clear();
    }

    /// Start a drag at `point`.
    pub fn pointer_down(&mut self, point: Point) -> Result<(), SketchError> {
        match &self.state {
            SketchState::Disabled => {
                log::warn!("Ignoring pointer down while sketching is disabled");
                Err(SketchError::Disabled)
            }
            SketchState::Dragging { .. } => {
                log::warn!("Ignoring pointer down during a drag");
                Err(SketchError::DragInProgress)
            }
            SketchState::Armed { label } => {
                self.state = SketchState::Dragging {
                    label: label.clone(),
                    anchor: point,
                    current: point,
                };
                Ok(())
            }
        }
    }

    /// Track the pointer during a drag. No-op otherwise.
    pub fn pointer_move(&mut self, point: Point) {
        if let SketchState::Dragging { current, .. } = &mut self.state {
            *current = point;
        }
    }

    /// Finish the drag at `point`.
    ///
    /// Returns the committed box, or `None` if no drag was active or the box
    /// has zero width or height.
    pub fn pointer_up(&mut self, point: Point) -> Option<&SketchBox> {
        let SketchState::Dragging { label, anchor, .. } = &self.state else {
            return None;
        };
        let bbox = BoundingBox::from_corners(*anchor, point);
        let label = label.clone();
        self.state = SketchState::Armed {
            label: label.clone(),
        };

        if bbox.width <= 0.0 || bbox.height <= 0.0 {
            log::debug!("Discarding zero-area sketch box at ({}, {})", bbox.x, bbox.y);
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        log::debug!("Committed sketch box {} '{}': {:?}", id, label, bbox);
        self.boxes.push(SketchBox { id, label, bbox });
        self.boxes.last()
    }

    /// Abandon the drag in progress, keeping the label armed.
    pub fn cancel_drag(&mut self) {
        if let SketchState::Dragging { label, .. } = &self.state {
            self.state = SketchState::Armed {
                label: label.clone(),
            };
        }
    }

    /// The rectangle being dragged, normalized.
    pub fn live_box(&self) -> Option<BoundingBox> {
        match &self.state {
            SketchState::Dragging {
                anchor, current, ..
            } => Some(BoundingBox::from_corners(*anchor, *current)),
            _ => None,
        }
    }

    /// Remove and return the most recent box.
    pub fn undo(&mut self) -> Option<SketchBox> {
        self.boxes.pop()
    }

    pub fn clear(&mut self) {
        self.boxes.clear();
    }

    /// Committed boxes in commit order.
    pub fn boxes(&self) -> &[SketchBox] {
        &self.boxes
    }

    /// Draw items for committed boxes followed by the live box.
    pub fn render(&self, viewport: &Viewport, colors: &LabelColors) -> Vec<DrawItem> {
        let mut items: Vec<DrawItem> = self
            .boxes
            .iter()
            .map(|sketch| {
                let rect = bbox_to_rect(&sketch.bbox, viewport);
                DrawItem::new(ItemRole::Sketch, Primitive::Rect(rect))
                    .key(sketch.id)
                    .stroke(Stroke::new(
                        colors.color(&sketch.label),
                        1.0,
                        decoration::SKETCH_STROKE_WIDTH,
                    ))
            })
            .collect();

        if let (Some(live), Some(label)) = (self.live_box(), self.label()) {
            let (dash, gap) = decoration::BOX_DASH;
            let rect = bbox_to_rect(&live, viewport);
            items.push(
                DrawItem::new(ItemRole::Sketch, Primitive::Rect(rect)).stroke(
                    Stroke::new(colors.color(label), 1.0, decoration::SKETCH_STROKE_WIDTH)
                        .dashed(dash, gap),
                ),
            );
        }
        items
    }
}
