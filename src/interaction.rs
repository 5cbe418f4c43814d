//! Pointer dispatch for a rendered overlay.
//!
//! Resolves surface-space pointer events to annotation ids through the draw
//! list's hit test and turns them into host messages via [`Callback`]s.
//! Click starts a transient press; hover changes are reported only when the
//! hovered id actually changes.

use segview_draw::{Callback, DrawList};
use web_time::{Duration, Instant};

use crate::model::{Annotation, AnnotationId, Point};
use crate::press::{PressTicket, PressTracker};
use crate::render::SelectionContext;

/// Event handlers and transient pointer state for one overlay.
///
/// - `M`: the host's message type
/// - `E`: the native pointer event passed through to the click handler
#[derive(Debug)]
pub struct OverlayInteraction<M, E = ()> {
    on_click: Callback<(AnnotationId, E), M>,
    on_hover: Callback<Option<AnnotationId>, M>,
    press: PressTracker,
    hovered: Option<AnnotationId>,
}

impl<M, E> Default for OverlayInteraction<M, E> {
    fn default() -> Self {
        Self {
            on_click: Callback::none(),
            on_hover: Callback::none(),
            press: PressTracker::default(),
            hovered: None,
        }
    }
}

impl<M, E> OverlayInteraction<M, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom press duration.
    pub fn with_press_duration(mut self, duration: Duration) -> Self {
        self.press = PressTracker::new(duration);
        self
    }

    pub fn on_click<F>(mut self, f: F) -> Self
    where
        F: Fn((AnnotationId, E)) -> M + 'static,
    {
        self.on_click = Callback::new(f);
        self
    }

    pub fn on_hover<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<AnnotationId>) -> M + 'static,
    {
        self.on_hover = Callback::new(f);
        self
    }

    /// Pointer pressed at a surface position.
    ///
    /// Hitting an annotation starts its press and reports the click. The
    /// host schedules [`Self::fire_press`] with [`Self::pending_press`].
    pub fn pointer_down(
        &mut self,
        list: &DrawList,
        position: Point,
        event: E,
        now: Instant,
    ) -> Option<M> {
        let id = list.hit_test(position.x, position.y)?;
        self.press.press(id, now);
        log::debug!("Annotation {} clicked", id);
        self.on_click.call((id, event))
    }

    /// Pointer moved to a surface position. Reports only hover changes.
    pub fn pointer_move(&mut self, list: &DrawList, position: Point) -> Option<M> {
        let hit = list.hit_test(position.x, position.y);
        self.set_hovered(hit)
    }

    /// Pointer left the overlay.
    pub fn pointer_leave(&mut self) -> Option<M> {
        self.set_hovered(None)
    }

    fn set_hovered(&mut self, id: Option<AnnotationId>) -> Option<M> {
        if id == self.hovered {
            return None;
        }
        self.hovered = id;
        self.on_hover.call(id)
    }

    pub fn hovered(&self) -> Option<AnnotationId> {
        self.hovered
    }

    /// The revert to schedule for the current press, if any.
    pub fn pending_press(&self) -> Option<PressTicket> {
        self.press.pending()
    }

    /// Deliver a scheduled press revert. Returns `true` if the press cleared
    /// and the host should re-render.
    pub fn fire_press(&mut self, ticket: PressTicket) -> bool {
        self.press.fire(ticket)
    }

    pub fn pressed_id(&self, now: Instant) -> Option<AnnotationId> {
        self.press.pressed_id(now)
    }

    /// Fill the transient press state into the host's selection.
    pub fn apply_press(&self, mut selection: SelectionContext, now: Instant) -> SelectionContext {
        selection.pressed = self.pressed_id(now);
        selection
    }

    /// The annotation set was replaced. Outstanding press reverts are
    /// invalidated and state for vanished annotations is dropped.
    pub fn annotations_changed(&mut self, annotations: &[Annotation]) {
        let present = |id: AnnotationId| annotations.iter().any(|a| a.id == id);
        self.press.invalidate(present);
        if self.hovered.is_some_and(|id| !present(id)) {
            self.hovered = None;
        }
    }

    /// Drop all transient state; called when the overlay goes away.
    pub fn teardown(&mut self) {
        self.press.cancel();
        self.hovered = None;
    }
}
