//! Transient press emphasis with a cancellable revert.
//!
//! A press lasts a fixed duration. The host schedules the revert however it
//! schedules timers (a frame tick, a `setTimeout`, a tokio sleep) and hands
//! the [`PressTicket`] back when it fires. Every new press, cancel, or
//! invalidation bumps a generation counter, so a ticket that outlived its
//! press is ignored instead of clearing newer state.

use web_time::{Duration, Instant};

use crate::constants::PRESS_DURATION_MS;
use crate::model::AnnotationId;

/// Handle to a scheduled press revert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressTicket {
    pub id: AnnotationId,
    pub generation: u64,
    /// When the revert is due
    pub deadline: Instant,
}

#[derive(Debug, Clone, Copy)]
struct ActivePress {
    id: AnnotationId,
    generation: u64,
    deadline: Instant,
}

/// Tracks at most one pressed annotation.
#[derive(Debug, Clone)]
pub struct PressTracker {
    duration: Duration,
    generation: u64,
    active: Option<ActivePress>,
}

impl Default for PressTracker {
    fn default() -> Self {
        Self::new(Duration::from_millis(PRESS_DURATION_MS))
    }
}

impl PressTracker {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            generation: 0,
            active: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Current generation. Increases on every press, cancel, and invalidation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a press on `id`, superseding any press in flight.
    pub fn press(&mut self, id: AnnotationId, now: Instant) -> PressTicket {
        self.generation += 1;
        let deadline = now + self.duration;
        self.active = Some(ActivePress {
            id,
            generation: self.generation,
            deadline,
        });
        log::trace!("Press on annotation {} (generation {})", id, self.generation);
        PressTicket {
            id,
            generation: self.generation,
            deadline,
        }
    }

    /// Ticket for the press in flight, if any.
    pub fn pending(&self) -> Option<PressTicket> {
        self.active.map(|press| PressTicket {
            id: press.id,
            generation: press.generation,
            deadline: press.deadline,
        })
    }

    /// Pressed annotation at time `now`. Expired presses read as released
    /// even if their revert has not fired yet.
    pub fn pressed_id(&self, now: Instant) -> Option<AnnotationId> {
        self.active
            .filter(|press| now < press.deadline)
            .map(|press| press.id)
    }

    /// Deliver a scheduled revert. Returns `true` if it cleared the press;
    /// stale tickets are ignored.
    pub fn fire(&mut self, ticket: PressTicket) -> bool {
        match self.active {
            Some(press) if press.generation == ticket.generation && press.id == ticket.id => {
                self.active = None;
                true
            }
            _ => {
                log::trace!(
                    "Ignoring stale press revert for {} (generation {}, current {})",
                    ticket.id,
                    ticket.generation,
                    self.generation
                );
                false
            }
        }
    }

    /// Drop any press and invalidate outstanding tickets.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.active = None;
    }

    /// Invalidate outstanding tickets, e.g. when the annotation set changes.
    ///
    /// A press whose annotation is no longer present is dropped too.
    pub fn invalidate(&mut self, still_present: impl Fn(AnnotationId) -> bool) {
        self.generation += 1;
        match self.active {
            Some(press) if still_present(press.id) => {
                self.active = Some(ActivePress {
                    generation: self.generation,
                    ..press
                });
            }
            _ => self.active = None,
        }
    }
}
