//! Callback abstraction for overlay event handlers
//!
//! Hosts register handlers that turn overlay events into their own message
//! type. Instead of writing `Option<Box<dyn Fn(T) -> M>>` at every event
//! site, the overlay stores a `Callback<T, M>`.
//!
//! # Examples
//!
//! ```
//! use segview_draw::Callback;
//!
//! enum Message {
//!     Hovered(Option<u64>),
//! }
//!
//! let on_hover: Callback<Option<u64>, Message> = Callback::new(Message::Hovered);
//! assert!(matches!(on_hover.call(Some(3)), Some(Message::Hovered(Some(3)))));
//! ```

use std::fmt;

/// A callback wrapper that encapsulates an optional event handler.
///
/// - `T`: the event payload
/// - `M`: the message type returned to the host
pub struct Callback<T, M> {
    f: Option<Box<dyn Fn(T) -> M>>,
}

impl<T, M> Callback<T, M> {
    /// Create a new callback from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) -> M + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// Create an empty callback (no handler).
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Call the callback with a value, if it exists.
    ///
    /// Returns `None` if no handler is registered.
    pub fn call(&self, value: T) -> Option<M> {
        self.f.as_ref().map(|f| f(value))
    }
}

impl<T, M> Default for Callback<T, M> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T, M> fmt::Debug for Callback<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.f.is_some())
            .finish()
    }
}
