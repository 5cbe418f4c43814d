//! Scenario tests across the overlay engine.
//!
//! Each test drives the public API the way a host would: parse records,
//! build a viewport, render, dispatch pointer events, and re-render.

mod record_tests;
mod render_tests;
