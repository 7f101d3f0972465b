//! Configuration for a circuit editing session
//!
//! This module provides the tunables that shape wiring legality, position
//! repair and the allowed view range.

/// Default minimum position change before a cached wire endpoint is replaced
pub const DEFAULT_REPAIR_EPSILON: f64 = 0.5;

/// Configuration for the wiring engine and view
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitConfig {
    /// Reconciliation leaves a cached endpoint alone when it moved by less
    /// than this distance (in view space)
    pub repair_epsilon: f64,
    /// Whether a component's own output may drive one of its own inputs
    pub allow_feedback_loops: bool,
    /// Smallest zoom factor the view accepts
    pub min_zoom: f64,
    /// Largest zoom factor the view accepts
    pub max_zoom: f64,
}

impl CircuitConfig {
    /// Create a configuration with default values
    ///
    /// Defaults: epsilon 0.5, feedback loops allowed, zoom range 0.1..=5.0
    pub fn new() -> Self {
        Self {
            repair_epsilon: DEFAULT_REPAIR_EPSILON,
            allow_feedback_loops: true,
            min_zoom: 0.1,
            max_zoom: 5.0,
        }
    }

    /// Set the repair epsilon
    ///
    /// # Arguments
    /// * `epsilon` - Distance below which endpoints are not rewritten; negative values are clamped to 0
    pub fn with_repair_epsilon(mut self, epsilon: f64) -> Self {
        self.repair_epsilon = epsilon.max(0.0);
        self
    }

    /// Allow or forbid wiring a component back into itself
    pub fn with_feedback_loops(mut self, allow: bool) -> Self {
        self.allow_feedback_loops = allow;
        self
    }

    /// Set the accepted zoom range
    ///
    /// # Note
    /// The bounds are swapped if given in the wrong order
    pub fn with_zoom_range(mut self, min: f64, max: f64) -> Self {
        self.min_zoom = min.min(max);
        self.max_zoom = max.max(min);
        self
    }

    /// Clamp a requested zoom into the configured range
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self::new()
    }
}
