//! Application State
//!
//! Shared state accessible by all handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::dashboard::{ChartStyle, Dashboard};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Dashboard holding the loaded series
    pub dashboard: Arc<Dashboard>,
    /// Chart colours and size
    pub style: Arc<ChartStyle>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(dashboard: Arc<Dashboard>, style: ChartStyle) -> Self {
        Self {
            dashboard,
            style: Arc::new(style),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
