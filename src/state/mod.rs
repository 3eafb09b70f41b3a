//! State module for tracking harvest progress
//!
//! # Components
//!
//! - `ItemState`: Tracks the state of one target page (pending, fetching, saved, etc.)
//! - `CrawlProgress`: Success/failure tally for a whole run

mod item_state;
mod progress;

// Re-export main types
pub use item_state::ItemState;
pub use progress::CrawlProgress;
