//! State module for tracking scrape progress
//!
//! - `PageState`: the final outcome of each scheduled page
mod page_state;

pub use page_state::PageState;
