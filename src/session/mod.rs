mod state;
mod viewer;


pub use state::Session;
pub use viewer::{BookmarkMode, PageWindow, DEFAULT_WINDOW_SIZE};
