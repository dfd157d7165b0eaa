//! Application module: exposes the view model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the playlist list, the
//! opened playlist, list selection and a mirror of the session state.

mod model;

pub use model::*;
