//! Map module - state accident map rendering

mod plotter;
mod states;

pub use plotter::{map_state, sanitize_coordinates, MapError, MapOutcome};
pub use states::state_name;
