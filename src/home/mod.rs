//! Home screen: favorites strip, search results grid and error screens.

pub mod action;
pub mod reducer;
pub mod state;
pub mod view_model;

pub use action::{Effect, HomeAction, SectionTap, Tap};
pub use reducer::reduce;
pub use state::{Column, DataSource, HomeErrorKind, HomeState, ListItem, SectionKind};
pub use view_model::HomeViewModel;
