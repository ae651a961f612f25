//! Data model for the console grid.

mod element;
mod grid;
mod group;
mod scene;

pub use element::{Element, ElementId, ElementKind};
pub use grid::Grid;
pub use group::{Group, GroupIndex};
pub use scene::{ConsoleScene, SceneElement, SceneItem};
