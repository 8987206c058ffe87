pub mod api;
pub mod cli;
pub mod compose;
pub mod renderers;

pub use compose::{Composer, render_order};
