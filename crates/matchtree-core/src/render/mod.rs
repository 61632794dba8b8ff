//! Text rendering of diffs.

pub mod diff_render;

pub use diff_render::render_diff;
