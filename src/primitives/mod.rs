pub use gpui_primitives::input;

mod focus_ring;
pub use focus_ring::*;
