use gpui::{App, Window};

use crate::components::toast;
use crate::primitives::input;
use crate::tokens;

pub fn init(cx: &mut App) {
    input::init(cx);
    toast::init(cx);
}

pub fn init_for_window(window: &mut Window, _cx: &mut App) {
    window.set_rem_size(tokens::base_text_size());
}
