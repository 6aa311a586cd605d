pub mod components;

pub mod page;

pub mod primitives;

pub mod settings;

pub mod store;

pub mod tokens;

mod utils;
pub use utils::{ElementIdExt, RgbaExt};

mod assets;
pub use assets::*;

mod init;
pub use init::*;

pub use gpui_elements_theme as theme;
