mod button;
pub use button::*;

mod input;
pub use input::*;

mod switch;
pub use switch::*;

mod menu;
pub use menu::*;

pub mod toast;
pub use toast::{ToastVariant, Toasts, toast, toast_error};

mod editable_title;
pub use editable_title::*;

mod wizard;
pub use wizard::*;

mod about;
pub use about::*;
