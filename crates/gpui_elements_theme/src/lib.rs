//! Theme system for applying Zed-format theme files as root-level style
//! properties.
//!
//! A [`ThemeFile`] carries up to one light and one dark variant, each a flat
//! mapping of semantic style keys (`text.muted`, `surface.background`) to CSS
//! color strings. Applying a variant writes the mapping as `--`-prefixed
//! custom properties on a shared [`RootStyle`], which components read back
//! through [`ThemeStyleExt`]. The [`ThemeManager`] persists the user's
//! selection and appearance mode and keeps the applied properties in sync
//! with the OS light/dark preference.

mod schema;
pub use schema::*;

mod registry;
pub use registry::*;

mod storage;
pub use storage::*;

mod root_style;
pub use root_style::*;

mod preference;
pub use preference::*;

mod manager;
pub use manager::*;

mod color;
pub use color::parse_color;

mod ext;
pub use ext::*;
