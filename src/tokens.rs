//! Semantic design tokens resolved from the applied theme's custom
//! properties.
//!
//! Each token names a style key from the theme file format and carries a
//! fallback used when no theme is applied or the value does not parse.

#![allow(missing_docs)] // Derive macros generate undocumented methods.

use enum_assoc::Assoc;
use gpui::{App, Pixels, Rgba, px};

use crate::theme::ThemeStyleExt;
use crate::utils::rgb_a;

/// Color tokens the components draw with.
#[derive(Assoc, Debug, Clone, Copy, PartialEq, Eq)]
#[func(pub fn key(&self) -> &'static str)]
#[func(pub fn fallback(&self) -> Rgba)]
pub enum TokenKind {
    /// Page background.
    #[assoc(key = "background")]
    #[assoc(fallback = rgb_a(0xffffff, 1.))]
    Background,

    /// Panel and section background.
    #[assoc(key = "surface.background")]
    #[assoc(fallback = rgb_a(0xf7f7f8, 1.))]
    SurfaceBackground,

    /// Dialog and dropdown background.
    #[assoc(key = "elevated_surface.background")]
    #[assoc(fallback = rgb_a(0xffffff, 1.))]
    ElevatedSurfaceBackground,

    /// Interactive element background.
    #[assoc(key = "element.background")]
    #[assoc(fallback = rgb_a(0xf0f0f1, 1.))]
    ElementBackground,

    /// Hover wash over interactive elements.
    #[assoc(key = "element.hover")]
    #[assoc(fallback = rgb_a(0x000000, 0.05))]
    ElementHover,

    #[assoc(key = "border")]
    #[assoc(fallback = rgb_a(0xd6d6da, 1.))]
    Border,

    /// Focus ring color.
    #[assoc(key = "border.focused")]
    #[assoc(fallback = rgb_a(0x0a60ff, 1.))]
    BorderFocused,

    /// Primary text.
    #[assoc(key = "text")]
    #[assoc(fallback = rgb_a(0x1d1d1f, 1.))]
    Text,

    /// Secondary text.
    #[assoc(key = "text.muted")]
    #[assoc(fallback = rgb_a(0x6e6e73, 1.))]
    TextMuted,

    #[assoc(key = "text.placeholder")]
    #[assoc(fallback = rgb_a(0xaeaeb2, 1.))]
    TextPlaceholder,

    #[assoc(key = "text.disabled")]
    #[assoc(fallback = rgb_a(0xc7c7cc, 1.))]
    TextDisabled,

    /// Accent used for links, active states and primary actions.
    #[assoc(key = "text.accent")]
    #[assoc(fallback = rgb_a(0x0a60ff, 1.))]
    TextAccent,

    #[assoc(key = "error")]
    #[assoc(fallback = rgb_a(0xd70015, 1.))]
    Error,

    #[assoc(key = "warning")]
    #[assoc(fallback = rgb_a(0xa05a00, 1.))]
    Warning,

    #[assoc(key = "success")]
    #[assoc(fallback = rgb_a(0x1d8031, 1.))]
    Success,

    #[assoc(key = "search.match_background")]
    #[assoc(fallback = rgb_a(0xfffc46, 0.2))]
    SearchMatchBackground,
}

impl TokenKind {
    /// Resolves this token against the applied theme, falling back when the
    /// property is absent or unparseable.
    pub fn resolve(&self, cx: &App) -> Rgba {
        cx.theme_color_or(self.key(), self.fallback())
    }
}

/// Base body text size; window rem size is set from this.
pub fn base_text_size() -> Pixels {
    px(15.)
}

/// Spacing scale. The web implementation derives these from viewport-fluid
/// steps; fixed pixel steps are close enough for a desktop window.
pub mod spacing {
    use gpui::{Pixels, px};

    pub fn xs() -> Pixels {
        px(6.)
    }

    pub fn s() -> Pixels {
        px(10.)
    }

    pub fn m() -> Pixels {
        px(16.)
    }

    pub fn l() -> Pixels {
        px(24.)
    }

    pub fn xl() -> Pixels {
        px(32.)
    }
}

/// Modular type scale, step -2 through step 5 around the 15px body size.
pub mod text_size {
    use gpui::{Pixels, px};

    pub fn step_minus2() -> Pixels {
        px(11.)
    }

    pub fn step_minus1() -> Pixels {
        px(13.)
    }

    pub fn step0() -> Pixels {
        px(15.)
    }

    pub fn step1() -> Pixels {
        px(17.)
    }

    pub fn step2() -> Pixels {
        px(22.)
    }

    pub fn step3() -> Pixels {
        px(28.)
    }

    pub fn step4() -> Pixels {
        px(34.)
    }

    pub fn step5() -> Pixels {
        px(42.)
    }
}
