//! Color palettes.
//!
//! Theme and backdrop only ever change colors. Every widget takes a
//! [`Palette`] and never looks at the [`Theme`] or [`Backdrop`] directly.

use corkboard_config::{Backdrop, Theme};
use corkboard_protocol::Priority;
use ratatui::style::{Color, Modifier, Style};

/// Warm brown used for the cork backdrop.
const CORK: Color = Color::Rgb(193, 154, 107);

/// Resolved colors for one theme and backdrop combination.
///
/// # Examples
///
/// ```
/// use corkboard_config::{Backdrop, Theme};
/// use corkboard_tui::theme::Palette;
/// use ratatui::style::Color;
///
/// let palette = Palette::new(Theme::Dark, Backdrop::Default);
/// assert_eq!(palette.accent, Color::Cyan);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Board background.
    pub background: Color,
    /// Primary text.
    pub text: Color,
    /// Secondary text, idle borders and placeholders.
    pub muted: Color,
    /// Focused column, selected card and header title.
    pub accent: Color,
    /// Column outline while it is the drag target.
    pub drop_target: Color,
    /// Modal and help overlay frame.
    pub overlay: Color,
}

impl Palette {
    /// Builds the palette for a theme and backdrop.
    #[must_use]
    pub const fn new(theme: Theme, backdrop: Backdrop) -> Self {
        let palette = match theme {
            Theme::Light => Self {
                background: Color::White,
                text: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                drop_target: Color::Magenta,
                overlay: Color::Blue,
            },
            Theme::Dark => Self {
                background: Color::Reset,
                text: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                drop_target: Color::LightMagenta,
                overlay: Color::LightYellow,
            },
        };
        match backdrop {
            Backdrop::Default => palette,
            Backdrop::Cork => Self {
                background: CORK,
                text: Color::Black,
                muted: Color::Rgb(90, 62, 36),
                ..palette
            },
        }
    }

    /// Style for the board background.
    #[must_use]
    pub fn base(&self) -> Style {
        Style::default().bg(self.background).fg(self.text)
    }

    /// Style for headings and focused titles.
    #[must_use]
    pub fn heading(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for placeholders and hints.
    #[must_use]
    pub fn hint(&self) -> Style {
        Style::default()
            .fg(self.muted)
            .add_modifier(Modifier::ITALIC)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(Theme::default(), Backdrop::default())
    }
}

/// Returns the card border color for a priority.
///
/// # Examples
///
/// ```
/// use corkboard_protocol::Priority;
/// use corkboard_tui::theme::priority_color;
/// use ratatui::style::Color;
///
/// assert_eq!(priority_color(Priority::High), Color::Red);
/// ```
#[must_use]
pub const fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => Color::Green,
        Priority::Medium => Color::Yellow,
        Priority::High => Color::Red,
    }
}

/// Returns a brighter version of the priority color for selected cards.
#[must_use]
pub const fn priority_color_bright(priority: Priority) -> Color {
    match priority {
        Priority::Low => Color::LightGreen,
        Priority::Medium => Color::LightYellow,
        Priority::High => Color::LightRed,
    }
}
