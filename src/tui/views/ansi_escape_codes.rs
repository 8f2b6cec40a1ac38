//! ANSI escape code constants for terminal styling
//!
//! Only the treatments the form and the response highlighter use live here.
//! Every styled token is wrapped as `<code>text{RESET}`.

// ============================================================================
// TEXT ATTRIBUTES
// ============================================================================

pub const RESET: &str = "\x1b[0m"; // Reset all attributes
pub const BOLD: &str = "\x1b[1m"; // Bold text
pub const DIM: &str = "\x1b[2m"; // Dimmed/faint text
pub const ITALIC: &str = "\x1b[3m"; // Italic text (not widely supported)
pub const UNDERLINE: &str = "\x1b[4m"; // Underlined text
pub const REVERSE: &str = "\x1b[7m"; // Reverse video (swap fg/bg)

// ============================================================================
// 256 COLOR MODE - FOREGROUND COLORS (38;5;n)
// ============================================================================

pub const FG_256_DEEP_SKY_BLUE_2: &str = "\x1b[38;5;39m";
pub const FG_256_AQUAMARINE: &str = "\x1b[38;5;85m";
pub const FG_256_ORANGE_BRIGHT: &str = "\x1b[38;5;214m";
pub const FG_256_ORCHID: &str = "\x1b[38;5;212m";
pub const FG_256_PINK: &str = "\x1b[38;5;205m";
pub const FG_256_GRAY_MEDIUM: &str = "\x1b[38;5;243m";
pub const FG_256_GRAY: &str = "\x1b[38;5;244m";

// ============================================================================
// NAMED TREATMENTS
// ============================================================================

/// A visual treatment applied to a token of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    codes: &'static [&'static str],
}

impl Style {
    pub const fn new(codes: &'static [&'static str]) -> Self {
        Self { codes }
    }

    /// Wrap `text` in this treatment, resetting attributes afterwards
    pub fn paint(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 16);
        for code in self.codes {
            out.push_str(code);
        }
        out.push_str(text);
        out.push_str(RESET);
        out
    }
}

pub const KEY_STYLE: Style = Style::new(&[FG_256_DEEP_SKY_BLUE_2]);
pub const STRING_STYLE: Style = Style::new(&[FG_256_AQUAMARINE]);
pub const NUMBER_STYLE: Style = Style::new(&[FG_256_ORANGE_BRIGHT]);
pub const BOOL_STYLE: Style = Style::new(&[FG_256_ORCHID]);
pub const NULL_STYLE: Style = Style::new(&[FG_256_GRAY_MEDIUM, ITALIC]);
pub const LABEL_STYLE: Style = Style::new(&[FG_256_PINK, BOLD]);
pub const TITLE_STYLE: Style = Style::new(&[FG_256_PINK, BOLD, UNDERLINE]);
pub const PLACEHOLDER_STYLE: Style = Style::new(&[FG_256_GRAY]);
pub const CURSOR_STYLE: Style = Style::new(&[REVERSE]);
pub const HELP_STYLE: Style = Style::new(&[ITALIC, DIM]);

/// Remove every escape sequence from `text`, leaving only visible characters
pub fn strip_styles(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_escape = false;

    for ch in text.chars() {
        if ch == '\x1b' {
            in_escape = true;
        } else if in_escape {
            if ch == 'm' {
                in_escape = false;
            }
        } else {
            out.push(ch);
        }
    }

    out
}
