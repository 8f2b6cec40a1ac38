//! # Frame Layout
//!
//! Builds the full screen as a list of styled lines. Everything here is a
//! pure function of the model; the terminal renderer only copies the lines
//! onto the screen.

use super::ansi_escape_codes::{strip_styles, HELP_STYLE, LABEL_STYLE, RESET, TITLE_STYLE};
use crate::tui::formatter::ResponseFormatter;
use crate::tui::models::{Model, FIELD_LABELS};
use unicode_width::UnicodeWidthChar;

pub const TITLE: &str = "APITERM - API Client";
pub const HELP_TEXT: &str =
    "(ctrl+n: new request, tab/shift+tab or up/down to navigate, enter to send on Body, q to quit)";
pub const LOADING_TEXT: &str = "Response:\nLoading...";
pub const NO_RESPONSE_TEXT: &str = "Response: (no response yet)";
pub const RESPONSE_HEADING: &str = "Response:";

/// Width assumed until the terminal reports its size
pub const DEFAULT_VIEWPORT_WIDTH: usize = 80;
/// Narrowest the bordered panels may get
pub const MIN_PANEL_WIDTH: usize = 24;

const LABEL_WIDTH: usize = 12;
const PANEL_MARGIN: usize = 4;

/// Border glyphs: corners then edges
#[derive(Debug, Clone, Copy)]
struct Border {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
}

const NORMAL_BORDER: Border = Border {
    top_left: '┌',
    top_right: '┐',
    bottom_left: '└',
    bottom_right: '┘',
    horizontal: '─',
    vertical: '│',
};

const ROUNDED_BORDER: Border = Border {
    top_left: '╭',
    top_right: '╮',
    bottom_left: '╰',
    bottom_right: '╯',
    horizontal: '─',
    vertical: '│',
};

/// Which of the three response panel states to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponsePanel<'a> {
    Populated(&'a str),
    Loading,
    Empty,
}

impl<'a> ResponsePanel<'a> {
    /// A stored response wins over the loading flag
    pub fn select(model: &'a Model) -> Self {
        if !model.response().is_empty() {
            Self::Populated(model.response())
        } else if model.is_loading() {
            Self::Loading
        } else {
            Self::Empty
        }
    }
}

/// Terminal width, with the default when unknown
pub fn viewport_width(model: &Model) -> usize {
    match model.viewport().0 {
        0 => DEFAULT_VIEWPORT_WIDTH,
        width => width as usize,
    }
}

/// Outer width of the form and response panels
pub fn panel_width(viewport_width: usize) -> usize {
    viewport_width
        .saturating_sub(PANEL_MARGIN)
        .max(MIN_PANEL_WIDTH)
}

/// Render the whole screen
pub fn render_frame(model: &Model, formatter: &ResponseFormatter) -> Vec<String> {
    let width = viewport_width(model);
    let panel = panel_width(width);

    let mut lines = vec![center(&TITLE_STYLE.paint(TITLE), width), String::new()];
    lines.extend(draw_box(&form_rows(model, panel), panel, NORMAL_BORDER));
    lines.push(String::new());

    let response_text = match ResponsePanel::select(model) {
        ResponsePanel::Populated(response) => {
            format!(
                "{RESPONSE_HEADING}\n{}",
                formatter.format_response(&printable(response))
            )
        }
        ResponsePanel::Loading => LOADING_TEXT.to_string(),
        ResponsePanel::Empty => NO_RESPONSE_TEXT.to_string(),
    };
    let response_rows: Vec<String> = response_text
        .lines()
        .map(|line| line.replace('\t', "    "))
        .collect();
    lines.extend(draw_box(&response_rows, panel, ROUNDED_BORDER));

    lines.push(String::new());
    lines.extend(wrap(&HELP_STYLE.paint(HELP_TEXT), width));
    lines
}

/// Replace control characters from the server, other than line breaks and
/// tabs, so the body cannot move the cursor or restyle the screen
fn printable(text: &str) -> String {
    text.replace("\r\n", "\n")
        .chars()
        .map(|c| match c {
            '\n' | '\t' => c,
            c if c.is_control() => char::REPLACEMENT_CHARACTER,
            c => c,
        })
        .collect()
}

fn form_rows(model: &Model, panel: usize) -> Vec<String> {
    let field_room = content_width(panel).saturating_sub(LABEL_WIDTH + 2);
    let mut rows = Vec::new();
    for (index, (label, field)) in FIELD_LABELS.iter().zip(model.fields().iter()).enumerate() {
        if index > 0 {
            rows.push(String::new());
        }
        rows.push(format!(
            "{}: {}",
            LABEL_STYLE.paint(&format!("{:<width$}", label, width = LABEL_WIDTH)),
            field.view_within(field_room)
        ));
    }
    rows
}

/// Room for text inside a padded, bordered panel
fn content_width(panel: usize) -> usize {
    panel.saturating_sub(4).max(1)
}

fn draw_box(rows: &[String], panel: usize, border: Border) -> Vec<String> {
    let inner = panel.saturating_sub(2);
    let text_width = content_width(panel);
    let edge = border.horizontal.to_string().repeat(inner);
    let blank = format!("{}{}{}", border.vertical, " ".repeat(inner), border.vertical);

    let mut lines = vec![
        format!("{}{edge}{}", border.top_left, border.top_right),
        blank.clone(),
    ];
    for row in rows {
        for piece in wrap(row, text_width) {
            lines.push(format!(
                "{} {} {}",
                border.vertical,
                pad(&piece, text_width),
                border.vertical
            ));
        }
    }
    lines.push(blank);
    lines.push(format!("{}{edge}{}", border.bottom_left, border.bottom_right));
    lines
}

/// Visible width in terminal cells, ignoring escape sequences
pub fn visible_width(text: &str) -> usize {
    strip_styles(text)
        .chars()
        .map(|c| c.width().unwrap_or(0))
        .sum()
}

fn pad(text: &str, width: usize) -> String {
    let missing = width.saturating_sub(visible_width(text));
    format!("{text}{}", " ".repeat(missing))
}

fn center(text: &str, width: usize) -> String {
    let left = width.saturating_sub(visible_width(text)) / 2;
    format!("{}{text}", " ".repeat(left))
}

/// Split a styled line into pieces no wider than `width` cells.
///
/// Styles active at a break are closed at the end of the piece and reopened
/// at the start of the next one.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut used = 0;
    let mut active = String::new();
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            let mut seq = String::from(ch);
            for next in chars.by_ref() {
                seq.push(next);
                if next == 'm' {
                    break;
                }
            }
            if seq == RESET {
                active.clear();
            } else {
                active.push_str(&seq);
            }
            current.push_str(&seq);
            continue;
        }

        let w = ch.width().unwrap_or(0);
        if used + w > width && used > 0 {
            if !active.is_empty() {
                current.push_str(RESET);
            }
            pieces.push(std::mem::take(&mut current));
            current.push_str(&active);
            used = 0;
        }
        current.push(ch);
        used += w;
    }

    pieces.push(current);
    pieces
}

/// Cut a styled line to at most `width` visible cells
pub fn clip(text: &str, width: usize) -> String {
    let mut pieces = wrap(text, width).into_iter();
    let first = pieces.next().unwrap_or_default();
    if pieces.next().is_some() && !first.ends_with(RESET) {
        format!("{first}{RESET}")
    } else {
        first
    }
}
