use hex_color::HexColor;
use log::warn;

use crate::canvas::{Canvas, Rect, CANVAS_WIDTH, GLYPH_HEIGHT};

/// Header shown above the time.
pub const TITLE: &str = "Dabynn's Pomodoro Timer";
const SUBTEXT: &str = "Tap a duration, then Start";

/// Most duration buttons that fit on a row.
pub const MAX_DURATION_BUTTONS: usize = 4;

const TIME_SCALE: usize = 4;
const BUTTON_RADIUS: usize = 2;
const BUTTON_HEIGHT: usize = 18;
const DURATION_WIDTH: usize = 40;
const DURATION_GAP: usize = 6;
const CONTROL_WIDTH: usize = 48;
const CONTROL_GAP: usize = 8;

const HEADER_Y: usize = 6;
const TIME_Y: usize = 18;
const SUBTEXT_Y: usize = 44;
const DURATION_Y: usize = 58;
const CONTROL_Y: usize = 86;

/// User requests forwarded to the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddMinutes(u32),
    Start,
    Stop,
    Clear,
}

/// Colors of the panel.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: HexColor,
    pub foreground: HexColor,
    pub label: HexColor,
    pub button: HexColor,
    pub button_hover: HexColor,
    pub stop: HexColor,
    pub stop_hover: HexColor,
    pub clear: HexColor,
    pub clear_hover: HexColor,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: HexColor::rgb(0xE6, 0xE0, 0xFF),
            foreground: HexColor::rgb(0x5B, 0x2A, 0x86),
            label: HexColor::WHITE,
            button: HexColor::rgb(0x5B, 0x2A, 0x86),
            button_hover: HexColor::rgb(0x6A, 0x3C, 0x9C),
            stop: HexColor::rgb(0x40, 0x23, 0x5F),
            stop_hover: HexColor::rgb(0x4C, 0x2D, 0x74),
            clear: HexColor::rgb(0x3A, 0x2B, 0x52),
            clear_hover: HexColor::rgb(0x4A, 0x3A, 0x67),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Button {
    pub label: String,
    pub action: Action,
    pub rect: Rect,
    fill: HexColor,
    hover_fill: HexColor,
}

/// The timer window contents: time label and buttons.
pub struct Panel {
    theme: Theme,
    buttons: Vec<Button>,
    /// Text of the time label.
    display: String,
    /// Index of the button under the cursor.
    hovered: Option<usize>,
    /// Set if anything visible changed since the last render.
    should_draw: bool,
}

impl Panel {
    /// Lay out the panel.
    ///
    /// # Arguments
    ///
    /// * `increments` - Minutes for each duration button. Only the first
    ///   [`MAX_DURATION_BUTTONS`] get a button.
    /// * `display` - Initial text of the time label.
    pub fn new(increments: &[u32], display: &str) -> Self {
        if increments.len() > MAX_DURATION_BUTTONS {
            warn!(
                "Only {} duration buttons fit, ignoring {:?}",
                MAX_DURATION_BUTTONS,
                &increments[MAX_DURATION_BUTTONS..]
            );
        }
        let increments = &increments[..increments.len().min(MAX_DURATION_BUTTONS)];

        let theme = Theme::default();
        let mut buttons = Vec::new();

        let slots = row(DURATION_Y, increments.len(), DURATION_WIDTH, DURATION_GAP);
        for (minutes, rect) in increments.iter().zip(slots) {
            buttons.push(Button {
                label: format!("+{} min", minutes),
                action: Action::AddMinutes(*minutes),
                rect,
                fill: theme.button,
                hover_fill: theme.button_hover,
            });
        }

        let controls = [
            ("Start", Action::Start, theme.button, theme.button_hover),
            ("Stop", Action::Stop, theme.stop, theme.stop_hover),
            ("Clear", Action::Clear, theme.clear, theme.clear_hover),
        ];
        let slots = row(CONTROL_Y, controls.len(), CONTROL_WIDTH, CONTROL_GAP);
        for ((label, action, fill, hover_fill), rect) in controls.into_iter().zip(slots) {
            buttons.push(Button {
                label: label.to_string(),
                action,
                rect,
                fill,
                hover_fill,
            });
        }

        Self {
            theme,
            buttons,
            display: display.to_string(),
            hovered: None,
            should_draw: true,
        }
    }

    #[cfg(test)]
    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    #[cfg(test)]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// If the panel wants to be rendered again.
    pub fn should_draw(&self) -> bool {
        self.should_draw
    }

    /// Replace the text of the time label.
    pub fn set_display(&mut self, display: &str) {
        if self.display != display {
            self.display = display.to_string();
            self.should_draw = true;
        }
    }

    /// Track the cursor for hover highlighting.
    ///
    /// # Arguments
    ///
    /// * `position` - Cursor position in canvas pixels, `None` if the cursor
    ///   is outside the canvas.
    pub fn hover(&mut self, position: Option<(usize, usize)>) {
        let hovered =
            position.and_then(|(x, y)| self.buttons.iter().position(|b| b.rect.contains(x, y)));

        if hovered != self.hovered {
            self.hovered = hovered;
            self.should_draw = true;
        }
    }

    /// The action of the button under the cursor.
    pub fn pressed(&self) -> Option<Action> {
        self.hovered.map(|i| self.buttons[i].action)
    }

    /// The action of the n-th duration button, counting from zero.
    pub fn duration_action(&self, index: usize) -> Option<Action> {
        self.buttons
            .iter()
            .filter(|b| matches!(b.action, Action::AddMinutes(_)))
            .nth(index)
            .map(|b| b.action)
    }

    /// Render the whole panel.
    ///
    /// Clears the [`Panel::should_draw`] flag.
    pub fn render(&mut self, canvas: &mut Canvas) {
        let theme = self.theme;
        canvas.fill(theme.background);

        let line = |y: usize, scale: usize| Rect::new(0, y, CANVAS_WIDTH, GLYPH_HEIGHT * scale);
        canvas.text_centered(line(HEADER_Y, 1), 1, TITLE, theme.foreground);
        canvas.text_centered(line(TIME_Y, TIME_SCALE), TIME_SCALE, &self.display, theme.foreground);
        canvas.text_centered(line(SUBTEXT_Y, 1), 1, SUBTEXT, theme.foreground);

        for (i, button) in self.buttons.iter().enumerate() {
            let fill = if self.hovered == Some(i) {
                button.hover_fill
            } else {
                button.fill
            };
            canvas.fill_rounded_rect(button.rect, BUTTON_RADIUS, fill);
            canvas.text_centered(button.rect, 1, &button.label, theme.label);
        }

        self.should_draw = false;
    }
}

/// Rectangles for `count` equally sized buttons centered on one row.
fn row(y: usize, count: usize, width: usize, gap: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }

    let total = count * width + (count - 1) * gap;
    let start = CANVAS_WIDTH.saturating_sub(total) / 2;
    (0..count)
        .map(|i| Rect::new(start + i * (width + gap), y, width, BUTTON_HEIGHT))
        .collect()
}
