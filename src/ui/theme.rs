use colored::{ColoredString, Colorize};
use ratatui::style::Color;

/// Semantic colour slots a renderer has to provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleSlot {
    PromptUser,
    PromptPath,
    Label,
    ValuePrimary,
    ValueTemperature,
    ValueBattery,
    RingsMove,
    RingsStand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: Rgb,
    pub prompt_user: Rgb,
    pub prompt_path: Rgb,
    pub label: Rgb,
    pub value_primary: Rgb,
    pub value_temperature: Rgb,
    pub value_battery: Rgb,
    pub rings_move: Rgb,
    pub rings_stand: Rgb,
}

impl Theme {
    /// Dracula palette on a black background
    pub fn dracula() -> Self {
        Self {
            background: Rgb(0, 0, 0),
            prompt_user: Rgb(80, 250, 123),
            prompt_path: Rgb(139, 233, 253),
            label: Rgb(139, 233, 253),
            value_primary: Rgb(248, 248, 242),
            value_temperature: Rgb(255, 184, 108),
            value_battery: Rgb(255, 121, 198),
            rings_move: Rgb(255, 85, 85),
            rings_stand: Rgb(139, 233, 253),
        }
    }

    pub fn color(&self, slot: StyleSlot) -> Rgb {
        match slot {
            StyleSlot::PromptUser => self.prompt_user,
            StyleSlot::PromptPath => self.prompt_path,
            StyleSlot::Label => self.label,
            StyleSlot::ValuePrimary => self.value_primary,
            StyleSlot::ValueTemperature => self.value_temperature,
            StyleSlot::ValueBattery => self.value_battery,
            StyleSlot::RingsMove => self.rings_move,
            StyleSlot::RingsStand => self.rings_stand,
        }
    }

    /// Paint `text` for a plain (non full-screen) terminal
    pub fn paint(&self, text: &str, slot: StyleSlot) -> ColoredString {
        let Rgb(r, g, b) = self.color(slot);
        text.truecolor(r, g, b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dracula()
    }
}
