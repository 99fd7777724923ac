use crate::foundation::core::Point;
use crate::typewriter::sequencer::TypewriterState;

/// Document metadata for the host page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PageMetadata {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub const METADATA: PageMetadata = PageMetadata {
    title: "DOOFIO",
    description: "Your gateway to an epic digital experience",
    icon: "/doofio.png",
};

pub const BRAND: &str = "DOOFIO";
pub const TAGLINE: [&str; 2] = [
    "Your gateway to an epic digital experience.",
    "Ready to explore what's inside?",
];
pub const STATUS_LINE: &str = "System Online \u{2022} Ready to Connect";

/// Half the size of the cosmic dust cloud that trails the pointer.
pub const DUST_RADIUS: f64 = 192.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Plain,
    GradientPurpleBlueGreen,
    GradientGreenBluePurple,
}

impl LineStyle {
    pub fn for_line(index: usize) -> Self {
        match index {
            1 => Self::GradientPurpleBlueGreen,
            2 => Self::GradientGreenBluePurple,
            _ => Self::Plain,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ViewLine {
    pub text: String,
    pub style: LineStyle,
    /// Blinking caret after the text.
    pub cursor: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavAction {
    EnterSite,
    LearnMore,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonVariant {
    Primary,
    Outline,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ActionButton {
    pub label: &'static str,
    pub variant: ButtonVariant,
    pub action: NavAction,
}

pub const ACTIONS: [ActionButton; 2] = [
    ActionButton {
        label: "Enter Site",
        variant: ButtonVariant::Primary,
        action: NavAction::EnterSite,
    },
    ActionButton {
        label: "Learn More",
        variant: ButtonVariant::Outline,
        action: NavAction::LearnMore,
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SoundToggle {
    pub enabled: bool,
    /// What clicking the toggle will do.
    pub tooltip: &'static str,
}

impl SoundToggle {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            tooltip: if enabled { "Mute sounds" } else { "Enable sounds" },
        }
    }
}

/// Declarative snapshot of everything the page shows besides the starfield.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct WelcomeView {
    pub metadata: PageMetadata,
    pub brand: &'static str,
    /// Main content faded in.
    pub loaded: bool,
    pub lines: Vec<ViewLine>,
    pub tagline: [&'static str; 2],
    pub actions: [ActionButton; 2],
    pub status: &'static str,
    /// Tagline, actions and status line share the buttons' visibility.
    pub actions_visible: bool,
    pub sound: SoundToggle,
    /// Top-left corner of the dust cloud, centered on the pointer.
    pub dust_origin: Point,
}

/// Split the revealed text into styled lines, with the caret on the last line while it is the
/// current one.
pub fn render_lines(state: &TypewriterState) -> Vec<ViewLine> {
    let parts: Vec<&str> = state.revealed_text.split('\n').collect();
    let last = parts.len() - 1;
    parts
        .into_iter()
        .enumerate()
        .map(|(i, text)| ViewLine {
            text: text.to_owned(),
            style: LineStyle::for_line(i),
            cursor: i == state.current_line_index && i == last,
        })
        .collect()
}

pub fn render_view(
    state: &TypewriterState,
    loaded: bool,
    sound_enabled: bool,
    pointer: Point,
) -> WelcomeView {
    WelcomeView {
        metadata: METADATA,
        brand: BRAND,
        loaded,
        lines: render_lines(state),
        tagline: TAGLINE,
        actions: ACTIONS,
        status: STATUS_LINE,
        actions_visible: state.buttons_visible,
        sound: SoundToggle::new(sound_enabled),
        dust_origin: Point::new(pointer.x - DUST_RADIUS, pointer.y - DUST_RADIUS),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/view.rs"]
mod tests;
