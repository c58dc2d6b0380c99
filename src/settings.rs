//! Player preferences
//!
//! Owned by the host and injected at session creation; written back through
//! the persistence layer on teardown.

/// Text size modifier presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextSize {
    Small,
    #[default]
    Normal,
    Large,
}

impl TextSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextSize::Small => "Small",
            TextSize::Normal => "Normal",
            TextSize::Large => "Large",
        }
    }

    /// Multiplier applied to every base text size
    pub fn modifier(&self) -> f32 {
        match self {
            TextSize::Small => 0.8,
            TextSize::Normal => 1.0,
            TextSize::Large => 1.2,
        }
    }

    /// Preset whose modifier matches `value`
    pub fn from_modifier(value: f32) -> Option<Self> {
        [TextSize::Small, TextSize::Normal, TextSize::Large]
            .into_iter()
            .find(|t| (t.modifier() - value).abs() < PRESET_EPSILON)
    }

    /// Normal -> Large -> Small -> Normal
    pub fn cycle(&self) -> Self {
        match self {
            TextSize::Normal => TextSize::Large,
            TextSize::Large => TextSize::Small,
            TextSize::Small => TextSize::Normal,
        }
    }
}

/// Game element scale presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleFactor {
    Small,
    #[default]
    Normal,
    Large,
}

impl ScaleFactor {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScaleFactor::Small => "Small",
            ScaleFactor::Normal => "Normal",
            ScaleFactor::Large => "Large",
        }
    }

    pub fn factor(&self) -> f32 {
        match self {
            ScaleFactor::Small => 0.5,
            ScaleFactor::Normal => 0.7,
            ScaleFactor::Large => 0.9,
        }
    }

    pub fn from_factor(value: f32) -> Option<Self> {
        [ScaleFactor::Small, ScaleFactor::Normal, ScaleFactor::Large]
            .into_iter()
            .find(|s| (s.factor() - value).abs() < PRESET_EPSILON)
    }

    /// Normal -> Large -> Small -> Normal
    pub fn cycle(&self) -> Self {
        match self {
            ScaleFactor::Normal => ScaleFactor::Large,
            ScaleFactor::Large => ScaleFactor::Small,
            ScaleFactor::Small => ScaleFactor::Normal,
        }
    }
}

const PRESET_EPSILON: f32 = 1e-3;

/// A single settings-page action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingToggle {
    Vibration,
    DarkMode,
    TextSize,
    Scale,
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub dark_mode: bool,
    pub text_size: TextSize,
    pub scale: ScaleFactor,
    pub vibration: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            text_size: TextSize::Normal,
            scale: ScaleFactor::Normal,
            vibration: true,
        }
    }
}

impl Settings {
    /// Apply a toggle; returns true when it should be confirmed with a pulse
    pub fn apply(&mut self, toggle: SettingToggle) -> bool {
        match toggle {
            SettingToggle::Vibration => self.vibration = !self.vibration,
            SettingToggle::DarkMode => self.dark_mode = !self.dark_mode,
            SettingToggle::TextSize => self.text_size = self.text_size.cycle(),
            SettingToggle::Scale => self.scale = self.scale.cycle(),
        }
        self.vibration
    }
}
