use iced::widget::{button, container, text_input};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

pub const BOARD_BG: Color = Color::WHITE;
pub const BOARD_SURFACE: Color = Color::from_rgb(0.96, 0.97, 0.96);
pub const BOARD_TEXT: Color = Color::from_rgb(0.2, 0.2, 0.2);
pub const BOARD_SUBTEXT: Color = Color::from_rgb(0.5, 0.5, 0.5);
pub const LIGHT_GREY: Color = Color::from_rgb(0.827, 0.827, 0.827); // lightgrey
pub const SEA_GREEN: Color = Color::from_rgb(0.18, 0.545, 0.341); // seagreen
pub const SEA_GREEN_HOVER: Color = Color::from_rgb(0.14, 0.47, 0.29);
pub const WARNING: Color = Color::from_rgb(0.8, 0.45, 0.2);

pub struct ActiveNavStyle;
impl button::StyleSheet for ActiveNavStyle {
    type Style = Theme;
    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(Color::WHITE)),
            text_color: SEA_GREEN,
            border: Border {
                radius: 6.0.into(),
                ..Default::default()
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.05),
                offset: Vector::new(0.0, 1.0),
                blur_radius: 2.0,
            },
            ..Default::default()
        }
    }
    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        self.active(style)
    }
    fn pressed(&self, style: &Self::Style) -> button::Appearance {
        self.active(style)
    }
}

pub struct NavStyle;
impl button::StyleSheet for NavStyle {
    type Style = Theme;
    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: None,
            text_color: BOARD_SUBTEXT,
            ..Default::default()
        }
    }
    fn hovered(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.03))),
            text_color: BOARD_TEXT,
            border: Border {
                radius: 6.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
    fn pressed(&self, style: &Self::Style) -> button::Appearance {
        self.hovered(style)
    }
}

/// Flat, full-width announcement row
pub struct RowStyle;
impl button::StyleSheet for RowStyle {
    type Style = Theme;
    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(Color::WHITE)),
            text_color: BOARD_TEXT,
            border: Border {
                radius: 0.0.into(),
                width: 0.0,
                color: Color::TRANSPARENT,
            },
            ..Default::default()
        }
    }
    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(BOARD_SURFACE)),
            ..self.active(style)
        }
    }
    fn pressed(&self, style: &Self::Style) -> button::Appearance {
        self.hovered(style)
    }
}

pub struct PrimaryButtonStyle;
impl button::StyleSheet for PrimaryButtonStyle {
    type Style = Theme;
    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(SEA_GREEN)),
            text_color: Color::WHITE,
            border: Border {
                radius: 6.0.into(),
                ..Default::default()
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.1),
                offset: Vector::new(0.0, 2.0),
                blur_radius: 4.0,
            },
            ..Default::default()
        }
    }
    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(SEA_GREEN_HOVER)),
            ..self.active(style)
        }
    }
    fn pressed(&self, style: &Self::Style) -> button::Appearance {
        self.active(style)
    }
    fn disabled(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(LIGHT_GREY)),
            text_color: BOARD_SUBTEXT,
            border: Border {
                radius: 6.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Round "+" button
pub struct AddButtonStyle;
impl button::StyleSheet for AddButtonStyle {
    type Style = Theme;
    fn active(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            border: Border {
                radius: 24.0.into(),
                ..Default::default()
            },
            ..PrimaryButtonStyle.active(style)
        }
    }
    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            border: Border {
                radius: 24.0.into(),
                ..Default::default()
            },
            ..PrimaryButtonStyle.hovered(style)
        }
    }
}

pub struct SidebarStyle;
impl container::StyleSheet for SidebarStyle {
    type Style = Theme;
    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(BOARD_SURFACE)),
            border: Border {
                width: 1.0,
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.05),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

pub struct BackgroundStyle;
impl container::StyleSheet for BackgroundStyle {
    type Style = Theme;
    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(BOARD_BG)),
            ..Default::default()
        }
    }
}

/// Green band across the top of the home screen
pub struct HeaderBandStyle;
impl container::StyleSheet for HeaderBandStyle {
    type Style = Theme;
    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(SEA_GREEN)),
            text_color: Some(Color::WHITE),
            ..Default::default()
        }
    }
}

/// Rounded light-grey outline around the list and its empty state
pub struct ListFrameStyle;
impl container::StyleSheet for ListFrameStyle {
    type Style = Theme;
    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(Color::WHITE)),
            border: Border {
                radius: 10.0.into(),
                width: 1.0,
                color: LIGHT_GREY,
            },
            ..Default::default()
        }
    }
}

/// Dimmed area behind a modal
pub struct BackdropStyle;
impl container::StyleSheet for BackdropStyle {
    type Style = Theme;
    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.45))),
            ..Default::default()
        }
    }
}

pub struct BannerStyle;
impl container::StyleSheet for BannerStyle {
    type Style = Theme;
    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(Color::from_rgba(0.8, 0.45, 0.2, 0.12))),
            text_color: Some(WARNING),
            border: Border {
                radius: 6.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

pub struct InputStyle;
impl text_input::StyleSheet for InputStyle {
    type Style = Theme;
    fn active(&self, _style: &Self::Style) -> text_input::Appearance {
        text_input::Appearance {
            background: Background::Color(Color::WHITE),
            border: Border {
                radius: 6.0.into(),
                width: 1.0,
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.1),
            },
            icon_color: BOARD_SUBTEXT,
        }
    }
    fn focused(&self, _style: &Self::Style) -> text_input::Appearance {
        text_input::Appearance {
            background: Background::Color(Color::WHITE),
            border: Border {
                radius: 6.0.into(),
                width: 1.0,
                color: SEA_GREEN,
            },
            icon_color: SEA_GREEN,
        }
    }
    fn placeholder_color(&self, _style: &Self::Style) -> Color {
        Color::from_rgba(0.0, 0.0, 0.0, 0.3)
    }
    fn value_color(&self, _style: &Self::Style) -> Color {
        BOARD_TEXT
    }
    fn disabled_color(&self, _style: &Self::Style) -> Color {
        Color::from_rgba(0.0, 0.0, 0.0, 0.3)
    }
    fn selection_color(&self, _style: &Self::Style) -> Color {
        Color::from_rgba(0.18, 0.545, 0.341, 0.2)
    }
    fn disabled(&self, style: &Self::Style) -> text_input::Appearance {
        self.active(style)
    }
}
