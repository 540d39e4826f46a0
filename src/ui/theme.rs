/// Dark brown and gold look
use iced::theme::Palette;
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

pub const DARK: Color = Color { r: 0.102, g: 0.071, b: 0.055, a: 1.0 };
pub const CARD: Color = Color { r: 0.165, g: 0.122, b: 0.098, a: 1.0 };
pub const ACCENT: Color = Color { r: 0.243, g: 0.176, b: 0.137, a: 1.0 };
pub const GOLD: Color = Color { r: 0.831, g: 0.686, b: 0.216, a: 1.0 };
pub const TEXT: Color = Color { r: 0.95, g: 0.94, b: 0.92, a: 1.0 };
pub const ERROR_TEXT: Color = Color { r: 0.99, g: 0.79, b: 0.79, a: 1.0 };

pub fn festoscape() -> Theme {
    let palette = Palette {
        background: DARK,
        text: Color::from_rgb(0.82, 0.80, 0.78),
        primary: GOLD,
        success: Color::from_rgb(0.25, 0.62, 0.35),
        danger: Color::from_rgb(0.75, 0.28, 0.28),
    };
    Theme::custom("FestoScape".to_string(), palette)
}

pub fn header_bar(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::from_rgb(0.082, 0.055, 0.043))),
        border: Border {
            color: ACCENT,
            width: 1.0,
            radius: 0.0.into(),
        },
        ..container::Style::default()
    }
}

pub fn card(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(CARD)),
        border: Border {
            color: ACCENT,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..container::Style::default()
    }
}

/// Drop zone; gold border while a file hovers over the window
pub fn drop_zone(is_dragging: bool) -> impl Fn(&Theme) -> container::Style {
    move |_theme| container::Style {
        background: Some(Background::Color(if is_dragging { ACCENT } else { CARD })),
        border: Border {
            color: if is_dragging { GOLD } else { ACCENT },
            width: 2.0,
            radius: 8.0.into(),
        },
        ..container::Style::default()
    }
}

pub fn gold_badge(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(GOLD)),
        text_color: Some(DARK),
        border: Border {
            color: GOLD,
            width: 0.0,
            radius: 4.0.into(),
        },
        ..container::Style::default()
    }
}

pub fn dark_badge(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.6))),
        text_color: Some(TEXT),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 4.0.into(),
        },
        ..container::Style::default()
    }
}

pub fn error_box(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::from_rgba(0.5, 0.1, 0.1, 0.5))),
        border: Border {
            color: Color::from_rgb(0.94, 0.27, 0.27),
            width: 1.0,
            radius: 4.0.into(),
        },
        ..container::Style::default()
    }
}
