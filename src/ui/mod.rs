/// UI module
///
/// Views are plain functions: they borrow state read-only and describe
/// interactions as `Message`s for `Festoscape::update`.
/// - `upload` - drop zone and file browse (Idle/Error)
/// - `config_form` - preview and event settings (Configuring)
/// - `result` - before/after comparison, download (Success)
/// - `theme` - dark and gold palette

pub mod config_form;
pub mod result;
pub mod theme;
pub mod upload;

use iced::widget::image::Handle;
use iced::widget::{button, column, container, mouse_area, row, text, Space};
use iced::{Alignment, Element, Length};

use crate::intake::parse_data_uri;
use crate::state::data::GeneratedResult;
use crate::Message;

/// Render handles for the original and generated images.
///
/// Built once per transition so views don't re-decode on every frame.
#[derive(Debug, Default)]
pub struct Gallery {
    pub original: Option<Handle>,
    pub generated: Option<Handle>,
}

impl Gallery {
    /// Decode the preview data URI captured at intake
    pub fn load_original(&mut self, preview: Option<&str>) {
        self.original = preview.and_then(decode_handle);
        self.generated = None;
    }

    /// Rebuild both handles from the result pair
    pub fn load_result(&mut self, result: Option<&GeneratedResult>) {
        if let Some(result) = result {
            self.original = decode_handle(&result.original_image);
            self.generated = decode_handle(&result.generated_image);
        }
    }
}

fn decode_handle(data_uri: &str) -> Option<Handle> {
    parse_data_uri(data_uri).map(|(_, bytes)| Handle::from_bytes(bytes))
}

/// Which result layout is shown; local to the result screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultView {
    #[default]
    Compare,
    Full,
}

/// Top bar with the wordmark; clicking it starts over
pub fn header<'a>() -> Element<'a, Message> {
    let logo = container(text("F").size(22).color(theme::DARK))
        .padding([4, 12])
        .style(theme::gold_badge);

    let wordmark = mouse_area(
        row![logo, text("FESTOSCAPE").size(24).color(theme::TEXT)]
            .spacing(12)
            .align_y(Alignment::Center),
    )
    .on_press(Message::Reset);

    container(wordmark)
    .padding([16, 32])
    .width(Length::Fill)
    .style(theme::header_bar)
    .into()
}

/// "Upload > Configure" style trail; the first crumb resets
pub fn breadcrumb<'a>(back_label: &'a str, current: &'a str) -> Element<'a, Message> {
    row![
        button(text(back_label).size(14))
            .on_press(Message::Reset)
            .style(button::text)
            .padding(0),
        text("→").size(14),
        text(current).size(14).color(theme::TEXT),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}

pub fn error_banner<'a>(message: &'a str) -> Element<'a, Message> {
    container(
        row![text("✕").color(theme::ERROR_TEXT), text(message).color(theme::ERROR_TEXT)]
            .spacing(12)
            .align_y(Alignment::Center),
    )
    .padding(16)
    .width(Length::Fill)
    .style(theme::error_box)
    .into()
}

/// Waiting screen for encoding and generation
pub fn progress<'a>(title: &'a str, detail: &'a str) -> Element<'a, Message> {
    container(
        column![
            text("✦").size(64).color(theme::GOLD),
            Space::with_height(16),
            text(title).size(32).color(theme::TEXT),
            text(detail).size(16),
        ]
        .spacing(12)
        .max_width(520)
        .align_x(Alignment::Center),
    )
    .center_x(Length::Fill)
    .padding([120, 0])
    .into()
}
