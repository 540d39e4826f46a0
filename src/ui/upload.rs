use iced::widget::{button, column, container, mouse_area, text, Space};
use iced::{Alignment, Element, Length};

use super::{error_banner, theme};
use crate::Message;

/// Landing screen: headline plus the drop zone.
///
/// Dropping a file anywhere on the window and clicking the zone both end up
/// in the same validation path (`Festoscape::select_file`).
pub fn view<'a>(is_dragging: bool, error: Option<&'a str>) -> Element<'a, Message> {
    let (icon, title) = if is_dragging {
        ("⬇", "Drop Image Here")
    } else {
        ("🖼", "Upload Venue Photo")
    };

    let zone = container(
        column![
            text(icon).size(40).color(theme::GOLD),
            text(title).size(26).color(theme::TEXT),
            text("Drag and drop your empty venue photo here, or click to browse.").size(15),
            text("Supported: JPG, PNG, WEBP").size(12),
            Space::with_height(8),
            container(text("SELECT FILE").size(14).color(theme::GOLD))
                .padding([8, 24])
                .style(theme::card),
        ]
        .spacing(12)
        .align_x(Alignment::Center),
    )
    .padding(48)
    .width(Length::Fill)
    .center_x(Length::Fill)
    .style(theme::drop_zone(is_dragging));

    let mut content = column![
        text("✦ AI-POWERED EVENT DESIGN").size(13).color(theme::GOLD),
        text("Visualize Your Dream Event Instantly.").size(48).color(theme::TEXT),
        text(
            "Upload a photo of any venue (banquet hall, lawn, or conference room) \
             and watch FestoScape transform it into a fully decorated masterpiece in seconds."
        )
        .size(18),
        Space::with_height(24),
    ]
    .spacing(16)
    .max_width(900)
    .align_x(Alignment::Center);

    if let Some(message) = error {
        content = content.push(error_banner(message)).push(
            button(text("Start Over").size(14))
                .on_press(Message::Reset)
                .style(button::text),
        );
    }

    content = content.push(mouse_area(zone).on_press(Message::BrowseForImage));

    container(content).center_x(Length::Fill).padding(40).into()
}
