use iced::widget::image::Handle;
use iced::widget::{
    button, column, container, horizontal_space, row, text, text_input, Column, Image, Row,
};
use iced::{Alignment, ContentFit, Element, Length};

use super::{breadcrumb, error_banner, theme};
use crate::state::controller::Controller;
use crate::state::data::{ConfigUpdate, EventType, GenerationConfig};
use crate::Message;

const TIPS: [&str; 3] = [
    "Ensure the photo is well-lit and shows the entire space.",
    "Avoid photos with people in the foreground if possible.",
    "Be specific about colors (e.g., \"Emerald Green and Gold\").",
];

/// Configuring screen: preview on the left, form on the right
pub fn view<'a>(controller: &'a Controller, preview: Option<&'a Handle>) -> Element<'a, Message> {
    let mut page = Column::new()
        .spacing(24)
        .push(breadcrumb("Upload", "Configure"));

    if let Some(message) = controller.error() {
        page = page.push(error_banner(message));
    }

    let caption = controller
        .config()
        .image
        .as_ref()
        .map(|file| file.file_name.as_str())
        .unwrap_or_default();

    page = page.push(
        row![preview_panel(preview, caption), form(controller.config())]
            .spacing(48)
            .align_y(Alignment::Start),
    );

    page.into()
}

fn preview_panel<'a>(preview: Option<&'a Handle>, caption: &'a str) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match preview {
        Some(handle) => Image::<Handle>::new(handle.clone())
            .width(Length::Fill)
            .height(384)
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(text("No preview"))
            .center(Length::Fill)
            .height(384)
            .into(),
    };

    let tips = TIPS
        .iter()
        .fold(Column::new().spacing(8), |list, tip| list.push(text(format!("•  {}", tip)).size(14)));

    column![
        container(picture).style(theme::card).padding(4),
        text(caption).size(12),
        button(text("↺  Change Photo").size(14))
            .on_press(Message::Reset)
            .style(button::secondary)
            .padding([8, 20]),
        container(
            column![text("Tips for Best Results").size(20).color(theme::GOLD), tips].spacing(12)
        )
        .padding(24)
        .width(Length::Fill)
        .style(theme::card),
    ]
    .spacing(16)
    .width(Length::FillPortion(1))
    .into()
}

fn form<'a>(config: &'a GenerationConfig) -> Element<'a, Message> {
    let field_label = |label: &'a str| text(label).size(13).color(theme::GOLD);

    let body = column![
        text("Design Your Event").size(32).color(theme::TEXT),
        text("Tell us how you want to transform this space.").size(15),
        field_label("EVENT TYPE"),
        event_type_grid(config.event_type),
        field_label("THEME & STYLE"),
        text_input("e.g. Minimalist Luxury, Rustic Bohemian, Cyberpunk...", &config.theme)
            .on_input(|value| Message::ConfigChanged(ConfigUpdate::Theme(value)))
            .padding(14),
        field_label("COLOR PALETTE"),
        text_input("e.g. Pastel Pink & White, Black & Gold...", &config.color_palette)
            .on_input(|value| Message::ConfigChanged(ConfigUpdate::ColorPalette(value)))
            .padding(14),
        field_label("ADDITIONAL REQUIREMENTS"),
        text_input(
            "Describe specific decor elements like chandeliers, round tables, stage position...",
            &config.additional_notes,
        )
        .on_input(|value| Message::ConfigChanged(ConfigUpdate::AdditionalNotes(value)))
        .on_submit(Message::Submit)
        .padding(14),
        button(
            text("✨  GENERATE VISUALIZATION")
                .size(15)
                .width(Length::Fill)
                .align_x(Alignment::Center),
        )
        .on_press(Message::Submit)
        .style(button::primary)
        .padding(16)
        .width(Length::Fill),
    ]
    .spacing(14);

    container(body)
        .padding(36)
        .width(Length::FillPortion(1))
        .style(theme::card)
        .into()
}

/// Two-column grid with exactly one highlighted event type
fn event_type_grid<'a>(selected: EventType) -> Element<'a, Message> {
    EventType::ALL
        .chunks(2)
        .fold(Column::new().spacing(10), |grid, pair| {
            let mut line = Row::new().spacing(10);
            for &event_type in pair {
                let style = if event_type == selected {
                    button::primary
                } else {
                    button::secondary
                };
                line = line.push(
                    button(text(event_type.label()).size(14))
                        .on_press(Message::ConfigChanged(ConfigUpdate::EventType(event_type)))
                        .style(style)
                        .padding(12)
                        .width(Length::Fill),
                );
            }
            if pair.len() < 2 {
                line = line.push(horizontal_space());
            }
            grid.push(line)
        })
        .into()
}
