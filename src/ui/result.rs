use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, stack, text, Column, Image};
use iced::{Alignment, ContentFit, Element, Length};

use super::{breadcrumb, theme, Gallery, ResultView};
use crate::state::data::GeneratedResult;
use crate::Message;

/// Success screen: before/after or full view, download and start over
pub fn view<'a>(
    result: &'a GeneratedResult,
    gallery: &'a Gallery,
    mode: ResultView,
    notice: Option<&'a str>,
) -> Element<'a, Message> {
    let headline = column![
        text("Your Vision Realized").size(40).color(theme::TEXT),
        text("We've transformed your venue based on your requirements.").size(16),
    ]
    .spacing(12)
    .align_x(Alignment::Center);

    let tabs = row![
        tab("Before / After", ResultView::Compare, mode),
        tab("Full View", ResultView::Full, mode),
    ]
    .spacing(16);

    let images: Element<'a, Message> = match mode {
        ResultView::Compare => row![
            labeled(gallery.original.as_ref(), "ORIGINAL VENUE", theme::dark_badge),
            labeled(gallery.generated.as_ref(), "FESTOSCAPE DESIGN", theme::gold_badge),
        ]
        .spacing(16)
        .into(),
        ResultView::Full => column![
            picture(gallery.generated.as_ref(), 560),
            text("Generated Concept").size(24).color(theme::TEXT),
            text(&result.prompt_used).size(14),
        ]
        .spacing(12)
        .into(),
    };

    let actions = row![
        button(text("⬇  DOWNLOAD DESIGN").size(15))
            .on_press(Message::Download)
            .style(button::primary)
            .padding([14, 32]),
        button(text("↺  CREATE ANOTHER").size(15))
            .on_press(Message::Reset)
            .style(button::secondary)
            .padding([14, 32]),
    ]
    .spacing(24);

    let mut page = Column::new()
        .spacing(28)
        .align_x(Alignment::Center)
        .push(breadcrumb("Start Over", "Result"))
        .push(headline)
        .push(tabs)
        .push(
            container(images)
                .padding(16)
                .width(Length::Fill)
                .style(theme::card),
        )
        .push(actions)
        .push(text(format!("Generated {}", result.generated_at.format("%H:%M:%S"))).size(12));

    if let Some(notice) = notice {
        page = page.push(text(notice).size(14).color(theme::GOLD));
    }

    page.into()
}

fn tab<'a>(label: &'a str, target: ResultView, active: ResultView) -> Element<'a, Message> {
    let style = if target == active {
        button::primary
    } else {
        button::secondary
    };
    button(text(label).size(14))
        .on_press(Message::SelectResultView(target))
        .style(style)
        .padding([8, 24])
        .into()
}

fn picture<'a>(handle: Option<&'a Handle>, height: u16) -> Element<'a, Message> {
    match handle {
        Some(handle) => Image::<Handle>::new(handle.clone())
            .width(Length::Fill)
            .height(height)
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(text("Image unavailable"))
            .center(Length::Fill)
            .height(height)
            .into(),
    }
}

/// Image with a corner label
fn labeled<'a>(
    handle: Option<&'a Handle>,
    label: &'a str,
    badge: fn(&iced::Theme) -> container::Style,
) -> Element<'a, Message> {
    let tag = container(container(text(label).size(12)).padding([4, 12]).style(badge)).padding(16);

    container(stack![picture(handle, 480), tag])
        .width(Length::FillPortion(1))
        .into()
}
