use iced::{
    Alignment::Center,
    Element, Length,
    widget::{button, column, container, text},
};

use crate::gui::{AppState, Message, screens::Screen};

/// Shown until a photo has been captured.
#[derive(Debug, Clone)]
pub struct LandingPageScreen;

impl Screen for LandingPageScreen {
    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, Message> {
        let mut content = column![
            text("Toolshed Organizer & Simulator").size(32),
            text("Reorganize your space virtually: open a photo of your toolshed and try new layouts."),
            button("Open Photo").on_press(Message::OpenPhoto),
        ]
        .spacing(20)
        .padding(20)
        .align_x(Center);

        if let Some(status) = &state.status {
            content = content.push(text(status.as_str()));
        }

        container(content)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }
}
