use iced::{
    Element, Length,
    widget::{container, text},
};

use crate::gui::{AppState, Message, screens::Screen};

#[derive(Debug, Clone)]
pub struct LoadingPageScreen;

impl Screen for LoadingPageScreen {
    fn view<'a>(&'a self, _state: &'a AppState) -> Element<'a, Message> {
        container(text("Loading photo..."))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }
}
