pub mod landing_page;
pub mod loading_page;
pub mod simulate;

pub use landing_page::LandingPageScreen;
pub use loading_page::LoadingPageScreen;
pub use simulate::SimulateScreen;

use iced::Element;

use crate::gui::{AppState, Message};

pub trait Screen {
    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, Message>;
}

#[derive(Debug, Clone)]
pub enum ScreenData {
    LandingPage(landing_page::LandingPageScreen),
    LoadingPage(loading_page::LoadingPageScreen),
    SimulatePage(simulate::SimulateScreen),
}

impl Screen for ScreenData {
    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, Message> {
        match self {
            ScreenData::LandingPage(screen) => screen.view(state),
            ScreenData::LoadingPage(screen) => screen.view(state),
            ScreenData::SimulatePage(screen) => screen.view(state),
        }
    }
}
