mod app;
mod message;
mod state;
mod screens;
mod widgets;

pub use app::ToolshedApp;
pub use message::Message;
pub use state::AppState;

/// Open the layout simulator window.
pub fn run() -> iced::Result {
    iced::application(ToolshedApp::default, ToolshedApp::update, ToolshedApp::view)
        .title("Toolshed Organizer & Simulator")
        .run()
}
