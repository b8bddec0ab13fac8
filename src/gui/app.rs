use std::sync::Arc;

use iced::{Element, Task};
use image::RgbImage;
use rfd::AsyncFileDialog;
use tracing::{debug, info, warn};

use super::{
    AppState, Message,
    screens::{LandingPageScreen, LoadingPageScreen, Screen, ScreenData, SimulateScreen},
};
use crate::simulator::{self, DEFAULT_EXPORT_NAME};

pub struct ToolshedApp {
    state: AppState,
    screen: ScreenData,
}

impl Default for ToolshedApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
            screen: ScreenData::LandingPage(LandingPageScreen),
        }
    }
}

impl ToolshedApp {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenPhoto => {
                self.screen = ScreenData::LoadingPage(LoadingPageScreen);
                return Task::perform(pick_photo(), |result| match result {
                    Some(loaded) => Message::PhotoLoaded(loaded),
                    None => Message::PhotoPickCancelled,
                });
            }
            Message::PhotoLoaded(Ok(photo)) => {
                info!(width = photo.width(), height = photo.height(), "photo loaded");
                self.state.status = None;
                self.state.set_photo(photo);
                self.screen = ScreenData::SimulatePage(SimulateScreen);
                return Task::none();
            }
            Message::PhotoLoaded(Err(e)) => {
                warn!(error = %e, "failed to load photo");
                self.state.status = Some(e);
                self.screen = self.idle_screen();
                return Task::none();
            }
            Message::PhotoPickCancelled => {
                self.screen = self.idle_screen();
                return Task::none();
            }
            Message::ModeSelected(mode) => self.state.mode = mode,

            Message::KindSelected(kind) => self.state.placement.kind = kind,
            Message::ShapeSelected(shape) => self.state.placement.shape = shape,
            Message::ColorChanged(color) => self.state.placement.color_input = color,
            Message::OpacityChanged(opacity) => self.state.session.set_opacity(opacity),
            Message::XChanged(x) => self.state.placement.x = x,
            Message::YChanged(y) => self.state.placement.y = y,
            Message::WidthChanged(width) => self.state.placement.width = width,
            Message::HeightChanged(height) => self.state.placement.height = height,
            Message::RadiusChanged(radius) => self.state.placement.radius = radius,
            Message::AddItem => match self.state.placement.item() {
                Ok(item) => {
                    let (width, height) = self.state.photo_size();
                    debug!(kind = %item.kind, "adding item");
                    self.state.session.add(item.clamped(width, height));
                    self.state.status = None;
                }
                Err(e) => self.state.status = Some(format!("Invalid color: {e}")),
            },
            Message::RemoveItem(index) => {
                self.state.session.remove(index);
            }
            Message::ClearItems => self.state.session.clear(),

            Message::SourceXChanged(x) => self.state.cut_move.source.x = x,
            Message::SourceYChanged(y) => self.state.cut_move.source.y = y,
            Message::SourceWidthChanged(width) => self.state.cut_move.source.width = width,
            Message::SourceHeightChanged(height) => self.state.cut_move.source.height = height,
            Message::DestXChanged(x) => self.state.cut_move.dest_x = x,
            Message::DestYChanged(y) => self.state.cut_move.dest_y = y,
            Message::ToggleHideOriginal => {
                self.state.cut_move.hide_original = !self.state.cut_move.hide_original
            }

            Message::Export => {
                let Some(composite) = self.state.composite.clone() else {
                    self.state.status = Some("Nothing to export yet".to_string());
                    return Task::none();
                };
                return Task::perform(export_composite(composite), Message::Exported);
            }
            Message::Exported(Ok(Some(path))) => {
                info!(%path, "plan exported");
                self.state.status = Some(format!("Saved to {path}"));
                return Task::none();
            }
            Message::Exported(Ok(None)) => return Task::none(),
            Message::Exported(Err(e)) => {
                warn!(error = %e, "export failed");
                self.state.status = Some(e);
                return Task::none();
            }
        }

        self.state.clamp_controls();
        self.state.refresh();
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        self.screen.view(&self.state)
    }

    fn idle_screen(&self) -> ScreenData {
        if self.state.photo.is_some() {
            ScreenData::SimulatePage(SimulateScreen)
        } else {
            ScreenData::LandingPage(LandingPageScreen)
        }
    }
}

async fn pick_photo() -> Option<Result<Arc<RgbImage>, String>> {
    let file = AsyncFileDialog::new()
        .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "webp"])
        .set_title("Open Toolshed Photo")
        .pick_file()
        .await?;

    let bytes = file.read().await;
    Some(
        image::load_from_memory(&bytes)
            .map(|img| Arc::new(img.to_rgb8()))
            .map_err(|e| format!("Failed to decode {}: {e}", file.file_name())),
    )
}

async fn export_composite(composite: RgbImage) -> Result<Option<String>, String> {
    let bytes = simulator::export_png(&composite).map_err(|e| e.to_string())?;

    let Some(file) = AsyncFileDialog::new()
        .add_filter("PNG", &["png"])
        .set_file_name(DEFAULT_EXPORT_NAME)
        .save_file()
        .await
    else {
        return Ok(None);
    };

    file.write(&bytes).await.map_err(|e| e.to_string())?;
    Ok(Some(file.path().display().to_string()))
}
