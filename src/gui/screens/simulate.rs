use iced::{
    Element, Length,
    widget::{Column, Image, button, column, pick_list, radio, row, scrollable, slider, text, text_input},
};

use crate::gui::{
    AppState, Message,
    screens::Screen,
    state::{Mode, ShapeChoice},
    widgets::{labelled, layout},
};
use crate::simulator::ItemKind;

#[derive(Debug, Clone)]
pub struct SimulateScreen;

impl Screen for SimulateScreen {
    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, Message> {
        let preview: Element<'a, Message> = match &state.preview {
            Some(handle) => Image::new(handle.clone()).width(Length::Fill).into(),
            None => text("Rendering...").into(),
        };

        let mode_picker = row![
            radio("Place items", Mode::Overlay, Some(state.mode), Message::ModeSelected),
            radio("Cut & move", Mode::CutMove, Some(state.mode), Message::ModeSelected),
        ]
        .spacing(20);

        let controls = match state.mode {
            Mode::Overlay => overlay_controls(state),
            Mode::CutMove => cut_move_controls(state),
        };

        let mut sidebar = column![
            mode_picker,
            controls,
            row![
                button("Open Another Photo").on_press(Message::OpenPhoto),
                button("Download Image").on_press(Message::Export),
            ]
            .spacing(10),
        ]
        .spacing(15);

        if let Some(status) = &state.status {
            sidebar = sidebar.push(text(status.as_str()));
        }

        layout("Virtual Simulation Preview", preview, scrollable(sidebar))
    }
}

fn overlay_controls(state: &AppState) -> Element<'_, Message> {
    let (width, height) = state.photo_size();
    let placement = &state.placement;

    let shape_picker = row![
        radio("Rectangle", ShapeChoice::Rectangle, Some(placement.shape), Message::ShapeSelected),
        radio("Circle", ShapeChoice::Circle, Some(placement.shape), Message::ShapeSelected),
    ]
    .spacing(20);

    let size_controls: Element<'_, Message> = match placement.shape {
        ShapeChoice::Rectangle => column![
            labelled(
                format!("Width: {}", placement.width),
                slider(10..=(width / 2).max(10), placement.width, Message::WidthChanged),
            ),
            labelled(
                format!("Height: {}", placement.height),
                slider(10..=(height / 2).max(10), placement.height, Message::HeightChanged),
            ),
        ]
        .spacing(8)
        .into(),
        ShapeChoice::Circle => labelled(
            format!("Radius: {}", placement.radius),
            slider(5..=(width / 4).max(5), placement.radius, Message::RadiusChanged),
        ),
    };

    let items = Column::with_children(state.session.summary().into_iter().enumerate().map(
        |(index, line)| {
            row![
                text(line).width(Length::Fill),
                button("Remove").on_press(Message::RemoveItem(index)),
            ]
            .spacing(10)
            .into()
        },
    ))
    .spacing(5);

    column![
        text("Add New Item").size(20),
        pick_list(&ItemKind::ALL[..], Some(placement.kind), Message::KindSelected),
        shape_picker,
        labelled(
            "Item Color".to_string(),
            text_input("#00FFAA", &placement.color_input).on_input(Message::ColorChanged),
        ),
        labelled(
            format!("Opacity: {:.2}", state.session.opacity()),
            slider(0.1..=1.0, state.session.opacity(), Message::OpacityChanged).step(0.05),
        ),
        labelled(
            format!("X Position: {}", placement.x),
            slider(0..=width, placement.x, Message::XChanged),
        ),
        labelled(
            format!("Y Position: {}", placement.y),
            slider(0..=height, placement.y, Message::YChanged),
        ),
        size_controls,
        row![
            button("Add to Simulation").on_press(Message::AddItem),
            button("Clear All Simulations").on_press(Message::ClearItems),
        ]
        .spacing(10),
        text("Current Items").size(20),
        items,
    ]
    .spacing(10)
    .into()
}

fn cut_move_controls(state: &AppState) -> Element<'_, Message> {
    let (width, height) = state.photo_size();
    let cut = &state.cut_move;
    let hide_label = if cut.hide_original {
        "Hide original: on"
    } else {
        "Hide original: off"
    };

    column![
        text("Select Region").size(20),
        labelled(
            format!("Source X: {}", cut.source.x),
            slider(0..=width.saturating_sub(1), cut.source.x, Message::SourceXChanged),
        ),
        labelled(
            format!("Source Y: {}", cut.source.y),
            slider(0..=height.saturating_sub(1), cut.source.y, Message::SourceYChanged),
        ),
        labelled(
            format!("Region Width: {}", cut.source.width),
            slider(1..=width.saturating_sub(cut.source.x).max(1), cut.source.width, Message::SourceWidthChanged),
        ),
        labelled(
            format!("Region Height: {}", cut.source.height),
            slider(1..=height.saturating_sub(cut.source.y).max(1), cut.source.height, Message::SourceHeightChanged),
        ),
        text("Move To").size(20),
        labelled(
            format!("Destination X: {}", cut.dest_x),
            slider(0..=width, cut.dest_x, Message::DestXChanged),
        ),
        labelled(
            format!("Destination Y: {}", cut.dest_y),
            slider(0..=height, cut.dest_y, Message::DestYChanged),
        ),
        button(hide_label).on_press(Message::ToggleHideOriginal),
    ]
    .spacing(10)
    .into()
}
