use iced::{
    Element, Length,
    widget::{column, container, text},
};

/// Main canvas on the left, controls in a sidebar on the right.
pub fn layout<'a, Message>(
    title: &'a str,
    main_content: impl Into<Element<'a, Message>>,
    sidebar: impl Into<Element<'a, Message>>,
) -> Element<'a, Message>
where
    Message: 'a,
{
    container(iced::widget::row![
        container(column![text(title).size(24), main_content.into()].spacing(10))
            .padding(10)
            .width(Length::FillPortion(3)),
        container(sidebar.into())
            .padding(10)
            .width(Length::FillPortion(2))
            .height(Length::Fill),
    ])
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .into()
}

/// Control with a small caption above it.
pub fn labelled<'a, Message>(
    label: String,
    control: impl Into<Element<'a, Message>>,
) -> Element<'a, Message>
where
    Message: 'a,
{
    column![text(label).size(14), control.into()].spacing(2).into()
}
