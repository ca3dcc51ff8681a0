//! Dashboard placeholder. Always renders the same content.

use iced::widget::{column, container, text};
use iced::{Alignment, Element, Length};

use booking_core::dashboard::{MESSAGE, TITLE};

use crate::Message;

pub fn view() -> Element<'static, Message> {
    container(
        column![
            text(TITLE).size(40),
            text(MESSAGE).size(16).color([0.4, 0.4, 0.4]),
        ]
        .spacing(12)
        .align_x(Alignment::Center),
    )
    .width(Length::Fill)
    .height(Length::Fixed(480.0))
    .center_x(Length::Fill)
    .center_y(Length::Fixed(480.0))
    .into()
}
