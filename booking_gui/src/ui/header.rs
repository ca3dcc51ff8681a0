//! Header bar with the brand name and tagline

use iced::widget::{row, text, Space};
use iced::{Alignment, Element, Length};

use crate::Message;

/// Render the application header
pub fn view_header<'a>(brand: &'a str, tagline: &'a str) -> Element<'a, Message> {
    row![
        text(brand).size(28),
        Space::new().width(Length::Fill),
        text(tagline).size(12).color([0.5, 0.5, 0.5]),
    ]
    .padding([4, 0])
    .align_y(Alignment::Center)
    .into()
}
