//! Payment method picker
//!
//! Stands in for the booking step that selects a payment method; the
//! wizard's "Back" from the overview returns here.

use iced::widget::{button, column, text, Column, Space};
use iced::{Length, Padding};

use booking_core::{CheckoutConfig, PaymentMethod};

use crate::Message;

/// Render one button per payment method
pub fn view(config: &CheckoutConfig) -> Column<'_, Message> {
    let mut methods: Column<'_, Message> = column![].spacing(8);
    for method in PaymentMethod::ALL {
        methods = methods.push(
            button(text(method.display_name()).size(14))
                .on_press(Message::SelectMethod(*method))
                .padding(Padding::from([10, 16]))
                .width(Length::Fill)
                .style(button::secondary),
        );
    }

    column![
        text("Choose a payment method").size(24),
        Space::new().height(4),
        text(format!("{} - {}", config.program.name, config.amount_display()))
            .size(12)
            .color([0.5, 0.5, 0.5]),
        Space::new().height(16),
        methods,
    ]
}
