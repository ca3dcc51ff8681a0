//! Payment walkthrough screen
//!
//! Renders whichever of the overview, the three payment steps, or the
//! completion message matches the wizard position.

use iced::widget::{button, column, container, row, text, Column, Space};
use iced::{Alignment, Element, Length, Padding};

use booking_core::payment::{PaymentStep, StepPanel, PAYMENT_STEPS, STEP_COUNT};
use booking_core::wizard::WizardAction;
use booking_core::{PaymentWizard, WizardPosition};

use crate::Message;

/// Render the walkthrough at the wizard's current position
pub fn view<'a>(wizard: &'a PaymentWizard, amount: &str) -> Column<'a, Message> {
    match wizard.position() {
        WizardPosition::Completed => view_completed(),
        WizardPosition::Overview => view_overview(wizard, amount),
        position => match position.step() {
            Some(step) => view_step(wizard, step),
            None => column![],
        },
    }
}

fn view_completed<'a>() -> Column<'a, Message> {
    column![
        Space::new().height(48),
        text("✓").size(72).color([0.13, 0.77, 0.37]),
        text("Booking Confirmed!").size(32),
        text("Your payment has been successfully processed")
            .size(16)
            .color([0.4, 0.4, 0.4]),
    ]
    .spacing(8)
    .align_x(Alignment::Center)
    .width(Length::Fill)
}

fn view_overview<'a>(wizard: &'a PaymentWizard, amount: &str) -> Column<'a, Message> {
    let mut steps: Column<'_, Message> = column![].spacing(10);
    for step in &PAYMENT_STEPS {
        steps = steps.push(step_card(step));
    }

    let total = container(
        column![
            text(format!("Total Amount: {}", amount)).size(13),
            text("You will complete this payment after confirming these steps.")
                .size(11)
                .color([0.5, 0.5, 0.5]),
        ]
        .spacing(4),
    )
    .padding(12)
    .width(Length::Fill)
    .style(container::rounded_box);

    column![
        text(wizard.title()).size(26),
        Space::new().height(16),
        text("Please review the payment process before continuing:").size(14),
        Space::new().height(10),
        steps,
        Space::new().height(16),
        total,
        Space::new().height(20),
        nav_buttons(wizard, WizardAction::Start),
    ]
}

/// Numbered summary card for the overview list
fn step_card(step: &PaymentStep) -> Element<'_, Message> {
    let badge = container(text(step.number.to_string()).size(14))
        .padding(Padding::from([6, 12]))
        .style(container::rounded_box);

    container(
        row![
            badge,
            column![
                text(step.title).size(14),
                text(step.description).size(11).color([0.45, 0.45, 0.45]),
            ]
            .spacing(2)
            .width(Length::Fill),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
    )
    .padding(12)
    .width(Length::Fill)
    .style(container::bordered_box)
    .into()
}

fn view_step<'a>(wizard: &'a PaymentWizard, step: &'static PaymentStep) -> Column<'a, Message> {
    let progress = format!("Step {} of {}", step.number, STEP_COUNT);

    let panel_caption = text(step.panel_text(wizard.method())).size(12).color([0.45, 0.45, 0.45]);
    let panel: Element<'_, Message> = match step.panel {
        StepPanel::QrCode { .. } => column![
            panel_caption,
            container(text("QR").size(40).color([0.6, 0.6, 0.6]))
                .width(Length::Fixed(192.0))
                .height(Length::Fixed(192.0))
                .center_x(Length::Fixed(192.0))
                .center_y(Length::Fixed(192.0))
                .style(container::rounded_box),
        ]
        .spacing(10)
        .align_x(Alignment::Center)
        .into(),
        StepPanel::AppInstructions => panel_caption.into(),
    };

    let instructions = container(
        column![
            text(step.description).size(16),
            Space::new().height(16),
            container(panel)
                .padding(20)
                .width(Length::Fill)
                .center_x(Length::Fill)
                .style(container::bordered_box),
        ]
        .align_x(Alignment::Center),
    )
    .padding(24)
    .width(Length::Fill)
    .style(container::rounded_box);

    column![
        text(progress.clone()).size(12).color([0.5, 0.5, 0.5]),
        text(step.title).size(26),
        Space::new().height(16),
        instructions,
        Space::new().height(12),
        text(format!("{}: {}", progress, step.description)).size(12),
        Space::new().height(16),
        nav_buttons(wizard, WizardAction::Next),
    ]
}

/// Back/forward row, plus the support button where the wizard offers it
fn nav_buttons(wizard: &PaymentWizard, forward: WizardAction) -> Element<'_, Message> {
    let back = button(text(wizard.back_label()).size(14))
        .on_press(Message::Wizard(WizardAction::Back))
        .padding(Padding::from([10, 16]))
        .width(Length::Fill)
        .style(button::secondary);

    let next = button(text(wizard.next_label()).size(14))
        .on_press(Message::Wizard(forward))
        .padding(Padding::from([10, 16]))
        .width(Length::Fill)
        .style(button::primary);

    let mut buttons = row![back].spacing(12);
    if wizard.offers_support() {
        buttons = buttons.push(
            button(text("Talk to Customer Support").size(14))
                .on_press(Message::Wizard(WizardAction::ContactSupport))
                .padding(Padding::from([10, 16]))
                .width(Length::Fill)
                .style(button::success),
        );
    }
    buttons.push(next).into()
}
