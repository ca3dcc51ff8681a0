//! Invoice screen
//!
//! Shows the success banner (once revealed), the invoice document, and the
//! export and dashboard actions.

use iced::widget::{button, column, container, row, rule, text, Column, Space};
use iced::{Alignment, Element, Length, Padding};

use booking_core::invoice::{InvoiceSection, SUCCESS_NOTE, SUCCESS_SUBTITLE, SUCCESS_TITLE};
use booking_core::Invoice;

use crate::Message;

/// Render the invoice screen
pub fn view(invoice: &Invoice, show_success: bool) -> Column<'_, Message> {
    let mut content: Column<'_, Message> = column![];

    if show_success {
        content = content.push(
            column![
                text("✓").size(64).color([0.23, 0.51, 0.96]),
                text(SUCCESS_TITLE).size(32),
                text(SUCCESS_SUBTITLE).size(16).color([0.4, 0.4, 0.4]),
                text(SUCCESS_NOTE).size(12).color([0.55, 0.55, 0.55]),
            ]
            .spacing(6)
            .align_x(Alignment::Center)
            .width(Length::Fill),
        );
        content = content.push(Space::new().height(24));
    }

    let actions = row![
        button(text("Download PDF").size(14))
            .on_press(Message::DownloadPdf)
            .padding(Padding::from([10, 16]))
            .width(Length::Fill)
            .style(button::primary),
        button(text("Print Invoice").size(14))
            .on_press(Message::PrintInvoice)
            .padding(Padding::from([10, 16]))
            .width(Length::Fill)
            .style(button::secondary),
    ]
    .spacing(12);

    content
        .push(view_document(invoice))
        .push(Space::new().height(20))
        .push(actions)
        .push(Space::new().height(12))
        .push(
            button(text("Go to Your Dashboard").size(14))
                .on_press(Message::GoToDashboard)
                .padding(Padding::from([12, 16]))
                .width(Length::Fill)
                .style(button::primary),
        )
}

/// The invoice document box
fn view_document(invoice: &Invoice) -> Element<'_, Message> {
    let header = column![
        text(&invoice.brand_name).size(24),
        text(&invoice.brand_tagline).size(12).color([0.5, 0.5, 0.5]),
    ]
    .spacing(4);

    let meta = row![
        labeled_value("Invoice Number", invoice.number.to_string()),
        labeled_value("Invoice Date", invoice.date_display()),
    ]
    .spacing(16);

    let mut sections: Column<'_, Message> = column![].spacing(20);
    for section in &invoice.sections {
        sections = sections.push(view_section(section));
    }

    let total = container(
        row![
            text(format!("{}:", invoice.total_label)).size(16),
            Space::new().width(Length::Fill),
            text(&invoice.total).size(22).color([0.23, 0.51, 0.96]),
        ]
        .align_y(Alignment::Center),
    )
    .padding(14)
    .width(Length::Fill)
    .style(container::rounded_box);

    let footer = container(text(format!("✓ {}", invoice.footer)).size(12))
        .padding(12)
        .width(Length::Fill)
        .style(container::bordered_box);

    container(
        column![
            header,
            Space::new().height(16),
            meta,
            Space::new().height(12),
            rule::horizontal(1),
            Space::new().height(16),
            sections,
            Space::new().height(16),
            rule::horizontal(1),
            Space::new().height(16),
            total,
            Space::new().height(16),
            footer,
        ],
    )
    .padding(24)
    .width(Length::Fill)
    .style(container::bordered_box)
    .into()
}

fn labeled_value<'a>(label: &'a str, value: String) -> Element<'a, Message> {
    column![
        text(label).size(10).color([0.5, 0.5, 0.5]),
        text(value).size(14),
    ]
    .spacing(2)
    .width(Length::Fill)
    .into()
}

fn view_section(section: &InvoiceSection) -> Element<'_, Message> {
    let mut rows: Column<'_, Message> = column![text(&section.title).size(15)].spacing(6);
    for r in &section.rows {
        rows = rows.push(
            row![
                text(format!("{}:", r.label)).size(12),
                Space::new().width(Length::Fill),
                text(&r.value).size(12),
            ]
            .align_y(Alignment::Center),
        );
    }
    rows.into()
}
