//! # LearnHub Checkout GUI
//!
//! Graphical front end for the last screens of the booking flow: payment
//! method choice, the payment walkthrough, the invoice, and the dashboard
//! placeholder. Built with Iced.
//!
//! Each screen owns its pending timers as abort-on-drop task handles, so
//! switching screens cancels anything the old screen had scheduled.

mod platform;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use iced::task::Handle;
use iced::widget::{column, container, rule, scrollable};
use iced::{Element, Length, Task};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use booking_core::print::{begin_print, PrintJob};
use booking_core::wizard::{WizardAction, WizardEffect};
use booking_core::{BookingRecord, CheckoutConfig, Invoice, PaymentMethod, PaymentWizard};

use platform::{BrowserSurface, BrowserSurfaceHost};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// LearnHub booking checkout.
#[derive(Debug, Parser)]
struct Cli {
    /// Booking record (JSON) produced by the earlier booking steps.
    /// A sample booking is used when omitted.
    #[arg(long)]
    booking: Option<PathBuf>,

    /// Checkout config (TOML). Falls back to `LEARNHUB_CONFIG`, then defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

// ─── messages & screens ──────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum Message {
    // Method picker
    SelectMethod(PaymentMethod),

    // Payment walkthrough
    Wizard(WizardAction),
    ConfirmElapsed,

    // Invoice
    RevealSuccess,
    PrintInvoice,
    RunPrint,
    DownloadPdf,
    PdfTargetChosen(Option<PathBuf>),
    PdfSaved(Result<PathBuf, String>),
    GoToDashboard,
}

/// Payment walkthrough plus its pending confirm timer
pub struct PaymentScreen {
    pub wizard: PaymentWizard,
    #[allow(dead_code)] // held for abort-on-drop
    confirm_timer: Option<Handle>,
}

/// Invoice plus its banner and print timers
pub struct InvoiceScreen {
    pub invoice: Invoice,
    pub show_success: bool,
    #[allow(dead_code)] // held for abort-on-drop
    reveal_timer: Option<Handle>,
    pending_print: Option<(PrintJob<BrowserSurface>, Handle)>,
}

pub enum Screen {
    MethodPicker,
    Payment(PaymentScreen),
    Invoice(InvoiceScreen),
    Dashboard,
}

impl Screen {
    fn name(&self) -> &'static str {
        match self {
            Screen::MethodPicker => "method picker",
            Screen::Payment(_) => "payment",
            Screen::Invoice(_) => "invoice",
            Screen::Dashboard => "dashboard",
        }
    }
}

/// Schedule `message` after `delay`, returning the task and an
/// abort-on-drop handle that owns it
fn delayed(delay: Duration, message: Message) -> (Task<Message>, Handle) {
    let (task, handle) = Task::perform(async move { tokio::time::sleep(delay).await }, move |_| message).abortable();
    (task, handle.abort_on_drop())
}

// ─── application ─────────────────────────────────────────────────────────────

pub struct App {
    pub config: CheckoutConfig,
    pub booking: BookingRecord,
    pub screen: Screen,
    pub status: String,
    surfaces: BrowserSurfaceHost,
}

impl App {
    fn new(config: CheckoutConfig, booking: BookingRecord, start_in_wizard: bool) -> (Self, Task<Message>) {
        let mut app = App {
            config,
            booking,
            screen: Screen::MethodPicker,
            status: "Ready".to_string(),
            surfaces: BrowserSurfaceHost::new(),
        };
        if start_in_wizard {
            app.open_wizard(app.booking.payment.payment_method());
        }
        (app, Task::none())
    }

    fn title(&self) -> String {
        format!("{} - Checkout", self.config.brand_name)
    }

    fn switch_to(&mut self, screen: Screen) {
        debug!(from = self.screen.name(), to = screen.name(), "switching screen");
        // Dropping the old screen aborts its timers
        self.screen = screen;
    }

    fn open_wizard(&mut self, method: PaymentMethod) {
        self.booking.payment.method = method.selector().to_string();
        self.switch_to(Screen::Payment(PaymentScreen {
            wizard: PaymentWizard::new(method, &self.config),
            confirm_timer: None,
        }));
    }

    fn open_invoice(&mut self) -> Task<Message> {
        let invoice = Invoice::issue(&self.booking, &self.config);
        let (task, handle) = delayed(self.config.success_reveal_delay(), Message::RevealSuccess);
        self.switch_to(Screen::Invoice(InvoiceScreen {
            invoice,
            show_success: false,
            reveal_timer: Some(handle),
            pending_print: None,
        }));
        task
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SelectMethod(method) => {
                info!(%method, "payment method selected");
                self.open_wizard(method);
                Task::none()
            }

            Message::Wizard(action) => {
                let Screen::Payment(screen) = &mut self.screen else {
                    return Task::none();
                };
                match screen.wizard.handle(action) {
                    Some(WizardEffect::ScheduleConfirm { after }) => {
                        let (task, handle) = delayed(after, Message::ConfirmElapsed);
                        screen.confirm_timer = Some(handle);
                        self.status = "Payment completed".to_string();
                        task
                    }
                    Some(WizardEffect::ExitToCaller) => {
                        self.switch_to(Screen::MethodPicker);
                        Task::none()
                    }
                    Some(WizardEffect::OpenExternal { url }) => {
                        if !platform::open_url(&url) {
                            warn!(%url, "could not open support link");
                        }
                        Task::none()
                    }
                    None => Task::none(),
                }
            }

            Message::ConfirmElapsed => {
                let Screen::Payment(screen) = &mut self.screen else {
                    return Task::none();
                };
                screen.confirm_timer = None;
                if screen.wizard.confirm_elapsed() {
                    self.status = "Booking confirmed".to_string();
                    self.open_invoice()
                } else {
                    Task::none()
                }
            }

            Message::RevealSuccess => {
                if let Screen::Invoice(screen) = &mut self.screen {
                    screen.show_success = true;
                    screen.reveal_timer = None;
                }
                Task::none()
            }

            Message::PrintInvoice => self.start_print(),

            Message::RunPrint => {
                if let Screen::Invoice(screen) = &mut self.screen {
                    if let Some((job, _handle)) = screen.pending_print.take() {
                        job.print();
                    }
                }
                Task::none()
            }

            Message::DownloadPdf => {
                let Screen::Invoice(screen) = &self.screen else {
                    return Task::none();
                };
                let file_name = format!("{}.pdf", screen.invoice.number);
                Task::perform(
                    async move {
                        rfd::AsyncFileDialog::new()
                            .set_file_name(file_name)
                            .add_filter("PDF", &["pdf"])
                            .save_file()
                            .await
                            .map(|handle| handle.path().to_path_buf())
                    },
                    Message::PdfTargetChosen,
                )
            }

            Message::PdfTargetChosen(None) => {
                debug!("pdf download cancelled");
                Task::none()
            }

            Message::PdfTargetChosen(Some(path)) => {
                let Screen::Invoice(screen) = &self.screen else {
                    return Task::none();
                };
                let invoice = screen.invoice.clone();
                self.status = "Rendering PDF...".to_string();
                Task::perform(
                    async move {
                        // Typst compiles synchronously; keep it off the executor
                        tokio::task::spawn_blocking(move || {
                            booking_core::pdf::save_invoice_pdf(&invoice, &path).map(|_| path)
                        })
                        .await
                        .map_err(|e| e.to_string())
                        .and_then(|saved| saved.map_err(|e| e.to_string()))
                    },
                    Message::PdfSaved,
                )
            }

            Message::PdfSaved(Ok(path)) => {
                self.status = format!("Saved {}", path.display());
                Task::none()
            }

            Message::PdfSaved(Err(reason)) => {
                warn!(%reason, "pdf export failed; falling back to print");
                self.status = "PDF export failed, opened print view instead".to_string();
                self.start_print()
            }

            Message::GoToDashboard => {
                info!(route = %self.config.dashboard_route, "navigating to dashboard");
                self.switch_to(Screen::Dashboard);
                Task::none()
            }
        }
    }

    fn start_print(&mut self) -> Task<Message> {
        let Screen::Invoice(screen) = &mut self.screen else {
            return Task::none();
        };
        let Some(job) = begin_print(&self.surfaces, &screen.invoice, self.config.print_delay()) else {
            return Task::none();
        };
        let (task, handle) = delayed(job.print_after(), Message::RunPrint);
        // A second click replaces (and so aborts) an earlier pending print
        screen.pending_print = Some((job, handle));
        task
    }

    fn view(&self) -> Element<'_, Message> {
        let body: Element<'_, Message> = match &self.screen {
            Screen::MethodPicker => ui::method_picker::view(&self.config).into(),
            Screen::Payment(screen) => {
                ui::payment_steps::view(&screen.wizard, &self.config.amount_display()).into()
            }
            Screen::Invoice(screen) => ui::invoice_view::view(&screen.invoice, screen.show_success).into(),
            Screen::Dashboard => ui::dashboard::view(),
        };

        let content = column![
            ui::header::view_header(&self.config.brand_name, &self.config.brand_tagline),
            rule::horizontal(1),
            container(scrollable(container(body).padding(16).max_width(720.0)))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill),
            rule::horizontal(1),
            ui::status_bar::view_status_bar(self.screen.name(), &self.status),
        ]
        .padding(10);

        content.into()
    }
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber. Honours `RUST_LOG`, defaults to `info`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> iced::Result {
    init_tracing();
    let cli = Cli::parse();

    let config = CheckoutConfig::resolve(cli.config.as_deref()).unwrap_or_else(|e| {
        warn!(error = %e, "using default checkout config");
        CheckoutConfig::default()
    });

    let start_in_wizard = cli.booking.is_some();
    let booking = match cli.booking.as_deref().map(BookingRecord::load) {
        Some(Ok(record)) => record,
        Some(Err(e)) => {
            warn!(error = %e, "could not load booking; using sample booking");
            BookingRecord::sample()
        }
        None => BookingRecord::sample(),
    };

    info!(brand = %config.brand_name, "starting checkout");

    iced::application(
        move || App::new(config.clone(), booking.clone(), start_in_wizard),
        App::update,
        App::view,
    )
    .title(App::title)
    .window_size((820.0, 900.0))
    .run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn app() -> App {
        App::new(CheckoutConfig::default(), BookingRecord::sample(), true).0
    }

    fn position(app: &App) -> Option<booking_core::WizardPosition> {
        match &app.screen {
            Screen::Payment(s) => Some(s.wizard.position()),
            _ => None,
        }
    }

    #[test]
    fn test_starts_in_wizard_with_booking_method() {
        let app = app();
        let Screen::Payment(screen) = &app.screen else {
            panic!("expected payment screen");
        };
        assert_eq!(screen.wizard.method(), PaymentMethod::Vodafone);
    }

    #[test]
    fn test_back_from_overview_returns_to_picker() {
        let mut app = app();
        let _ = app.update(Message::Wizard(WizardAction::Back));
        assert!(matches!(app.screen, Screen::MethodPicker));

        let _ = app.update(Message::SelectMethod(PaymentMethod::EndCash));
        assert_eq!(app.booking.payment.method, "endc");
        assert_eq!(position(&app), Some(booking_core::WizardPosition::Overview));
    }

    #[test]
    fn test_confirm_before_completion_is_ignored() {
        let mut app = app();
        let _ = app.update(Message::Wizard(WizardAction::Start));
        let _ = app.update(Message::ConfirmElapsed);
        assert_eq!(position(&app), Some(booking_core::WizardPosition::Step1));
    }

    #[test]
    fn test_completion_opens_invoice_once() {
        let mut app = app();
        let _ = app.update(Message::Wizard(WizardAction::Start));
        for _ in 0..3 {
            let _ = app.update(Message::Wizard(WizardAction::Next));
        }
        assert_eq!(position(&app), Some(booking_core::WizardPosition::Completed));

        let _ = app.update(Message::ConfirmElapsed);
        let Screen::Invoice(screen) = &app.screen else {
            panic!("expected invoice screen");
        };
        assert!(!screen.show_success);
        let number = screen.invoice.number.clone();

        // A stray second confirm does not re-issue the invoice
        let _ = app.update(Message::ConfirmElapsed);
        let Screen::Invoice(screen) = &app.screen else {
            panic!("expected invoice screen");
        };
        assert_eq!(screen.invoice.number, number);
    }

    #[test]
    fn test_dashboard_navigation_and_stale_timers() {
        let mut app = app();
        let _ = app.update(Message::Wizard(WizardAction::Start));
        for _ in 0..3 {
            let _ = app.update(Message::Wizard(WizardAction::Next));
        }
        let _ = app.update(Message::ConfirmElapsed);
        let _ = app.update(Message::GoToDashboard);
        assert!(matches!(app.screen, Screen::Dashboard));

        // Late timer messages from torn-down screens do nothing
        let _ = app.update(Message::RevealSuccess);
        let _ = app.update(Message::RunPrint);
        assert!(matches!(app.screen, Screen::Dashboard));
    }

    thread_local! {
        static PRINTED: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    fn record_print(path: &str) -> bool {
        PRINTED.with(|p| p.borrow_mut().push(path.to_string()));
        true
    }

    fn printed() -> Vec<String> {
        PRINTED.with(|p| p.borrow().clone())
    }

    /// App on the invoice screen, printing into a scratch directory
    fn invoice_app(name: &str) -> (App, PathBuf) {
        let mut app = app();
        let dir = std::env::temp_dir().join(format!("learnhub-gui-test-{}-{}", std::process::id(), name));
        let _ = std::fs::remove_dir_all(&dir);
        app.surfaces = BrowserSurfaceHost::with_opener(dir.clone(), record_print);
        let _ = app.open_invoice();
        (app, dir)
    }

    fn pending_print_path(app: &App) -> Option<PathBuf> {
        match &app.screen {
            Screen::Invoice(s) => s.pending_print.as_ref().map(|(job, _)| job.surface().path().to_path_buf()),
            _ => None,
        }
    }

    #[test]
    fn test_print_waits_for_run_and_fires_once() {
        let (mut app, dir) = invoice_app("print-once");
        let _ = app.update(Message::PrintInvoice);
        let path = pending_print_path(&app).expect("print job pending");
        assert!(path.exists());
        assert!(printed().is_empty());

        let _ = app.update(Message::RunPrint);
        assert_eq!(pending_print_path(&app), None);
        let _ = app.update(Message::RunPrint);
        assert_eq!(printed(), vec![path.to_string_lossy().to_string()]);

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("window.print()"));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_second_print_click_replaces_pending_job() {
        let (mut app, dir) = invoice_app("print-replace");
        let _ = app.update(Message::PrintInvoice);
        let first = pending_print_path(&app).expect("first job pending");
        let _ = app.update(Message::PrintInvoice);
        let second = pending_print_path(&app).expect("second job pending");

        assert_ne!(first, second);
        assert!(!first.exists());

        let _ = app.update(Message::RunPrint);
        assert_eq!(printed(), vec![second.to_string_lossy().to_string()]);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_pdf_failure_falls_back_to_print() {
        let (mut app, dir) = invoice_app("pdf-fallback");
        let _ = app.update(Message::PdfSaved(Err("unclosed delimiter".to_string())));

        assert!(pending_print_path(&app).is_some());
        assert_eq!(app.status, "PDF export failed, opened print view instead");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_leaving_invoice_discards_unprinted_document() {
        let (mut app, dir) = invoice_app("print-abandon");
        let _ = app.update(Message::PrintInvoice);
        let path = pending_print_path(&app).expect("print job pending");

        let _ = app.update(Message::GoToDashboard);
        assert!(!path.exists());
        assert!(printed().is_empty());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
