//! # LearnHub Checkout CLI
//!
//! Terminal front end for the checkout screens:
//!
//! - `walkthrough` steps through the payment wizard on stdin and prints the
//!   invoice once the booking is confirmed
//! - `invoice` renders a booking's invoice as text, JSON, print HTML or PDF

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use booking_core::payment::{StepPanel, PAYMENT_STEPS, STEP_COUNT};
use booking_core::print::render_print_document;
use booking_core::timer::OneShot;
use booking_core::wizard::{WizardAction, WizardEffect};
use booking_core::{BookingRecord, CheckoutConfig, Invoice, PaymentWizard, WizardPosition};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// LearnHub booking checkout in the terminal.
#[derive(Debug, Parser)]
struct Cli {
    /// Checkout config (TOML). Falls back to `LEARNHUB_CONFIG`, then defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Walk through the payment steps interactively.
    Walkthrough {
        /// Booking record (JSON). A sample booking is used when omitted.
        #[arg(long)]
        booking: Option<PathBuf>,
    },

    /// Render the invoice for a booking.
    Invoice {
        /// Booking record (JSON). A sample booking is used when omitted.
        #[arg(long)]
        booking: Option<PathBuf>,

        /// Write the printable HTML document here.
        #[arg(long)]
        html: Option<PathBuf>,

        /// Write a PDF here.
        #[arg(long)]
        pdf: Option<PathBuf>,

        /// Print the invoice model as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `warn` so the walkthrough text is not interleaved with logs.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── rendering ───────────────────────────────────────────────────────────────

/// Text rendering of the wizard at its current position
fn render_position(wizard: &PaymentWizard, amount: &str) -> String {
    let mut out = String::new();
    match wizard.position() {
        WizardPosition::Overview => {
            out.push_str(&format!("{}\n\n", wizard.title()));
            out.push_str("Please review the payment process before continuing:\n\n");
            for step in &PAYMENT_STEPS {
                out.push_str(&format!("  {}. {}\n     {}\n", step.number, step.title, step.description));
            }
            out.push_str(&format!("\nTotal Amount: {}\n", amount));
            out.push_str("You will complete this payment after confirming these steps.\n");
        }
        WizardPosition::Completed => {
            out.push_str("Booking Confirmed!\nYour payment has been successfully processed\n");
        }
        position => {
            if let Some(step) = position.step() {
                out.push_str(&format!("Step {} of {}\n{}\n\n", step.number, STEP_COUNT, step.title));
                out.push_str(&format!("{}\n\n", step.description));
                match step.panel {
                    StepPanel::QrCode { .. } => {
                        out.push_str(&format!("  [ {} ]\n", step.panel_text(wizard.method())))
                    }
                    StepPanel::AppInstructions => {
                        out.push_str(&format!("  {}\n", step.panel_text(wizard.method())))
                    }
                }
            }
        }
    }
    out
}

/// Key hints for the current position
fn render_hints(wizard: &PaymentWizard) -> String {
    let mut hints = vec![format!("[b] {}", wizard.back_label())];
    if wizard.offers_support() {
        hints.push("[s] Talk to Customer Support".to_string());
    }
    hints.push(format!("[n] {}", wizard.next_label()));
    hints.push("[q] Quit".to_string());
    hints.join("   ")
}

/// Map a typed command to a wizard action
fn parse_action(input: &str, position: WizardPosition) -> Option<WizardAction> {
    match input.trim().to_ascii_lowercase().as_str() {
        "n" | "next" | "" if position == WizardPosition::Overview => Some(WizardAction::Start),
        "n" | "next" | "" => Some(WizardAction::Next),
        "start" => Some(WizardAction::Start),
        "b" | "back" | "p" | "previous" => Some(WizardAction::Back),
        "s" | "support" => Some(WizardAction::ContactSupport),
        _ => None,
    }
}

// ─── commands ────────────────────────────────────────────────────────────────

fn load_booking(path: Option<&Path>) -> anyhow::Result<BookingRecord> {
    match path {
        Some(path) => BookingRecord::load(path).with_context(|| format!("loading booking {}", path.display())),
        None => Ok(BookingRecord::sample()),
    }
}

/// Outcome of the interactive walkthrough
enum Walkthrough {
    Confirmed,
    Back,
    Quit,
}

async fn run_walkthrough(config: &CheckoutConfig, booking: &BookingRecord) -> anyhow::Result<Walkthrough> {
    let mut wizard = PaymentWizard::new(booking.payment.payment_method(), config);
    let amount = config.amount_display();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("\n{}", render_position(&wizard, &amount));
        print!("{}\n> ", render_hints(&wizard));
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(Walkthrough::Quit);
        };
        let line = line?;
        if matches!(line.trim(), "q" | "quit") {
            return Ok(Walkthrough::Quit);
        }
        let Some(action) = parse_action(&line, wizard.position()) else {
            println!("Unknown command '{}'", line.trim());
            continue;
        };

        match wizard.handle(action) {
            Some(WizardEffect::ExitToCaller) => return Ok(Walkthrough::Back),
            Some(WizardEffect::OpenExternal { url }) => {
                println!("Contact support on WhatsApp: {}", url);
            }
            Some(WizardEffect::ScheduleConfirm { after }) => {
                println!("\n{}", render_position(&wizard, &amount));
                let (tx, rx) = oneshot::channel();
                // Dropped on every path out of this block, cancelling the callback
                let _confirm_timer = OneShot::schedule(after, move || {
                    let _ = tx.send(());
                });

                tokio::select! {
                    fired = rx => {
                        if fired.is_ok() && wizard.confirm_elapsed() {
                            return Ok(Walkthrough::Confirmed);
                        }
                        return Ok(Walkthrough::Quit);
                    }
                    _ = tokio::signal::ctrl_c() => {
                        warn!("interrupted before confirmation");
                        return Ok(Walkthrough::Quit);
                    }
                }
            }
            None => debug!(?action, "no effect"),
        }
    }
}

fn run_invoice(
    invoice: &Invoice,
    html: Option<&Path>,
    pdf: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    if let Some(path) = html {
        std::fs::write(path, render_print_document(invoice))
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "wrote print document");
        println!("Wrote {}", path.display());
    }
    if let Some(path) = pdf {
        booking_core::pdf::save_invoice_pdf(invoice, path)?;
        println!("Wrote {}", path.display());
    }
    if json {
        println!("{}", serde_json::to_string_pretty(invoice)?);
    } else if html.is_none() && pdf.is_none() {
        println!("{}", invoice.to_text());
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = CheckoutConfig::resolve(cli.config.as_deref())?;

    match cli.command {
        Command::Walkthrough { booking } => {
            let booking = load_booking(booking.as_deref())?;
            match run_walkthrough(&config, &booking).await? {
                Walkthrough::Confirmed => {
                    let invoice = Invoice::issue(&booking, &config);
                    println!();
                    println!("{}", invoice.to_text());
                    println!("Dashboard: {}", config.dashboard_route);
                }
                Walkthrough::Back => println!("Returned to payment method selection."),
                Walkthrough::Quit => println!("Payment walkthrough abandoned."),
            }
        }
        Command::Invoice { booking, html, pdf, json } => {
            let booking = load_booking(booking.as_deref())?;
            let invoice = Invoice::issue(&booking, &config);
            run_invoice(&invoice, html.as_deref(), pdf.as_deref(), json)?;
        }
    }

    Ok(())
}
