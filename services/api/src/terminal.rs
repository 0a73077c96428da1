use crate::infra::StdoutShareTarget;
use chrono::NaiveDate;
use clap::Args;
use cupcake_order::config::{AppConfig, ConfigError, OrderConfig};
use cupcake_order::error::AppError;
use cupcake_order::telemetry;
use cupcake_order::workflows::order::share::quantity_phrase;
use cupcake_order::workflows::order::{
    Clock, ManualClock, OrderCatalog, OrderController, OrderLocale, OrderStage, OrderWizard,
    SharePayload, ShareTarget, WizardView,
};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::warn;

#[derive(Args, Debug, Default)]
pub(crate) struct WizardArgs {
    /// Locale for prices and pickup dates (defaults to ORDER_LOCALE)
    #[arg(long)]
    pub(crate) locale: Option<String>,
    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Number of cupcakes
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) quantity: i64,
    /// Flavor name
    #[arg(long, default_value = "Vanilla")]
    pub(crate) flavor: String,
    /// Pickup day offset: 0 is today (same-day surcharge), 3 is the last offered day
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..4))]
    pub(crate) pickup_day: u8,
    /// Locale for prices and pickup dates (defaults to ORDER_LOCALE)
    #[arg(long)]
    pub(crate) locale: Option<String>,
    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_wizard(args: WizardArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let wizard = build_wizard(&config.order, args.locale, args.today)?;
    let catalog = OrderCatalog::standard();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();
    run_session(&wizard, &catalog, &mut input, &mut output, &StdoutShareTarget)
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let QuoteArgs {
        quantity,
        flavor,
        pickup_day,
        locale,
        today,
    } = args;

    let wizard = build_wizard(&config.order, locale, today)?;
    quote(&wizard, quantity, &flavor, usize::from(pickup_day), &StdoutShareTarget)?;
    Ok(())
}

pub(crate) fn build_wizard(
    config: &OrderConfig,
    locale: Option<String>,
    today: Option<NaiveDate>,
) -> Result<OrderWizard, AppError> {
    let locale = match locale {
        Some(tag) => OrderLocale::from_tag(&tag).ok_or(ConfigError::UnknownLocale(tag))?,
        None => config.locale.clone(),
    };
    let clock: Arc<dyn Clock> = match today {
        Some(date) => Arc::new(ManualClock::new(date)),
        None => config.clock(),
    };
    Ok(OrderWizard::new(OrderController::new(locale, clock)))
}

/// Drives the wizard straight through to the summary and shares it.
pub(crate) fn quote<T>(
    wizard: &OrderWizard,
    quantity: i64,
    flavor: &str,
    pickup_day: usize,
    target: &T,
) -> Result<SharePayload, AppError>
where
    T: ShareTarget + ?Sized,
{
    let catalog = OrderCatalog::standard();
    let listed = u32::try_from(quantity)
        .ok()
        .and_then(|count| catalog.quantity_option(count));
    if listed.is_none() {
        warn!(quantity, "quantity is not one of the listed box sizes");
    }
    if !catalog.contains_flavor(flavor) {
        warn!(flavor, "flavor is not on the menu");
    }

    wizard.start_order(quantity)?;
    wizard.select_flavor(flavor);
    wizard.advance()?;

    let order = wizard.controller().current_state();
    if let Some(pickup_date) = order.pickup_options().get(pickup_day) {
        wizard.select_pickup_date(pickup_date);
    }
    wizard.advance()?;

    Ok(wizard.share(target)?)
}

#[derive(Debug, PartialEq, Eq)]
enum Reply {
    Pick(usize),
    Back,
    Cancel,
    Send,
    Quit,
    Unknown(String),
}

fn parse_reply(line: &str) -> Reply {
    match line.trim().to_ascii_lowercase().as_str() {
        "b" | "back" => Reply::Back,
        "c" | "cancel" => Reply::Cancel,
        "s" | "send" | "share" => Reply::Send,
        "q" | "quit" | "exit" => Reply::Quit,
        other => match other.parse::<usize>() {
            Ok(choice) if choice > 0 => Reply::Pick(choice),
            _ => Reply::Unknown(other.to_string()),
        },
    }
}

/// Line-oriented wizard loop. Returns when the order is sent, the user
/// quits, or input runs out.
pub(crate) fn run_session<R, W, T>(
    wizard: &OrderWizard,
    catalog: &OrderCatalog,
    input: &mut R,
    output: &mut W,
    target: &T,
) -> Result<(), AppError>
where
    R: BufRead,
    W: Write,
    T: ShareTarget + ?Sized,
{
    loop {
        let view = wizard.view();
        render_stage(output, catalog, &view)?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        match parse_reply(&line) {
            Reply::Quit => return Ok(()),
            Reply::Back => {
                if !wizard.back() {
                    writeln!(output, "Already at the first step.")?;
                }
            }
            Reply::Cancel => {
                wizard.cancel();
                writeln!(output, "Order cancelled.")?;
            }
            Reply::Send => match wizard.share(target) {
                Ok(_) => {
                    writeln!(output, "Order sent.")?;
                    return Ok(());
                }
                Err(err) => writeln!(output, "{err}")?,
            },
            Reply::Pick(choice) => pick(wizard, catalog, &view, choice, output)?,
            Reply::Unknown(raw) => writeln!(output, "Unrecognized choice '{raw}'.")?,
        }
    }
}

fn pick<W: Write>(
    wizard: &OrderWizard,
    catalog: &OrderCatalog,
    view: &WizardView,
    choice: usize,
    output: &mut W,
) -> Result<(), AppError> {
    let index = choice - 1;
    let outcome = match view.stage {
        OrderStage::Start => match catalog.quantity_options().get(index) {
            Some(option) => wizard.start_order(i64::from(option.quantity)).map(|_| ()),
            None => return out_of_range(output, choice),
        },
        OrderStage::Flavor => match catalog.flavors().get(index) {
            Some(flavor) => {
                wizard.select_flavor(flavor);
                wizard.advance().map(|_| ())
            }
            None => return out_of_range(output, choice),
        },
        OrderStage::Pickup => match view.order.pickup_options().get(index) {
            Some(pickup_date) => {
                wizard.select_pickup_date(pickup_date);
                wizard.advance().map(|_| ())
            }
            None => return out_of_range(output, choice),
        },
        OrderStage::Summary => {
            writeln!(output, "Type 'send' to share the order or 'cancel' to start over.")?;
            return Ok(());
        }
    };

    if let Err(err) = outcome {
        writeln!(output, "{err}")?;
    }
    Ok(())
}

fn out_of_range<W: Write>(output: &mut W, choice: usize) -> Result<(), AppError> {
    writeln!(output, "There is no option {choice}.")?;
    Ok(())
}

fn render_stage<W: Write>(
    output: &mut W,
    catalog: &OrderCatalog,
    view: &WizardView,
) -> io::Result<()> {
    writeln!(output, "\n== {} ==", view.stage_label)?;

    match view.stage {
        OrderStage::Start => {
            for (index, option) in catalog.quantity_options().iter().enumerate() {
                writeln!(output, "  {}) {}", index + 1, option.label)?;
            }
        }
        OrderStage::Flavor => {
            render_options(output, catalog.flavors().iter().copied(), view.order.flavor())?;
            writeln!(output, "Subtotal {}", view.order.price())?;
        }
        OrderStage::Pickup => {
            render_options(
                output,
                view.order.pickup_options().iter().map(String::as_str),
                view.order.pickup_date(),
            )?;
            writeln!(output, "Subtotal {}", view.order.price())?;
        }
        OrderStage::Summary => {
            writeln!(output, "Quantity     {}", quantity_phrase(view.order.quantity()))?;
            writeln!(output, "Flavor       {}", view.order.flavor())?;
            writeln!(output, "Pickup date  {}", view.order.pickup_date())?;
            writeln!(output, "Total        {}", view.order.price())?;
            writeln!(output, "Type 'send' to share, 'back', 'cancel' or 'quit':")?;
            return Ok(());
        }
    }

    if view.can_navigate_back {
        writeln!(output, "Enter a number, 'back', 'cancel' or 'quit':")
    } else {
        writeln!(output, "Enter a number or 'quit':")
    }
}

fn render_options<'a, W: Write>(
    output: &mut W,
    options: impl Iterator<Item = &'a str>,
    selected: &str,
) -> io::Result<()> {
    for (index, option) in options.enumerate() {
        let marker = if option == selected { "*" } else { " " };
        writeln!(output, " {marker}{}) {option}", index + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryShareOutbox;
    use std::io::Cursor;

    fn wizard() -> OrderWizard {
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).expect("valid date");
        build_wizard(&OrderConfig::default(), None, Some(today)).expect("wizard builds")
    }

    fn run_script(wizard: &OrderWizard, script: &str) -> (String, InMemoryShareOutbox) {
        let outbox = InMemoryShareOutbox::default();
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        run_session(
            wizard,
            &OrderCatalog::standard(),
            &mut input,
            &mut output,
            &outbox,
        )
        .expect("session runs");
        (String::from_utf8(output).expect("utf8 output"), outbox)
    }

    #[test]
    fn parses_replies() {
        assert_eq!(parse_reply(" 2\n"), Reply::Pick(2));
        assert_eq!(parse_reply("BACK"), Reply::Back);
        assert_eq!(parse_reply("s"), Reply::Send);
        assert_eq!(parse_reply("0"), Reply::Unknown("0".to_string()));
    }

    #[test]
    fn scripted_session_sends_the_order() {
        let wizard = wizard();
        let (output, outbox) = run_script(&wizard, "2\n1\n1\nsend\n");

        assert!(output.contains("== Choose Flavor =="));
        assert!(output.contains("Subtotal $12.00"));
        assert!(output.contains("Total        $15.00"));
        assert!(output.contains("Order sent."));

        let shared = outbox.shared();
        assert_eq!(shared.len(), 1);
        assert!(shared[0].summary.contains("Pickup date: Mon Jan 5"));
    }

    #[test]
    fn cancel_returns_to_start_and_out_of_range_is_reported() {
        let wizard = wizard();
        let (output, outbox) = run_script(&wizard, "9\n3\ncancel\nquit\n");

        assert!(output.contains("There is no option 9."));
        assert!(output.contains("Order cancelled."));
        assert_eq!(wizard.stage(), OrderStage::Start);
        assert_eq!(wizard.controller().current_state().quantity(), 0);
        assert!(outbox.shared().is_empty());
    }

    #[test]
    fn quote_prices_a_later_pickup_without_surcharge() {
        let wizard = wizard();
        let outbox = InMemoryShareOutbox::default();

        let payload = quote(&wizard, 3, "Coffee", 2, &outbox).expect("quote succeeds");

        assert!(payload.summary.contains("Pickup date: Wed Jan 7"));
        assert!(payload.summary.contains("Total: $6.00"));
        assert_eq!(outbox.shared(), vec![payload]);
    }

    #[test]
    fn quote_prices_off_menu_orders_after_warning() {
        let wizard = wizard();
        let outbox = InMemoryShareOutbox::default();

        let payload = quote(&wizard, 5, "Pistachio", 1, &outbox).expect("quote succeeds");

        assert!(payload.summary.contains("Quantity: 5 cupcakes"));
        assert!(payload.summary.contains("Flavor: Pistachio"));
        assert!(payload.summary.contains("Total: $10.00"));
    }

    #[test]
    fn quote_surfaces_invalid_quantity() {
        let wizard = wizard();
        let outbox = InMemoryShareOutbox::default();

        match quote(&wizard, -1, "Vanilla", 0, &outbox) {
            Err(AppError::Wizard(_)) => {}
            other => panic!("expected wizard error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_locale_is_a_config_error() {
        match build_wizard(&OrderConfig::default(), Some("xx".to_string()), None) {
            Err(AppError::Config(ConfigError::UnknownLocale(tag))) => assert_eq!(tag, "xx"),
            other => panic!("expected config error, got {other:?}"),
        }
    }
}
