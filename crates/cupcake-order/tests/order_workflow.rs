use chrono::{Duration, Local, NaiveDate};
use cupcake_order::workflows::order::calendar::pickup_labels;
use cupcake_order::workflows::order::{
    ManualClock, OrderCatalog, OrderController, OrderError, OrderLocale, OrderStage, OrderWizard,
    PricingPolicy, SharePayload, SystemClock,
};
use std::sync::Arc;

fn opening_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 30).expect("valid opening day")
}

fn controller() -> OrderController {
    let clock = Arc::new(ManualClock::new(opening_day()));
    OrderController::new(OrderLocale::en_us(), clock)
}

#[test]
fn quantity_prices_follow_unit_price_and_surcharge() {
    let controller = controller();
    let options = controller.current_state().pickup_options().to_vec();

    for quantity in [0_i64, 1, 6, 12, 250] {
        controller.set_quantity(quantity).expect("non-negative quantity");
        let state = controller.current_state();
        assert_eq!(i64::from(state.quantity()), quantity);
        let minor = PricingPolicy::standard().subtotal(state.quantity(), state.is_same_day_pickup());
        assert_eq!(state.price(), OrderLocale::en_us().format_price(minor));
    }

    controller.set_date(&options[0]);
    controller.set_quantity(250).expect("valid quantity");
    assert_eq!(controller.current_state().price(), "$503.00");
}

#[test]
fn negative_quantity_fails_and_keeps_state() {
    let controller = controller();
    controller.set_quantity(12).expect("valid quantity");
    let before = controller.current_state();

    assert_eq!(
        controller.set_quantity(-1),
        Err(OrderError::InvalidQuantity(-1))
    );
    assert_eq!(*controller.current_state(), *before);
}

#[test]
fn pickup_options_start_today_and_run_four_days() {
    let locale = OrderLocale::en_us();
    let controller = OrderController::new(locale.clone(), Arc::new(SystemClock));

    let before = Local::now().date_naive();
    let options = controller.pickup_options();
    let after = Local::now().date_naive();

    assert_eq!(options.len(), 4);
    let today = [before, after]
        .into_iter()
        .find(|day| options == pickup_labels(*day, &locale))
        .expect("labels start on the current date");
    assert_eq!(options[3], locale.format_date(today + Duration::days(3)));
}

#[test]
fn moving_off_same_day_drops_the_surcharge() {
    let controller = controller();
    controller.set_quantity(4).expect("valid quantity");
    let options = controller.current_state().pickup_options().to_vec();

    controller.set_date(&options[0]);
    assert_eq!(controller.current_state().price(), "$11.00");

    controller.set_date(&options[1]);
    assert_eq!(controller.current_state().price(), "$8.00");
}

#[test]
fn reset_restores_blank_order_against_current_date() {
    let clock = Arc::new(ManualClock::new(opening_day()));
    let controller = OrderController::new(OrderLocale::en_us(), clock.clone());
    controller.set_quantity(6).expect("valid quantity");
    controller.set_flavor("Red Velvet");
    controller.set_date("Mon Mar 30");

    clock.advance_days(2);
    controller.reset();

    let state = controller.current_state();
    assert_eq!(state.quantity(), 0);
    assert_eq!(state.flavor(), "");
    assert_eq!(state.pickup_date(), "");
    assert_eq!(state.price(), "$0.00");
    assert_eq!(
        state.pickup_options(),
        ["Wed Apr 1", "Thu Apr 2", "Fri Apr 3", "Sat Apr 4"]
    );
}

#[test]
fn six_vanilla_for_today_costs_fifteen() {
    let controller = controller();
    controller.set_quantity(6).expect("valid quantity");
    controller.set_flavor("Vanilla");
    let today = controller.current_state().pickup_options()[0].clone();
    controller.set_date(&today);

    let state = controller.current_state();
    assert_eq!(state.price(), "$15.00");
    assert_eq!(state.flavor(), "Vanilla");
}

#[test]
fn three_for_the_day_after_tomorrow_costs_six() {
    let controller = controller();
    controller.set_quantity(3).expect("valid quantity");
    let later = controller.current_state().pickup_options()[2].clone();
    controller.set_date(&later);

    assert_eq!(controller.current_state().price(), "$6.00");
}

#[test]
fn repeated_reads_return_identical_snapshots() {
    let controller = controller();
    controller.set_quantity(1).expect("valid quantity");

    let first = controller.current_state();
    let second = controller.current_state();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first, second);
}

#[test]
fn locale_controls_price_and_label_layout() {
    let clock = Arc::new(ManualClock::new(opening_day()));
    let locale = OrderLocale::from_tag("de-DE").expect("de-DE supported");
    let controller = OrderController::new(locale, clock);
    controller.set_quantity(6).expect("valid quantity");
    controller.set_date("Mo 30. Mär");

    let state = controller.current_state();
    assert_eq!(
        state.pickup_options(),
        ["Mo 30. Mär", "Di 31. Mär", "Mi 1. Apr", "Do 2. Apr"]
    );
    assert_eq!(state.price(), "15,00 €");
}

#[test]
fn catalog_offers_the_standard_menu() {
    let catalog = OrderCatalog::standard();

    let quantities: Vec<u32> = catalog
        .quantity_options()
        .iter()
        .map(|option| option.quantity)
        .collect();
    assert_eq!(quantities, vec![1, 6, 12]);
    assert_eq!(
        catalog.quantity_option(6).map(|option| option.label),
        Some("Six Cupcakes")
    );
    assert_eq!(catalog.flavors().len(), 5);
    assert!(catalog.contains_flavor("salted caramel"));
    assert!(!catalog.contains_flavor("Pistachio"));
}

#[test]
fn full_wizard_run_produces_shareable_summary() {
    let clock = Arc::new(ManualClock::new(opening_day()));
    let wizard = OrderWizard::new(OrderController::new(OrderLocale::en_us(), clock));

    wizard.start_order(12).expect("start");
    wizard.select_flavor("Salted Caramel");
    wizard.advance().expect("to pickup");
    wizard.select_pickup_date("Tue Mar 31");
    assert_eq!(wizard.advance().expect("to summary"), OrderStage::Summary);

    let payload = wizard.share_payload().expect("summary reached");
    assert_eq!(
        payload,
        SharePayload {
            subject: "New Cupcake Order".to_string(),
            summary: "Quantity: 12 cupcakes\nFlavor: Salted Caramel\nPickup date: Tue Mar 31\nTotal: $24.00\n\nThank you!"
                .to_string(),
        }
    );
}
