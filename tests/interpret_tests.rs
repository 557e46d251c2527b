// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use gastocheck::interpret::{CaptureKind, interpret, parse_amount};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn cats() -> Vec<String> {
    vec![
        "Comida".to_string(),
        "Transporte".to_string(),
        "Hogar".to_string(),
        "Ahorro".to_string(),
    ]
}

#[test]
fn plain_integer_amounts() {
    assert_eq!(parse_amount("1200"), Some(dec("1200")));
    assert_eq!(parse_amount("200 en comida"), Some(dec("200")));
}

#[test]
fn spoken_digit_groups_collapse() {
    assert_eq!(parse_amount("1 200"), Some(dec("1200")));
    assert_eq!(parse_amount("gasté 1 200 en el súper"), Some(dec("1200")));
}

#[test]
fn three_digits_after_last_separator_is_grouping() {
    assert_eq!(parse_amount("1.000"), Some(dec("1000")));
    assert_eq!(parse_amount("1,000"), Some(dec("1000")));
    assert_eq!(parse_amount("12.345.678"), Some(dec("12345678")));
}

#[test]
fn other_digit_counts_make_it_a_decimal_point() {
    assert_eq!(parse_amount("1,234.56"), Some(dec("1234.56")));
    assert_eq!(parse_amount("99,5"), Some(dec("99.5")));
    assert_eq!(parse_amount("0.25"), Some(dec("0.25")));
}

#[test]
fn stray_separators_are_trimmed() {
    assert_eq!(parse_amount("pagué 200."), Some(dec("200")));
    assert_eq!(parse_amount(",50 de propina"), Some(dec("50")));
}

#[test]
fn largest_token_wins() {
    assert_eq!(parse_amount("cambié 20 por 1.500 pesos"), Some(dec("1500")));
}

#[test]
fn no_number_means_no_amount() {
    assert_eq!(parse_amount("gasto en comida"), None);
}

#[test]
fn keyword_priority_decides_kind() {
    let c = cats();
    assert_eq!(interpret("meta 500 vacaciones", &c).kind, CaptureKind::Goal);
    // "ahorro" outranks "ingreso" when both appear
    assert_eq!(interpret("ingreso al ahorro 500", &c).kind, CaptureKind::Goal);
    assert_eq!(interpret("recibí 500 de sueldo", &c).kind, CaptureKind::Income);
    assert_eq!(interpret("Gané 300 en ventas", &c).kind, CaptureKind::Income);
    assert_eq!(interpret("200 en comida", &c).kind, CaptureKind::Expense);
}

#[test]
fn category_is_first_configured_substring_match() {
    let c = cats();
    let i = interpret("gasto 200 en comida del trabajo", &c);
    assert_eq!(i.category.as_deref(), Some("Comida"));
}

#[test]
fn goal_kind_forces_savings_category() {
    let c = cats();
    let i = interpret("meta 500 para viaje", &c);
    assert_eq!(i.category.as_deref(), Some("Ahorro"));
}

#[test]
fn description_drops_amount_stopwords_and_category() {
    let c = cats();
    let i = interpret("gasto 200 en comida tacos del martes", &c);
    assert_eq!(i.amount, Some(dec("200")));
    assert_eq!(i.description, "tacos del martes");
}

#[test]
fn empty_description_falls_back_to_category() {
    let c = cats();
    let i = interpret("gasto 200 en comida", &c);
    assert_eq!(i.description, "Comida");
}

#[test]
fn interpretation_never_fails() {
    let c = cats();
    let i = interpret("", &c);
    assert_eq!(i.kind, CaptureKind::Expense);
    assert_eq!(i.amount, None);
}
