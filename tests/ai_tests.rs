// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use gastocheck::ai::{AiEntry, strip_code_fences};
use rust_decimal::Decimal;

#[test]
fn fences_are_stripped() {
    assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
    assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
}

#[test]
fn model_reply_parses_into_an_entry() {
    let raw = r#"```json
{"tipo":"gasto","monto":250.5,"categoria":"Comida","descripcion":"tacos","cuenta_origen":null,"cuenta_destino":null}
```"#;
    let entry: AiEntry = serde_json::from_str(strip_code_fences(raw)).unwrap();
    assert_eq!(entry.tipo, "gasto");
    assert_eq!(entry.amount(), Some(Decimal::new(2505, 1)));
    assert_eq!(entry.categoria.as_deref(), Some("Comida"));
    assert!(!entry.is_transfer());
}

#[test]
fn transfer_entries_need_both_account_names() {
    let raw = r#"{"tipo":"transferencia","monto":300.0,"categoria":null,"descripcion":null,"cuenta_origen":"Cash","cuenta_destino":"Savings"}"#;
    let entry: AiEntry = serde_json::from_str(raw).unwrap();
    assert!(entry.is_transfer());

    let raw = r#"{"tipo":"transferencia","monto":300.0,"categoria":null,"descripcion":null,"cuenta_origen":"Cash","cuenta_destino":null}"#;
    let entry: AiEntry = serde_json::from_str(raw).unwrap();
    assert!(!entry.is_transfer());
}

#[test]
fn non_positive_amounts_are_rejected() {
    let raw = r#"{"tipo":"gasto","monto":0.0,"categoria":null,"descripcion":null,"cuenta_origen":null,"cuenta_destino":null}"#;
    let entry: AiEntry = serde_json::from_str(raw).unwrap();
    assert_eq!(entry.amount(), None);
}
