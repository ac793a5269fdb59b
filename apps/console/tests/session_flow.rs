//! End-to-end command sessions through the public console API.

use std::io::{Cursor, Write};

use serde_json::{json, Value};
use storefront_console::commands::handle_line;
use storefront_console::run_commands;
use storefront_console::state::{ConfigState, SessionState};
use storefront_core::{DiscountPolicy, PricingPolicy, QuantityPolicy};

fn send(session: &mut SessionState, command: Value) -> Value {
    let response = handle_line(session, &command.to_string());
    serde_json::to_value(response).unwrap()
}

fn data(session: &mut SessionState, command: Value) -> Value {
    let response = send(session, command);
    assert_eq!(response["ok"], true, "command failed: {}", response);
    response["data"].clone()
}

#[test]
fn full_transaction() {
    let mut session = SessionState::new(ConfigState::default());

    let results = data(&mut session, json!({"command": "search_products", "query": "blocks"}));
    assert_eq!(results[0]["id"], "1");

    let draft = data(&mut session, json!({"command": "add_to_cart", "productId": "1"}));
    let blocks_id = draft["items"][0]["id"].as_str().unwrap().to_string();

    data(&mut session, json!({"command": "add_to_cart", "productId": "2"}));
    let draft = data(
        &mut session,
        json!({"command": "set_discount", "itemId": blocks_id, "discount": 100}),
    );
    assert_eq!(draft["totals"]["total"], 249_900);
    assert_eq!(draft["formattedTotal"], "₹2,499.00");

    data(&mut session, json!({"command": "increment_quantity", "itemId": blocks_id}));
    let draft = data(
        &mut session,
        json!({"command": "set_discount", "itemId": blocks_id, "discount": "10"}),
    );
    // 1299 × 2 × 0.9 = 2338.20, plus 2499.
    assert_eq!(draft["totals"]["total"], 483_720);
    assert_eq!(draft["canSubmit"], false);

    let phone = data(&mut session, json!({"command": "set_customer_phone", "phone": "9876543210"}));
    assert_eq!(phone["suggestions"][0]["name"], "Rahul Sharma");

    data(&mut session, json!({"command": "set_customer_name", "name": "Rahul"}));
    data(&mut session, json!({"command": "toggle_label", "label": "vip"}));
    let report = data(&mut session, json!({"command": "validate_draft"}));
    assert_eq!(report["valid"], true);

    let submitted = data(&mut session, json!({"command": "submit_transaction"}));
    assert_eq!(submitted["formattedTotal"], "₹4,837.20");
    assert_eq!(submitted["transaction"]["customer"]["labels"], json!(["vip"]));
    assert_eq!(submitted["transaction"]["items"].as_array().unwrap().len(), 2);

    let draft = data(&mut session, json!({"command": "get_draft"}));
    assert_eq!(draft["items"], json!([]));
}

#[test]
fn errors_leave_draft_untouched() {
    let config = ConfigState {
        pricing: PricingPolicy {
            quantity: QuantityPolicy::Reject,
            discount: DiscountPolicy::Reject,
        },
        ..ConfigState::default()
    };
    let mut session = SessionState::new(config);

    let draft = data(&mut session, json!({"command": "add_to_cart", "productId": "2"}));
    let item_id = draft["items"][0]["id"].as_str().unwrap().to_string();

    let response = send(
        &mut session,
        json!({"command": "update_quantity", "itemId": item_id, "quantity": 0}),
    );
    assert_eq!(response["error"]["code"], "VALIDATION_ERROR");

    let response = send(
        &mut session,
        json!({"command": "set_discount", "itemId": item_id, "discount": 101}),
    );
    assert_eq!(response["error"]["code"], "VALIDATION_ERROR");

    let response = send(
        &mut session,
        json!({"command": "update_quantity", "itemId": item_id, "quantity": 1000}),
    );
    assert_eq!(
        response["error"]["message"],
        "Quantity 1000 exceeds maximum allowed (999)"
    );

    let draft = data(&mut session, json!({"command": "get_draft"}));
    assert_eq!(draft["items"][0]["quantity"], 1);
    assert_eq!(draft["items"][0]["discountPercent"], 0);
    assert_eq!(draft["totals"]["total"], 249_900);
}

#[test]
fn submission_errors_in_order() {
    let mut session = SessionState::new(ConfigState::default());

    let response = send(&mut session, json!({"command": "submit_transaction"}));
    assert_eq!(
        response["error"]["message"],
        "Add at least one product to the transaction"
    );

    data(&mut session, json!({"command": "add_to_cart", "productId": "1"}));
    let response = send(&mut session, json!({"command": "submit_transaction"}));
    assert_eq!(response["error"]["message"], "Customer phone number is required");

    data(&mut session, json!({"command": "set_customer_phone", "phone": "9876543210"}));
    let response = send(&mut session, json!({"command": "submit_transaction"}));
    assert_eq!(response["error"]["message"], "Customer name is required");
}

#[test]
fn new_product_can_be_sold() {
    let mut session = SessionState::new(ConfigState::default());

    let response = send(
        &mut session,
        json!({"command": "create_product", "form": {"name": "Kite"}}),
    );
    assert_eq!(response["ok"], false);
    assert!(response["error"]["fields"]["mrp"].is_string());

    let entry = data(
        &mut session,
        json!({
            "command": "create_product",
            "form": {
                "name": "Kite",
                "category": "Toys",
                "sku": "KITE-01",
                "mrp": "250",
                "ageGroup": "9-12 years",
                "gender": "All",
                "description": "k".repeat(120)
            }
        }),
    );
    assert_eq!(entry["unitPrice"], 25_000);

    let draft = data(
        &mut session,
        json!({"command": "add_to_cart", "productId": entry["id"], "quantity": 4}),
    );
    assert_eq!(draft["formattedTotal"], "₹1,000.00");
}

#[test]
fn price_ceiling_is_enforced() {
    let mut session = SessionState::new(ConfigState::default());
    let form = |mrp: &str| {
        json!({
            "name": "Gold Rocking Horse",
            "category": "Toys",
            "sku": "HORSE-AU",
            "mrp": mrp,
            "ageGroup": "2-4 years",
            "gender": "All",
            "description": "h".repeat(100)
        })
    };

    let response = send(
        &mut session,
        json!({"command": "create_product", "form": form("90000000000000000")}),
    );
    assert_eq!(response["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(
        response["error"]["fields"]["mrp"],
        "MRP cannot exceed ₹1,00,00,00,000.00"
    );

    let entry = data(
        &mut session,
        json!({"command": "create_product", "form": form("1000000000")}),
    );
    let draft = data(
        &mut session,
        json!({"command": "add_to_cart", "productId": entry["id"], "quantity": 999}),
    );
    assert_eq!(draft["totals"]["total"], 99_900_000_000_000_i64);
    assert_eq!(draft["formattedTotal"], "₹9,99,00,00,00,000.00");
}

#[test]
fn demo_script_runs_clean() {
    let mut session = SessionState::new(ConfigState::default());
    let script = include_str!("../scripts/demo.jsonl");
    let mut output = Vec::new();

    let stats = run_commands(&mut session, Cursor::new(script), &mut output, false).unwrap();

    assert_eq!(stats.commands, 9);
    assert_eq!(stats.failures, 0);

    let text = String::from_utf8(output).unwrap();
    let responses: Vec<Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    // 1299 + 2 × 2499
    assert_eq!(responses[7]["data"]["formattedTotal"], "₹6,297.00");
}

#[test]
fn config_file_drives_policy() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "store_name = \"Little Steps\"\n\n[pricing]\nquantity = \"zero_removes\""
    )
    .unwrap();

    let config = ConfigState::from_file(file.path()).unwrap();
    let mut session = SessionState::new(config);

    let draft = data(&mut session, json!({"command": "add_to_cart", "productId": "1"}));
    let item_id = draft["items"][0]["id"].as_str().unwrap().to_string();

    let draft = data(
        &mut session,
        json!({"command": "decrement_quantity", "itemId": item_id}),
    );
    assert_eq!(draft["items"], json!([]));

    let config = data(&mut session, json!({"command": "get_config"}));
    assert_eq!(config["store_name"], "Little Steps");
}
