//! End-to-end order flow tests
//!
//! Library-level flow (load form -> review -> prepare submission) plus a few
//! runs of the `shipway` binary with an isolated config directory.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde_json::Value;
use shipway_app::app::QuoteService;
use shipway_app::config::Config;
use shipway_app::repository::load_pricing;
use shipway_domain::model::{FormField, PricingTable};
use shipway_domain::service::{FeeError, FieldError};
use shipway_infra::image_prep::prepare_image_set;
use shipway_infra::order_loader::load_order_form;
use shipway_infra::pricing_loader::write_pricing_file;
use shipway_infra::quote_csv::load_quote_requests;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const ORDER_JSON: &str = r#"{
    "pickup_address": "123 Nguyen Van Linh, District 7, HCMC",
    "pickup_lat": 10.7329269,
    "pickup_lng": 106.7172715,
    "pickup_contact_name": "Nguyen Van A",
    "pickup_contact_phone": "0912345678",
    "pickup_note": "Call 15 minutes ahead",
    "dropoff_address": "456 Le Van Viet, District 9, HCMC",
    "dropoff_lat": 10.8231271,
    "dropoff_lng": 106.7574535,
    "dropoff_contact_name": "Tran Thi B",
    "dropoff_contact_phone": "0987654321",
    "product_name": "Clothing",
    "weight": 5.5,
    "length": 50,
    "width": 30,
    "height": 20,
    "vehicle_type": "bike",
    "note": "Fragile",
    "cod_amount": "500.000"
}"#;

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn write_png(dir: &Path, name: &str) -> PathBuf {
    let img = RgbImage::from_pixel(300, 200, Rgb([20, 120, 220]));
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    let path = dir.join(name);
    std::fs::write(&path, buf).unwrap();
    path
}

fn run_shipway(config_home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_shipway"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({}): {}",
            e,
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

#[test]
fn test_form_to_submission() {
    let dir = TempDir::new().unwrap();
    let order_path = write_file(dir.path(), "order.json", ORDER_JSON);
    let images = vec![
        write_png(dir.path(), "front.png"),
        write_png(dir.path(), "side.png"),
    ];

    let form = load_order_form(&order_path).unwrap();
    let service = QuoteService::new(PricingTable::default());

    let review = service.review(&form);
    assert!(review.is_ready(), "{:?}", review.validation.errors);
    let fee = review.fee.as_ref().unwrap();
    assert_eq!(fee.shipping_fee, 53_000.0);
    assert_eq!(fee.cod_fee, 5_000.0);

    let image_set = prepare_image_set(&images).unwrap();
    let envelope = service
        .prepare_submission(&form, &image_set, "https://api.shipway.test")
        .unwrap();
    assert_eq!(envelope.url, "https://api.shipway.test/api/v1/orders");
    assert_eq!(envelope.images.len(), 2);
    assert_eq!(envelope.images[1].file_name, "product_1.jpg");

    let out = dir.path().join("submission.json");
    envelope.write_to(&out).unwrap();
    let saved: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let fields = saved["fields"].as_array().unwrap();
    let cod = fields.iter().find(|f| f["name"] == "cod_amount").unwrap();
    assert_eq!(cod["value"], "500000");
}

#[test]
fn test_invalid_form_reports_everything() {
    let dir = TempDir::new().unwrap();
    let broken = ORDER_JSON
        .replace("\"0912345678\"", "\"84987654321\"")
        .replace("10.8231271", "123.0")
        .replace("\"Clothing\"", "\"  \"");
    let order_path = write_file(dir.path(), "order.json", &broken);

    let form = load_order_form(&order_path).unwrap();
    let review = QuoteService::new(PricingTable::default()).review(&form);

    assert!(!review.validation.valid);
    let found: Vec<(FormField, FieldError)> = review
        .validation
        .errors
        .iter()
        .map(|v| (v.field, v.error))
        .collect();
    assert_eq!(
        found,
        vec![
            (FormField::PickupContactPhone, FieldError::InvalidPhone),
            (FormField::DropoffLat, FieldError::InvalidLatitude),
            (FormField::ProductName, FieldError::Required),
        ]
    );
    // Latitude 123 cannot be priced either
    assert_eq!(review.fee.unwrap_err(), FeeError::IncompleteInput);
}

#[test]
fn test_batch_with_pricing_override() {
    let dir = TempDir::new().unwrap();
    let pricing_path = dir.path().join("pricing.toml");
    let mut table = PricingTable::default();
    table.policy.cod_fee_cap = 20_000.0;
    write_pricing_file(&pricing_path, &table).unwrap();

    let csv_path = write_file(
        dir.path(),
        "quotes.csv",
        "reference,pickup_lat,pickup_lng,dropoff_lat,dropoff_lng,weight_kg,vehicle_type,cod_amount\n\
         SW-1,10.7769,106.7009,10.7769,106.7009,10,car,6000000\n\
         SW-2,10.7769,106.7009,21.0278,105.8342,35,bike,0\n\
         SW-3,10.7769,106.7009,,105.8342,5,bike,0\n",
    );

    let config = Config {
        pricing_file: Some(pricing_path),
        ..Config::default()
    };
    let service = QuoteService::new(load_pricing(&config).unwrap());
    let outcomes = service.batch(&load_quote_requests(&csv_path).unwrap());

    assert_eq!(outcomes.len(), 3);
    let first = outcomes[0].fee.as_ref().unwrap();
    assert_eq!(first.cod_fee, 20_000.0);
    assert_eq!(first.shipping_fee, 50_000.0);
    assert_eq!(
        outcomes[1].error,
        Some(FeeError::WeightLimitExceeded { limit: 30.0 })
    );
    assert_eq!(outcomes[2].error, Some(FeeError::IncompleteInput));
}

#[test]
fn test_cli_quote_json() {
    let home = TempDir::new().unwrap();
    let output = run_shipway(
        home.path(),
        &[
            "quote",
            "--pickup",
            "10.7769,106.7009",
            "--dropoff",
            "21.0278,105.8342",
            "--weight",
            "20",
            "--vehicle",
            "car",
            "--format",
            "json",
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let value = stdout_json(&output);
    assert_eq!(value["fee"]["shipping_fee"], 5_748_000.0);
    assert_eq!(value["fee"]["vehicle_type"], "car");
}

#[test]
fn test_cli_quote_over_limit_fails() {
    let home = TempDir::new().unwrap();
    let output = run_shipway(
        home.path(),
        &[
            "quote", "--pickup", "10.7769,106.7009", "--dropoff", "21.0278,105.8342",
            "--weight", "35", "--vehicle", "bike", "-f", "json",
        ],
    );
    assert!(!output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["error"]["kind"], "weight_limit_exceeded");
    assert_eq!(value["error"]["limit"], 30.0);
}

#[test]
fn test_cli_validate_exit_codes() {
    let home = TempDir::new().unwrap();
    let good = write_file(home.path(), "good.json", ORDER_JSON);
    let bad = write_file(home.path(), "bad.json", "{}");

    let ok = run_shipway(home.path(), &["validate", good.to_str().unwrap(), "-f", "json"]);
    assert!(ok.status.success());
    assert_eq!(stdout_json(&ok)["valid"], true);

    let rejected = run_shipway(home.path(), &["validate", bad.to_str().unwrap(), "-f", "json"]);
    assert!(!rejected.status.success());
    let value = stdout_json(&rejected);
    assert_eq!(value["valid"], false);
    assert_eq!(value["errors"].as_array().unwrap().len(), 13);
    assert_eq!(value["errors"][0]["field"], "pickup_address");
    assert_eq!(value["errors"][0]["error"], "required");
}

#[test]
fn test_cli_prepare_writes_envelope() {
    let home = TempDir::new().unwrap();
    let order = write_file(home.path(), "order.json", ORDER_JSON);
    let photo = write_png(home.path(), "photo.png");
    let out = home.path().join("envelope.json");

    let output = run_shipway(
        home.path(),
        &[
            "prepare",
            order.to_str().unwrap(),
            "--image",
            photo.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let saved: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(saved["method"], "POST");
    assert_eq!(saved["url"], "http://localhost:8000/api/v1/orders");
    assert_eq!(saved["images"][0]["content_type"], "image/jpeg");
    assert_eq!(saved["quote"]["shipping_fee"], 53_000.0);
}
