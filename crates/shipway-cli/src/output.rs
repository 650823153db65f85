//! Output formatting module

use serde_json::json;
use shipway_app::app::{format_vnd, generate_batch_report, OrderReview, QuoteOutcome};
use shipway_domain::model::PricingTable;
use shipway_domain::service::{FeeBreakdown, FeeError};
use shipway_types::{OutputFormat, Result, VehicleType};

fn fee_json(fee: &std::result::Result<FeeBreakdown, FeeError>) -> serde_json::Value {
    match fee {
        Ok(breakdown) => json!({ "fee": breakdown }),
        Err(e) => json!({ "error": e, "message": e.to_string() }),
    }
}

pub fn output_quote(
    output_format: OutputFormat,
    fee: &std::result::Result<FeeBreakdown, FeeError>,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&fee_json(fee))?);
        return Ok(());
    }

    match fee {
        Ok(breakdown) => print_breakdown(breakdown),
        Err(e) => println!("\n{}", e),
    }
    Ok(())
}

fn print_breakdown(fee: &FeeBreakdown) {
    println!("\nFee Estimate");
    println!("============");
    println!("Vehicle:          {} ({})", fee.vehicle_type, fee.vehicle_type.label());
    println!("Distance:         {:.2} km", fee.distance_km);
    println!("\n--- Breakdown ---");
    println!("Base fee:         {} VND", format_vnd(fee.base_fee));
    println!("Distance fee:     {} VND", format_vnd(fee.distance_fee));
    if fee.weight_surcharge > 0.0 {
        println!("Weight surcharge: {} VND", format_vnd(fee.weight_surcharge));
    }
    if fee.cod_fee > 0.0 {
        println!("COD fee:          {} VND", format_vnd(fee.cod_fee));
    }
    println!("-----------------");
    println!("Shipping fee:     {} VND", format_vnd(fee.shipping_fee));
    if fee.total_amount != fee.shipping_fee {
        println!("Total with COD:   {} VND", format_vnd(fee.total_amount));
    }
}

pub fn output_review(output_format: OutputFormat, review: &OrderReview) -> Result<()> {
    if output_format == OutputFormat::Json {
        let value = json!({
            "valid": review.validation.valid,
            "errors": review.validation.errors,
            "order": review.order,
            "preview": fee_json(&review.fee),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("\nOrder Form Check");
    println!("================");
    if review.validation.valid {
        println!("All fields valid.");
    } else {
        println!("{} problem(s) found:", review.validation.errors.len());
        for violation in &review.validation.errors {
            println!("  {:<24} {}", violation.field.name(), violation.error);
        }
    }

    match &review.fee {
        Ok(fee) => print_breakdown(fee),
        Err(e) => println!("\nFee preview: {}", e),
    }
    Ok(())
}

pub fn output_batch(output_format: OutputFormat, outcomes: &[QuoteOutcome]) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(outcomes)?);
    } else {
        print!("{}", generate_batch_report(outcomes));
    }
    Ok(())
}

pub fn output_suggestion(
    output_format: OutputFormat,
    weight_kg: f64,
    vehicle: Option<VehicleType>,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let value = json!({ "weight_kg": weight_kg, "vehicle_type": vehicle });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match vehicle {
        Some(v) => println!("{} kg -> {} ({})", weight_kg, v, v.label()),
        None => println!("{} kg: no vehicle can carry this parcel", weight_kg),
    }
    Ok(())
}

pub fn output_pricing(output_format: OutputFormat, table: &PricingTable) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(table)?);
        return Ok(());
    }

    println!("\nPricing Table (VND)");
    println!("===================");
    println!(
        "{:<14} {:>10} {:>10} {:>10} {:>12}",
        "Vehicle", "Base", "Per km", "Max kg", "Surcharge/kg"
    );
    println!("{}", "-".repeat(60));
    for vehicle in VehicleType::ALL {
        if let Some(p) = table.get(vehicle) {
            println!(
                "{:<14} {:>10} {:>10} {:>10} {:>12}",
                vehicle.as_str(),
                format_vnd(p.base_fee),
                format_vnd(p.per_km),
                p.max_weight_kg,
                format_vnd(p.weight_surcharge_per_kg)
            );
        }
    }
    let policy = &table.policy;
    println!();
    println!("Surcharge above:  {} kg (not applied to bike)", policy.surcharge_threshold_kg);
    println!(
        "COD fee:          {}% capped at {} VND",
        policy.cod_fee_rate * 100.0,
        format_vnd(policy.cod_fee_cap)
    );
    println!("Rounded up to:    {} VND", format_vnd(policy.rounding_step));
    Ok(())
}
