//! Quoting use cases: order review, live fee preview, batch quotes

use serde::{Deserialize, Serialize};
use shipway_domain::model::{ImageSet, OrderForm, OrderInput, PricingTable};
use shipway_domain::service::{
    estimate_fee, estimate_preview, parse_order, suggest_vehicle, FeeBreakdown, FeeError,
    FeeQuery, ValidationResult,
};
use shipway_infra::quote_csv::QuoteRequestRow;
use shipway_types::{Error, Result, VehicleType};

use super::submission::{SubmissionEnvelope, SubmissionPayload};

/// Validation report and fee preview for one order form
#[derive(Debug, Clone, Serialize)]
pub struct OrderReview {
    pub validation: ValidationResult,
    /// Parsed order, present only when validation passed
    pub order: Option<OrderInput>,
    pub fee: std::result::Result<FeeBreakdown, FeeError>,
}

impl OrderReview {
    /// Valid and priceable; ready to submit
    pub fn is_ready(&self) -> bool {
        self.validation.valid && self.order.is_some() && self.fee.is_ok()
    }
}

/// Result for one batch row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteOutcome {
    pub reference: String,
    #[serde(default)]
    pub fee: Option<FeeBreakdown>,
    #[serde(default)]
    pub error: Option<FeeError>,
}

/// Quoting service bound to one pricing table
#[derive(Debug, Clone)]
pub struct QuoteService {
    table: PricingTable,
}

impl QuoteService {
    pub fn new(table: PricingTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PricingTable {
        &self.table
    }

    /// Fee preview from whatever pricing inputs are present
    pub fn quote(&self, query: &FeeQuery) -> std::result::Result<FeeBreakdown, FeeError> {
        let result = estimate_preview(query, &self.table);
        match &result {
            Ok(fee) => tracing::debug!(
                vehicle = %fee.vehicle_type,
                distance_km = fee.distance_km,
                shipping_fee = fee.shipping_fee,
                "fee estimated"
            ),
            Err(e) => tracing::debug!(reason = %e, "fee not computable"),
        }
        result
    }

    /// Validate the whole form and preview its fee
    pub fn review(&self, form: &OrderForm) -> OrderReview {
        let (validation, order) = match parse_order(form) {
            Ok(order) => {
                let validation = ValidationResult {
                    valid: true,
                    errors: Vec::new(),
                };
                (validation, Some(order))
            }
            Err(report) => (report, None),
        };
        tracing::debug!(
            valid = validation.valid,
            errors = validation.errors.len(),
            "order form validated"
        );

        // The preview runs even when unrelated fields are still invalid.
        let fee = self.quote(&FeeQuery::from_form(form));

        OrderReview {
            validation,
            order,
            fee,
        }
    }

    /// Fee for an already validated order
    pub fn quote_order(&self, order: &OrderInput) -> std::result::Result<FeeBreakdown, FeeError> {
        estimate_fee(
            order.pickup.coordinates(),
            order.dropoff.coordinates(),
            order.product.weight_kg,
            order.vehicle_type,
            order.cod_amount,
            &self.table,
        )
    }

    /// Validate, price, and package an order for submission
    pub fn prepare_submission(
        &self,
        form: &OrderForm,
        images: &ImageSet,
        api_base_url: &str,
    ) -> Result<SubmissionEnvelope> {
        let order = parse_order(form).map_err(|report| {
            let fields: Vec<String> = report
                .errors
                .iter()
                .map(|v| format!("{} ({})", v.field, v.error))
                .collect();
            Error::InvalidOrder(fields.join(", "))
        })?;
        let fee = self
            .quote_order(&order)
            .map_err(|e| Error::InvalidOrder(e.to_string()))?;

        let payload = SubmissionPayload::build(form, &order, images);
        let envelope = SubmissionEnvelope::new(payload, fee, api_base_url);
        tracing::info!(
            request_id = %envelope.request_id,
            images = images.len(),
            shipping_fee = envelope.quote.shipping_fee,
            "order prepared for submission"
        );
        Ok(envelope)
    }

    /// Quote every row; failures are recorded per row
    pub fn batch(&self, rows: &[QuoteRequestRow]) -> Vec<QuoteOutcome> {
        let outcomes: Vec<QuoteOutcome> = rows
            .iter()
            .map(|row| match self.quote(&row.to_query()) {
                Ok(fee) => QuoteOutcome {
                    reference: row.reference.clone(),
                    fee: Some(fee),
                    error: None,
                },
                Err(e) => QuoteOutcome {
                    reference: row.reference.clone(),
                    fee: None,
                    error: Some(e),
                },
            })
            .collect();
        tracing::info!(
            rows = outcomes.len(),
            quoted = outcomes.iter().filter(|o| o.fee.is_some()).count(),
            "batch quoted"
        );
        outcomes
    }

    /// Smallest vehicle able to carry the parcel
    pub fn suggest(&self, weight_kg: f64) -> Option<VehicleType> {
        suggest_vehicle(weight_kg, &self.table)
    }
}

/// Plain-text summary of a batch
pub fn generate_batch_report(outcomes: &[QuoteOutcome]) -> String {
    let total = outcomes.len();
    let quoted: Vec<&FeeBreakdown> = outcomes.iter().filter_map(|o| o.fee.as_ref()).collect();
    let over_limit = outcomes
        .iter()
        .filter(|o| matches!(o.error, Some(FeeError::WeightLimitExceeded { .. })))
        .count();
    let incomplete = outcomes
        .iter()
        .filter(|o| matches!(o.error, Some(FeeError::IncompleteInput)))
        .count();
    let fee_total: f64 = quoted.iter().map(|f| f.shipping_fee).sum();

    let mut report = String::new();
    report.push_str("==================================================\n");
    report.push_str("               Batch Quote Report                 \n");
    report.push_str("==================================================\n\n");
    report.push_str("[Summary]\n");
    report.push_str(&format!("  Total requests:        {}\n", total));
    report.push_str(&format!("  Quoted:                {}\n", quoted.len()));
    report.push_str(&format!("  Over weight limit:     {}\n", over_limit));
    report.push_str(&format!("  Incomplete:            {}\n", incomplete));
    report.push_str(&format!("  Shipping fees total:   {} VND\n", format_vnd(fee_total)));
    report.push('\n');

    if total > 0 {
        report.push_str("[Quotes]\n");
        report.push_str("-".repeat(70).as_str());
        report.push('\n');
        report.push_str(&format!(
            "{:<14} {:<13} {:>10} {:>14} {:>14}\n",
            "Reference", "Vehicle", "Distance", "Fee", "Total"
        ));
        report.push_str("-".repeat(70).as_str());
        report.push('\n');
        for outcome in outcomes {
            match (&outcome.fee, &outcome.error) {
                (Some(fee), _) => report.push_str(&format!(
                    "{:<14} {:<13} {:>7.2} km {:>14} {:>14}\n",
                    truncate_str(&outcome.reference, 13),
                    fee.vehicle_type.as_str(),
                    fee.distance_km,
                    format_vnd(fee.shipping_fee),
                    format_vnd(fee.total_amount)
                )),
                (None, Some(e)) => report.push_str(&format!(
                    "{:<14} {}\n",
                    truncate_str(&outcome.reference, 13),
                    e
                )),
                (None, None) => {}
            }
        }
        report.push('\n');
    }

    report.push_str("==================================================\n");
    report
}

/// Group thousands with `.` the way VND amounts are written
pub fn format_vnd(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}
