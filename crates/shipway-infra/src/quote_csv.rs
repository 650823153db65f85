//! CSV loader for batch quote requests
//!
//! Expected header:
//! reference, pickup_lat, pickup_lng, dropoff_lat, dropoff_lng, weight_kg, vehicle_type, cod_amount
//!
//! Malformed values load as missing so one bad row never stops a batch.
//! COD is kept as text: blank means no COD, while a malformed amount must
//! fail the row rather than quote it without a COD fee.

use serde::{Deserialize, Serialize};
use shipway_domain::service::{CodInput, FeeQuery};
use shipway_types::{Error, Result, VehicleType};
use std::io::Read;
use std::path::Path;

/// One row of a quote request file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteRequestRow {
    pub reference: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub pickup_lat: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub pickup_lng: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub dropoff_lat: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub dropoff_lng: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub weight_kg: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub vehicle_type: Option<VehicleType>,
    pub cod_amount: String,
}

impl QuoteRequestRow {
    pub fn to_query(&self) -> FeeQuery {
        FeeQuery {
            pickup_lat: self.pickup_lat,
            pickup_lng: self.pickup_lng,
            dropoff_lat: self.dropoff_lat,
            dropoff_lng: self.dropoff_lng,
            weight_kg: self.weight_kg,
            vehicle_type: self.vehicle_type,
            cod_amount: CodInput::parse(&self.cod_amount),
        }
    }
}

/// Load quote requests from a CSV file
pub fn load_quote_requests(path: &Path) -> Result<Vec<QuoteRequestRow>> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let file = std::fs::File::open(path)?;
    read_quote_requests(file)
}

/// Read quote requests from any CSV source
pub fn read_quote_requests<R: Read>(source: R) -> Result<Vec<QuoteRequestRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<QuoteRequestRow>().enumerate() {
        match record {
            Ok(mut row) => {
                if row.reference.is_empty() {
                    row.reference = row_label(index);
                }
                rows.push(row);
            }
            Err(e) if e.is_io_error() => return Err(Error::Csv(e.to_string())),
            Err(_) => rows.push(QuoteRequestRow {
                reference: row_label(index),
                ..Default::default()
            }),
        }
    }
    Ok(rows)
}

fn row_label(index: usize) -> String {
    format!("row {}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "reference,pickup_lat,pickup_lng,dropoff_lat,dropoff_lng,weight_kg,vehicle_type,cod_amount\n";

    #[test]
    fn test_read_rows() {
        let data = format!(
            "{}SW-1,10.7769,106.7009,21.0278,105.8342,20,car,0\nSW-2, 10.73, 106.71, 10.82, 106.75, 5.5, bike, 500000\n",
            HEADER
        );
        let rows = read_quote_requests(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].reference, "SW-1");
        assert_eq!(rows[0].vehicle_type, Some(VehicleType::Car));
        assert_eq!(rows[1].weight_kg, Some(5.5));
        assert_eq!(rows[1].to_query().cod_amount, CodInput::Amount(500_000.0));
    }

    #[test]
    fn test_bad_values_become_missing() {
        let data = format!("{}SW-3,abc,106.7,21.0,105.8,20,rocket,\n", HEADER);
        let rows = read_quote_requests(data.as_bytes()).unwrap();
        assert_eq!(rows[0].pickup_lat, None);
        assert_eq!(rows[0].pickup_lng, Some(106.7));
        assert_eq!(rows[0].vehicle_type, None);
        assert_eq!(rows[0].to_query().cod_amount, CodInput::Empty);
    }

    #[test]
    fn test_short_row_and_blank_reference() {
        let data = format!("{},10.7,106.7\n", HEADER);
        let rows = read_quote_requests(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].reference, "row 1");
        assert_eq!(rows[0].pickup_lat, Some(10.7));
        assert_eq!(rows[0].weight_kg, None);
        assert_eq!(rows[0].to_query().vehicle_type, None);
    }

    #[test]
    fn test_cod_text_kept_for_parsing() {
        let data = format!(
            "{}SW-4,10.7,106.7,10.8,106.7,5,bike,1.000.000\nSW-5,10.7,106.7,10.8,106.7,5,bike,abc\n",
            HEADER
        );
        let rows = read_quote_requests(data.as_bytes()).unwrap();
        assert_eq!(rows[0].cod_amount, "1.000.000");
        assert_eq!(rows[0].to_query().cod_amount, CodInput::Amount(1_000_000.0));
        assert_eq!(rows[1].to_query().cod_amount, CodInput::Malformed);
    }
}
