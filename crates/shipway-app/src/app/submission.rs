//! Packaging a validated order for the order-creation API
//!
//! The API takes a multipart form: one text part per field, then one
//! `images` part per product photo. The envelope records that request
//! without sending it.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shipway_domain::model::{FormField, ImageSet, LocationInfo, OrderForm, OrderInput};
use shipway_domain::service::FeeBreakdown;
use shipway_types::Result;
use std::path::Path;
use uuid::Uuid;

/// Path of the order-creation endpoint
pub const ORDERS_ENDPOINT: &str = "/api/v1/orders";

/// One multipart text field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionField {
    pub name: String,
    pub value: String,
}

/// One multipart image part
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePart {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Multipart body for the order API
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPayload {
    pub fields: Vec<SubmissionField>,
    pub images: Vec<ImagePart>,
}

impl SubmissionPayload {
    /// Build the body for a validated order.
    ///
    /// Coordinates, weight and dimensions go out as the trimmed text that was
    /// typed into `form` (`5.50` stays `5.50`); COD goes out as plain digits.
    pub fn build(form: &OrderForm, order: &OrderInput, images: &ImageSet) -> Self {
        let mut fields = Vec::new();
        let pickup_coords = (FormField::PickupLat, FormField::PickupLng);
        let dropoff_coords = (FormField::DropoffLat, FormField::DropoffLng);
        push_location(&mut fields, form, "pickup", pickup_coords, &order.pickup);
        push_location(&mut fields, form, "dropoff", dropoff_coords, &order.dropoff);

        push(&mut fields, "product_name", order.product.name.clone());
        push_typed(&mut fields, form, FormField::Weight);
        // Dimensions are sent only when given
        for field in [FormField::Length, FormField::Width, FormField::Height] {
            if !form.value(field).trim().is_empty() {
                push_typed(&mut fields, form, field);
            }
        }

        push(&mut fields, "vehicle_type", order.vehicle_type.as_str().to_string());
        push(&mut fields, "note", order.note.clone().unwrap_or_default());
        push(&mut fields, "cod_amount", format!("{:.0}", order.cod_amount));

        let images = images
            .iter()
            .enumerate()
            .map(|(i, image)| ImagePart {
                file_name: ImageSet::file_name(i),
                bytes: image.bytes.clone(),
            })
            .collect();

        Self { fields, images }
    }

    /// Value of a text field
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

fn push_location(
    fields: &mut Vec<SubmissionField>,
    form: &OrderForm,
    prefix: &str,
    (lat, lng): (FormField, FormField),
    location: &LocationInfo,
) {
    push(fields, &format!("{}_address", prefix), location.address.clone());
    push_typed(fields, form, lat);
    push_typed(fields, form, lng);
    push(fields, &format!("{}_contact_name", prefix), location.contact_name.clone());
    push(fields, &format!("{}_contact_phone", prefix), location.contact_phone.clone());
    push(
        fields,
        &format!("{}_note", prefix),
        location.note.clone().unwrap_or_default(),
    );
}

fn push_typed(fields: &mut Vec<SubmissionField>, form: &OrderForm, field: FormField) {
    push(fields, field.name(), form.value(field).trim().to_string());
}

fn push(fields: &mut Vec<SubmissionField>, name: &str, value: String) {
    fields.push(SubmissionField {
        name: name.to_string(),
        value,
    });
}

/// Image part with its bytes in base64
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedImage {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub content_base64: String,
}

/// Prepared order submission, ready to hand to an API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionEnvelope {
    pub request_id: Uuid,
    pub prepared_at: DateTime<Utc>,
    pub method: String,
    pub url: String,
    pub fields: Vec<SubmissionField>,
    pub images: Vec<EncodedImage>,
    /// Client-side fee estimate shown to the user when confirming
    pub quote: FeeBreakdown,
}

impl SubmissionEnvelope {
    pub fn new(payload: SubmissionPayload, quote: FeeBreakdown, api_base_url: &str) -> Self {
        let images = payload
            .images
            .into_iter()
            .map(|part| EncodedImage {
                field: "images".to_string(),
                file_name: part.file_name,
                content_type: "image/jpeg".to_string(),
                content_base64: STANDARD.encode(&part.bytes),
            })
            .collect();

        Self {
            request_id: Uuid::new_v4(),
            prepared_at: Utc::now(),
            method: "POST".to_string(),
            url: format!("{}{}", api_base_url.trim_end_matches('/'), ORDERS_ENDPOINT),
            fields: payload.fields,
            images,
            quote,
        }
    }

    /// Write the envelope as pretty JSON
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
