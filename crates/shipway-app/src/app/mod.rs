//! Use cases

pub mod quote_service;
pub mod submission;

pub use quote_service::{format_vnd, generate_batch_report, OrderReview, QuoteOutcome, QuoteService};
pub use submission::{EncodedImage, SubmissionEnvelope, SubmissionField, SubmissionPayload};
