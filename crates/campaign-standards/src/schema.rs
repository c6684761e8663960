//! The standard analytics schema every upload is mapped onto.
//!
//! The schema is static and versioned: field names are unique and the
//! declaration order below is the order used when reporting missing fields.

use campaign_model::{CanonicalField, FieldType};

/// Version of the built-in canonical schema.
pub const SCHEMA_VERSION: &str = "1.0";

const FIELDS: [(&str, FieldType, bool, &str); 15] = [
    ("date", FieldType::String, true, "Reporting date of the row"),
    ("spend", FieldType::Number, false, "Amount spent"),
    ("impressions", FieldType::Number, false, "Number of impressions"),
    ("clicks", FieldType::Number, false, "Number of clicks"),
    ("conversions", FieldType::Number, false, "Number of conversions"),
    ("revenue", FieldType::Number, false, "Revenue attributed to the row"),
    ("campaign_id", FieldType::String, false, "Campaign identifier"),
    ("adset_id", FieldType::String, false, "Ad set identifier"),
    ("ad_id", FieldType::String, false, "Ad identifier"),
    ("ctr", FieldType::Number, false, "Click-through rate"),
    ("cpm", FieldType::Number, false, "Cost per thousand impressions"),
    ("cpc", FieldType::Number, false, "Cost per click"),
    ("cpa", FieldType::Number, false, "Cost per acquisition"),
    ("cvr", FieldType::Number, false, "Conversion rate"),
    ("roas", FieldType::Number, false, "Return on ad spend"),
];

/// Build the canonical schema in declaration order.
pub fn canonical_schema() -> Vec<CanonicalField> {
    FIELDS
        .iter()
        .map(|(name, field_type, required, description)| {
            CanonicalField::new(*name, *field_type, *required, *description)
        })
        .collect()
}

/// Look up a field by exact name.
pub fn find_field<'a>(schema: &'a [CanonicalField], name: &str) -> Option<&'a CanonicalField> {
    schema.iter().find(|field| field.name == name)
}

/// Required fields in declaration order.
pub fn required_fields(schema: &[CanonicalField]) -> Vec<&CanonicalField> {
    schema.iter().filter(|field| field.required).collect()
}
