//! Field rules for product payloads.
//!
//! Both entry points take the raw JSON object and check every field, so a
//! single response lists all violations. Rules:
//!
//! | field         | rule                                                     |
//! |---------------|----------------------------------------------------------|
//! | `name`        | string, trimmed, 1-100 characters                        |
//! | `description` | string or null, at most 500 characters                   |
//! | `price`       | number, greater than 0, rounded to 2 decimals (>= 0.01)  |
//! | `stock`       | integer, at least 0                                      |
//! | `category`    | string, at least 1 character                             |

use axum_helpers::extractors::{ValidatedPayload, json_kind};
use serde_json::{Map, Value};
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

use crate::models::{CreateProduct, UpdateProduct};

pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

type FieldResult<T> = Result<T, ValidationError>;

/// Validate a creation payload.
///
/// `name`, `price`, `stock` and `category` are required; `description` may be
/// absent or null. Unknown keys, including `id` and timestamps, are ignored.
pub fn validate_create(payload: &Map<String, Value>) -> Result<CreateProduct, ValidationErrors> {
    let mut report = Report::default();

    let name = report.required(payload, "name", parse_name);
    let description = match payload.get("description") {
        None => Some(None),
        Some(value) => report.check("description", parse_description(value)),
    };
    let price = report.required(payload, "price", parse_price);
    let stock = report.required(payload, "stock", parse_stock);
    let category = report.required(payload, "category", parse_category);

    match (name, description, price, stock, category) {
        (Some(name), Some(description), Some(price), Some(stock), Some(category))
            if report.is_clean() =>
        {
            Ok(CreateProduct {
                name,
                description,
                price,
                stock,
                category,
            })
        }
        _ => Err(report.errors),
    }
}

/// Validate a partial-update payload.
///
/// Absent keys mean "leave unchanged". An explicit `null` clears
/// `description` and is rejected for every other field.
pub fn validate_update(payload: &Map<String, Value>) -> Result<UpdateProduct, ValidationErrors> {
    let mut report = Report::default();

    let update = UpdateProduct {
        name: report.optional(payload, "name", parse_name),
        description: payload
            .get("description")
            .and_then(|value| report.check("description", parse_description(value))),
        price: report.optional(payload, "price", parse_price),
        stock: report.optional(payload, "stock", parse_stock),
        category: report.optional(payload, "category", parse_category),
    };

    if report.is_clean() {
        Ok(update)
    } else {
        Err(report.errors)
    }
}

impl ValidatedPayload for CreateProduct {
    fn from_payload(payload: &Map<String, Value>) -> Result<Self, ValidationErrors> {
        validate_create(payload)
    }
}

impl ValidatedPayload for UpdateProduct {
    fn from_payload(payload: &Map<String, Value>) -> Result<Self, ValidationErrors> {
        validate_update(payload)
    }
}

/// Accumulates violations across fields.
#[derive(Default)]
struct Report {
    errors: ValidationErrors,
}

impl Report {
    fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    fn check<T>(&mut self, field: &'static str, result: FieldResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.errors.add(field, error);
                None
            }
        }
    }

    fn required<T>(
        &mut self,
        payload: &Map<String, Value>,
        field: &'static str,
        parse: fn(&Value) -> FieldResult<T>,
    ) -> Option<T> {
        match payload.get(field) {
            None => self.check(
                field,
                Err(violation("required", format!("{} is required", field))),
            ),
            Some(value) => self.check(field, parse(value)),
        }
    }

    fn optional<T>(
        &mut self,
        payload: &Map<String, Value>,
        field: &'static str,
        parse: fn(&Value) -> FieldResult<T>,
    ) -> Option<T> {
        payload
            .get(field)
            .and_then(|value| self.check(field, parse(value)))
    }
}

fn violation(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

fn type_mismatch(field: &str, expected: &str, found: &Value) -> ValidationError {
    violation(
        "type",
        format!("{} must be {}, found {}", field, expected, json_kind(found)),
    )
}

fn parse_name(value: &Value) -> FieldResult<String> {
    let Value::String(raw) = value else {
        return Err(type_mismatch("name", "a string", value));
    };

    let name = raw.trim();
    if name.is_empty() {
        return Err(violation("blank", "name must not be blank".to_string()));
    }
    if name.chars().count() > NAME_MAX_CHARS {
        return Err(violation(
            "length",
            format!("name must be at most {} characters", NAME_MAX_CHARS),
        ));
    }

    Ok(name.to_string())
}

fn parse_description(value: &Value) -> FieldResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(description) if description.chars().count() > DESCRIPTION_MAX_CHARS => {
            Err(violation(
                "length",
                format!(
                    "description must be at most {} characters",
                    DESCRIPTION_MAX_CHARS
                ),
            ))
        }
        Value::String(description) => Ok(Some(description.clone())),
        other => Err(type_mismatch("description", "a string or null", other)),
    }
}

fn parse_price(value: &Value) -> FieldResult<f64> {
    let Some(price) = value.as_f64() else {
        return Err(type_mismatch("price", "a number", value));
    };

    if price <= 0.0 {
        return Err(violation(
            "range",
            "price must be greater than 0".to_string(),
        ));
    }

    let rounded = round_to_cents(price);
    if !rounded.is_finite() {
        return Err(violation("range", "price is too large".to_string()));
    }
    if rounded <= 0.0 {
        return Err(violation(
            "range",
            "price must be at least 0.01 after rounding to 2 decimals".to_string(),
        ));
    }

    Ok(rounded)
}

fn parse_stock(value: &Value) -> FieldResult<i64> {
    let Value::Number(number) = value else {
        return Err(type_mismatch("stock", "an integer", value));
    };

    let stock = if let Some(stock) = number.as_i64() {
        stock
    } else if number.is_u64() {
        return Err(violation("range", "stock is too large".to_string()));
    } else {
        match number.as_f64() {
            Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => f as i64,
            _ => return Err(type_mismatch("stock", "an integer", value)),
        }
    };

    if stock < 0 {
        return Err(violation(
            "range",
            "stock must be greater than or equal to 0".to_string(),
        ));
    }

    Ok(stock)
}

fn parse_category(value: &Value) -> FieldResult<String> {
    match value {
        Value::String(category) if category.is_empty() => Err(violation(
            "length",
            "category must not be empty".to_string(),
        )),
        Value::String(category) => Ok(category.clone()),
        other => Err(type_mismatch("category", "a string", other)),
    }
}

/// Round half away from zero to 2 decimal places.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
