//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "error": "An unexpected error occurred",
        "code": 5001
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - body is not a JSON object",
    content_type = "application/json",
    example = json!({
        "error": "Request body must be a valid JSON object: expected value at line 1 column 1",
        "code": 1002
    })
)]
pub struct MalformedJsonResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unprocessable Entity - field validation failed",
    content_type = "application/json",
    example = json!({
        "error": "Validation error",
        "code": 1001,
        "details": {
            "validation_errors": [{
                "field": "price",
                "code": "range",
                "message": "price must be greater than 0"
            }]
        }
    })
)]
pub struct ValidationFailedResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "error": "Product 0b7c1c9e-51a4-4f5e-9f1e-7a8a3c2d1e00 not found",
        "code": 1004
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);
