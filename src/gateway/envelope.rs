//! JSON envelope conventions shared by every endpoint.
//!
//! Success: `{ "success": true, "<entity>": {...}, "message": "..." }`
//! Failure: `{ "success": false, "error": ... }`
//!
//! User-facing messages are Arabic; internal causes go to the log only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::{json, Value};

pub mod messages {
    pub const SERVER_MISCONFIGURED: &str = "الخدمة غير مهيأة بشكل صحيح، يرجى المحاولة لاحقاً";
    pub const UNAUTHORIZED: &str = "غير مصرح لك بالوصول، يرجى تسجيل الدخول";
    pub const BACKEND_UNREACHABLE: &str = "تعذر الاتصال بالخادم، يرجى المحاولة لاحقاً";
    pub const INVALID_PAYLOAD: &str = "حدث خطأ أثناء معالجة الطلب، تأكد من صحة البيانات المدخلة";

    pub const BOOKING_CREATED: &str = "تم إنشاء الحجز بنجاح وسيتم التواصل معك قريباً";
    pub const CAMPAIGN_CREATED: &str = "تم إطلاق الحملة بنجاح";
    pub const LEAD_CREATED: &str = "تم تسجيل العميل المحتمل بنجاح";
    pub const TICKET_CREATED: &str = "تم فتح تذكرة الدعم بنجاح";
    pub const PAYMENT_CREATED: &str = "تم إنشاء طلب الدفع بنجاح";

    pub const LOGGED_OUT: &str = "تم تسجيل الخروج بنجاح";
}

/// Success envelope carrying a synthesized entity under its own key
pub fn entity_success(entity_key: &str, entity: Value, message: &str) -> Response {
    let mut body = serde_json::Map::new();
    body.insert("success".to_string(), json!(true));
    body.insert(entity_key.to_string(), entity);
    body.insert("message".to_string(), json!(message));
    Json(Value::Object(body)).into_response()
}

/// Failure envelope with a plain message
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({ "success": false, "error": message.into() })),
    )
        .into_response()
}

/// Failure envelope wrapping a structured error body (backend relay)
pub fn error_body_response(status: StatusCode, error: Value) -> Response {
    (status, Json(json!({ "success": false, "error": error }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn entity_success_shape() {
        let response = entity_success("booking", json!({"id": "BKG-1"}), "ok");
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["booking"]["id"], json!("BKG-1"));
        assert_eq!(value["message"], json!("ok"));
    }

    #[tokio::test]
    async fn error_response_shape() {
        let response = error_response(StatusCode::BAD_REQUEST, "bad");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({"success": false, "error": "bad"}));
    }
}
