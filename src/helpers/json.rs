use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{web, Error, HttpResponse};
use serde_derive::Serialize;

/// Envelope shared by every endpoint: `{message, id?, item?, list?}`.
#[derive(Serialize, Debug)]
pub struct JsonResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<T>>,
}

#[derive(Debug)]
pub struct JsonResponseBuilder<T> {
    message: String,
    id: Option<String>,
    item: Option<T>,
    list: Option<Vec<T>>,
}

impl<T> JsonResponse<T>
where
    T: serde::Serialize,
{
    pub fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder {
            message: String::new(),
            id: None,
            item: None,
            list: None,
        }
    }
}

impl<T> JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    pub fn set_msg<I: Into<String>>(mut self, msg: I) -> Self {
        self.message = msg.into();
        self
    }

    pub fn set_id<I: ToString>(mut self, id: I) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn set_item(mut self, item: T) -> Self {
        self.item = Some(item);
        self
    }

    pub fn set_list(mut self, list: Vec<T>) -> Self {
        self.list = Some(list);
        self
    }

    fn into_body(self, default_msg: &str) -> JsonResponse<T> {
        let message = if self.message.trim().is_empty() {
            default_msg.to_string()
        } else {
            self.message
        };

        JsonResponse {
            message,
            id: self.id,
            item: self.item,
            list: self.list,
        }
    }

    pub fn ok<I: Into<String>>(self, msg: I) -> web::Json<JsonResponse<T>> {
        web::Json(self.set_msg(msg).into_body("Success"))
    }

    pub fn response<I: Into<String>>(self, status: StatusCode, msg: I) -> HttpResponse {
        let default_msg = status.canonical_reason().unwrap_or("Error");
        HttpResponse::build(status).json(self.set_msg(msg).into_body(default_msg))
    }

    pub fn error<I: Into<String>>(self, status: StatusCode, msg: I) -> Error {
        let response = self.response(status, msg);
        InternalError::from_response(status.to_string(), response).into()
    }

    pub fn bad_request<I: Into<String>>(self, msg: I) -> Error {
        self.error(StatusCode::BAD_REQUEST, msg)
    }

    pub fn form_error<I: Into<String>>(self, msg: I) -> Error {
        self.error(StatusCode::BAD_REQUEST, msg)
    }

    pub fn unauthorized<I: Into<String>>(self, msg: I) -> Error {
        self.error(StatusCode::UNAUTHORIZED, msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::MessageBody;

    #[test]
    fn empty_message_falls_back_to_default() {
        let body = JsonResponse::<String>::build().set_item("x".to_string()).into_body("Success");
        assert_eq!(body.message, "Success");
        assert_eq!(body.item.as_deref(), Some("x"));
        assert!(body.list.is_none());
    }

    #[test]
    fn error_responses_carry_status_and_message() {
        let response = JsonResponse::<String>::build()
            .response(StatusCode::NOT_FOUND, "lesson not found");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = response.into_body().try_into_bytes().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["message"], "lesson not found");
        assert!(value.get("item").is_none());
    }
}
