use actix_web::{http::StatusCode, HttpResponse, HttpResponseBuilder};
use gp_error::Error;
use serde::Serialize;

pub mod module;
pub mod record;
pub mod search;

#[derive(Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorRes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pagination: Option<PaginationRes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

impl Response {
    pub fn data<T: Serialize>(
        status_code: &StatusCode,
        pagination: &Option<PaginationRes>,
        data: T,
    ) -> HttpResponse {
        match serde_json::to_value(data) {
            Ok(data) => HttpResponseBuilder::new(*status_code).json(Self {
                error: None,
                pagination: *pagination,
                data: Some(data),
            }),
            Err(err) => {
                gp_log::error(None, &err);
                Self::error(&Error::InternalServerError(err.to_string()))
            }
        }
    }

    pub fn error(err: &Error) -> HttpResponse {
        let status_code = match err {
            Error::BadRequest(_) => &StatusCode::BAD_REQUEST,
            Error::NotFound(_) => &StatusCode::NOT_FOUND,
            Error::InternalServerError(_) => &StatusCode::INTERNAL_SERVER_ERROR,
        };

        Self::error_raw(status_code, err.message())
    }

    pub fn error_raw(status_code: &StatusCode, message: &str) -> HttpResponse {
        if status_code.is_server_error() {
            gp_log::error(None, message);
        } else {
            gp_log::debug(None, message);
        }

        HttpResponseBuilder::new(*status_code).json(Self {
            error: Some(ErrorRes {
                status: match status_code.canonical_reason() {
                    Some(status_code) => status_code.to_owned(),
                    None => "Unknown".to_owned(),
                },
                message: message.to_owned(),
            }),
            pagination: None,
            data: None,
        })
    }
}

#[derive(Serialize)]
pub struct ErrorRes {
    status: String,
    message: String,
}

#[derive(Serialize, Clone, Copy)]
pub struct PaginationRes {
    count: usize,
    total: usize,
}

impl PaginationRes {
    pub fn new(count: &usize, total: &usize) -> Self {
        Self {
            count: *count,
            total: *total,
        }
    }
}
