use askama::Template;
use axum::response::{Html, IntoResponse, Response};
use service_core::error::AppError;

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
    pub status: u16,
}

/// Error returned by the HTML handlers; rendered as the error page.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        PageError(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = err.status_code();

        if status.is_server_error() {
            tracing::error!(error = %err, status = status.as_u16(), "Request failed");
        } else {
            tracing::debug!(error = %err, status = status.as_u16(), "Request rejected");
        }

        let message = err.public_message();
        let page = ErrorTemplate {
            title: message.clone(),
            message,
            status: status.as_u16(),
        };

        match page.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                (status, err.public_message()).into_response()
            }
        }
    }
}
