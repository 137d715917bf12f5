use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::SearchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStyle {
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub style: ToastStyle,
    pub title: String,
    pub message: Option<String>,
}

impl Toast {
    pub fn failure(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            style: ToastStyle::Failure,
            title: title.into(),
            message: Some(message.into()),
        }
    }

    pub fn incorrect_api_key() -> Self {
        Self::failure(
            "Incorrect API Key",
            "Go to Anybox › Preferences › General to copy API key.",
        )
    }
}

/// Presents user-visible messages. Fire and forget.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn show_toast(&self, toast: Toast);
}

/// Receives every failure the client swallows.
#[cfg_attr(test, automock)]
pub trait ErrorHandler: Send + Sync {
    fn handle_error(&self, error: &SearchError);
}

#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn show_toast(&self, toast: Toast) {
        let message = toast.message.as_deref().unwrap_or("");
        match toast.style {
            ToastStyle::Failure => tracing::warn!("{}: {}", toast.title, message),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogErrorHandler;

impl ErrorHandler for LogErrorHandler {
    fn handle_error(&self, error: &SearchError) {
        tracing::error!("Search error: {}", error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_toast_points_at_preferences() {
        let toast = Toast::incorrect_api_key();
        assert_eq!(toast.style, ToastStyle::Failure);
        assert_eq!(toast.title, "Incorrect API Key");
        assert_eq!(
            toast.message.as_deref(),
            Some("Go to Anybox › Preferences › General to copy API key.")
        );
    }
}
