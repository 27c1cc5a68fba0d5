//! Order mail over HTTP.

use async_trait::async_trait;
use bijou_commerce::checkout::{NotificationStatus, OrderNotification, OrderNotifier};
use gloo_net::http::Request;

/// POSTs the order as JSON to the shop's mail endpoint.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    url: String,
}

impl HttpNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait(?Send)]
impl OrderNotifier for HttpNotifier {
    async fn notify(&self, notification: &OrderNotification) -> NotificationStatus {
        if self.url.is_empty() {
            return NotificationStatus::Failed {
                reason: "no notification endpoint configured".to_string(),
            };
        }

        let request = match Request::post(&self.url).json(notification) {
            Ok(request) => request,
            Err(e) => {
                return NotificationStatus::Failed {
                    reason: e.to_string(),
                }
            }
        };

        match request.send().await {
            Ok(response) if response.ok() => NotificationStatus::Delivered {
                status: response.status(),
            },
            Ok(response) => NotificationStatus::Failed {
                reason: format!("{} {}", response.status(), response.status_text()),
            },
            Err(e) => NotificationStatus::Failed {
                reason: e.to_string(),
            },
        }
    }
}
