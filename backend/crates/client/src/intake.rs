//! Contact Form and Career Application Calls
//!
//! Listing and status changes need a logged-in session; records come back
//! as raw JSON.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::ClientResult;
use crate::session::SessionController;
use crate::types::{CareerApplication, ContactMessage, MessageBody};

#[derive(Serialize)]
struct StatusBody<'a> {
    status: &'a str,
}

impl SessionController {
    pub async fn submit_contact(&self, message: &ContactMessage) -> ClientResult<String> {
        let body: MessageBody = self.request(Method::POST, "/contact", Some(message)).await?;
        Ok(body.message)
    }

    pub async fn contacts(&self) -> ClientResult<Vec<Value>> {
        let body: Value = self.request::<_, ()>(Method::GET, "/contact", None).await?;
        Ok(list(body, "contacts"))
    }

    pub async fn update_contact_status(&self, id: &str, status: &str) -> ClientResult<Value> {
        let body: Value = self
            .request(
                Method::PUT,
                &format!("/contact/{id}"),
                Some(&StatusBody { status }),
            )
            .await?;
        Ok(body["contact"].clone())
    }

    pub async fn apply(&self, application: &CareerApplication) -> ClientResult<String> {
        let body: MessageBody = self
            .request(Method::POST, "/career/apply", Some(application))
            .await?;
        Ok(body.message)
    }

    pub async fn applications(&self) -> ClientResult<Vec<Value>> {
        let body: Value = self
            .request::<_, ()>(Method::GET, "/career/applications", None)
            .await?;
        Ok(list(body, "applications"))
    }

    pub async fn update_application_status(&self, id: &str, status: &str) -> ClientResult<Value> {
        let body: Value = self
            .request(
                Method::PUT,
                &format!("/career/application/{id}"),
                Some(&StatusBody { status }),
            )
            .await?;
        Ok(body["application"].clone())
    }
}

fn list(mut body: Value, key: &str) -> Vec<Value> {
    match body[key].take() {
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}
