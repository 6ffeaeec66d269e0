use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;

use crate::models::email_template::EmailTemplate;

#[derive(Debug, Serialize, Deserialize)]
pub struct SendGridEmail {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendGridPersonalization {
    pub to: Vec<SendGridEmail>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendGridContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendGridRequest {
    pub personalizations: Vec<SendGridPersonalization>,
    pub from: SendGridEmail,
    pub subject: String,
    pub content: Vec<SendGridContent>,
}

#[derive(Debug)]
pub enum EmailError {
    EnvironmentError(String),
    RequestError(String),
    ApiError(String),
    MissingRecipient,
}

impl std::fmt::Display for EmailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmailError::EnvironmentError(err) => write!(f, "Environment error: {}", err),
            EmailError::RequestError(err) => write!(f, "Request error: {}", err),
            EmailError::ApiError(err) => write!(f, "API error: {}", err),
            EmailError::MissingRecipient => write!(f, "Recipient email address is empty"),
        }
    }
}

impl std::error::Error for EmailError {}

pub struct EmailService {
    api_key: String,
    from_email: String,
    client: reqwest::Client,
}

impl EmailService {
    pub fn new() -> Result<Self, EmailError> {
        let api_key = env::var("SENDGRID_API_KEY")
            .map_err(|_| EmailError::EnvironmentError("SENDGRID_API_KEY not set".to_string()))?;
        let from_email = env::var("EMAIL_FROM_ADDRESS")
            .map_err(|_| EmailError::EnvironmentError("EMAIL_FROM_ADDRESS not set".to_string()))?;

        let client = reqwest::Client::new();

        Ok(Self {
            api_key,
            from_email,
            client,
        })
    }

    /// Substitute `{{variable}}` placeholders from the value map. Unknown
    /// placeholders are left in place so a half-filled template is visible
    /// in the delivered message rather than silently blanked.
    pub fn render(template: &str, values: &HashMap<String, String>) -> String {
        let re = Regex::new(r"\{\{\s*(\w+)\s*\}\}").unwrap();
        re.replace_all(template, |caps: &regex::Captures| {
            values
                .get(&caps[1])
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
    }

    pub async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        content: &str,
    ) -> Result<(), EmailError> {
        if to_email.is_empty() {
            return Err(EmailError::MissingRecipient);
        }

        let url = "https://api.sendgrid.com/v3/mail/send";

        let request = SendGridRequest {
            personalizations: vec![SendGridPersonalization {
                to: vec![SendGridEmail {
                    email: to_email.to_string(),
                }],
            }],
            from: SendGridEmail {
                email: self.from_email.clone(),
            },
            subject: subject.to_string(),
            content: vec![SendGridContent {
                content_type: "text/plain".to_string(),
                value: content.to_string(),
            }],
        };

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| EmailError::RequestError(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(EmailError::ApiError(format!(
                "Status: {}, Body: {}",
                status, body
            )))
        }
    }

    /// Render a stored template with the given values and send it.
    pub async fn send_template(
        &self,
        to_email: &str,
        template: &EmailTemplate,
        values: &HashMap<String, String>,
    ) -> Result<(), EmailError> {
        let subject = Self::render(&template.subject, values);
        let body = Self::render(&template.body, values);
        self.send_email(to_email, &subject, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_known_variables() {
        let mut values = HashMap::new();
        values.insert("guest_name".to_string(), "Lena Ortiz".to_string());
        values.insert("booking_number".to_string(), "BK-A1B2C3D4".to_string());

        let rendered = EmailService::render(
            "Dear {{guest_name}}, your booking {{ booking_number }} is confirmed.",
            &values,
        );
        assert_eq!(
            rendered,
            "Dear Lena Ortiz, your booking BK-A1B2C3D4 is confirmed."
        );
    }

    #[test]
    fn render_leaves_unknown_variables_in_place() {
        let values = HashMap::new();
        let rendered = EmailService::render("Check-in at {{check_in_time}}.", &values);
        assert_eq!(rendered, "Check-in at {{check_in_time}}.");
    }

    #[test]
    fn render_without_placeholders_is_unchanged() {
        let values = HashMap::new();
        let rendered = EmailService::render("Plain text, no variables.", &values);
        assert_eq!(rendered, "Plain text, no variables.");
    }
}
