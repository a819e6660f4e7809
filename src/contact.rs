//! Contact form model.
//!
//! The form has three text fields and a four-state submission status. A
//! submission is a single attempt in two halves:
//!
//! ```text
//! Idle/Sent/Error ── begin() ──▶ Sending ── finish(outcome) ──▶ Sent | Error
//! ```
//!
//! [`ContactForm::begin`] validates the message, moves to `Sending`, and hands
//! back the JSON body; whoever performs the POST reports the HTTP status (or
//! failure) through [`ContactForm::finish`]. While `Sending`, a second
//! `begin` is refused. There is no automatic retry; the user retries by
//! submitting again.
//!
//! The generated contact page runs this flow in the browser with `fetch`
//! against the configured endpoint. [`ContactForm::submit`] runs both halves
//! around a blocking [`ContactTransport`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("The {0} field is required")]
    MissingField(&'static str),
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("A submission is already in flight")]
    InFlight,
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The JSON body posted to the contact endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// All fields are required; the email needs text on both sides of an `@`.
    pub fn validate(&self) -> Result<(), ContactError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(ContactError::MissingField(field));
            }
        }
        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(ContactError::InvalidEmail(email.to_string())),
        }
    }

    pub fn to_json(&self) -> Result<String, ContactError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sending,
    Sent,
    Error,
}

impl SubmissionStatus {
    /// Text shown under the submit button.
    pub fn notice(self) -> &'static str {
        match self {
            SubmissionStatus::Idle => "",
            SubmissionStatus::Sending => "Sending…",
            SubmissionStatus::Sent => "Message sent — we will reply soon.",
            SubmissionStatus::Error => "There was an error. Please try again.",
        }
    }
}

/// Something that can POST a JSON body and report the HTTP status code.
///
/// Used by [`ContactForm::submit`]; the browser script does its own `fetch`.
pub trait ContactTransport {
    fn post_json(&self, endpoint: &str, body: &str) -> Result<u16, ContactError>;
}

/// Form state: the three fields plus the submission status.
#[derive(Debug, Default)]
pub struct ContactForm {
    pub message: ContactMessage,
    status: SubmissionStatus,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Start a submission: validate, enter `Sending`, return the JSON body.
    ///
    /// Validation failures leave the status untouched and are returned to the
    /// caller, as is an attempt to start while one is already in flight.
    pub fn begin(&mut self) -> Result<String, ContactError> {
        if self.status == SubmissionStatus::Sending {
            return Err(ContactError::InFlight);
        }
        self.message.validate()?;
        let body = self.message.to_json()?;
        self.status = SubmissionStatus::Sending;
        Ok(body)
    }

    /// Complete the in-flight submission with the POST outcome.
    ///
    /// A 2xx status is `Sent`; any other status or a transport failure is
    /// `Error`. Without a submission in flight the outcome is ignored.
    pub fn finish(&mut self, outcome: Result<u16, ContactError>) -> SubmissionStatus {
        if self.status != SubmissionStatus::Sending {
            log::warn!("ignoring contact outcome with no submission in flight");
            return self.status;
        }
        self.status = match outcome {
            Ok(code) if (200..300).contains(&code) => SubmissionStatus::Sent,
            Ok(code) => {
                log::warn!("contact endpoint answered {code}");
                SubmissionStatus::Error
            }
            Err(err) => {
                log::warn!("contact submission failed: {err}");
                SubmissionStatus::Error
            }
        };
        self.status
    }

    /// Validate and post the message once through `transport`.
    pub fn submit(
        &mut self,
        transport: &dyn ContactTransport,
        endpoint: &str,
    ) -> Result<SubmissionStatus, ContactError> {
        let body = self.begin()?;
        Ok(self.finish(transport.post_json(endpoint, &body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    struct FakeTransport {
        reply: Result<u16, &'static str>,
        calls: Cell<usize>,
        last_body: RefCell<String>,
    }

    impl FakeTransport {
        fn replying(reply: Result<u16, &'static str>) -> Self {
            Self {
                reply,
                calls: Cell::new(0),
                last_body: RefCell::new(String::new()),
            }
        }
    }

    impl ContactTransport for FakeTransport {
        fn post_json(&self, _endpoint: &str, body: &str) -> Result<u16, ContactError> {
            self.calls.set(self.calls.get() + 1);
            *self.last_body.borrow_mut() = body.to_string();
            self.reply
                .map_err(|msg| ContactError::Transport(msg.to_string()))
        }
    }

    fn filled_form() -> ContactForm {
        ContactForm {
            message: ContactMessage::new("Ada", "ada@example.com", "Hello there"),
            ..ContactForm::default()
        }
    }

    #[test]
    fn validate_accepts_complete_message() {
        assert!(
            ContactMessage::new("Ada", "ada@example.com", "Hi")
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn validate_reports_first_missing_field() {
        let err = ContactMessage::new("Ada", "  ", "").validate().unwrap_err();
        assert!(matches!(err, ContactError::MissingField("email")));
    }

    #[test]
    fn validate_rejects_email_without_at() {
        let err = ContactMessage::new("Ada", "ada.example.com", "Hi")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ContactError::InvalidEmail(_)));
        assert!(
            ContactMessage::new("Ada", "@example.com", "Hi")
                .validate()
                .is_err()
        );
    }

    #[test]
    fn payload_has_three_fields() {
        let json = ContactMessage::new("Ada", "ada@example.com", "Hi")
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "Ada");
        assert_eq!(value["email"], "ada@example.com");
        assert_eq!(value["message"], "Hi");
        assert_eq!(value.as_object().unwrap().len(), 3);
    }

    #[test]
    fn successful_submit_is_sent() {
        let transport = FakeTransport::replying(Ok(200));
        let mut form = filled_form();
        assert_eq!(
            form.submit(&transport, "/api/contact").unwrap(),
            SubmissionStatus::Sent
        );
        assert_eq!(transport.calls.get(), 1);
        assert!(transport.last_body.borrow().contains("ada@example.com"));
    }

    #[test]
    fn non_2xx_is_error_without_retry() {
        let transport = FakeTransport::replying(Ok(502));
        let mut form = filled_form();
        assert_eq!(
            form.submit(&transport, "/api/contact").unwrap(),
            SubmissionStatus::Error
        );
        assert_eq!(transport.calls.get(), 1);
    }

    #[test]
    fn transport_failure_is_error() {
        let transport = FakeTransport::replying(Err("connection refused"));
        let mut form = filled_form();
        assert_eq!(
            form.submit(&transport, "/api/contact").unwrap(),
            SubmissionStatus::Error
        );
    }

    #[test]
    fn resubmission_after_error_can_succeed() {
        let mut form = filled_form();
        form.submit(&FakeTransport::replying(Ok(500)), "/api/contact")
            .unwrap();
        assert_eq!(form.status(), SubmissionStatus::Error);
        form.submit(&FakeTransport::replying(Ok(204)), "/api/contact")
            .unwrap();
        assert_eq!(form.status(), SubmissionStatus::Sent);
    }

    #[test]
    fn invalid_message_is_not_posted() {
        let transport = FakeTransport::replying(Ok(200));
        let mut form = ContactForm::new();
        assert!(form.submit(&transport, "/api/contact").is_err());
        assert_eq!(form.status(), SubmissionStatus::Idle);
        assert_eq!(transport.calls.get(), 0);
    }

    #[test]
    fn begin_enters_sending_until_finished() {
        let mut form = filled_form();
        let body = form.begin().unwrap();
        assert!(body.contains("Hello there"));
        assert_eq!(form.status(), SubmissionStatus::Sending);
        assert_eq!(form.status().notice(), "Sending…");

        assert!(matches!(form.begin(), Err(ContactError::InFlight)));
        assert_eq!(form.status(), SubmissionStatus::Sending);

        assert_eq!(form.finish(Ok(201)), SubmissionStatus::Sent);
        assert_eq!(form.status(), SubmissionStatus::Sent);
    }

    #[test]
    fn finish_failure_is_error() {
        let mut form = filled_form();
        form.begin().unwrap();
        let outcome = Err(ContactError::Transport("timed out".to_string()));
        assert_eq!(form.finish(outcome), SubmissionStatus::Error);
    }

    #[test]
    fn finish_without_begin_is_ignored() {
        let mut form = filled_form();
        assert_eq!(form.finish(Ok(200)), SubmissionStatus::Idle);
        assert_eq!(form.status(), SubmissionStatus::Idle);
    }

    #[test]
    fn notices_match_status() {
        assert_eq!(SubmissionStatus::Idle.notice(), "");
        assert_eq!(SubmissionStatus::Sending.notice(), "Sending…");
        assert!(SubmissionStatus::Sent.notice().starts_with("Message sent"));
        assert!(SubmissionStatus::Error.notice().contains("try again"));
    }
}
