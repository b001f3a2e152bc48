//! Error types shared by the browser binding and the effect state machines.

use std::fmt::{Display, Formatter};

use wasm_bindgen::JsValue;

use crate::config::ConfigError;

/// Failure while wiring the page. Every variant is reported through the log and
/// surfaced to JS as a string; nothing here is retried.
#[derive(Debug, Clone, PartialEq)]
pub enum FxError {
    /// A required element id / selector is absent from the host document.
    MissingElement(&'static str),
    /// A `web_sys` call returned an exception.
    Dom(String),
    Config(ConfigError),
    /// `start_portfolio*` was called again after a first call was accepted.
    AlreadyStarted,
}

impl Display for FxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingElement(what) => write!(f, "required element missing: {what}"),
            Self::Dom(msg) => write!(f, "dom call failed: {msg}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::AlreadyStarted => write!(f, "portfolio already started"),
        }
    }
}

impl std::error::Error for FxError {}

impl From<JsValue> for FxError {
    fn from(value: JsValue) -> Self {
        Self::Dom(describe_js(&value))
    }
}

impl From<ConfigError> for FxError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<FxError> for JsValue {
    fn from(value: FxError) -> Self {
        JsValue::from_str(&value.to_string())
    }
}

/// Best-effort text for a thrown JS value (string, `Error.message`, or debug form).
pub fn describe_js(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = wasm_bindgen::JsCast::dyn_ref::<js_sys::Error>(value) {
        return String::from(err.message());
    }
    format!("{value:?}")
}

/// Required contact form fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    /// The `name` attribute of the matching form control.
    pub fn form_name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }
}

/// Contact form validation failure. Terminal: the submission is dropped and the
/// user sees [`ValidationError::user_message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingField(Field),
    InvalidEmail,
}

impl ValidationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "Please fill in all fields",
            Self::InvalidEmail => "Please enter a valid email address",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => {
                write!(f, "missing required field `{}`", field.form_name())
            }
            Self::InvalidEmail => write!(f, "email address is malformed"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_match_page_copy() {
        assert_eq!(
            ValidationError::MissingField(Field::Subject).user_message(),
            "Please fill in all fields"
        );
        assert_eq!(
            ValidationError::InvalidEmail.user_message(),
            "Please enter a valid email address"
        );
        assert_eq!(
            ValidationError::MissingField(Field::Email).to_string(),
            "missing required field `email`"
        );
    }

    #[test]
    fn fx_error_display_names_the_element() {
        let err = FxError::MissingElement("#navToggle");
        assert_eq!(err.to_string(), "required element missing: #navToggle");
    }
}
