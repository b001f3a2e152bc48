//! Contact form: validation, the simulated send, and the success modal.
//!
//! No network I/O happens. A valid submission holds the form in a pending state
//! for a fixed delay, then clears it and opens the success modal.

use std::sync::OnceLock;

use log::{info, warn};
use regex::Regex;

use crate::error::{Field, ValidationError};

/// Raw field values as read from the form, before trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn new(name: &str, email: &str, subject: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    /// Every field non-blank after trimming, then the email shape check.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(missing) = Field::ALL.into_iter().find(|f| self.field(*f).trim().is_empty()) {
            return Err(ValidationError::MissingField(missing));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex compiles"))
}

/// `local@domain.tld` shape: no whitespace, exactly one `@`, a dot after it.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
    Success,
}

impl NotificationKind {
    /// BEM modifier, e.g. `notification--error`.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Info => "notification notification--info",
            Self::Error => "notification notification--error",
            Self::Success => "notification notification--success",
        }
    }

    /// `(border-color, background)` overrides; info keeps the glass defaults.
    pub fn palette(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Info => None,
            Self::Error => Some(("var(--error-500)", "rgba(239, 68, 68, 0.1)")),
            Self::Success => Some(("var(--success-500)", "rgba(34, 197, 94, 0.1)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }
}

/// Shows transient toasts. Implementations own the enter / exit timing.
pub trait Notifier {
    fn notify(&mut self, notification: &Notification);
}

pub trait ContactSurface {
    /// Submit button spinner + disabled state.
    fn set_pending(&mut self, pending: bool);
    fn reset_form(&mut self);
    fn set_modal_visible(&mut self, visible: bool);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the user was notified and no timer should start.
    Rejected(ValidationError),
    /// Call [`ContactFlow::complete`] after `delay_ms`.
    Pending { delay_ms: u32 },
    /// A send is already in flight.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFlow {
    delay_ms: u32,
    pending: bool,
    modal_open: bool,
}

impl ContactFlow {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            pending: false,
            modal_open: false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn submit(
        &mut self,
        form: &ContactSubmission,
        surface: &mut impl ContactSurface,
        notifier: &mut impl Notifier,
    ) -> SubmitOutcome {
        if self.pending {
            return SubmitOutcome::Ignored;
        }
        if let Err(err) = form.validate() {
            warn!("event=contact_submit module=contact status=rejected reason=\"{err}\"");
            notifier.notify(&Notification::error(err.user_message()));
            return SubmitOutcome::Rejected(err);
        }
        self.pending = true;
        surface.set_pending(true);
        info!("event=contact_submit module=contact status=pending delay_ms={}", self.delay_ms);
        SubmitOutcome::Pending { delay_ms: self.delay_ms }
    }

    /// Simulated send finished. Returns `false` when nothing was pending.
    pub fn complete(&mut self, surface: &mut impl ContactSurface) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        surface.set_pending(false);
        surface.reset_form();
        self.modal_open = true;
        surface.set_modal_visible(true);
        info!("event=contact_submit module=contact status=ok");
        true
    }

    /// Closes the success modal if it is showing.
    pub fn dismiss_modal(&mut self, surface: &mut impl ContactSurface) -> bool {
        if !self.modal_open {
            return false;
        }
        self.modal_open = false;
        surface.set_modal_visible(false);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Form {
        pending: Vec<bool>,
        resets: usize,
        modal: bool,
    }

    impl ContactSurface for Form {
        fn set_pending(&mut self, pending: bool) {
            self.pending.push(pending);
        }
        fn reset_form(&mut self) {
            self.resets += 1;
        }
        fn set_modal_visible(&mut self, visible: bool) {
            self.modal = visible;
        }
    }

    #[derive(Default)]
    struct Toasts(Vec<Notification>);

    impl Notifier for Toasts {
        fn notify(&mut self, n: &Notification) {
            self.0.push(n.clone());
        }
    }

    #[test]
    fn email_shape_check() {
        assert!(is_valid_email("ada@x.co"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("ada@xco"));
        assert!(!is_valid_email("ada x@x.co"));
        assert!(!is_valid_email("a@b@c.d"));
        assert!(!is_valid_email("@x.co"));
    }

    #[test]
    fn blank_field_is_reported_in_form_order() {
        let form = ContactSubmission::new("Ada", "  ", "", "Hello");
        assert_eq!(form.validate(), Err(ValidationError::MissingField(Field::Email)));
    }

    #[test]
    fn valid_submission_goes_pending_then_completes() {
        let mut flow = ContactFlow::new(2000);
        let mut surface = Form::default();
        let mut toasts = Toasts::default();
        let form = ContactSubmission::new("Ada", "ada@x.co", "Hi", "Hello");

        assert_eq!(
            flow.submit(&form, &mut surface, &mut toasts),
            SubmitOutcome::Pending { delay_ms: 2000 }
        );
        assert!(flow.is_pending());
        assert!(!surface.modal);

        assert!(flow.complete(&mut surface));
        assert_eq!(surface.pending, vec![true, false]);
        assert_eq!(surface.resets, 1);
        assert!(surface.modal && flow.modal_open());
        assert!(toasts.0.is_empty());
    }

    #[test]
    fn second_submit_while_pending_is_ignored() {
        let mut flow = ContactFlow::new(2000);
        let mut surface = Form::default();
        let mut toasts = Toasts::default();
        let form = ContactSubmission::new("Ada", "ada@x.co", "Hi", "Hello");
        flow.submit(&form, &mut surface, &mut toasts);
        assert_eq!(flow.submit(&form, &mut surface, &mut toasts), SubmitOutcome::Ignored);
        assert_eq!(surface.pending, vec![true]);
    }

    #[test]
    fn invalid_email_is_rejected_without_delay() {
        let mut flow = ContactFlow::new(2000);
        let mut surface = Form::default();
        let mut toasts = Toasts::default();
        let form = ContactSubmission::new("Ada", "not-an-email", "Hi", "Hello");

        let outcome = flow.submit(&form, &mut surface, &mut toasts);
        assert_eq!(outcome, SubmitOutcome::Rejected(ValidationError::InvalidEmail));
        assert!(!flow.is_pending());
        assert!(surface.pending.is_empty());
        assert_eq!(toasts.0, vec![Notification::error("Please enter a valid email address")]);
        assert!(!flow.complete(&mut surface));
        assert!(!surface.modal);
    }

    #[test]
    fn modal_dismiss_only_when_open() {
        let mut flow = ContactFlow::new(0);
        let mut surface = Form::default();
        assert!(!flow.dismiss_modal(&mut surface));
        flow.submit(
            &ContactSubmission::new("a", "a@b.c", "s", "m"),
            &mut surface,
            &mut Toasts::default(),
        );
        flow.complete(&mut surface);
        assert!(flow.dismiss_modal(&mut surface));
        assert!(!surface.modal);
    }

    #[test]
    fn palettes_follow_kind() {
        assert!(NotificationKind::Info.palette().is_none());
        assert_eq!(NotificationKind::Error.class_name(), "notification notification--error");
    }
}
