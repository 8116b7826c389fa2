use std::cell::RefCell;
use std::future::Future;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::json;

use crate::logging::Logger;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldId {
    Name,
    Email,
    Subject,
    Message,
}

impl FieldId {
    pub const ALL: [FieldId; 4] = [
        FieldId::Name,
        FieldId::Email,
        FieldId::Subject,
        FieldId::Message,
    ];

    fn index(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Email => 1,
            Self::Subject => 2,
            Self::Message => 3,
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Self::Email => FieldKind::Email,
            _ => FieldKind::Text,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    /// Translation key of the field label; matches `as_str`.
    pub fn label_key(self) -> &'static str {
        self.as_str()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidEmail,
}

impl FieldError {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::InvalidEmail => "invalid_email",
        }
    }

    pub fn message_key(self) -> &'static str {
        match self {
            Self::Required => "fieldRequired",
            Self::InvalidEmail => "invalidEmail",
        }
    }
}

fn email_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

pub fn validate_value(kind: FieldKind, value: &str) -> Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    if kind == FieldKind::Email && !email_pattern().is_some_and(|pattern| pattern.is_match(value)) {
        return Err(FieldError::InvalidEmail);
    }
    Ok(())
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    pub error: Option<FieldError>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Loading,
    Succeeded,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitError {
    Interrupted,
}

impl SubmitError {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Interrupted => "interrupted",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Invalid,
    Busy,
    Sent,
    Failed,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    fields: [FieldState; 4],
    phase: SubmitPhase,
}

impl ContactForm {
    pub fn field(&self, id: FieldId) -> &FieldState {
        &self.fields[id.index()]
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SubmitPhase::Loading
    }

    pub fn success_visible(&self) -> bool {
        self.phase == SubmitPhase::Succeeded
    }

    /// Stores the new value; only a field already in error is re-validated.
    pub fn on_input(&mut self, id: FieldId, value: String) {
        let field = &mut self.fields[id.index()];
        field.value = value;
        if field.error.is_some() {
            field.error = validate_value(id.kind(), &field.value).err();
        }
    }

    pub fn on_blur(&mut self, id: FieldId) -> bool {
        self.validate(id)
    }

    fn validate(&mut self, id: FieldId) -> bool {
        let field = &mut self.fields[id.index()];
        field.error = validate_value(id.kind(), &field.value).err();
        field.error.is_none()
    }

    pub fn validate_all(&mut self) -> bool {
        FieldId::ALL
            .iter()
            .fold(true, |valid, id| self.validate(*id) && valid)
    }

    /// Validates every field and, when all pass, enters the loading phase.
    pub fn begin_submit(&mut self) -> Result<ContactMessage, SubmitOutcome> {
        if self.phase == SubmitPhase::Loading {
            return Err(SubmitOutcome::Busy);
        }
        if !self.validate_all() {
            return Err(SubmitOutcome::Invalid);
        }

        self.phase = SubmitPhase::Loading;
        let value = |id: FieldId| self.fields[id.index()].value.trim().to_string();
        Ok(ContactMessage {
            name: value(FieldId::Name),
            email: value(FieldId::Email),
            subject: value(FieldId::Subject),
            message: value(FieldId::Message),
        })
    }

    pub fn finish_submit(&mut self, result: Result<(), SubmitError>) -> SubmitOutcome {
        match result {
            Ok(()) => {
                self.fields = Default::default();
                self.phase = SubmitPhase::Succeeded;
                SubmitOutcome::Sent
            }
            Err(_) => {
                self.phase = SubmitPhase::Idle;
                SubmitOutcome::Failed
            }
        }
    }

    pub fn dismiss_success(&mut self) {
        if self.phase == SubmitPhase::Succeeded {
            self.phase = SubmitPhase::Idle;
        }
    }
}

/// Drives one submission: validate, load, send, then auto-dismiss the success
/// indicator. `notify` runs after every visible state change.
pub async fn submit_contact<S, SF, W, WF, N, C>(
    form: &RefCell<ContactForm>,
    send: S,
    wait: W,
    dismiss_after_ms: u64,
    notify: N,
    on_sent: C,
    logger: &Logger,
) -> SubmitOutcome
where
    S: FnOnce(ContactMessage) -> SF,
    SF: Future<Output = Result<(), SubmitError>>,
    W: FnOnce(u64) -> WF,
    WF: Future<Output = ()>,
    N: Fn(&ContactForm),
    C: FnOnce(),
{
    let begun = form.borrow_mut().begin_submit();
    let message = match begun {
        Ok(message) => message,
        Err(outcome) => {
            notify(&*form.borrow());
            return outcome;
        }
    };
    notify(&*form.borrow());

    let result = send(message).await;
    let outcome = form.borrow_mut().finish_submit(result);
    notify(&*form.borrow());

    match result {
        Ok(()) => {
            logger.info("contact_submitted", json!({}));
            on_sent();
            wait(dismiss_after_ms).await;
            form.borrow_mut().dismiss_success();
            notify(&*form.borrow());
        }
        Err(error) => {
            logger.error("contact_submit_failed", json!({ "reason": error.as_str() }));
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::logging::LogLevel;

    fn filled_form(email: &str) -> ContactForm {
        let mut form = ContactForm::default();
        form.on_input(FieldId::Name, "Ada".to_string());
        form.on_input(FieldId::Email, email.to_string());
        form.on_input(FieldId::Subject, "Hello".to_string());
        form.on_input(FieldId::Message, "Let's talk".to_string());
        form
    }

    fn quiet_logger() -> Logger {
        Logger::new(LogLevel::Error)
    }

    #[test]
    fn required_rule_trims_whitespace() {
        assert_eq!(validate_value(FieldKind::Text, "   "), Err(FieldError::Required));
        assert_eq!(validate_value(FieldKind::Text, " hi "), Ok(()));
    }

    #[test]
    fn email_rule_needs_local_domain_and_tld() {
        assert_eq!(
            validate_value(FieldKind::Email, "not-an-email"),
            Err(FieldError::InvalidEmail)
        );
        assert_eq!(
            validate_value(FieldKind::Email, "a@b"),
            Err(FieldError::InvalidEmail)
        );
        assert_eq!(
            validate_value(FieldKind::Email, "a b@c.de"),
            Err(FieldError::InvalidEmail)
        );
        assert_eq!(validate_value(FieldKind::Email, "a@b.co"), Ok(()));
        assert_eq!(validate_value(FieldKind::Email, ""), Err(FieldError::Required));
    }

    #[test]
    fn input_revalidates_only_fields_in_error() {
        let mut form = ContactForm::default();
        form.on_input(FieldId::Email, "x".to_string());
        assert_eq!(form.field(FieldId::Email).error, None);

        assert!(!form.on_blur(FieldId::Email));
        assert_eq!(form.field(FieldId::Email).error, Some(FieldError::InvalidEmail));

        form.on_input(FieldId::Email, "x@y.io".to_string());
        assert_eq!(form.field(FieldId::Email).error, None);
    }

    #[test]
    fn empty_name_blocks_submission_with_required_error() {
        let mut form = filled_form("a@b.co");
        form.on_input(FieldId::Name, String::new());

        assert_eq!(form.begin_submit(), Err(SubmitOutcome::Invalid));
        assert_eq!(form.field(FieldId::Name).error, Some(FieldError::Required));
        assert_eq!(form.phase(), SubmitPhase::Idle);
    }

    #[test]
    fn every_field_is_validated_on_submit() {
        let mut form = ContactForm::default();
        assert!(!form.validate_all());
        for id in FieldId::ALL {
            assert_eq!(form.field(id).error, Some(FieldError::Required));
        }
    }

    #[tokio::test]
    async fn invalid_email_never_reaches_the_sender() {
        let form = RefCell::new(filled_form("not-an-email"));
        let sent = Cell::new(false);

        let outcome = submit_contact(
            &form,
            |_| {
                sent.set(true);
                async { Ok(()) }
            },
            |_| async {},
            5_000,
            |_| {},
            || {},
            &quiet_logger(),
        )
        .await;

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert!(!sent.get());
        assert_eq!(
            form.borrow().field(FieldId::Email).error,
            Some(FieldError::InvalidEmail)
        );
    }

    #[tokio::test]
    async fn valid_submission_loads_succeeds_resets_and_dismisses() {
        let form = RefCell::new(filled_form("a@b.co"));
        let phases = RefCell::new(Vec::new());
        let waited = Cell::new(0);
        let celebrated = Cell::new(false);

        let outcome = submit_contact(
            &form,
            |message| {
                assert_eq!(message.email, "a@b.co");
                async { Ok(()) }
            },
            |ms| {
                waited.set(ms);
                async {}
            },
            5_000,
            |state| phases.borrow_mut().push(state.phase()),
            || celebrated.set(true),
            &quiet_logger(),
        )
        .await;

        assert_eq!(outcome, SubmitOutcome::Sent);
        assert_eq!(
            *phases.borrow(),
            vec![SubmitPhase::Loading, SubmitPhase::Succeeded, SubmitPhase::Idle]
        );
        assert_eq!(waited.get(), 5_000);
        assert!(celebrated.get());
        assert_eq!(form.borrow().field(FieldId::Name).value, "");
    }

    #[tokio::test]
    async fn failed_submission_clears_loading_and_keeps_input() {
        let form = RefCell::new(filled_form("a@b.co"));
        let phases = RefCell::new(Vec::new());

        let outcome = submit_contact(
            &form,
            |_| async { Err(SubmitError::Interrupted) },
            |_| async {},
            5_000,
            |state| phases.borrow_mut().push(state.phase()),
            || panic!("failure must not celebrate"),
            &quiet_logger(),
        )
        .await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(*phases.borrow(), vec![SubmitPhase::Loading, SubmitPhase::Idle]);
        assert_eq!(form.borrow().field(FieldId::Name).value, "Ada");
        assert!(!form.borrow().success_visible());
    }

    #[test]
    fn second_submit_while_loading_is_rejected() {
        let mut form = filled_form("a@b.co");
        assert!(form.begin_submit().is_ok());
        assert_eq!(form.begin_submit(), Err(SubmitOutcome::Busy));
    }
}
