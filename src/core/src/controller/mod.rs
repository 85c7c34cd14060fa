//! The form controller.
//!
//! [`FormController::initialize`] prepares the page and registers every
//! handler; afterwards the host forwards user interaction through
//! [`FormController::dispatch`]. All work is synchronous.

pub mod binder;
pub mod flow;

pub use binder::{bind_validators, EventRegistry, Handler};
pub use flow::{CheckOutcome, SubmissionFlow, SubmissionState, SubmitOutcome};

use crate::clock::{Clock, SystemClock};
use crate::config::{Config, FormConfig};
use crate::error::Result;
use crate::fields;
use crate::host::{error_id, FormHost, FormSnapshot, Signal, INVALID_CLASS};
use crate::persistence::{Preferences, Stores};
use crate::render::{format_income, render_review_html, render_welcome, us_date, ReviewData};
use crate::validation::{
    DateOfBirthPolicy, FieldValidator, FieldVerdict, GateReport, RuleTable, DATE_FORMAT,
};
use std::sync::Arc;
use tracing::{debug, info};

pub const CHECK_PASSED_MESSAGE: &str = "Everything looks good!";
pub const CHECK_FAILED_MESSAGE: &str = "Please fix the errors highlighted in red.";
pub const SUBMIT_BLOCKED_MESSAGE: &str = "Please fix the errors highlighted in red before submitting.";

/// Drives one intake page.
pub struct FormController {
    form: FormConfig,
    rules: RuleTable,
    registry: EventRegistry,
    preferences: Preferences,
    flow: SubmissionFlow,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("rules", &self.rules.len())
            .field("bindings", &self.registry.len())
            .field("state", &self.flow.state())
            .finish()
    }
}

impl FormController {
    pub fn new(config: &Config, stores: Stores) -> Self {
        Self {
            form: config.form.clone(),
            rules: RuleTable::from_config(&config.form),
            registry: EventRegistry::new(),
            preferences: Preferences::new(config.persistence.clone(), stores),
            flow: SubmissionFlow::default(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn registry(&self) -> &EventRegistry {
        &self.registry
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn stores(&self) -> &Stores {
        self.preferences.stores()
    }

    pub fn into_stores(self) -> Stores {
        self.preferences.into_stores()
    }

    pub fn state(&self) -> SubmissionState {
        self.flow.state()
    }

    pub fn validator(&self) -> FieldValidator<'_> {
        FieldValidator::new(&self.rules, self.clock.today())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Setup
    // ─────────────────────────────────────────────────────────────────────────

    /// Prepare the page and register every handler.
    pub fn initialize<H: FormHost + ?Sized>(&mut self, host: &mut H) {
        self.registry.clear();
        let validated = bind_validators(&mut self.registry, &self.rules, host);

        self.setup_page(host);
        self.load_preferences(host);
        self.bind_actions(host);
        self.refresh_welcome(host);

        info!(
            validated_fields = validated,
            bindings = self.registry.len(),
            remembered = host.is_checked(fields::REMEMBER_ME),
            "Form initialized"
        );
    }

    fn setup_page<H: FormHost + ?Sized>(&mut self, host: &mut H) {
        let today = self.clock.today();
        host.set_text(fields::TODAY, &us_date(today));

        let earliest = DateOfBirthPolicy {
            max_age_years: self.form.max_age_years,
        }
        .earliest(today);
        host.set_attribute(fields::DATE_OF_BIRTH, "max", &today.format(DATE_FORMAT).to_string());
        host.set_attribute(fields::DATE_OF_BIRTH, "min", &earliest.format(DATE_FORMAT).to_string());

        if host.contains(fields::INCOME) && host.contains(fields::INCOME_DISPLAY) {
            let income = self.form.income;
            host.set_attribute(fields::INCOME, "min", &income.min.to_string());
            host.set_attribute(fields::INCOME, "max", &income.max.to_string());
            host.set_attribute(fields::INCOME, "value", &income.default.to_string());
            if host.trimmed_value(fields::INCOME).is_empty() {
                host.set_value(fields::INCOME, &income.default.to_string());
            }
            self.registry.bind(fields::INCOME, Signal::Input, Handler::UpdateIncome);
            self.registry.bind(fields::INCOME, Signal::Change, Handler::UpdateIncome);
            self.update_income(host);
        }
    }

    fn load_preferences<H: FormHost + ?Sized>(&mut self, host: &mut H) {
        let remembered = self.preferences.has_saved_profile();
        host.set_checked(fields::REMEMBER_ME, remembered);

        if remembered {
            let restored = self.preferences.restore(host);
            debug!(fields = restored.len(), "Restored remembered fields");
            if restored.iter().any(|f| f == fields::INCOME) {
                self.dispatch(host, fields::INCOME, Signal::Change);
            }
        }

        let persisted: Vec<String> = self
            .preferences
            .fields()
            .into_iter()
            .filter(|f| host.contains(f))
            .map(str::to_string)
            .collect();
        for field in persisted {
            self.registry.bind(&field, Signal::Input, Handler::Persist(field.clone()));
        }
        for field in fields::NAME_FIELDS {
            if host.contains(field) {
                self.registry.bind(field, Signal::Input, Handler::RefreshWelcome);
            }
        }
        if host.contains(fields::REMEMBER_ME) {
            self.registry.bind(fields::REMEMBER_ME, Signal::Change, Handler::ToggleRememberMe);
            self.registry.bind(fields::REMEMBER_ME, Signal::Change, Handler::RefreshWelcome);
        }
    }

    fn bind_actions<H: FormHost + ?Sized>(&mut self, host: &H) {
        let actions = [
            (fields::FORM, Signal::Submit, Handler::Submit),
            (fields::VALIDATE_BUTTON, Signal::Click, Handler::CheckData),
            (fields::REVIEW_BUTTON, Signal::Click, Handler::Review),
            (fields::CONFIRM_SUBMIT, Signal::Click, Handler::ConfirmSubmit),
            (fields::CANCEL_SUBMIT, Signal::Click, Handler::CancelSubmit),
            (fields::CLOSE_ALERT, Signal::Click, Handler::CloseAlert),
        ];
        for (id, signal, handler) in actions {
            if host.contains(id) {
                self.registry.bind(id, signal, handler);
            }
        }
        // The link only exists while the welcome-back message is shown.
        self.registry.bind(fields::NEW_USER_LINK, Signal::Click, Handler::NotMe);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Signals
    // ─────────────────────────────────────────────────────────────────────────

    /// Run every handler bound to (`id`, `signal`). Returns how many ran.
    pub fn dispatch<H: FormHost + ?Sized>(&mut self, host: &mut H, id: &str, signal: Signal) -> usize {
        let handlers = self.registry.handlers(id, signal).to_vec();
        for handler in &handlers {
            self.handle(host, handler);
        }
        handlers.len()
    }

    fn handle<H: FormHost + ?Sized>(&mut self, host: &mut H, handler: &Handler) {
        match handler {
            Handler::Validate(field) => {
                self.validate_field(host, field);
            }
            Handler::Persist(field) => {
                if host.is_checked(fields::REMEMBER_ME) {
                    self.preferences.save_field(host, field);
                }
            }
            Handler::RefreshWelcome => self.refresh_welcome(host),
            Handler::UpdateIncome => self.update_income(host),
            Handler::ToggleRememberMe => self.apply_remember_me(host),
            Handler::NotMe => self.not_me(host),
            Handler::CheckData => {
                self.check_data(host);
            }
            Handler::Review => {
                self.review(host);
            }
            Handler::Submit => {
                self.submit(host);
            }
            Handler::ConfirmSubmit => {
                self.confirm(host);
            }
            Handler::CancelSubmit => {
                self.cancel(host);
            }
            Handler::CloseAlert => host.set_visible(fields::ALERT_BOX, false),
        }
    }

    /// Type a value into a control: set it, then signal Input.
    pub fn enter_value<H: FormHost + ?Sized>(&mut self, host: &mut H, id: &str, value: &str) {
        host.set_value(id, value);
        self.dispatch(host, id, Signal::Input);
    }

    /// Enter every value of a snapshot, then apply its remember-me choice.
    pub fn fill<H: FormHost + ?Sized>(&mut self, host: &mut H, snapshot: &FormSnapshot) -> Result<()> {
        snapshot.apply(host)?;
        for id in snapshot.values.keys() {
            self.dispatch(host, id, Signal::Input);
        }
        if let Some(on) = snapshot.remember_me {
            if on != host.is_checked(fields::REMEMBER_ME) {
                self.set_remember_me(host, on);
            }
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    /// Validate one field and show the verdict. `None` for fields without a rule.
    pub fn validate_field<H: FormHost + ?Sized>(&self, host: &mut H, field: &str) -> Option<FieldVerdict> {
        self.validator().run(field, host)
    }

    /// Re-validate every control through its Blur handlers, then inspect the page.
    pub fn check_form<H: FormHost + ?Sized>(&mut self, host: &mut H) -> GateReport {
        for id in host.controls() {
            self.dispatch(host, &id, Signal::Blur);
        }
        let report = GateReport::inspect(host);
        info!(
            valid = report.is_valid(),
            invalid = report.invalid_fields.len(),
            missing_required = report.missing_required.len(),
            "Form checked"
        );
        report
    }

    /// The "check data" button.
    pub fn check_data<H: FormHost + ?Sized>(&mut self, host: &mut H) -> CheckOutcome {
        let report = self.check_form(host);
        let message = if report.is_valid() {
            host.set_visible(fields::ALERT_BOX, false);
            host.notify(CHECK_PASSED_MESSAGE);
            CHECK_PASSED_MESSAGE
        } else {
            show_alert(host, CHECK_FAILED_MESSAGE);
            CHECK_FAILED_MESSAGE
        };
        CheckOutcome {
            report,
            message: message.to_string(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Review and submission
    // ─────────────────────────────────────────────────────────────────────────

    /// Render the review table into the review area.
    pub fn review<H: FormHost + ?Sized>(&mut self, host: &mut H) -> ReviewData {
        let data = ReviewData::collect(host);
        host.set_inner_html(fields::REVIEW_AREA, &render_review_html(&data));
        data
    }

    /// Gate the form; open the confirmation when it passes.
    pub fn submit<H: FormHost + ?Sized>(&mut self, host: &mut H) -> SubmitOutcome {
        let report = self.check_form(host);
        let outcome = self.flow.submit(report);
        match &outcome {
            SubmitOutcome::Blocked { .. } => show_alert(host, SUBMIT_BLOCKED_MESSAGE),
            _ => {
                let data = ReviewData::collect(host);
                host.set_inner_html(fields::MODAL_REVIEW, &render_review_html(&data));
                host.set_visible(fields::CONFIRM_MODAL, true);
            }
        }
        info!(state = ?self.flow.state(), "Submission requested");
        outcome
    }

    pub fn confirm<H: FormHost + ?Sized>(&mut self, host: &mut H) -> SubmitOutcome {
        let outcome = self.flow.confirm();
        if outcome == SubmitOutcome::Submitted {
            host.set_visible(fields::CONFIRM_MODAL, false);
            info!("Form submitted");
        }
        outcome
    }

    pub fn cancel<H: FormHost + ?Sized>(&mut self, host: &mut H) -> SubmitOutcome {
        let outcome = self.flow.cancel();
        if outcome == SubmitOutcome::Cancelled {
            host.set_visible(fields::CONFIRM_MODAL, false);
        }
        outcome
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Remember me
    // ─────────────────────────────────────────────────────────────────────────

    /// Check or uncheck remember-me as the user would.
    pub fn set_remember_me<H: FormHost + ?Sized>(&mut self, host: &mut H, on: bool) {
        host.set_checked(fields::REMEMBER_ME, on);
        if self.dispatch(host, fields::REMEMBER_ME, Signal::Change) == 0 {
            self.apply_remember_me(host);
            self.refresh_welcome(host);
        }
    }

    fn apply_remember_me<H: FormHost + ?Sized>(&mut self, host: &mut H) {
        if host.is_checked(fields::REMEMBER_ME) {
            let saved = self.preferences.save_all(host);
            debug!(fields = saved, "Remember me on");
        } else {
            self.preferences.forget();
            debug!("Remember me off");
        }
    }

    /// Forget everything stored and start over with an empty form.
    pub fn not_me<H: FormHost + ?Sized>(&mut self, host: &mut H) {
        self.preferences.forget_everything();

        for id in host.controls() {
            host.reset_control(&id);
            host.toggle_class(&id, INVALID_CLASS, false);
        }
        for id in self.rules.ids() {
            host.set_text(&error_id(id), "");
        }
        host.set_inner_html(fields::REVIEW_AREA, "");
        host.set_visible(fields::ALERT_BOX, false);
        host.set_visible(fields::CONFIRM_MODAL, false);
        self.flow.reset();

        info!("Started a new form");
        self.initialize(host);
    }

    fn refresh_welcome<H: FormHost + ?Sized>(&self, host: &mut H) {
        let live = host.trimmed_value(fields::FIRST_NAME);
        let name = if live.is_empty() {
            self.preferences.saved_name()
        } else {
            Some(live)
        };
        let html = render_welcome(name.as_deref(), host.is_checked(fields::REMEMBER_ME));
        host.set_inner_html(fields::WELCOME, &html);
    }

    fn update_income<H: FormHost + ?Sized>(&self, host: &mut H) {
        let value = host.value(fields::INCOME).unwrap_or_default();
        let text = format_income(&value).unwrap_or_default();
        host.set_text(fields::INCOME_DISPLAY, &text);
    }
}

fn show_alert<H: FormHost + ?Sized>(host: &mut H, message: &str) {
    host.set_text(fields::ALERT_MESSAGE, message);
    host.set_visible(fields::ALERT_BOX, true);
}
