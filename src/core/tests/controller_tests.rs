//! Integration tests for the form controller against the intake page.

use chrono::NaiveDate;
use intake_core::clock::FixedClock;
use intake_core::config::Config;
use intake_core::controller::{FormController, SubmissionState, SubmitOutcome};
use intake_core::host::{intake_page, FormHost, FormSnapshot, MemoryDocument, Signal};
use intake_core::persistence::Stores;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
}

fn controller() -> (FormController, MemoryDocument) {
    let config = Config::default();
    let mut doc = intake_page(&config);
    let mut controller = FormController::new(&config, Stores::new()).with_clock(FixedClock(today()));
    controller.initialize(&mut doc);
    (controller, doc)
}

fn complete_snapshot() -> FormSnapshot {
    FormSnapshot::parse(
        r#"
        [values]
        firstname = "Pat"
        middleinitial = "Q"
        lastname = "O'Neil"
        dob = "1985-10-02"
        ssn = "123-45-6789"
        addr1 = "100 Main St"
        city = "Houston"
        state = "Texas"
        zip = "77002"
        tel = "713-555-0100"
        email = "pat@example.com"
        userid = "poneil"
        passid = "Abcdef1!"
        confirmpass = "Abcdef1!"

        [checked]
        illness = ["Measles"]
        vaccinated = ["Yes"]
        insurance = ["Yes"]
        "#,
        "toml",
    )
    .unwrap()
}

#[test]
fn test_gate_passes_complete_form() {
    let (mut controller, mut doc) = controller();
    controller.fill(&mut doc, &complete_snapshot()).unwrap();

    let report = controller.check_form(&mut doc);
    assert!(report.is_valid(), "blocked by {:?}", report.blocking_fields());
}

#[test]
fn test_gate_blocked_by_blank_required() {
    let (mut controller, mut doc) = controller();
    controller.fill(&mut doc, &complete_snapshot()).unwrap();
    controller.enter_value(&mut doc, "city", "   ");

    let report = controller.check_form(&mut doc);
    assert!(!report.is_valid());
    assert_eq!(report.missing_required, vec!["city"]);
    assert!(report.invalid_fields.is_empty());
}

#[test]
fn test_gate_revalidates_every_field() {
    let (mut controller, mut doc) = controller();
    controller.fill(&mut doc, &complete_snapshot()).unwrap();

    // Changing the password without another signal on the confirmation
    // leaves it stale until the gate re-validates.
    controller.enter_value(&mut doc, "passid", "Zyxwvu9!");
    assert!(!doc.has_class("confirmpass", "invalid"));

    let report = controller.check_form(&mut doc);
    assert_eq!(report.invalid_fields, vec!["confirmpass"]);
    assert_eq!(doc.text("confirmpass-error").unwrap(), "Passwords do not match");
}

#[test]
fn test_submit_blocked_shows_alert() {
    let (mut controller, mut doc) = controller();
    controller.dispatch(&mut doc, "intake-form", Signal::Submit);

    assert_eq!(controller.state(), SubmissionState::Editing);
    assert!(doc.is_visible("alert-box"));
    assert_eq!(
        doc.text("alert-message").unwrap(),
        "Please fix the errors highlighted in red before submitting."
    );
    assert!(!doc.is_visible("confirm-modal"));
}

#[test]
fn test_submit_confirm_flow() {
    let (mut controller, mut doc) = controller();
    controller.fill(&mut doc, &complete_snapshot()).unwrap();

    assert_eq!(controller.submit(&mut doc), SubmitOutcome::AwaitingConfirmation);
    assert_eq!(controller.state(), SubmissionState::Confirming);
    assert!(doc.is_visible("confirm-modal"));
    let review = doc.inner_html("modalReview").unwrap();
    assert!(review.contains("Pat Q O&#39;Neil"));
    assert!(review.contains("***-**-6789"));

    controller.dispatch(&mut doc, "cancel-submit", Signal::Click);
    assert_eq!(controller.state(), SubmissionState::Editing);
    assert!(!doc.is_visible("confirm-modal"));

    controller.submit(&mut doc);
    controller.dispatch(&mut doc, "confirm-submit", Signal::Click);
    assert_eq!(controller.state(), SubmissionState::Submitted);
}

#[test]
fn test_check_data_valid_notifies() {
    let (mut controller, mut doc) = controller();
    controller.fill(&mut doc, &complete_snapshot()).unwrap();

    controller.dispatch(&mut doc, "validate", Signal::Click);
    assert!(!doc.is_visible("alert-box"));
    assert_eq!(doc.take_notices(), vec!["Everything looks good!".to_string()]);
}

#[test]
fn test_fill_with_remember_me_saves_profile() {
    let (mut controller, mut doc) = controller();
    let mut snapshot = complete_snapshot();
    snapshot.remember_me = Some(true);
    snapshot.values.insert("addr2".to_string(), "Apt 4".to_string());
    controller.fill(&mut doc, &snapshot).unwrap();

    let stores = controller.into_stores();
    let config = Config::default();
    let mut fresh = intake_page(&config);
    let mut next = FormController::new(&config, stores).with_clock(FixedClock(today()));
    next.initialize(&mut fresh);

    assert!(fresh.is_checked("remember-me"));
    assert_eq!(fresh.value("userid").as_deref(), Some("poneil"));
    assert_eq!(fresh.value("addr2").as_deref(), Some("Apt 4"));
    assert_eq!(fresh.value("ssn").as_deref(), Some(""));
    assert!(fresh
        .inner_html("welcomeContainer")
        .unwrap()
        .contains("Welcome back, Pat!"));
}
