//! Element ids of the intake page.

// Validated fields
pub const FIRST_NAME: &str = "firstname";
pub const MIDDLE_INITIAL: &str = "middleinitial";
pub const LAST_NAME: &str = "lastname";
pub const DATE_OF_BIRTH: &str = "dob";
pub const SSN: &str = "ssn";
pub const ADDRESS_1: &str = "addr1";
pub const CITY: &str = "city";
pub const ZIP: &str = "zip";
pub const PHONE: &str = "tel";
pub const EMAIL: &str = "email";
pub const USER_ID: &str = "userid";
pub const PASSWORD: &str = "passid";
pub const CONFIRM_PASSWORD: &str = "confirmpass";

// Unvalidated fields
pub const ADDRESS_2: &str = "addr2";
pub const STATE: &str = "state";
pub const INCOME: &str = "range";
pub const SYMPTOMS: &str = "symptoms";
pub const RELATIONSHIP: &str = "relationship";
pub const EMERGENCY_NAME: &str = "emergencyName";
pub const EMERGENCY_EMAIL: &str = "emgemail";
pub const EMERGENCY_PHONE: &str = "emgphone";
pub const REMEMBER_ME: &str = "remember-me";

// Choice groups
pub const ILLNESS_GROUP: &str = "illness";
pub const VACCINATED_GROUP: &str = "vaccinated";
pub const INSURANCE_GROUP: &str = "insurance";

// Page elements
pub const FORM: &str = "intake-form";
pub const TODAY: &str = "today";
pub const INCOME_DISPLAY: &str = "range-slider";
pub const WELCOME: &str = "welcomeContainer";
pub const NEW_USER_LINK: &str = "new-user";
pub const REVIEW_AREA: &str = "reviewArea";
pub const REVIEW_BUTTON: &str = "review";
pub const VALIDATE_BUTTON: &str = "validate";
pub const ALERT_BOX: &str = "alert-box";
pub const ALERT_MESSAGE: &str = "alert-message";
pub const CLOSE_ALERT: &str = "close-alert";
pub const CONFIRM_MODAL: &str = "confirm-modal";
pub const MODAL_REVIEW: &str = "modalReview";
pub const CONFIRM_SUBMIT: &str = "confirm-submit";
pub const CANCEL_SUBMIT: &str = "cancel-submit";

/// First, middle and last name: edits refresh the welcome message.
pub const NAME_FIELDS: [&str; 3] = [FIRST_NAME, MIDDLE_INITIAL, LAST_NAME];
