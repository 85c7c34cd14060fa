#![allow(clippy::result_large_err)]
//! # Intake Core
//!
//! Form controller for a medical-intake page.
//!
//! ## Architecture
//!
//! - **Validation**: table-driven field rules, custom predicates and the aggregate gate
//! - **Controller**: event registry, signal dispatch and the confirm-then-submit flow
//! - **Host**: the document abstraction, with an in-memory implementation
//! - **Persistence**: remember-me over a cookie jar and local storage
//! - **Render**: review table and welcome message
//! - **States**: asynchronous state-list loading from a file or URL
//! - **Telemetry**: structured logging with sensitive value redaction

pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod fields;
pub mod host;
pub mod persistence;
pub mod render;
pub mod states;
pub mod telemetry;
pub mod validation;

pub use error::{ErrorCode, ErrorContext, ErrorSeverity, IntakeError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::clock::{Clock, FixedClock, SystemClock};
    pub use crate::config::{Config, FormConfig, PersistenceConfig, StatesConfig};
    pub use crate::controller::{
        CheckOutcome, EventRegistry, FormController, Handler, SubmissionState, SubmitOutcome,
    };
    pub use crate::error::{ErrorCode, ErrorContext, ErrorSeverity, IntakeError, Result};
    pub use crate::host::{intake_page, Element, FormHost, FormSnapshot, MemoryDocument, Signal};
    pub use crate::persistence::{
        CookieJar, KeyValueStore, LocalStorage, Preferences, StoreFile, Stores,
    };
    pub use crate::render::{render_review_html, render_welcome, ReviewData};
    pub use crate::states::{load_states, source_for, StateListSource};
    pub use crate::telemetry::{init_logging, LoggingConfig};
    pub use crate::validation::{
        FieldValidator, FieldVerdict, GateReport, RuleTable, ValidationErrors,
    };
}
