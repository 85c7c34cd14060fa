//! Markup and display text produced for the page.

pub mod format;
pub mod review;
pub mod welcome;

pub use format::{escape_html, format_currency, format_income, mask_ssn, us_date};
pub use review::{render_review_html, ReviewData, EMPTY_MARK, PASSWORD_MASK, REVIEW_HEADER};
pub use welcome::render_welcome;
