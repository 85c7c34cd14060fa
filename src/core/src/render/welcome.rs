//! Greeting above the form.

use super::format::escape_html;
use crate::fields;

/// Greeting markup. `name` is only used for a remembered user.
pub fn render_welcome(name: Option<&str>, remembered: bool) -> String {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) if remembered => {
            let name = escape_html(name);
            format!(
                "<h3>Welcome back, {name}!</h3>\n<p><a href='#' id='{link}'>Not {name}? Click here to start a new form.</a></p>",
                name = name,
                link = fields::NEW_USER_LINK
            )
        }
        _ => "<h3>Welcome New User!</h3><p>Please fill out the form below to get started.</p>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remembered_user() {
        let html = render_welcome(Some("Pat"), true);
        assert!(html.contains("Welcome back, Pat!"));
        assert!(html.contains("id='new-user'"));
        assert!(html.contains("Not Pat? Click here to start a new form."));
    }

    #[test]
    fn test_new_user() {
        for (name, remembered) in [(Some("Pat"), false), (Some("  "), true), (None, true)] {
            assert!(render_welcome(name, remembered).contains("Welcome New User!"));
        }
    }

    #[test]
    fn test_name_escaped() {
        assert!(render_welcome(Some("<b>"), true).contains("Welcome back, &lt;b&gt;!"));
    }
}
