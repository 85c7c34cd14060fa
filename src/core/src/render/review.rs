//! The review table shown before submission.

use super::format::{collapse_commas, collapse_whitespace, escape_html, format_income, mask_ssn};
use crate::fields;
use crate::host::FormHost;
use serde::Serialize;

/// Shown for values the user left empty.
pub const EMPTY_MARK: &str = "—";

/// Password placeholder; the real value is never rendered.
pub const PASSWORD_MASK: &str = "•••••••";

pub const REVIEW_HEADER: &str = "PLEASE REVIEW THIS INFORMATION";

/// Everything the review table shows, already formatted for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewData {
    pub name: String,
    pub date_of_birth: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city_state_zip: String,
    pub illnesses: String,
    pub vaccinated: String,
    pub insurance: String,
    pub annual_income: String,
    pub symptoms: String,
    pub user_id: String,
    pub password: String,
    pub ssn: String,
}

impl ReviewData {
    pub fn collect<H: FormHost + ?Sized>(host: &H) -> Self {
        let val = |id: &str| host.trimmed_value(id);
        let first_checked = |group: &str| {
            host.checked_values(group)
                .into_iter()
                .next()
                .unwrap_or_else(|| EMPTY_MARK.to_string())
        };

        let illnesses = host.checked_values(fields::ILLNESS_GROUP);
        let illnesses = if illnesses.is_empty() {
            "None".to_string()
        } else {
            illnesses.join(", ")
        };

        let income = val(fields::INCOME);
        let annual_income = if income.is_empty() {
            EMPTY_MARK.to_string()
        } else {
            format_income(&income).unwrap_or_else(|| EMPTY_MARK.to_string())
        };

        let symptoms = val(fields::SYMPTOMS);

        Self {
            name: collapse_whitespace(&format!(
                "{} {} {}",
                val(fields::FIRST_NAME),
                val(fields::MIDDLE_INITIAL),
                val(fields::LAST_NAME)
            )),
            date_of_birth: val(fields::DATE_OF_BIRTH),
            email: val(fields::EMAIL),
            phone: val(fields::PHONE),
            address: collapse_whitespace(&format!(
                "{} {}",
                val(fields::ADDRESS_1),
                val(fields::ADDRESS_2)
            )),
            city_state_zip: collapse_commas(&format!(
                "{}, {} {}",
                val(fields::CITY),
                val(fields::STATE),
                val(fields::ZIP)
            )),
            illnesses,
            vaccinated: first_checked(fields::VACCINATED_GROUP),
            insurance: first_checked(fields::INSURANCE_GROUP),
            annual_income,
            symptoms: if symptoms.is_empty() {
                EMPTY_MARK.to_string()
            } else {
                symptoms
            },
            user_id: val(fields::USER_ID),
            password: PASSWORD_MASK.to_string(),
            ssn: mask_ssn(&val(fields::SSN)),
        }
    }

    /// Label and value pairs in display order.
    pub fn rows(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("First, MI, Last Name", self.name.as_str()),
            ("Date of Birth", self.date_of_birth.as_str()),
            ("Email address", self.email.as_str()),
            ("Phone number", self.phone.as_str()),
            ("Address", self.address.as_str()),
            ("City/State/ZIP", self.city_state_zip.as_str()),
            ("Illnesses", self.illnesses.as_str()),
            ("Vaccinated?", self.vaccinated.as_str()),
            ("Insurance?", self.insurance.as_str()),
            ("Annual Income", self.annual_income.as_str()),
            ("Described Symptoms", self.symptoms.as_str()),
            ("User ID", self.user_id.as_str()),
            ("Password", self.password.as_str()),
            ("SSN", self.ssn.as_str()),
        ]
    }
}

/// Render the review table markup.
pub fn render_review_html(data: &ReviewData) -> String {
    let mut html = String::from("<table class=\"output\">\n");
    html.push_str(&format!(
        "  <tr><td class=\"outputdata\" colspan=\"2\" style=\"text-align:center;\"><strong>{}</strong></td></tr>\n",
        REVIEW_HEADER
    ));
    for (label, value) in data.rows() {
        let value = if value.is_empty() { EMPTY_MARK } else { value };
        html.push_str(&format!(
            "  <tr class=\"output\"><td class=\"outputdata\" style=\"width:60%;\">{}</td><td class=\"outputdata\">{}</td></tr>\n",
            label,
            escape_html(value)
        ));
    }
    html.push_str("</table>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::host::intake_page;

    #[test]
    fn test_empty_form() {
        let doc = intake_page(&Config::default());
        let data = ReviewData::collect(&doc);
        assert_eq!(data.name, "");
        assert_eq!(data.city_state_zip, ",");
        assert_eq!(data.illnesses, "None");
        assert_eq!(data.vaccinated, EMPTY_MARK);
        assert_eq!(data.annual_income, EMPTY_MARK);
        assert_eq!(data.password, PASSWORD_MASK);

        let html = render_review_html(&data);
        assert!(html.contains(REVIEW_HEADER));
        assert!(html.contains("<td class=\"outputdata\">—</td>"));
    }

    #[test]
    fn test_filled_form() {
        let mut doc = intake_page(&Config::default());
        doc.set_value("firstname", "Pat");
        doc.set_value("lastname", "Smith");
        doc.set_value("city", "Houston");
        doc.set_value("state", "TX");
        doc.set_value("zip", "77002");
        doc.set_value("range", "350");
        doc.set_value("ssn", "123-45-6789");
        doc.set_value("passid", "Abcdef1!");
        doc.select_choice("illness", "Measles");
        doc.select_choice("illness", "Tetanus");
        doc.select_choice("insurance", "No");

        let data = ReviewData::collect(&doc);
        assert_eq!(data.name, "Pat Smith");
        assert_eq!(data.city_state_zip, "Houston, TX 77002");
        assert_eq!(data.illnesses, "Measles, Tetanus");
        assert_eq!(data.insurance, "No");
        assert_eq!(data.annual_income, "$350,000");
        assert_eq!(data.ssn, "***-**-6789");

        let html = render_review_html(&data);
        assert!(!html.contains("Abcdef1!"));
        assert!(!html.contains("123-45"));
    }

    #[test]
    fn test_values_escaped() {
        let mut doc = intake_page(&Config::default());
        doc.set_value("symptoms", "<script>cough</script>");
        let html = render_review_html(&ReviewData::collect(&doc));
        assert!(html.contains("&lt;script&gt;cough&lt;/script&gt;"));
    }
}
