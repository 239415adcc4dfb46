//! Page objects for the retirement calculator site.

mod calculator;
mod main_page;

pub use calculator::{
    CalculatorElement, CalculatorPage, MaritalStatus, SocialSecurity, CUSTOMER_DETAIL_FIELDS,
    DEFAULT_OVERRIDE_FIELDS,
};
pub use main_page::{MainPage, CALCULATOR_URL, CONSENT_WAIT_MS};

/// A page or component of the UI under test.
pub trait PageObject {
    /// URL pattern that matches this page
    fn url_pattern(&self) -> &str;

    /// Page name for logging
    fn page_name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
