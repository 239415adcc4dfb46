//! Pre-retirement calculator page object.
//!
//! Every element is reached through [`CalculatorElement::locator`], a pure
//! function from semantic name to selector. Operations look their values up
//! in the injected [`TestData`] before touching the page, so a bad key or an
//! unknown option never produces a half-filled form.

use super::PageObject;
use crate::driver::Driver;
use crate::fixture::{ScenarioRecord, TestData, ALL_EMPTY_SCENARIO};
use crate::locator::{Locator, Selector};
use crate::result::{CheckError, CheckResult};
use crate::session::Session;
use crate::wait::Readiness;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

/// Elements of the calculator form
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalculatorElement {
    CurrentAgeInput,
    RetiringAgeInput,
    CurrentIncomeInput,
    SpouseIncomeInput,
    CurrentSavingsInput,
    AnnualSavingsInput,
    SavingsIncreaseRateInput,
    SocialSecurityYes,
    SocialSecurityNo,
    SocialSecurityOverrideInput,
    SingleToggle,
    MarriedToggle,
    AdjustDefaultsLink,
    AdditionalIncomeInput,
    RetirementDurationInput,
    RetirementIncomeInput,
    PreRetirementReturnInput,
    PostRetirementReturnInput,
    SaveChangesButton,
    SubmitButton,
    ResultMessage,
    ResultChart,
    MonthlySavingsTable,
    RequiredFieldAlert,
    CurrentAgeError,
    RetirementAgeError,
    CurrentIncomeError,
    CurrentSavingsError,
}

impl CalculatorElement {
    /// Every element, in form order
    pub const ALL: [Self; 28] = [
        Self::CurrentAgeInput,
        Self::RetiringAgeInput,
        Self::CurrentIncomeInput,
        Self::SpouseIncomeInput,
        Self::CurrentSavingsInput,
        Self::AnnualSavingsInput,
        Self::SavingsIncreaseRateInput,
        Self::SocialSecurityYes,
        Self::SocialSecurityNo,
        Self::SocialSecurityOverrideInput,
        Self::SingleToggle,
        Self::MarriedToggle,
        Self::AdjustDefaultsLink,
        Self::AdditionalIncomeInput,
        Self::RetirementDurationInput,
        Self::RetirementIncomeInput,
        Self::PreRetirementReturnInput,
        Self::PostRetirementReturnInput,
        Self::SaveChangesButton,
        Self::SubmitButton,
        Self::ResultMessage,
        Self::ResultChart,
        Self::MonthlySavingsTable,
        Self::RequiredFieldAlert,
        Self::CurrentAgeError,
        Self::RetirementAgeError,
        Self::CurrentIncomeError,
        Self::CurrentSavingsError,
    ];

    /// Freshly built locator for this element
    #[must_use]
    pub fn locator(self) -> Locator {
        let (name, selector) = match self {
            Self::CurrentAgeInput => ("current age input", Selector::css("#current-age")),
            Self::RetiringAgeInput => ("retirement age input", Selector::css("#retirement-age")),
            Self::CurrentIncomeInput => ("current income input", Selector::css("#current-income")),
            Self::SpouseIncomeInput => ("spouse income input", Selector::css("#spouse-income")),
            Self::CurrentSavingsInput => (
                "current savings input",
                Selector::css("#current-total-savings"),
            ),
            Self::AnnualSavingsInput => (
                "annual savings input",
                Selector::css("#current-annual-savings"),
            ),
            Self::SavingsIncreaseRateInput => (
                "savings increase rate input",
                Selector::css("#savings-increase-rate"),
            ),
            Self::SocialSecurityYes => ("social security yes", Selector::css("#yes-social-benefits")),
            Self::SocialSecurityNo => ("social security no", Selector::css("#no-social-benefits")),
            Self::SocialSecurityOverrideInput => (
                "social security override input",
                Selector::css("#social-security-override"),
            ),
            Self::SingleToggle => ("single toggle", Selector::css("#single")),
            Self::MarriedToggle => ("married toggle", Selector::css("#married")),
            Self::AdjustDefaultsLink => (
                "adjust default values link",
                Selector::link_text("Adjust default values"),
            ),
            Self::AdditionalIncomeInput => (
                "additional income input",
                Selector::css("#additional-income"),
            ),
            Self::RetirementDurationInput => (
                "retirement duration input",
                Selector::css("#retirement-duration"),
            ),
            Self::RetirementIncomeInput => (
                "retirement annual income input",
                Selector::css("#retirement-annual-income"),
            ),
            Self::PreRetirementReturnInput => (
                "pre-retirement return input",
                Selector::css("#pre-retirement-roi"),
            ),
            Self::PostRetirementReturnInput => (
                "post-retirement return input",
                Selector::css("#post-retirement-roi"),
            ),
            Self::SaveChangesButton => (
                "save changes button",
                Selector::xpath("//*[text()='Save changes']"),
            ),
            Self::SubmitButton => ("calculate button", Selector::xpath("//*[@data-tag-id=\"submit\"]")),
            Self::ResultMessage => ("result message", Selector::css("#result-message")),
            Self::ResultChart => ("result chart", Selector::css("#results-chart")),
            Self::MonthlySavingsTable => (
                "monthly savings table",
                Selector::css("#monthly-savings-results-table"),
            ),
            Self::RequiredFieldAlert => (
                "required field alert",
                Selector::css("#calculator-input-alert"),
            ),
            Self::CurrentAgeError => (
                "current age error",
                Selector::css("#invalid-current-age-error"),
            ),
            Self::RetirementAgeError => (
                "retirement age error",
                Selector::css("#invalid-retirement-age-error"),
            ),
            Self::CurrentIncomeError => (
                "current income error",
                Selector::xpath("//*[@for = \"current-income\"]"),
            ),
            Self::CurrentSavingsError => (
                "current savings error",
                Selector::xpath("//*[@for = \"current-total-savings\"]"),
            ),
        };
        Locator::new(name, selector)
    }

    /// Inline error element shown next to a customer-details field
    #[must_use]
    pub fn inline_error_for(field: &str) -> Option<Self> {
        match field {
            "currentAge" => Some(Self::CurrentAgeError),
            "retiringAge" => Some(Self::RetirementAgeError),
            "currentAnnualIncome" => Some(Self::CurrentIncomeError),
            "currentRetirementSavings" => Some(Self::CurrentSavingsError),
            _ => None,
        }
    }
}

/// Fixture field → input written by `enter_customer_details`
pub const CUSTOMER_DETAIL_FIELDS: [(&str, CalculatorElement); 7] = [
    ("currentAge", CalculatorElement::CurrentAgeInput),
    ("retiringAge", CalculatorElement::RetiringAgeInput),
    ("currentAnnualIncome", CalculatorElement::CurrentIncomeInput),
    ("spouseAnnualIncome", CalculatorElement::SpouseIncomeInput),
    ("currentRetirementSavings", CalculatorElement::CurrentSavingsInput),
    ("currentAnnualSavings", CalculatorElement::AnnualSavingsInput),
    ("interestRate", CalculatorElement::SavingsIncreaseRateInput),
];

/// Fixture field → input written by `enter_default_overrides`
pub const DEFAULT_OVERRIDE_FIELDS: [(&str, CalculatorElement); 5] = [
    ("retirementYears", CalculatorElement::RetirementDurationInput),
    ("extraIncome", CalculatorElement::AdditionalIncomeInput),
    ("finalAnnualIncome", CalculatorElement::RetirementIncomeInput),
    ("preRetirementReturn", CalculatorElement::PreRetirementReturnInput),
    ("postRetirementReturn", CalculatorElement::PostRetirementReturnInput),
];

/// Marital status toggle option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaritalStatus {
    Single,
    Married,
}

impl MaritalStatus {
    const fn element(self) -> CalculatorElement {
        match self {
            Self::Single => CalculatorElement::SingleToggle,
            Self::Married => CalculatorElement::MarriedToggle,
        }
    }
}

impl FromStr for MaritalStatus {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Self::Single),
            "married" => Ok(Self::Married),
            other => Err(CheckError::UnknownOption {
                field: "marital status",
                value: other.to_string(),
                allowed: "single, married",
            }),
        }
    }
}

/// Social security benefits option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialSecurity {
    Yes,
    No,
}

impl SocialSecurity {
    const fn element(self) -> CalculatorElement {
        match self {
            Self::Yes => CalculatorElement::SocialSecurityYes,
            Self::No => CalculatorElement::SocialSecurityNo,
        }
    }
}

impl FromStr for SocialSecurity {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            other => Err(CheckError::UnknownOption {
                field: "social security",
                value: other.to_string(),
                allowed: "yes, no",
            }),
        }
    }
}

/// Page object for the calculator form
#[derive(Debug, Clone)]
pub struct CalculatorPage {
    data: Arc<TestData>,
}

impl CalculatorPage {
    /// Create the page over shared test data
    #[must_use]
    pub fn new(data: Arc<TestData>) -> Self {
        Self { data }
    }

    /// Injected test data
    #[must_use]
    pub fn data(&self) -> &TestData {
        &self.data
    }

    /// Click the marital status toggle
    pub async fn select_marital_status<D: Driver>(
        &self,
        session: &mut Session<D>,
        status: &str,
    ) -> CheckResult<()> {
        let status: MaritalStatus = status.parse()?;
        session.click_via_script(&status.element().locator()).await?;
        info!(?status, "marital status selected");
        Ok(())
    }

    /// Click the social security option
    pub async fn select_social_security<D: Driver>(
        &self,
        session: &mut Session<D>,
        option: &str,
    ) -> CheckResult<()> {
        let option: SocialSecurity = option.parse()?;
        session.click_via_script(&option.element().locator()).await?;
        session.capture("social_security").await;
        info!(?option, "social security option selected");
        Ok(())
    }

    /// Check the social security override field matches the chosen option:
    /// shown for `yes`, hidden for `no`.
    pub async fn assert_social_security_fields_visible<D: Driver>(
        &self,
        session: &mut Session<D>,
        option: &str,
    ) -> CheckResult<()> {
        let option: SocialSecurity = option.parse()?;
        let field = CalculatorElement::SocialSecurityOverrideInput.locator();
        let visible = match option {
            SocialSecurity::Yes => {
                session
                    .wait_for(&field, Readiness::Displayed, session.wait_options())
                    .await?
            }
            SocialSecurity::No => {
                !session
                    .wait_until_hidden(&field, session.wait_options())
                    .await?
            }
        };
        let expected = option == SocialSecurity::Yes;
        if visible != expected {
            return Err(CheckError::assertion(
                field.name(),
                visibility(expected),
                visibility(visible),
            ));
        }
        info!(?option, "social security fields checked");
        Ok(())
    }

    fn resolve(
        record: &ScenarioRecord,
        fields: &[(&'static str, CalculatorElement)],
    ) -> CheckResult<Vec<(CalculatorElement, String)>> {
        fields
            .iter()
            .map(|(name, element)| record.input(name).map(|value| (*element, value)))
            .collect()
    }

    /// Open the defaults panel, write the five overrides from the scenario, save
    pub async fn enter_default_overrides<D: Driver>(
        &self,
        session: &mut Session<D>,
        key: &str,
    ) -> CheckResult<()> {
        let record = self.data.positive().get(key)?;
        let values = Self::resolve(record, &DEFAULT_OVERRIDE_FIELDS)?;

        session
            .click(&CalculatorElement::AdjustDefaultsLink.locator())
            .await?;
        for (element, value) in &values {
            session.set_field(&element.locator(), value).await?;
        }
        session
            .click(&CalculatorElement::SaveChangesButton.locator())
            .await?;
        info!(scenario = key, "default calculator values entered");
        Ok(())
    }

    /// Re-open the defaults panel and read the five override values back
    pub async fn read_default_overrides<D: Driver>(
        &self,
        session: &mut Session<D>,
    ) -> CheckResult<Vec<(&'static str, String)>> {
        session
            .click(&CalculatorElement::AdjustDefaultsLink.locator())
            .await?;
        let mut values = Vec::with_capacity(DEFAULT_OVERRIDE_FIELDS.len());
        for (name, element) in DEFAULT_OVERRIDE_FIELDS {
            values.push((name, session.read_value(&element.locator()).await?));
        }
        session
            .click(&CalculatorElement::SaveChangesButton.locator())
            .await?;
        Ok(values)
    }

    /// Check the defaults panel still holds the scenario's override values
    pub async fn assert_default_overrides_persisted<D: Driver>(
        &self,
        session: &mut Session<D>,
        key: &str,
    ) -> CheckResult<()> {
        let record = self.data.positive().get(key)?;
        let expected = Self::resolve(record, &DEFAULT_OVERRIDE_FIELDS)?;
        let actual = self.read_default_overrides(session).await?;
        for ((element, want), (_, got)) in expected.iter().zip(&actual) {
            if want != got {
                return Err(CheckError::assertion(element.locator().name(), want, got));
            }
        }
        info!(scenario = key, "default calculator values persisted");
        Ok(())
    }

    /// Write the seven customer-details fields from the scenario
    pub async fn enter_customer_details<D: Driver>(
        &self,
        session: &mut Session<D>,
        key: &str,
    ) -> CheckResult<()> {
        let record = self.data.positive().get(key)?;
        let values = Self::resolve(record, &CUSTOMER_DETAIL_FIELDS)?;
        for (element, value) in &values {
            session.set_field(&element.locator(), value).await?;
        }
        info!(scenario = key, "customer details entered");
        Ok(())
    }

    /// Click Calculate
    pub async fn submit_form<D: Driver>(&self, session: &mut Session<D>) -> CheckResult<()> {
        session
            .click(&CalculatorElement::SubmitButton.locator())
            .await?;
        session.capture("form_submitted").await;
        info!("calculator form submitted");
        Ok(())
    }

    /// Assert the outcome expected for `key` after submission.
    ///
    /// - `allEmpty`: the required-field alert reads exactly the fixture's `errorMsg`
    /// - keys in the negative store: the inline error for `errorField` is shown
    ///   and the required-field alert is not
    /// - keys in the positive store: the result message and chart are shown
    ///
    /// A key in neither store fails with `ScenarioNotFound` before the page is read.
    pub async fn validate_outcome<D: Driver>(
        &self,
        session: &mut Session<D>,
        key: &str,
    ) -> CheckResult<()> {
        if key == ALL_EMPTY_SCENARIO {
            let expected = self.data.negative().get(key)?.input("errorMsg")?;
            let alert = CalculatorElement::RequiredFieldAlert.locator();
            let actual = session.read_text(&alert).await?;
            session.capture("error_message").await;
            if actual.trim() != expected.trim() {
                return Err(CheckError::assertion(alert.name(), expected, actual));
            }
        } else if self.data.negative().contains(key) {
            self.assert_inline_error(session, self.data.negative().get(key)?)
                .await?;
        } else {
            self.data.positive().get(key)?;
            self.assert_result_visible(session).await?;
            session.capture("result").await;
        }
        info!(scenario = key, "outcome verified");
        Ok(())
    }

    async fn assert_inline_error<D: Driver>(
        &self,
        session: &mut Session<D>,
        expected: &ScenarioRecord,
    ) -> CheckResult<()> {
        let field = expected.input("errorField")?;
        let element =
            CalculatorElement::inline_error_for(&field).ok_or_else(|| CheckError::UnknownOption {
                field: "error field",
                value: field.clone(),
                allowed: "currentAge, retiringAge, currentAnnualIncome, currentRetirementSavings",
            })?;
        let error = element.locator();
        let shown = session
            .wait_for(&error, Readiness::Displayed, session.wait_options())
            .await?;
        session.capture("error_message").await;
        if !shown {
            return Err(CheckError::assertion(error.name(), "visible", "hidden"));
        }
        if let Some(message) = expected.get("errorMsg") {
            let message = message.as_input();
            let actual = session.read_text(&error).await?;
            if !actual.contains(message.trim()) {
                return Err(CheckError::assertion(error.name(), message, actual));
            }
        }
        let alert = CalculatorElement::RequiredFieldAlert.locator();
        if session.is_visible(&alert).await? {
            return Err(CheckError::assertion(alert.name(), "hidden", "visible"));
        }
        Ok(())
    }

    /// Assert the success result message and chart are shown
    pub async fn assert_result_visible<D: Driver>(
        &self,
        session: &mut Session<D>,
    ) -> CheckResult<()> {
        let message = CalculatorElement::ResultMessage.locator();
        if !session
            .wait_for(&message, Readiness::Displayed, session.wait_options())
            .await?
        {
            return Err(CheckError::assertion(message.name(), "visible", "hidden"));
        }
        let text = session.read_text(&message).await?;
        if text.trim().is_empty() {
            return Err(CheckError::assertion(message.name(), "non-empty text", text));
        }
        let chart = CalculatorElement::ResultChart.locator();
        if !session.is_visible(&chart).await? {
            return Err(CheckError::assertion(chart.name(), "visible", "hidden"));
        }
        Ok(())
    }
}

const fn visibility(shown: bool) -> &'static str {
    if shown {
        "visible"
    } else {
        "hidden"
    }
}

impl PageObject for CalculatorPage {
    fn url_pattern(&self) -> &str {
        "/insights-tools/retirement-calculator.html"
    }

    fn page_name(&self) -> &str {
        "pre-retirement calculator"
    }
}
