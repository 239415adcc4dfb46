//! Scenario world: the session plus the page objects steps act on.

use crate::driver::Driver;
use crate::pages::{CalculatorPage, MainPage};
use crate::result::CheckResult;
use crate::session::Session;
use crate::steps::{StepCall, StepKind};
use tracing::debug;

/// State shared by the steps of a run
#[derive(Debug)]
pub struct World<D: Driver> {
    session: Session<D>,
    main: MainPage,
    calculator: CalculatorPage,
}

impl<D: Driver> World<D> {
    /// Assemble a world
    #[must_use]
    pub fn new(session: Session<D>, main: MainPage, calculator: CalculatorPage) -> Self {
        Self {
            session,
            main,
            calculator,
        }
    }

    /// Browser session
    #[must_use]
    pub const fn session(&self) -> &Session<D> {
        &self.session
    }

    /// Mutable browser session
    pub fn session_mut(&mut self) -> &mut Session<D> {
        &mut self.session
    }

    /// Landing page
    #[must_use]
    pub const fn main_page(&self) -> &MainPage {
        &self.main
    }

    /// Calculator page
    #[must_use]
    pub const fn calculator(&self) -> &CalculatorPage {
        &self.calculator
    }

    /// Release the session (to close the browser)
    #[must_use]
    pub fn into_session(self) -> Session<D> {
        self.session
    }

    /// Run one resolved step by delegating to its page method
    pub async fn execute(&mut self, call: &StepCall) -> CheckResult<()> {
        debug!(step = ?call.kind(), arg = call.arg(), "execute step");
        let session = &mut self.session;
        let page = &self.calculator;
        match call.kind() {
            StepKind::LaunchCalculator => self.main.launch(session).await,
            StepKind::FillCustomerDetails => {
                page.enter_customer_details(session, call.required_arg()?)
                    .await
            }
            StepKind::SelectMaritalStatus => {
                page.select_marital_status(session, call.required_arg()?)
                    .await
            }
            StepKind::SelectSocialSecurity => {
                page.select_social_security(session, call.required_arg()?)
                    .await
            }
            StepKind::AssertSocialSecurityFields => {
                page.assert_social_security_fields_visible(session, call.required_arg()?)
                    .await
            }
            StepKind::ChangeDefaultValues => {
                page.enter_default_overrides(session, call.required_arg()?)
                    .await
            }
            StepKind::AssertDefaultValuesPersisted => {
                page.assert_default_overrides_persisted(session, call.required_arg()?)
                    .await
            }
            StepKind::SubmitForm => page.submit_form(session).await,
            StepKind::ValidateOutcome => page.validate_outcome(session, call.required_arg()?).await,
            StepKind::AssertResultVisible => page.assert_result_visible(session).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::MockDriver;
    use crate::fixture::TestData;
    use crate::result::CheckError;
    use crate::steps::StepRegistry;
    use crate::testing::{session, succeeding_form, with_consent_banner};
    use std::sync::Arc;

    fn world(driver: MockDriver) -> World<MockDriver> {
        World::new(
            session(driver),
            MainPage::new("https://calc.test/retirement"),
            CalculatorPage::new(Arc::new(TestData::bundled().unwrap())),
        )
    }

    async fn run(world: &mut World<MockDriver>, steps: &[&str]) -> CheckResult<()> {
        let registry = StepRegistry::calculator()?;
        for text in steps {
            let call = registry.resolve(text)?;
            world.execute(&call).await?;
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_happy_path_steps() {
        let mut w = world(with_consent_banner(succeeding_form()));
        run(
            &mut w,
            &[
                "User is on the pre-retirement calculator page",
                r#"User fills "validAge30" fields on the pre-retirement calculator page"#,
                r#"User selects marital status as "single" on the pre-retirement calculator page"#,
                "User submits the retirement calculator form",
                r#"User is able to see message for "validAge30" with retirement saving amount"#,
            ],
        )
        .await
        .unwrap();

        let driver = w.session().driver();
        assert_eq!(driver.current_url, "https://calc.test/retirement");
        assert!(driver.maximized);
        assert!(driver.was_called("script_click:#single"));
    }

    #[tokio::test]
    async fn test_launch_navigation_failure_propagates() {
        let mut w = world(succeeding_form().with_navigation_error("dns"));
        let err = run(&mut w, &["User is on the pre-retirement calculator page"])
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::NavigationFailure { .. }));
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_missing_argument_rejected() {
        let mut w = world(succeeding_form());
        let err = w
            .execute(&StepCall::new(StepKind::ValidateOutcome, None))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::UndefinedStep { .. }));
        assert!(w.session().driver().history().is_empty());
    }
}
