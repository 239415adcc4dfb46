//! Shared mock calculator page for unit tests.

use crate::driver::{ClickEffect, MockDriver, MockElement};
use crate::pages::{CalculatorElement, MainPage};
use crate::session::Session;
use crate::wait::WaitOptions;

fn sel(element: CalculatorElement) -> crate::locator::Selector {
    element.locator().selector().clone()
}

/// Calculator form as served before submission
pub fn calculator_form() -> MockDriver {
    use CalculatorElement as E;

    let mut driver = MockDriver::new();
    for element in [
        E::CurrentAgeInput,
        E::RetiringAgeInput,
        E::CurrentIncomeInput,
        E::SpouseIncomeInput,
        E::CurrentSavingsInput,
        E::AnnualSavingsInput,
        E::SavingsIncreaseRateInput,
        E::SubmitButton,
    ] {
        driver.add_element(sel(element), MockElement::visible());
    }
    for element in [
        E::ResultMessage,
        E::ResultChart,
        E::MonthlySavingsTable,
        E::RequiredFieldAlert,
        E::CurrentAgeError,
        E::RetirementAgeError,
        E::CurrentIncomeError,
        E::CurrentSavingsError,
    ] {
        driver.add_element(sel(element), MockElement::hidden());
    }

    // Toggle inputs sit under styled labels, so native clicks are intercepted
    driver.add_element(sel(E::SingleToggle), MockElement::visible().intercepted());
    driver.add_element(sel(E::MarriedToggle), MockElement::visible().intercepted());
    driver.add_element(
        sel(E::SocialSecurityYes),
        MockElement::visible()
            .intercepted()
            .on_click(ClickEffect::Show(sel(E::SocialSecurityOverrideInput))),
    );
    driver.add_element(
        sel(E::SocialSecurityNo),
        MockElement::visible()
            .intercepted()
            .on_click(ClickEffect::Hide(sel(E::SocialSecurityOverrideInput))),
    );
    driver.add_element(sel(E::SocialSecurityOverrideInput), MockElement::hidden());

    let panel = [
        E::AdditionalIncomeInput,
        E::RetirementDurationInput,
        E::RetirementIncomeInput,
        E::PreRetirementReturnInput,
        E::PostRetirementReturnInput,
        E::SaveChangesButton,
    ];
    let mut open = MockElement::visible();
    let mut save = MockElement::hidden();
    for element in panel {
        open = open.on_click(ClickEffect::Show(sel(element)));
        save = save.on_click(ClickEffect::Hide(sel(element)));
    }
    driver.add_element(sel(E::AdjustDefaultsLink), open);
    for element in &panel[..5] {
        driver.add_element(sel(*element), MockElement::hidden());
    }
    driver.add_element(sel(E::SaveChangesButton), save);
    driver
}

/// Make the Calculate button reveal `elements`, optionally setting text
pub fn on_submit(driver: &mut MockDriver, effects: Vec<ClickEffect>) {
    let submit = sel(CalculatorElement::SubmitButton);
    if let Some(button) = driver.element_mut(&submit) {
        button.on_click.extend(effects);
    }
}

/// Successful calculation: message with text plus chart
pub fn succeeding_form() -> MockDriver {
    use CalculatorElement as E;
    let mut driver = calculator_form();
    on_submit(
        &mut driver,
        vec![
            ClickEffect::Show(sel(E::ResultMessage)),
            ClickEffect::SetText(
                sel(E::ResultMessage),
                "You are on track to have $1,234,567 saved.".to_string(),
            ),
            ClickEffect::Show(sel(E::ResultChart)),
            ClickEffect::Show(sel(E::MonthlySavingsTable)),
        ],
    );
    driver
}

/// Session with short waits over `driver`, consent banner absent
pub fn session(driver: MockDriver) -> Session<MockDriver> {
    Session::new(driver).with_wait(WaitOptions::new().with_timeout(40).with_poll_interval(5))
}

/// Add a dismissible consent banner
pub fn with_consent_banner(mut driver: MockDriver) -> MockDriver {
    let close = MainPage::consent_close().selector().clone();
    driver.add_element(
        close.clone(),
        MockElement::visible().on_click(ClickEffect::Hide(close)),
    );
    driver
}
