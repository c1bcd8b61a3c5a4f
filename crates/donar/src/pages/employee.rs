//! HR application: login and the add-employee flow.

use crate::data::EmployeeRecord;
use crate::fixture::PageComponent;
use crate::locator::Strategy;
use crate::page::BasePage;
use crate::result::DonarResult;

use super::selectors::employee;

/// Page object for the login screen
pub struct LoginPage {
    base: BasePage,
}

impl PageComponent for LoginPage {
    fn attach(base: BasePage) -> Self {
        Self { base }
    }
}

impl LoginPage {
    /// The underlying base page
    #[must_use]
    pub const fn base(&self) -> &BasePage {
        &self.base
    }

    /// Open the application
    pub async fn load(&self, url: &str) -> DonarResult<()> {
        self.base.navigate(url).await
    }

    /// Log in with the given credentials
    pub async fn login(&self, username: &str, password: &str) -> DonarResult<()> {
        self.base
            .click(Strategy::PathExpr, employee::LOGIN_LINK_PATH)
            .await?;
        self.base
            .fill(Strategy::Id, employee::USERNAME_ID, username)
            .await?;
        self.base
            .fill(Strategy::PathExpr, employee::PASSWORD_PATH, password)
            .await?;
        self.base
            .click(Strategy::PathExpr, employee::LOGIN_BUTTON_PATH)
            .await
    }
}

/// Page object for the employee dashboard and the add-employee form
pub struct EmployeePage {
    base: BasePage,
}

impl PageComponent for EmployeePage {
    fn attach(base: BasePage) -> Self {
        Self { base }
    }
}

impl EmployeePage {
    /// The underlying base page
    #[must_use]
    pub const fn base(&self) -> &BasePage {
        &self.base
    }

    /// Open the employees section from the dashboard
    pub async fn activate_employee(&self) -> DonarResult<()> {
        self.base
            .click(Strategy::Title, employee::EMPLOYEES_TITLE)
            .await
    }

    /// Open the add-employee form
    pub async fn add_employee(&self) -> DonarResult<()> {
        self.base
            .click(Strategy::PathExpr, employee::ADD_EMPLOYEE_PATH)
            .await
    }

    /// Pick the start date through the year/month/day picker
    async fn pick_start_date(&self, record: &EmployeeRecord) -> DonarResult<()> {
        self.base
            .click(Strategy::Text, employee::SELECT_DATE_TEXT)
            .await?;
        self.base
            .click(Strategy::PathExpr, employee::SELECT_YEAR_PATH)
            .await?;
        self.base.click(Strategy::Text, &record.start_year).await?;
        self.base
            .click(Strategy::PathExpr, employee::SELECT_MONTH_PATH)
            .await?;
        self.base.click(Strategy::Text, &record.start_month).await?;
        self.base.click(Strategy::Text, &record.start_day).await
    }

    /// Fill and save every record, checking the success banner after each.
    /// Between records the form is reopened; after the last one the flow
    /// moves on to the new profile.
    pub async fn fill_employee_details(&self, records: &[EmployeeRecord]) -> DonarResult<()> {
        let total = records.len();
        for (index, record) in records.iter().enumerate() {
            self.base
                .fill(Strategy::Id, employee::FIRST_NAME_ID, &record.first_name)
                .await?;
            self.base
                .fill(Strategy::PathExpr, employee::LAST_NAME_PATH, &record.last_name)
                .await?;
            self.base
                .fill(Strategy::Id, employee::EMAIL_ID, &record.email)
                .await?;
            self.base
                .fill(Strategy::Id, employee::PHONE_NUMBER_ID, &record.phone)
                .await?;
            self.pick_start_date(record).await?;
            self.base
                .fill(Strategy::Id, employee::JOB_TITLE_ID, &record.job_title)
                .await?;
            self.base
                .click(Strategy::PathExpr, employee::SAVE_EMPLOYEE_PATH)
                .await?;
            self.base
                .expect_text_visible(employee::SUCCESS_MESSAGE_TEXT)
                .await?;
            if index + 1 == total {
                self.base
                    .click(Strategy::Text, employee::GO_TO_PROFILE_TEXT)
                    .await?;
            } else {
                self.base
                    .click(Strategy::Text, employee::ADD_ANOTHER_TEXT)
                    .await?;
            }
        }
        Ok(())
    }

    /// Check every added employee shows up on the dashboard
    pub async fn validate_employee_details(&self, records: &[EmployeeRecord]) -> DonarResult<()> {
        for record in records {
            let full_name = format!("{} {}", record.first_name, record.last_name);
            self.base.expect_text_visible(&full_name).await?;
        }
        Ok(())
    }
}
