//! Personal details step of the donation flow.

use crate::data::DonationRecord;
use crate::fixture::PageComponent;
use crate::locator::Strategy;
use crate::page::BasePage;
use crate::result::DonarResult;

use super::selectors::{details, CONTINUE_TEXT};

/// Page object for the personal details step
pub struct DetailsPage {
    base: BasePage,
}

impl PageComponent for DetailsPage {
    fn attach(base: BasePage) -> Self {
        Self { base }
    }
}

impl DetailsPage {
    /// The underlying base page
    #[must_use]
    pub const fn base(&self) -> &BasePage {
        &self.base
    }

    /// Complete the whole step and continue to payment
    pub async fn personal_details(&self, record: &DonationRecord) -> DonarResult<()> {
        self.fill_personal_details(record).await?;
        self.fill_address_details(record).await?;
        self.fill_phone_number(record).await?;
        self.continue_to_next_step().await
    }

    /// Fill title, name and email
    pub async fn fill_personal_details(&self, record: &DonationRecord) -> DonarResult<()> {
        self.base
            .expect_text_visible(details::YOUR_DETAILS_TEXT)
            .await?;
        self.base
            .fill(Strategy::Id, details::TITLE_SELECT_ID, &record.details.title)
            .await?;
        self.base
            .fill(Strategy::Id, details::FIRST_NAME_ID, &record.details.first_name)
            .await?;
        self.base
            .fill(Strategy::Id, details::LAST_NAME_ID, &record.details.last_name)
            .await?;
        self.base
            .fill(Strategy::Id, details::EMAIL_ID, &record.details.email)
            .await
    }

    /// Fill the address via postcode lookup plus manual entry
    pub async fn fill_address_details(&self, record: &DonationRecord) -> DonarResult<()> {
        self.base
            .expect_text_visible(details::YOUR_ADDRESS_TEXT)
            .await?;
        self.base
            .fill(Strategy::Label, details::POSTCODE_LABEL, &record.address.postcode)
            .await?;
        self.base
            .click(Strategy::Text, details::FIND_ADDRESS_TEXT)
            .await?;
        self.base
            .click(Strategy::Text, details::MANUAL_ADDRESS_TEXT)
            .await?;
        self.base
            .fill(Strategy::Id, details::ADDRESS_LINE1_ID, &record.address.line1)
            .await?;
        self.base
            .fill(Strategy::Id, details::CITY_ID, &record.address.city)
            .await
    }

    /// Fill the contact phone number
    pub async fn fill_phone_number(&self, record: &DonationRecord) -> DonarResult<()> {
        self.base
            .fill(Strategy::Id, details::PHONE_NUMBER_ID, &record.details.phone)
            .await
    }

    /// Advance to the next step
    pub async fn continue_to_next_step(&self) -> DonarResult<()> {
        self.base.click(Strategy::Text, CONTINUE_TEXT).await
    }

    /// Submit the empty form and check the field validation messages appear
    pub async fn details_error_validation(&self) -> DonarResult<()> {
        self.continue_to_next_step().await?;
        self.base
            .expect_text_visible(details::FIRST_NAME_ERROR_TEXT)
            .await?;
        self.base
            .expect_text_visible(details::LAST_NAME_ERROR_TEXT)
            .await?;
        self.base
            .expect_text_visible(details::EMAIL_ERROR_TEXT)
            .await
    }
}
