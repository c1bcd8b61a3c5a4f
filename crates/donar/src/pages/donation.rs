//! Amount-and-reason step of the donation flow.

use crate::data::{AmountMethod, DonationRecord};
use crate::fixture::PageComponent;
use crate::locator::Strategy;
use crate::page::BasePage;
use crate::result::DonarResult;

use super::selectors::{donation, CONTINUE_TEXT};

/// Page object for the first donation step
pub struct DonationPage {
    base: BasePage,
}

impl PageComponent for DonationPage {
    fn attach(base: BasePage) -> Self {
        Self { base }
    }
}

impl DonationPage {
    /// The underlying base page
    #[must_use]
    pub const fn base(&self) -> &BasePage {
        &self.base
    }

    /// Open the donation form
    pub async fn open(&self, url: &str) -> DonarResult<()> {
        self.base.navigate(url).await
    }

    /// Accept the cookie consent banner
    pub async fn accept_cookie(&self) -> DonarResult<()> {
        self.base
            .click(Strategy::Id, donation::ACCEPT_COOKIES_ID)
            .await
    }

    /// Check the page heading is present
    pub async fn validate_header(&self) -> DonarResult<()> {
        self.base
            .expect_text_visible(donation::PAGE_TITLE_TEXT)
            .await
    }

    /// Complete the whole step and continue to personal details
    pub async fn select_donation_details(&self, record: &DonationRecord) -> DonarResult<()> {
        self.donate_amount(record).await?;
        self.donation_type(record).await?;
        self.your_motivation(record).await?;
        self.select_donation_purpose(record).await?;
        self.continue_to_next_step().await
    }

    /// Choose or enter the donation amount
    pub async fn donate_amount(&self, record: &DonationRecord) -> DonarResult<()> {
        self.base
            .expect_text_visible(donation::AMOUNT_LABEL_TEXT)
            .await?;
        match record.amount.method {
            AmountMethod::Preset => {
                let id = donation::preset_amount_id(&record.amount.value);
                self.base.click(Strategy::Id, &id).await
            }
            AmountMethod::Other => {
                self.base
                    .fill(Strategy::Id, donation::OTHER_AMOUNT_ID, &record.amount.value)
                    .await
            }
        }
    }

    /// Choose the donation frequency
    pub async fn donation_type(&self, record: &DonationRecord) -> DonarResult<()> {
        self.base
            .expect_text_visible(donation::FREQUENCY_LABEL_TEXT)
            .await?;
        let label = match record.frequency {
            crate::data::DonationFrequency::OneOff => donation::ONE_OFF_LABEL,
            crate::data::DonationFrequency::Monthly => donation::MONTHLY_LABEL,
        };
        self.base.click(Strategy::Label, label).await
    }

    /// Answer the motivation question, including the in-memory name when given
    pub async fn your_motivation(&self, record: &DonationRecord) -> DonarResult<()> {
        self.base
            .expect_text_visible(donation::MOTIVATION_LABEL_TEXT)
            .await?;
        self.base
            .fill(Strategy::Id, donation::MOTIVATION_SELECT_ID, &record.motivation)
            .await?;
        if let Some(name) = record.in_memory_of.as_deref() {
            if !name.trim().is_empty() {
                self.base
                    .fill(Strategy::Id, donation::MEMORY_NAME_ID, name)
                    .await?;
            }
        }
        Ok(())
    }

    /// Choose where the donation goes
    pub async fn select_donation_purpose(&self, record: &DonationRecord) -> DonarResult<()> {
        self.base
            .expect_text_visible(donation::PURPOSE_LABEL_TEXT)
            .await?;
        if record.purpose == donation::PURPOSE_GREATEST_NEED_LABEL {
            self.base
                .click(Strategy::Label, donation::PURPOSE_GREATEST_NEED_LABEL)
                .await
        } else {
            self.base
                .click(Strategy::Label, donation::PURPOSE_CANCER_TYPE_LABEL)
                .await?;
            self.base
                .fill(Strategy::Id, donation::RESTRICTION_SELECT_ID, &record.purpose)
                .await
        }
    }

    /// Advance to the next step
    pub async fn continue_to_next_step(&self) -> DonarResult<()> {
        self.base.click(Strategy::Text, CONTINUE_TEXT).await
    }

    /// Submit the empty form and check both validation messages appear.
    /// The payment-option link is toggled between submissions so the
    /// frequency error is exercised on both donation variants.
    pub async fn amount_error_validation(&self) -> DonarResult<()> {
        self.continue_to_next_step().await?;
        self.base
            .expect_text_visible(donation::AMOUNT_ERROR_TEXT)
            .await?;
        self.base
            .click(Strategy::Class, donation::PAYMENT_OPTION_LINK_CLASS)
            .await?;
        self.continue_to_next_step().await?;
        self.base
            .expect_text_visible(donation::AMOUNT_ERROR_TEXT)
            .await?;
        self.base
            .expect_text_visible(donation::FREQUENCY_ERROR_TEXT)
            .await?;
        self.base
            .click(Strategy::Class, donation::PAYMENT_OPTION_LINK_CLASS)
            .await
    }
}
