//! Payment step of the donation flow.
//!
//! Submission is observed on the wire: the submit click and the wait for the
//! `POST /transaction` response run concurrently so the response cannot be
//! missed, and the transaction id from the response body is kept for the
//! thank-you page to check against.

use std::sync::Mutex;

use tracing::info;

use crate::data::DonationRecord;
use crate::fixture::PageComponent;
use crate::locator::Strategy;
use crate::network::{HttpMethod, ResponsePattern};
use crate::page::BasePage;
use crate::result::DonarResult;

use super::selectors::{payment, CONTINUE_TEXT};

/// Page object for the payment step
pub struct PaymentPage {
    base: BasePage,
    transaction_id: Mutex<Option<String>>,
}

impl PageComponent for PaymentPage {
    fn attach(base: BasePage) -> Self {
        Self {
            base,
            transaction_id: Mutex::new(None),
        }
    }
}

impl PaymentPage {
    /// The underlying base page
    #[must_use]
    pub const fn base(&self) -> &BasePage {
        &self.base
    }

    /// Complete the whole step: fill card details and submit
    pub async fn payment_details(&self, record: &DonationRecord) -> DonarResult<()> {
        self.fill_payment_details(record).await?;
        self.complete_payment().await
    }

    /// Choose card payment and fill the card form
    pub async fn fill_payment_details(&self, record: &DonationRecord) -> DonarResult<()> {
        self.base
            .expect_text_visible(payment::DONATION_AMOUNT_TEXT)
            .await?;
        self.base
            .expect_text_visible(payment::METHOD_LABEL_TEXT)
            .await?;
        self.base
            .click(Strategy::Label, payment::CARD_METHOD_LABEL)
            .await?;
        self.base
            .fill(Strategy::Id, payment::CARD_NUMBER_ID, &record.card.number)
            .await?;
        let cardholder = format!(
            "{} {}",
            record.details.first_name, record.details.last_name
        );
        self.base
            .fill(Strategy::Id, payment::CARDHOLDER_ID, &cardholder)
            .await?;
        self.base
            .fill(Strategy::Id, payment::EXPIRY_ID, &record.card.expiry)
            .await?;
        self.base
            .fill(Strategy::Id, payment::CVV_ID, &record.card.cvv)
            .await?;
        if record.gift_aid {
            self.base.click(Strategy::Id, payment::GIFT_AID_ID).await?;
        }
        Ok(())
    }

    /// Submit the donation and capture the transaction id from the response
    pub async fn complete_payment(&self) -> DonarResult<()> {
        let pattern = ResponsePattern::url(payment::TRANSACTION_URL_FRAGMENT)
            .with_method(HttpMethod::Post);
        let (response, clicked) = tokio::join!(
            self.base.wait_for_response(&pattern),
            self.base
                .click(Strategy::Text, payment::COMPLETE_DONATION_TEXT),
        );
        clicked?;
        let response = response?;
        let id = response.json_str_field("id")?;
        info!(transaction_id = %id, status = response.status, "payment submitted");
        *self.transaction_id.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = Some(id);
        Ok(())
    }

    /// The transaction id captured by [`Self::complete_payment`], if any
    #[must_use]
    pub fn transaction_id(&self) -> Option<String> {
        self.transaction_id
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Submit without a payment method and check the validation messages
    pub async fn payment_error_validation(&self) -> DonarResult<()> {
        self.base
            .click(Strategy::Text, payment::COMPLETE_DONATION_TEXT)
            .await?;
        self.base
            .expect_text_visible(payment::METHOD_ERROR_TEXT)
            .await?;
        self.base
            .click(Strategy::Label, payment::CARD_METHOD_LABEL)
            .await?;
        self.base
            .click(Strategy::Text, payment::COMPLETE_DONATION_TEXT)
            .await?;
        self.base
            .expect_text_visible(payment::CARDHOLDER_ERROR_TEXT)
            .await
    }

    /// Advance to the next step
    pub async fn continue_to_next_step(&self) -> DonarResult<()> {
        self.base.click(Strategy::Text, CONTINUE_TEXT).await
    }
}
