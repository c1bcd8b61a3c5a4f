//! Thank-you confirmation step of the donation flow.

use crate::data::DonationRecord;
use crate::fixture::PageComponent;
use crate::locator::Strategy;
use crate::page::BasePage;
use crate::result::{DonarError, DonarResult};

use super::payment::PaymentPage;
use super::selectors::thankyou;

/// Page object for the confirmation page
pub struct ThankyouPage {
    base: BasePage,
}

impl PageComponent for ThankyouPage {
    fn attach(base: BasePage) -> Self {
        Self { base }
    }
}

impl ThankyouPage {
    /// The underlying base page
    #[must_use]
    pub const fn base(&self) -> &BasePage {
        &self.base
    }

    /// Validate the whole confirmation page
    pub async fn thankyou_details(
        &self,
        record: &DonationRecord,
        payment: &PaymentPage,
    ) -> DonarResult<()> {
        self.confirmation_receipt(record, payment).await?;
        self.donation_details(record).await
    }

    /// Check the thank-you message, the reference number against the captured
    /// transaction id, and the confirmation email line
    pub async fn confirmation_receipt(
        &self,
        record: &DonationRecord,
        payment: &PaymentPage,
    ) -> DonarResult<()> {
        self.base
            .expect_text_visible(thankyou::THANK_YOU_TEXT)
            .await?;

        let sentence = self.base.text_of(Strategy::Id, thankyou::REFERENCE_ID).await?;
        let reference = sentence
            .strip_prefix(thankyou::REFERENCE_PREFIX)
            .map(str::trim)
            .ok_or_else(|| DonarError::Assertion {
                message: format!("no reference number in '{sentence}'"),
            })?;
        let expected = payment.transaction_id().ok_or_else(|| DonarError::Assertion {
            message: "no transaction id was captured during payment".to_string(),
        })?;
        if reference != expected {
            return Err(DonarError::Assertion {
                message: format!("reference number '{reference}' != transaction id '{expected}'"),
            });
        }

        self.base
            .expect_text_visible(&format!(
                "A confirmation email will be sent to {}",
                record.details.email
            ))
            .await
    }

    /// Check the donation summary: amount, Gift Aid uplift, purpose and the
    /// in-memory dedication
    pub async fn donation_details(&self, record: &DonationRecord) -> DonarResult<()> {
        self.base
            .expect_text_visible(thankyou::YOUR_DONATION_TEXT)
            .await?;
        self.base
            .expect_text_visible(&format!("£{}.00", record.amount.value))
            .await?;
        if record.gift_aid {
            self.base
                .expect_text_visible(thankyou::GIFT_AID_LINE_TEXT)
                .await?;
        }
        self.base
            .expect_visible(Strategy::AltText, thankyou::EYE_ICON_ALT)
            .await?;
        if let Some(name) = record.in_memory_of.as_deref() {
            if !name.trim().is_empty() {
                self.base
                    .expect_text_visible(&format!("In memory of {name}"))
                    .await?;
            }
        }
        Ok(())
    }
}
