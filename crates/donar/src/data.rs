//! Test data records.
//!
//! Flow tests are data-driven: a record describes one donation or one
//! employee, and the page objects read fields off it. Records deserialize
//! from the JSON files under `testdata/`.

use serde::{Deserialize, Serialize};

use crate::result::DonarResult;

/// How the donation amount is chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountMethod {
    /// Click one of the preset amount buttons ("select" on the wire)
    #[serde(rename = "select")]
    Preset,
    /// Type the amount into the "other amount" input
    Other,
}

/// Donation amount selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    /// Amount in whole pounds, as entered (no currency symbol)
    pub value: String,
    /// Preset button or free-text entry
    pub method: AmountMethod,
}

/// One-off or recurring donation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DonationFrequency {
    /// Single donation
    OneOff,
    /// Monthly donation
    Monthly,
}

/// Card details for the payment step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Card number
    pub number: String,
    /// Expiry in MM/YY form
    pub expiry: String,
    /// Security code
    pub cvv: String,
}

/// Donor personal details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalDetails {
    /// Title (Mr, Ms, ...)
    pub title: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone: String,
}

/// Donor address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// First address line
    pub line1: String,
    /// Town or city
    pub city: String,
    /// Postcode
    pub postcode: String,
}

/// One complete donation scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationRecord {
    /// Amount selection
    pub amount: Amount,
    /// One-off or monthly
    pub frequency: DonationFrequency,
    /// Motivation answer (e.g. "In memory of someone")
    pub motivation: String,
    /// Name for an in-memory donation, when the motivation asks for one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_memory_of: Option<String>,
    /// Research purpose the donation supports
    pub purpose: String,
    /// Donor details
    pub details: PersonalDetails,
    /// Donor address
    pub address: Address,
    /// Payment card
    pub card: Card,
    /// Whether Gift Aid is claimed
    pub gift_aid: bool,
}

impl DonationRecord {
    /// Parse a record from JSON
    pub fn from_json(json: &str) -> DonarResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// A complete, valid donation used by flow tests
    #[must_use]
    pub fn sample() -> Self {
        Self {
            amount: Amount {
                value: "20".to_string(),
                method: AmountMethod::Preset,
            },
            frequency: DonationFrequency::OneOff,
            motivation: "In memory of someone".to_string(),
            in_memory_of: Some("Rosalind Franklin".to_string()),
            purpose: "Bowel cancer".to_string(),
            details: PersonalDetails {
                title: "Ms".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.org".to_string(),
                phone: "07700900123".to_string(),
            },
            address: Address {
                line1: "1 Analytical Way".to_string(),
                city: "London".to_string(),
                postcode: "SW1A 1AA".to_string(),
            },
            card: Card {
                number: "4242424242424242".to_string(),
                expiry: "12/30".to_string(),
                cvv: "123".to_string(),
            },
            gift_aid: true,
        }
    }
}

/// One employee for the HR flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone: String,
    /// Start date, year
    pub start_year: String,
    /// Start date, month
    pub start_month: String,
    /// Start date, day
    pub start_day: String,
    /// Job title
    pub job_title: String,
}

impl EmployeeRecord {
    /// Parse a record from JSON
    pub fn from_json(json: &str) -> DonarResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a list of records from JSON
    pub fn list_from_json(json: &str) -> DonarResult<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    /// A valid employee used by flow tests
    #[must_use]
    pub fn sample() -> Self {
        Self {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace.hopper@example.org".to_string(),
            phone: "07700900456".to_string(),
            start_year: "2026".to_string(),
            start_month: "9".to_string(),
            start_day: "1".to_string(),
            job_title: "Rear Admiral".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_donation_record_round_trips() {
        let record = DonationRecord::sample();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(DonationRecord::from_json(&json).unwrap(), record);
    }

    #[test]
    fn test_in_memory_of_is_optional() {
        let mut record = DonationRecord::sample();
        record.motivation = "A loved one is living with cancer".to_string();
        record.in_memory_of = None;
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("in_memory_of"));
        assert_eq!(DonationRecord::from_json(&json).unwrap(), record);
    }

    #[test]
    fn test_employee_list_parses() {
        let json = serde_json::to_string(&[EmployeeRecord::sample(), EmployeeRecord::sample()])
            .unwrap();
        let list = EmployeeRecord::list_from_json(&json).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_preset_method_reads_select_on_the_wire() {
        let amount: Amount =
            serde_json::from_str(r#"{ "value": "20", "method": "select" }"#).unwrap();
        assert_eq!(amount.method, AmountMethod::Preset);
        assert_eq!(
            serde_json::to_string(&amount.method).unwrap(),
            "\"select\""
        );
    }

    #[test]
    fn test_checked_in_donation_file_parses() {
        let record =
            DonationRecord::from_json(include_str!("../testdata/donation.json")).unwrap();
        assert_eq!(record.amount.method, AmountMethod::Preset);
        assert_eq!(record, DonationRecord::sample());
    }

    #[test]
    fn test_checked_in_employee_file_parses() {
        let list =
            EmployeeRecord::list_from_json(include_str!("../testdata/employees.json")).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], EmployeeRecord::sample());
    }

    #[test]
    fn test_frequency_wire_names() {
        assert_eq!(
            serde_json::to_string(&DonationFrequency::OneOff).unwrap(),
            "\"one-off\""
        );
        assert_eq!(
            serde_json::to_string(&DonationFrequency::Monthly).unwrap(),
            "\"monthly\""
        );
    }
}
