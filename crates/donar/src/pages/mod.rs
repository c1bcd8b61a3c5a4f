//! Page objects for the flows under test.
//!
//! Two applications are covered: the donation flow (amount and reason,
//! personal details, payment, confirmation) and the HR add-employee flow.
//! Each page object attaches to the shared [`crate::page::BasePage`] through
//! [`crate::fixture::PageComponent`] and exposes flow-level steps; all
//! element access goes through the interaction funnel.

pub mod details;
pub mod donation;
pub mod employee;
pub mod payment;
pub mod selectors;
pub mod thankyou;

pub use details::DetailsPage;
pub use donation::DonationPage;
pub use employee::{EmployeePage, LoginPage};
pub use payment::PaymentPage;
pub use thankyou::ThankyouPage;
