//! Donar: page-object test harness for multi-step web flows
//!
//! Donar (Spanish: "to donate") drives a charity donation journey and an HR
//! add-employee journey end to end. Every element interaction goes through
//! one dispatch funnel that validates the locator, checks the strategy/action
//! compatibility table, and performs exactly one browser-level operation.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                       DONAR Architecture                          │
//! ├──────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌─────────────┐    ┌───────────────┐          │
//! │   │ Page       │    │ Action      │    │ Browser       │          │
//! │   │ Objects    │───►│ Dispatch    │───►│ Session       │          │
//! │   │ (fixtures) │    │ (locators)  │    │ (CDP or mock) │          │
//! │   └────────────┘    └─────────────┘    └───────────────┘          │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Page objects are injected per test through a type-keyed [`fixture`]
//! registry: one shared session, at most one instance of each page object,
//! teardown on every exit path. The [`mock`] session runs the same flows
//! without a browser; enable the `browser` feature for real CDP control.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use donar::{
//!     DonationRecord, MockSession, PageConfig, Scenario, TestContext,
//! };
//! use donar::pages::DonationPage;
//!
//! # async fn demo() -> donar::DonarResult<()> {
//! let session = Arc::new(MockSession::builder().build());
//! TestContext::run(
//!     Scenario::smoke("donation"),
//!     session,
//!     PageConfig::default(),
//!     |ctx| async move {
//!         let donation = ctx.fixture::<DonationPage>()?;
//!         donation.open("https://donate.example.org").await?;
//!         donation.select_donation_details(&DonationRecord::sample()).await
//!     },
//! )
//! .await
//! # }
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod action;
pub mod data;
pub mod fixture;
pub mod locator;
pub mod logging;
pub mod mock;
pub mod network;
pub mod page;
pub mod pages;
pub mod report;
pub mod result;
pub mod scenario;
pub mod session;
pub mod wait;

pub use action::{dispatch, Action, ActionKind};
pub use data::{DonationRecord, EmployeeRecord};
pub use fixture::{FixtureRegistry, PageComponent, TestContext};
pub use locator::{resolve, ElementQuery, Strategy};
pub use mock::MockSession;
pub use network::{CapturedResponse, HttpMethod, ResponsePattern};
pub use page::{BasePage, PageConfig};
pub use report::{RunReport, RunStatus};
pub use result::{DonarError, DonarResult};
pub use scenario::Scenario;
pub use session::BrowserSession;
pub use wait::WaitOptions;

#[cfg(feature = "browser")]
pub use session::cdp::{CdpSession, SessionConfig};
