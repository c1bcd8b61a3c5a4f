//! Locator values and expected texts for the applications under test.
//!
//! Grouped per page section. Values are raw locator inputs; the strategy each
//! one is used with lives at the call site in the page objects.

/// The shared "Continue" button advancing the donation flow
pub const CONTINUE_TEXT: &str = "Continue";

/// Donation amount-and-reason step
pub mod donation {
    /// Cookie consent accept button id
    pub const ACCEPT_COOKIES_ID: &str = "onetrust-accept-btn-handler";
    /// Page heading
    pub const PAGE_TITLE_TEXT: &str = "Make a donation";
    /// Amount section label
    pub const AMOUNT_LABEL_TEXT: &str = "How much would you like to give?";
    /// Other-amount input id
    pub const OTHER_AMOUNT_ID: &str = "otherAmount";
    /// Link toggling between single and regular donation options
    pub const PAYMENT_OPTION_LINK_CLASS: &str = "payment-option-link";
    /// Frequency section label
    pub const FREQUENCY_LABEL_TEXT: &str = "How often would you like to give?";
    /// One-off frequency radio label
    pub const ONE_OFF_LABEL: &str = "Single donation";
    /// Monthly frequency radio label
    pub const MONTHLY_LABEL: &str = "Monthly donation";
    /// Motivation section label
    pub const MOTIVATION_LABEL_TEXT: &str = "What inspired you to give today?";
    /// Motivation select id
    pub const MOTIVATION_SELECT_ID: &str = "motivationSelect";
    /// In-memory person name input id
    pub const MEMORY_NAME_ID: &str = "personsName";
    /// Purpose section label
    pub const PURPOSE_LABEL_TEXT: &str = "Where would you like your donation to go?";
    /// Unrestricted purpose radio label
    pub const PURPOSE_GREATEST_NEED_LABEL: &str = "Wherever the need is greatest";
    /// Cancer-type purpose radio label
    pub const PURPOSE_CANCER_TYPE_LABEL: &str = "Towards research into a type of cancer";
    /// Cancer-type select id
    pub const RESTRICTION_SELECT_ID: &str = "restrictionSelect";
    /// Error shown when no amount is chosen
    pub const AMOUNT_ERROR_TEXT: &str = "Please select or enter an amount";
    /// Error shown when no frequency is chosen
    pub const FREQUENCY_ERROR_TEXT: &str = "Please select how often you would like to give";

    /// Preset amount button id for a whole-pound value
    #[must_use]
    pub fn preset_amount_id(value: &str) -> String {
        format!("amount-{value}")
    }
}

/// Personal details step
pub mod details {
    /// Section heading
    pub const YOUR_DETAILS_TEXT: &str = "Your details";
    /// Title select id
    pub const TITLE_SELECT_ID: &str = "title";
    /// First name input id
    pub const FIRST_NAME_ID: &str = "firstName";
    /// Last name input id
    pub const LAST_NAME_ID: &str = "lastName";
    /// Email input id
    pub const EMAIL_ID: &str = "emailAddress";
    /// Address section heading
    pub const YOUR_ADDRESS_TEXT: &str = "Your address";
    /// Postcode input label
    pub const POSTCODE_LABEL: &str = "Postcode";
    /// Address lookup trigger
    pub const FIND_ADDRESS_TEXT: &str = "Find address";
    /// Manual entry link
    pub const MANUAL_ADDRESS_TEXT: &str = "Enter your address manually";
    /// First address line input id
    pub const ADDRESS_LINE1_ID: &str = "addressLine1";
    /// Town or city input id
    pub const CITY_ID: &str = "townCity";
    /// Phone number input id
    pub const PHONE_NUMBER_ID: &str = "phoneNumber";
    /// Missing first name error
    pub const FIRST_NAME_ERROR_TEXT: &str = "Please enter your first name";
    /// Missing last name error
    pub const LAST_NAME_ERROR_TEXT: &str = "Please enter your last name";
    /// Missing email error
    pub const EMAIL_ERROR_TEXT: &str = "Please enter your email address";
}

/// Payment step
pub mod payment {
    /// Amount summary heading
    pub const DONATION_AMOUNT_TEXT: &str = "Donation amount";
    /// Method section label
    pub const METHOD_LABEL_TEXT: &str = "How would you like to donate?";
    /// Card payment radio label
    pub const CARD_METHOD_LABEL: &str = "Credit or debit card";
    /// Card number input id
    pub const CARD_NUMBER_ID: &str = "cardNumber";
    /// Cardholder name input id
    pub const CARDHOLDER_ID: &str = "cardholderName";
    /// Expiry input id
    pub const EXPIRY_ID: &str = "expiryDate";
    /// Security code input id
    pub const CVV_ID: &str = "securityCode";
    /// Gift Aid checkbox id
    pub const GIFT_AID_ID: &str = "giftAid";
    /// Submit button text
    pub const COMPLETE_DONATION_TEXT: &str = "Complete my donation";
    /// URL fragment of the transaction submission endpoint
    pub const TRANSACTION_URL_FRAGMENT: &str = "/transaction";
    /// Missing payment method error
    pub const METHOD_ERROR_TEXT: &str = "Please select a payment method";
    /// Missing cardholder error
    pub const CARDHOLDER_ERROR_TEXT: &str = "Please enter the name on the card";
}

/// Thank-you confirmation step
pub mod thankyou {
    /// Confirmation heading
    pub const THANK_YOU_TEXT: &str = "Thank you for your donation";
    /// Element carrying the reference number sentence
    pub const REFERENCE_ID: &str = "referenceNumber";
    /// Prefix of the reference sentence; the transaction id follows "is "
    pub const REFERENCE_PREFIX: &str = "Your reference number is ";
    /// Summary section heading
    pub const YOUR_DONATION_TEXT: &str = "Your donation";
    /// Gift Aid uplift line for a £20 donation
    pub const GIFT_AID_LINE_TEXT: &str = "£5.00 Gift Aid*";
    /// Alt text of the summary visibility icon
    pub const EYE_ICON_ALT: &str = "eye icon";
}

/// HR application: login and employee screens
pub mod employee {
    /// Landing page login link
    pub const LOGIN_LINK_PATH: &str = "//a[text()='Log in']";
    /// Username input id
    pub const USERNAME_ID: &str = "username";
    /// Password input
    pub const PASSWORD_PATH: &str = "//input[@id='password']";
    /// Login submit button
    pub const LOGIN_BUTTON_PATH: &str = "//button[text()='Login']";
    /// Employees dashboard tile, located by its title attribute
    pub const EMPLOYEES_TITLE: &str = "Employees";
    /// Add employee button
    pub const ADD_EMPLOYEE_PATH: &str = "//button[text()='Add employee']";
    /// First name input id
    pub const FIRST_NAME_ID: &str = "firstName";
    /// Last name input
    pub const LAST_NAME_PATH: &str = "//input[@id='lastName']";
    /// Email input id
    pub const EMAIL_ID: &str = "email";
    /// Phone input id
    pub const PHONE_NUMBER_ID: &str = "phoneNumber";
    /// Start date picker trigger
    pub const SELECT_DATE_TEXT: &str = "Select date";
    /// Year picker button
    pub const SELECT_YEAR_PATH: &str = "//button[@data-e2e='select-year']";
    /// Month picker button
    pub const SELECT_MONTH_PATH: &str = "//button[@data-e2e='select-month']";
    /// Job title input id
    pub const JOB_TITLE_ID: &str = "jobTitle";
    /// Save button
    pub const SAVE_EMPLOYEE_PATH: &str = "//button[text()='Save new employee']";
    /// Success banner text
    pub const SUCCESS_MESSAGE_TEXT: &str = "Success! New employee added";
    /// Link shown after the last record
    pub const GO_TO_PROFILE_TEXT: &str = "Go to profile";
    /// Button shown between records
    pub const ADD_ANOTHER_TEXT: &str = "Add another employee";
}
