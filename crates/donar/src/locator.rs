//! Locator-strategy resolution.
//!
//! A locator is a `(Strategy, raw string)` pair. [`resolve`] maps it to a
//! concrete [`ElementQuery`] that a [`crate::session::BrowserSession`] can
//! execute. Matching semantics are strategy-defined and exact by default:
//! no implicit trimming or case-folding anywhere in this module.

use serde::{Deserialize, Serialize};

use crate::result::{DonarError, DonarResult};

/// How to find an element on the current page.
///
/// The set is closed: adding a strategy forces a decision in
/// [`Strategy::supports`], so action compatibility is settled at compile
/// time rather than at the bottom of an if-chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Element id (`raw` becomes an id selector, `#raw`)
    Id,
    /// CSS class (`raw` becomes a class selector, `.raw`)
    Class,
    /// Exact visible text
    Text,
    /// Accessible label (form labels, aria-label)
    Label,
    /// Input placeholder text
    Placeholder,
    /// Title attribute
    Title,
    /// Image alt text
    AltText,
    /// Raw structural query (CSS or XPath), passed through verbatim
    PathExpr,
}

/// All strategies, for exhaustive table-driven tests.
pub const ALL_STRATEGIES: [Strategy; 8] = [
    Strategy::Id,
    Strategy::Class,
    Strategy::Text,
    Strategy::Label,
    Strategy::Placeholder,
    Strategy::Title,
    Strategy::AltText,
    Strategy::PathExpr,
];

impl Strategy {
    /// Parse a strategy from its wire/table name.
    ///
    /// Data-driven locator tables name strategies as strings; unknown names
    /// fail here with `UnsupportedStrategy`. Code going through the enum
    /// directly can never hit that error.
    pub fn parse(name: &str) -> DonarResult<Self> {
        match name {
            "ID" => Ok(Self::Id),
            "CLASS" => Ok(Self::Class),
            "TEXT" => Ok(Self::Text),
            "LABEL" => Ok(Self::Label),
            "PLACEHOLDER" => Ok(Self::Placeholder),
            "TITLE" => Ok(Self::Title),
            "ALTTEXT" => Ok(Self::AltText),
            "PATH" | "XPATH" => Ok(Self::PathExpr),
            other => Err(DonarError::UnsupportedStrategy {
                name: other.to_string(),
            }),
        }
    }

    /// The table name for this strategy
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Class => "CLASS",
            Self::Text => "TEXT",
            Self::Label => "LABEL",
            Self::Placeholder => "PLACEHOLDER",
            Self::Title => "TITLE",
            Self::AltText => "ALTTEXT",
            Self::PathExpr => "PATH",
        }
    }

    /// Total action-compatibility function.
    ///
    /// Fill targets an input, so text-content strategies cannot fill.
    #[must_use]
    pub const fn supports(&self, action: crate::action::ActionKind) -> bool {
        use crate::action::ActionKind;
        match action {
            ActionKind::Click => true,
            ActionKind::Fill => !matches!(self, Self::Text | Self::Title | Self::AltText),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved, strategy-tagged query over the current page.
///
/// Id and Class are already lowered to their selector form; the semantic
/// strategies keep their raw value and are executed through the session's
/// accessible-name lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementQuery {
    /// CSS selector (`#id`, `.class`, or a verbatim path expression)
    Css(String),
    /// Exact visible text
    Text(String),
    /// Accessible label
    Label(String),
    /// Placeholder text
    Placeholder(String),
    /// Title attribute
    Title(String),
    /// Image alt text
    AltText(String),
}

impl ElementQuery {
    /// Canonical key for this query, used for logging and by the mock
    /// session to address elements.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Css(s) => format!("css={s}"),
            Self::Text(s) => format!("text={s}"),
            Self::Label(s) => format!("label={s}"),
            Self::Placeholder(s) => format!("placeholder={s}"),
            Self::Title(s) => format!("title={s}"),
            Self::AltText(s) => format!("alt={s}"),
        }
    }
}

impl std::fmt::Display for ElementQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key())
    }
}

/// Resolve a `(strategy, raw)` locator pair into an [`ElementQuery`].
///
/// # Errors
///
/// Fails with `InvalidLocator` if `raw` is empty.
pub fn resolve(strategy: Strategy, raw: &str) -> DonarResult<ElementQuery> {
    if raw.is_empty() {
        return Err(DonarError::InvalidLocator {
            strategy: strategy.to_string(),
        });
    }

    Ok(match strategy {
        Strategy::Id => ElementQuery::Css(format!("#{raw}")),
        Strategy::Class => ElementQuery::Css(format!(".{raw}")),
        Strategy::PathExpr => ElementQuery::Css(raw.to_string()),
        Strategy::Text => ElementQuery::Text(raw.to_string()),
        Strategy::Label => ElementQuery::Label(raw.to_string()),
        Strategy::Placeholder => ElementQuery::Placeholder(raw.to_string()),
        Strategy::Title => ElementQuery::Title(raw.to_string()),
        Strategy::AltText => ElementQuery::AltText(raw.to_string()),
    })
}
