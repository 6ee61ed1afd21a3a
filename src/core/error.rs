use thiserror::Error;

/// Errors raised while constructing or pricing a quote.
///
/// All variants are validation failures. They are surfaced to the caller
/// as-is and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PricingError {
    /// A line item has a negative or missing quantity or unit price.
    #[error("invalid line item{}: {reason}", index.map(|i| format!(" #{i}")).unwrap_or_default())]
    InvalidLineItem {
        /// Position of the offending item in the input, when known.
        index: Option<usize>,
        /// Human-readable reason.
        reason: String,
    },

    /// Discount is negative, or a percentage above 100.
    #[error("invalid discount: {0}")]
    InvalidDiscount(String),

    /// Tax rate outside `[0, 1]` (or `[0, 100]` for percent input).
    #[error("invalid tax rate: {0}")]
    InvalidTaxRate(String),

    /// Labor cost is negative.
    #[error("invalid labor cost: {0}")]
    InvalidLaborCost(String),

    /// An intermediate amount does not fit in a `Decimal`.
    #[error("amount out of range: {0}")]
    AmountOutOfRange(String),
}

impl PricingError {
    pub(crate) fn line(index: Option<usize>, reason: impl Into<String>) -> Self {
        Self::InvalidLineItem {
            index,
            reason: reason.into(),
        }
    }

    pub(crate) fn out_of_range(what: &str) -> Self {
        Self::AmountOutOfRange(format!("{what} exceeds the representable range"))
    }

    /// Attach the item's position to an `InvalidLineItem` error.
    pub(crate) fn at_index(self, index: usize) -> Self {
        match self {
            Self::InvalidLineItem { reason, .. } => Self::InvalidLineItem {
                index: Some(index),
                reason,
            },
            other => other,
        }
    }
}

/// A single validation problem with the field path it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "items.2.unit_price").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
