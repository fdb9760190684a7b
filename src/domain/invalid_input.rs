use std::error::Error;
use std::fmt;

/// Why a price series was rejected before any forecast work started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInputKind {
    EmptySeries,
    SeriesTooShort { len: usize, min: usize },
    /// Close at `index` is zero, negative or not finite.
    NonPositivePrice { index: usize },
    /// Timestamp at `index` is not strictly greater than the one before it.
    UnorderedTimestamps { index: usize },
}

impl fmt::Display for InvalidInputKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InvalidInputKind::EmptySeries => write!(f, "price series is empty"),
            InvalidInputKind::SeriesTooShort { len, min } => {
                let s = if *len == 1 { "" } else { "s" };
                write!(f, "price series has only {} candle{} (minimum: {})", len, s, min)
            }
            InvalidInputKind::NonPositivePrice { index } => {
                write!(f, "close price at index {} is not a positive number", index)
            }
            InvalidInputKind::UnorderedTimestamps { index } => {
                write!(f, "timestamp at index {} is not strictly increasing", index)
            }
        }
    }
}

/// Hard input error: a caller bug, never a data-quality condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidInputError {
    pub kind: InvalidInputKind,
    pub symbol: Option<String>,
}

impl InvalidInputError {
    pub fn new(kind: InvalidInputKind) -> Self {
        Self { kind, symbol: None }
    }

    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.symbol = Some(symbol.to_string());
        self
    }
}

impl From<InvalidInputKind> for InvalidInputError {
    fn from(kind: InvalidInputKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for InvalidInputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.symbol {
            Some(symbol) => write!(f, "Invalid input for {}: {}", symbol, self.kind),
            None => write!(f, "Invalid input: {}", self.kind),
        }
    }
}

impl Error for InvalidInputError {}
