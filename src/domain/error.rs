//! Domain error types.

/// A parse error with position information for order scripts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("parse error at position {position}: {message}")]
pub struct OrderParseError {
    pub message: String,
    pub position: usize,
}

impl OrderParseError {
    /// Format the error with a caret pointing at the error position in the input.
    pub fn display_with_context(&self, input: &str) -> String {
        let caret = " ".repeat(self.position) + "^";
        format!("{input}\n{caret}\n{err}", err = self)
    }
}

/// Why the simulator refused a buy or sell. The `Display` text is shown to the user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TradeError {
    #[error("quantity must be a positive number (got {quantity})")]
    InvalidQuantity { quantity: f64 },

    #[error("{symbol} has no valid price")]
    InvalidPrice { symbol: String },

    #[error("insufficient cash: order costs ${needed:.2} but only ${available:.2} is available")]
    InsufficientCash { needed: f64, available: f64 },

    #[error("you do not hold any {symbol}")]
    NoHolding { symbol: String },

    #[error("cannot sell {requested} {symbol}: only {held} held")]
    InsufficientQuantity {
        symbol: String,
        requested: f64,
        held: f64,
    },

    #[error("unknown symbol {symbol}")]
    UnknownSymbol { symbol: String },
}

/// Top-level error type for fincalc.
#[derive(Debug, thiserror::Error)]
pub enum FincalcError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown calculator: {name}")]
    UnknownCalculator { name: String },

    #[error("invalid field [{calculator}] {field}: {reason}")]
    FieldInvalid {
        calculator: String,
        field: String,
        reason: String,
    },

    #[error(transparent)]
    OrderParse(#[from] OrderParseError),

    #[error("snapshot error: {reason}")]
    Snapshot { reason: String },

    #[error("export error: {reason}")]
    Export { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&FincalcError> for std::process::ExitCode {
    fn from(err: &FincalcError) -> Self {
        let code: u8 = match err {
            FincalcError::Io(_) | FincalcError::Snapshot { .. } | FincalcError::Export { .. } => 1,
            FincalcError::ConfigParse { .. }
            | FincalcError::ConfigMissing { .. }
            | FincalcError::ConfigInvalid { .. } => 2,
            FincalcError::UnknownCalculator { .. } | FincalcError::FieldInvalid { .. } => 3,
            FincalcError::OrderParse(_) => 4,
        };
        std::process::ExitCode::from(code)
    }
}
