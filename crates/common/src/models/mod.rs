pub mod error_record;
pub mod signal;
pub mod trade;

pub use error_record::{ErrorRecord, Severity};
pub use signal::{InvalidSignal, Signal, TradeSide};
pub use trade::TradeRecord;
