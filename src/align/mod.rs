mod error;
mod failures;
mod gold;
mod hypotheses;
mod reader;

pub use self::error::AlignError;
pub use self::failures::FailureSet;
pub use self::gold::{GoldFormat, GoldReader};
pub use self::hypotheses::{HypothesisEncoding, SummaryReader};
pub use self::reader::{AlignedPair, PairReader};
