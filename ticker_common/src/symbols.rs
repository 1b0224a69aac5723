//! Ticker symbols shown on the backdrop.
//!
//! The set is fixed and ordered; the quote generator addresses it by position,
//! so the declaration order below is part of the visual pattern.

use serde::Serialize;
use strum_macros::{Display, EnumCount, FromRepr};

/// Number of symbols in the set.
pub const SYMBOL_COUNT: usize = <Symbol as strum::EnumCount>::COUNT;

/// Set of ticker symbols the backdrop draws from.
#[allow(missing_docs)]
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Display,
    EnumCount,
    FromRepr,
    Hash,
    Eq,
    PartialEq,
)]
pub enum Symbol {
    AAPL,
    TSLA,
    ETH,
    BTC,
    AMZN,
    NFLX,
    META,
    SOL,
    INJ,
    GOOG,
    NVDA,
    MSFT,
    AVAX,
    DOT,
    UNI,
    LINK,
    ATOM,
    MKR,
    USDT,
    USDC,
    ARB,
    OP,
    SUI,
    APT,
    BNB,
    XRP,
    ADA,
    DOGE,
    LTC,
    FIL,
    NEAR,
    ICP,
}

impl Symbol {
    /// Returns the symbol at `position`, wrapping around the set.
    pub fn at(position: usize) -> Symbol {
        // from_repr is total over 0..COUNT
        Symbol::from_repr(position % SYMBOL_COUNT).unwrap_or(Symbol::AAPL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_has_thirty_two_symbols() {
        assert_eq!(SYMBOL_COUNT, 32);
        assert_eq!(Symbol::at(0), Symbol::AAPL);
        assert_eq!(Symbol::at(31), Symbol::ICP);
        assert_eq!(Symbol::at(32), Symbol::AAPL);
    }

    #[test]
    fn at_walks_the_declared_order() {
        let walked: Vec<Symbol> = (0..SYMBOL_COUNT).map(Symbol::at).collect();
        assert_eq!(walked[3], Symbol::BTC);
        assert_eq!(walked[16], Symbol::ATOM);
        assert_eq!(walked[24], Symbol::BNB);
        let unique: std::collections::HashSet<Symbol> = walked.into_iter().collect();
        assert_eq!(unique.len(), SYMBOL_COUNT);
    }

    #[test]
    fn display_uses_ticker_text() {
        assert_eq!(Symbol::USDC.to_string(), "USDC");
    }
}
