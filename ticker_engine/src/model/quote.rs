//! Quote data model and display helpers.
//!
//! A `QuoteEntry` is one synthetic market quote bound to a backdrop cell. It keeps the
//! price and change as pre-formatted strings, the way they were drawn, so rendering
//! never re-rounds them.

use serde::Serialize;
use ticker_common::{RandomSource, Symbol};
use ticker_common::symbols::SYMBOL_COUNT;

/// Lowest price a quote can take.
pub const PRICE_MIN: f64 = 1.0;
/// Width of the uniform price range, so prices fall in `[1, 4001)`.
pub const PRICE_SPAN: f64 = 4000.0;
/// Upper bound (exclusive) of the change magnitude, in percent.
pub const CHANGE_SPAN: f64 = 4.0;
/// A draw strictly above this marks the quote as rising, giving P(up) = 0.52.
pub const UP_THRESHOLD: f64 = 0.48;
/// Stride applied to the cell index when picking a symbol.
pub const SYMBOL_STRIDE: usize = 7;

/// Price movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Rising price.
    Up,
    /// Falling price.
    Down,
}

impl Direction {
    /// Map a boolean "is up" flag to a direction.
    pub fn from_up(up: bool) -> Self {
        if up { Direction::Up } else { Direction::Down }
    }

    /// `true` for `Direction::Up`.
    pub fn is_up(self) -> bool {
        self == Direction::Up
    }

    /// Sign prefix used in change strings.
    pub fn sign(self) -> char {
        match self {
            Direction::Up => '+',
            Direction::Down => '-',
        }
    }

    /// Arrow glyph shown next to the change.
    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Up => "▲",
            Direction::Down => "▼",
        }
    }

    /// Color token consumers map to their palette.
    pub fn color_token(self) -> &'static str {
        match self {
            Direction::Up => "green-400/80",
            Direction::Down => "red-400/80",
        }
    }
}

/// Synthetic market quote for a single cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteEntry {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Price with exactly two fraction digits, e.g. `2001.00`.
    pub price: String,
    /// Signed percentage, e.g. `+2.00%`.
    pub change: String,
    /// Direction matching the sign of `change`.
    pub direction: Direction,
}

impl QuoteEntry {
    /// Draw the quote for cell `index`.
    ///
    /// Draw order is symbol, price, direction, change magnitude. The symbol mixes a
    /// fixed stride over the index with one random offset, which clusters symbols
    /// into diagonal streaks instead of spreading them uniformly.
    pub fn generate<R: RandomSource + ?Sized>(index: usize, rng: &mut R) -> QuoteEntry {
        let offset = rng.index(SYMBOL_COUNT);
        let symbol = Symbol::at(index * SYMBOL_STRIDE + offset);
        let price = rng.range(PRICE_MIN, PRICE_MIN + PRICE_SPAN);
        let direction = Direction::from_up(rng.next_f64() > UP_THRESHOLD);
        let magnitude = rng.range(0.0, CHANGE_SPAN);

        QuoteEntry {
            symbol,
            price: format!("{:.2}", price),
            change: format!("{}{:.2}%", direction.sign(), magnitude),
            direction,
        }
    }

    /// Price as shown on the cell: `$` plus a grouped number without trailing zeros.
    pub fn display_price(&self) -> String {
        format!("${}", group_price(&self.price))
    }
}

/// Insert thousands separators and drop trailing fraction zeros
/// (`1234.50` → `1,234.5`, `2001.00` → `2,001`).
pub fn group_price(price: &str) -> String {
    let (int_part, frac_part) = price.split_once('.').unwrap_or((price, ""));
    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }
    let frac = frac_part.trim_end_matches('0');
    if !frac.is_empty() {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}
