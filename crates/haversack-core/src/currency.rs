//! # Currency Module
//!
//! Coin purses and their copper-piece valuation.
//!
//! ## Why Integer Copper?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EVERYTHING IS PRICED IN COPPER PIECES                                  │
//! │                                                                         │
//! │    1 sp = 10 cp      1 gp = 100 cp      1 pp = 1000 cp                 │
//! │                                                                         │
//! │  Item values, purse values and combined wealth are all u64 copper.     │
//! │  Nothing is ever converted to a fractional "gold" amount internally.   │
//! │  Only the presentation layer formats "1 gp 2 sp 5 cp".                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use haversack_core::currency::{CopperPieces, Currency};
//!
//! let purse = Currency { copper: 5, silver: 2, gold: 1, platinum: 0 };
//! assert_eq!(purse.value(), CopperPieces::from_cp(125));
//! assert_eq!(purse.total_coins(), 8);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

use crate::{COIN_WEIGHT_PENALTY_PER_10, COIN_WEIGHT_THRESHOLD};

// =============================================================================
// Copper Pieces
// =============================================================================

/// A value expressed in copper pieces, the smallest coin.
///
/// ## Where CopperPieces is Used
/// ```text
/// Item.value ──► Item::stack_value() ──┐
///                                      │
/// Currency::value() ───────────────────┼──► WealthBreakdown.total
///                                      │
/// Vault.currency / Storage.currency ───┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CopperPieces(u64);

impl CopperPieces {
    /// Creates a value from a copper count.
    #[inline]
    pub const fn from_cp(cp: u64) -> Self {
        CopperPieces(cp)
    }

    /// Returns the raw copper count.
    #[inline]
    pub const fn cp(&self) -> u64 {
        self.0
    }

    /// Zero copper.
    #[inline]
    pub const fn zero() -> Self {
        CopperPieces(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Debug-friendly display. Front ends format with their own coin names.
impl fmt::Display for CopperPieces {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cp", self.0)
    }
}

impl Add for CopperPieces {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        CopperPieces(self.0.saturating_add(other.0))
    }
}

impl AddAssign for CopperPieces {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

/// Multiplication by a stack quantity.
impl Mul<u32> for CopperPieces {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        CopperPieces(self.0.saturating_mul(u64::from(qty)))
    }
}

impl Sum for CopperPieces {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(CopperPieces::zero(), |acc, v| acc + v)
    }
}

// =============================================================================
// Denomination
// =============================================================================

/// The four coin denominations, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Denomination {
    Copper,
    Silver,
    Gold,
    Platinum,
}

impl Denomination {
    /// All denominations in ascending value order.
    pub const ALL: [Denomination; 4] = [
        Denomination::Copper,
        Denomination::Silver,
        Denomination::Gold,
        Denomination::Platinum,
    ];

    /// How many copper pieces one coin of this denomination is worth.
    #[inline]
    pub const fn copper_rate(&self) -> u64 {
        match self {
            Denomination::Copper => 1,
            Denomination::Silver => 10,
            Denomination::Gold => 100,
            Denomination::Platinum => 1000,
        }
    }

    /// Lowercase key used in storage and on the command line.
    pub const fn key(&self) -> &'static str {
        match self {
            Denomination::Copper => "copper",
            Denomination::Silver => "silver",
            Denomination::Gold => "gold",
            Denomination::Platinum => "platinum",
        }
    }
}

impl std::str::FromStr for Denomination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "copper" | "cp" | "c" => Ok(Denomination::Copper),
            "silver" | "sp" | "s" => Ok(Denomination::Silver),
            "gold" | "gp" | "g" => Ok(Denomination::Gold),
            "platinum" | "pp" | "p" => Ok(Denomination::Platinum),
            other => Err(format!("Unknown denomination: '{}'", other)),
        }
    }
}

// =============================================================================
// Currency
// =============================================================================

/// A purse of coins. Owned by exactly one inventory or vault.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Currency {
    pub copper: u64,
    pub silver: u64,
    pub gold: u64,
    pub platinum: u64,
}

impl Currency {
    /// An empty purse.
    pub const fn empty() -> Self {
        Currency {
            copper: 0,
            silver: 0,
            gold: 0,
            platinum: 0,
        }
    }

    /// Number of coins of one denomination.
    pub const fn get(&self, denomination: Denomination) -> u64 {
        match denomination {
            Denomination::Copper => self.copper,
            Denomination::Silver => self.silver,
            Denomination::Gold => self.gold,
            Denomination::Platinum => self.platinum,
        }
    }

    /// Overwrites the count of one denomination.
    pub fn set(&mut self, denomination: Denomination, count: u64) {
        match denomination {
            Denomination::Copper => self.copper = count,
            Denomination::Silver => self.silver = count,
            Denomination::Gold => self.gold = count,
            Denomination::Platinum => self.platinum = count,
        }
    }

    /// Physical coin count, regardless of denomination.
    ///
    /// Encumbrance cares about how many coins there are, not what they are
    /// worth: 40 platinum weigh as much as 40 copper.
    pub fn total_coins(&self) -> u64 {
        Denomination::ALL
            .iter()
            .fold(0u64, |acc, d| acc.saturating_add(self.get(*d)))
    }

    /// Weight penalty in units from carrying loose coins.
    ///
    /// ## Rule
    /// ```text
    /// coins <= 30        → 0 units
    /// coins  = 31..=40   → 1 unit
    /// coins  = 41..=50   → 2 units
    /// ...                → ceil((coins - 30) / 10) units
    /// ```
    pub fn coin_weight(&self) -> u64 {
        let total = self.total_coins();
        if total <= COIN_WEIGHT_THRESHOLD {
            return 0;
        }
        let overage = total - COIN_WEIGHT_THRESHOLD;
        overage.div_ceil(10) * COIN_WEIGHT_PENALTY_PER_10
    }

    /// Purse value in copper pieces.
    ///
    /// `copper + 10 × silver + 100 × gold + 1000 × platinum`
    pub fn value(&self) -> CopperPieces {
        Denomination::ALL
            .iter()
            .map(|d| CopperPieces::from_cp(self.get(*d).saturating_mul(d.copper_rate())))
            .sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn purse(copper: u64, silver: u64, gold: u64, platinum: u64) -> Currency {
        Currency {
            copper,
            silver,
            gold,
            platinum,
        }
    }

    #[test]
    fn test_value_mixed_purse() {
        assert_eq!(purse(5, 2, 1, 0).value().cp(), 125);
        assert_eq!(purse(0, 0, 0, 3).value().cp(), 3000);
        assert!(Currency::empty().value().is_zero());
    }

    #[test]
    fn test_coin_weight_thresholds() {
        assert_eq!(purse(30, 0, 0, 0).coin_weight(), 0);
        assert_eq!(purse(31, 0, 0, 0).coin_weight(), 1);
        assert_eq!(purse(10, 10, 10, 10).coin_weight(), 1);
        assert_eq!(purse(41, 0, 0, 0).coin_weight(), 2);
        assert_eq!(purse(0, 0, 0, 130).coin_weight(), 10);
    }

    #[test]
    fn test_get_and_set_by_denomination() {
        let mut c = Currency::empty();
        c.set(Denomination::Gold, 7);
        assert_eq!(c.get(Denomination::Gold), 7);
        assert_eq!(c.gold, 7);
        assert_eq!(c.total_coins(), 7);
    }

    #[test]
    fn test_denomination_parsing() {
        assert_eq!("gp".parse::<Denomination>().unwrap(), Denomination::Gold);
        assert_eq!("Platinum".parse::<Denomination>().unwrap(), Denomination::Platinum);
        assert!("mithril".parse::<Denomination>().is_err());
    }

    #[test]
    fn test_copper_pieces_arithmetic() {
        let a = CopperPieces::from_cp(150);
        assert_eq!((a + CopperPieces::from_cp(50)).cp(), 200);
        assert_eq!((a * 3).cp(), 450);
        let total: CopperPieces = vec![a, a].into_iter().sum();
        assert_eq!(total.cp(), 300);
        assert_eq!(format!("{}", a), "150 cp");
    }

    #[test]
    fn test_value_saturates_instead_of_overflowing() {
        let rich = purse(0, 0, 0, u64::MAX);
        assert_eq!(rich.value().cp(), u64::MAX);
    }
}
