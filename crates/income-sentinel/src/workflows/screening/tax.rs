//! Progressive slab labels and statutory liability.
//!
//! Both functions assume a non-negative income; callers reject negative
//! amounts before reaching here.

use std::fmt;

use serde::{Serialize, Serializer};

/// Progressive bracket an income falls into. Upper bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaxSlab {
    Nil,
    FivePercent,
    TenPercent,
    FifteenPercent,
    TwentyPercent,
    ThirtyPercent,
}

impl TaxSlab {
    pub const fn label(self) -> &'static str {
        match self {
            TaxSlab::Nil => "0%",
            TaxSlab::FivePercent => "5%",
            TaxSlab::TenPercent => "10%",
            TaxSlab::FifteenPercent => "15%",
            TaxSlab::TwentyPercent => "20%",
            TaxSlab::ThirtyPercent => "30%",
        }
    }
}

impl fmt::Display for TaxSlab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for TaxSlab {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

const SLAB_CEILINGS: [(f64, TaxSlab); 5] = [
    (300_000.0, TaxSlab::Nil),
    (600_000.0, TaxSlab::FivePercent),
    (900_000.0, TaxSlab::TenPercent),
    (1_200_000.0, TaxSlab::FifteenPercent),
    (1_500_000.0, TaxSlab::TwentyPercent),
];

pub fn slab_of(income: f64) -> TaxSlab {
    SLAB_CEILINGS
        .iter()
        .find(|(ceiling, _)| income <= *ceiling)
        .map(|(_, slab)| *slab)
        .unwrap_or(TaxSlab::ThirtyPercent)
}

const EXEMPTION_LIMIT: f64 = 250_000.0;
const CESS_RATE: f64 = 0.04;

/// Marginal brackets as (upper limit, rate), starting at the exemption limit.
const MARGINAL_BRACKETS: [(f64, f64); 3] = [
    (500_000.0, 0.05),
    (1_000_000.0, 0.20),
    (f64::INFINITY, 0.30),
];

/// Tax due on `income`: marginal brackets plus 4% cess, rounded half-even to paise.
pub fn tax_on(income: f64) -> f64 {
    if income <= EXEMPTION_LIMIT {
        return 0.0;
    }

    let mut tax = 0.0;
    let mut floor = EXEMPTION_LIMIT;
    for (limit, rate) in MARGINAL_BRACKETS {
        if income <= floor {
            break;
        }
        tax += (income.min(limit) - floor) * rate;
        floor = limit;
    }

    tax += tax * CESS_RATE;
    round_half_even_cents(tax)
}

fn round_half_even_cents(amount: f64) -> f64 {
    (amount * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slab_boundaries_are_inclusive() {
        assert_eq!(slab_of(0.0), TaxSlab::Nil);
        assert_eq!(slab_of(300_000.0).label(), "0%");
        assert_eq!(slab_of(300_001.0).label(), "5%");
        assert_eq!(slab_of(600_000.0).label(), "5%");
        assert_eq!(slab_of(900_000.0).label(), "10%");
        assert_eq!(slab_of(1_200_000.0).label(), "15%");
        assert_eq!(slab_of(1_500_000.0).label(), "20%");
        assert_eq!(slab_of(1_500_001.0).label(), "30%");
    }

    #[test]
    fn income_within_exemption_is_untaxed() {
        assert_eq!(tax_on(0.0), 0.0);
        assert_eq!(tax_on(250_000.0), 0.0);
    }

    #[test]
    fn first_bracket_includes_cess() {
        assert_eq!(tax_on(500_000.0), 13_000.0);
    }

    #[test]
    fn brackets_apply_only_to_their_slice() {
        // 12,500 + 100,000 + 60,000 = 172,500; with cess 179,400.
        assert_eq!(tax_on(1_200_000.0), 179_400.0);
        // 12,500 + 20,000 = 32,500; with cess 33,800.
        assert_eq!(tax_on(600_000.0), 33_800.0);
    }

    #[test]
    fn liability_is_rounded_to_paise() {
        // 250,000.10 -> 0.005 tax, 0.0052 with cess.
        assert_eq!(tax_on(250_000.10), 0.01);
        assert_eq!(round_half_even_cents(0.125), 0.12);
        assert_eq!(round_half_even_cents(0.375), 0.38);
    }

    #[test]
    fn slab_serializes_as_label() {
        let json = serde_json::to_string(&TaxSlab::FifteenPercent).expect("serialize");
        assert_eq!(json, "\"15%\"");
    }
}
