//! Investment metrics for a listing, computed from fixed ratios.
//!
//! This is plain arithmetic on the list price. For a list price of 450,000
//! with the default assumptions:
//!
//! | metric | value |
//! |---|---|
//! | monthly rent | 4,500 |
//! | gross rent multiplier | 8.333… |
//! | net operating income | 32,400 |
//! | cap rate | 0.072 |
//! | monthly cash flow | 1,350 |
//! | cash-on-cash return | 0.144 |

use serde::Serialize;

/// Ratios the metrics are derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assumptions {
    /// Monthly rent as a share of list price (the "1% rule").
    pub rent_to_price: f64,
    /// Share of gross rent lost to operating expenses.
    pub expense_ratio: f64,
    /// Share of monthly rent left after expenses and debt service.
    pub cash_flow_ratio: f64,
    /// Share of the list price paid in cash.
    pub down_payment_ratio: f64,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            rent_to_price: 0.01,
            expense_ratio: 0.40,
            cash_flow_ratio: 0.30,
            down_payment_ratio: 0.25,
        }
    }
}

/// Derived metrics. Ratios are `None` where the denominator is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvestmentMetrics {
    pub estimated_monthly_rent: f64,
    pub gross_rent_multiplier: Option<f64>,
    pub net_operating_income: f64,
    pub cap_rate: Option<f64>,
    pub monthly_cash_flow: f64,
    pub cash_on_cash_return: Option<f64>,
}

impl InvestmentMetrics {
    pub fn compute(list_price: f64, assumptions: &Assumptions) -> Self {
        let price = if list_price.is_finite() && list_price > 0.0 {
            list_price
        } else {
            0.0
        };

        let monthly_rent = price * assumptions.rent_to_price;
        let annual_rent = monthly_rent * 12.0;
        let noi = annual_rent * (1.0 - assumptions.expense_ratio);
        let monthly_cash_flow = monthly_rent * assumptions.cash_flow_ratio;
        let cash_invested = price * assumptions.down_payment_ratio;

        Self {
            estimated_monthly_rent: monthly_rent,
            gross_rent_multiplier: (annual_rent > 0.0).then(|| price / annual_rent),
            net_operating_income: noi,
            cap_rate: (price > 0.0).then(|| noi / price),
            monthly_cash_flow,
            cash_on_cash_return: (cash_invested > 0.0)
                .then(|| monthly_cash_flow * 12.0 / cash_invested),
        }
    }
}
