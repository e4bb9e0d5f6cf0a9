//! Loan amortization and cash-versus-loan comparison.

use solar_scan_estimate_models::{
    AmortizedLoan, FinancingComparison, FinancingScenario, LoanTerms, RegionConfig,
};

use crate::cash_flow::project_savings_25yr;

/// Amortizes `principal` over `term_years` of monthly installments.
///
/// Uses the standard fixed-rate formula
/// `P * r * (1 + r)^n / ((1 + r)^n - 1)` with `r` the monthly rate. A zero
/// (or negative) rate, or one too small to register over the term, is
/// repaid in equal installments of `P / n`. A zero
/// term, or a principal that is not a positive number, amortizes to zero
/// installments.
#[must_use]
pub fn amortized_loan(principal: f64, annual_rate_pct: f64, term_years: u32) -> AmortizedLoan {
    if !principal.is_finite() || principal <= 0.0 || term_years == 0 {
        let principal = if principal.is_finite() { principal.max(0.0) } else { 0.0 };
        return AmortizedLoan {
            monthly_payment: 0.0,
            total_interest: 0.0,
            total_cost_with_interest: principal,
        };
    }

    let months = term_years.saturating_mul(12);
    let n = f64::from(months);
    let monthly_rate = if annual_rate_pct.is_finite() {
        annual_rate_pct / 100.0 / 12.0
    } else {
        0.0
    };

    let monthly_payment = if monthly_rate > 0.0 {
        // (1 + r)^n - 1 without cancellation for rates close to zero.
        let growth = (n * monthly_rate.ln_1p()).exp_m1();
        if growth.is_infinite() {
            principal * monthly_rate
        } else if growth > 0.0 {
            principal * monthly_rate * (growth + 1.0) / growth
        } else {
            principal / n
        }
    } else {
        principal / n
    };

    let total_paid = monthly_payment * n;

    AmortizedLoan {
        monthly_payment,
        total_interest: total_paid - principal,
        total_cost_with_interest: total_paid,
    }
}

/// Compares paying cash with financing `terms.loan_percent` of the
/// investment.
///
/// Both scenarios are measured against the same
/// [`project_savings_25yr`] figure, so they differ only in what is paid.
/// `loan_percent` is clamped to `0..=100`.
#[must_use]
pub fn compare_financing(
    investment: f64,
    annual_savings: f64,
    terms: &LoanTerms,
    config: &RegionConfig,
) -> FinancingComparison {
    let investment = if investment.is_finite() {
        investment.max(0.0)
    } else {
        0.0
    };
    let projected_savings = project_savings_25yr(annual_savings, config);

    let cash = FinancingScenario {
        loan_amount: 0.0,
        down_payment: investment,
        monthly_payment: 0.0,
        total_interest: 0.0,
        total_cost_with_interest: investment,
        net_savings_25yr: projected_savings - investment,
    };

    let loan_percent = if terms.loan_percent.is_finite() {
        terms.loan_percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let loan_amount = investment * loan_percent / 100.0;
    let down_payment = investment - loan_amount;
    let amortized = amortized_loan(loan_amount, terms.interest_rate_pct, terms.term_years);
    let total_cost_with_interest = down_payment + amortized.total_cost_with_interest;

    let loan = FinancingScenario {
        loan_amount,
        down_payment,
        monthly_payment: amortized.monthly_payment,
        total_interest: amortized.total_interest,
        total_cost_with_interest,
        net_savings_25yr: projected_savings - total_cost_with_interest,
    };

    log::debug!(
        "Financing {investment:.0}: cash net {:.0}, loan net {:.0} ({loan_percent}% at {}% over {} yrs)",
        cash.net_savings_25yr,
        loan.net_savings_25yr,
        terms.interest_rate_pct,
        terms.term_years
    );

    FinancingComparison { cash, loan }
}
