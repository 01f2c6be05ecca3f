//! Leverage rules
//!
//! Compares debt rates with the portfolio's annualized return, and flags card
//! balances carried alongside investments.

use super::engine::{AnalysisContext, InsightRule};
use super::types::{money, Insight, InsightCategory, RuleId, Severity};

/// Debts costing more than the portfolio earns
pub struct DebtAboveReturnRule;

impl InsightRule for DebtAboveReturnRule {
    fn id(&self) -> RuleId {
        RuleId::DebtAboveReturn
    }

    fn name(&self) -> &'static str {
        "Debt Above Investment Return"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Insight> {
        let analysis = ctx.leverage;
        let widest = analysis
            .debts_above_return
            .iter()
            .max_by(|a, b| a.spread.total_cmp(&b.spread))?;

        let names: Vec<&str> = analysis
            .debts_above_return
            .iter()
            .map(|d| d.name.as_str())
            .collect();

        Some(
            Insight::new(
                self.id(),
                InsightCategory::Leverage,
                Severity::Warning,
                "Debt Costs More Than Your Investments Earn",
                format!(
                    "{} debt(s) charge more than your portfolio's {:.1}% annualized return: {}.",
                    names.len(),
                    analysis.annualized_return_pct,
                    names.join(", ")
                ),
            )
            .with_impact(format!(
                "Paying down {} ({:.1}%) beats investing by {:.1} points",
                widest.name, widest.rate, widest.spread
            )),
        )
    }
}

/// Card debt carried while holding stocks or crypto
pub struct CreditCardWithInvestmentsRule;

impl InsightRule for CreditCardWithInvestmentsRule {
    fn id(&self) -> RuleId {
        RuleId::CreditCardWithInvestments
    }

    fn name(&self) -> &'static str {
        "Credit Card Debt While Investing"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Insight> {
        if !ctx.leverage.credit_card_while_investing() {
            return None;
        }

        Some(
            Insight::new(
                self.id(),
                InsightCategory::Leverage,
                Severity::Critical,
                "Credit Card Debt While Investing",
                format!(
                    "You carry {} in credit card debt while holding {} in stocks and crypto.",
                    money(ctx.leverage.credit_card_balance),
                    money(ctx.metrics.liquid_assets())
                ),
            )
            .with_impact("Card interest almost always outpaces market returns"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leverage;
    use crate::models::{DebtType, Snapshot};
    use crate::portfolio;
    use crate::test_utils::{crypto, debt, fixed_now, stock_at};

    fn run(rule: &dyn InsightRule, snapshot: &Snapshot) -> Option<Insight> {
        let metrics = portfolio::aggregate(snapshot);
        let analysis = leverage::analyze(snapshot, fixed_now());
        let ctx = AnalysisContext::new(snapshot, &metrics, &analysis, None);
        rule.evaluate(&ctx)
    }

    #[test]
    fn test_debt_above_return_names_widest_spread() {
        let snapshot = Snapshot {
            stocks: vec![stock_at("VTI", 100.0, 100.0, Some(105.0), 2025)],
            debts: vec![
                debt("Car", DebtType::AutoLoan, 15_000.0, 7.0, 350.0),
                debt("Card", DebtType::CreditCard, 3_000.0, 25.0, 90.0),
            ],
            ..Default::default()
        };
        let insight = run(&DebtAboveReturnRule, &snapshot).unwrap();

        assert_eq!(insight.severity, Severity::Warning);
        assert_eq!(insight.category, InsightCategory::Leverage);
        assert!(insight.description.contains("5.0% annualized"));
        assert!(insight.impact.unwrap().starts_with("Paying down Card"));
    }

    #[test]
    fn test_debt_above_return_silent_when_returns_win() {
        let snapshot = Snapshot {
            stocks: vec![stock_at("VTI", 10.0, 100.0, Some(130.0), 2025)],
            debts: vec![debt("Federal", DebtType::StudentLoan, 9_000.0, 4.5, 100.0)],
            ..Default::default()
        };
        assert!(run(&DebtAboveReturnRule, &snapshot).is_none());
    }

    #[test]
    fn test_credit_card_with_investments_is_critical() {
        let snapshot = Snapshot {
            crypto: vec![crypto(2_000.0)],
            debts: vec![debt("Visa", DebtType::CreditCard, 1_500.0, 19.0, 45.0)],
            ..Default::default()
        };
        let insight = run(&CreditCardWithInvestmentsRule, &snapshot).unwrap();
        assert_eq!(insight.severity, Severity::Critical);
        assert!(insight.description.contains("$1,500"));
    }

    #[test]
    fn test_credit_card_without_investments_is_silent() {
        let snapshot = Snapshot {
            debts: vec![debt("Visa", DebtType::CreditCard, 1_500.0, 19.0, 45.0)],
            ..Default::default()
        };
        assert!(run(&CreditCardWithInvestmentsRule, &snapshot).is_none());
    }
}
