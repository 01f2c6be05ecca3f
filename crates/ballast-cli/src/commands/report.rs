//! Report command implementations (report, metrics, payoff)

use anyhow::Result;
use ballast_core::insights::{money, percent};
use ballast_core::{
    DebtPayoffPlan, Insight, PayoffComparison, PortfolioMetrics, Settings, Severity,
};

use super::{build_report, print_json, truncate};
use crate::cli::SourceArgs;

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "🚨",
        Severity::Warning => "⚠️ ",
        Severity::Info => "💡",
        Severity::Positive => "✅",
    }
}

pub fn cmd_report(args: &SourceArgs, settings: &Settings) -> Result<()> {
    let report = build_report(args, settings)?;

    if args.json {
        return print_json(&report);
    }

    println!();
    println!("📊 Ballast Report ({})", report.generated_at.format("%Y-%m-%d"));
    println!("   ─────────────────────────────────────────────────────────────");

    if report.insights.is_empty() {
        println!("   Nothing to report. Add holdings or debts to your snapshot.");
    } else {
        for insight in &report.insights {
            print_insight(insight);
        }
    }

    print_metrics(&report.metrics);

    if let Some(payoff) = &report.debt_payoff {
        print_payoff(payoff);
    }

    println!();
    Ok(())
}

pub fn cmd_metrics(args: &SourceArgs, settings: &Settings) -> Result<()> {
    let report = build_report(args, settings)?;

    if args.json {
        return print_json(&report.metrics);
    }

    print_metrics(&report.metrics);
    println!();
    Ok(())
}

pub fn cmd_payoff(args: &SourceArgs, settings: &Settings) -> Result<()> {
    let report = build_report(args, settings)?;

    if args.json {
        return print_json(&report.debt_payoff);
    }

    match &report.debt_payoff {
        Some(payoff) => print_payoff(payoff),
        None => {
            println!();
            println!("✅ No debts to pay off.");
        }
    }
    println!();
    Ok(())
}

fn print_insight(insight: &Insight) {
    println!();
    println!(
        "   {} {} [{}]",
        severity_icon(insight.severity),
        insight.title,
        insight.category
    );
    println!("      {}", insight.description);
    if let Some(impact) = &insight.impact {
        println!("      → {}", impact);
    }
}

fn print_metrics(m: &PortfolioMetrics) {
    println!();
    println!("💰 Portfolio");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Total assets:        {:>14}", money(m.total_assets));
    println!("   Consumer debts:      {:>14}", money(m.total_debts));
    println!("   Mortgages:           {:>14}", money(m.total_mortgage_balances));
    println!("   Net worth:           {:>14}", money(m.net_worth));
    println!();
    println!("   Debt-to-asset:       {:>14}", percent(m.debt_to_asset_ratio));
    println!("   Avg debt rate:       {:>13.2}%", m.weighted_avg_debt_rate);
    println!("   Annualized return:   {:>13.2}%", m.annualized_return_pct);
    println!("   Monthly payments:    {:>14}", money(m.monthly_debt_payments));
    println!(
        "   Good / bad debt:     {:>14} / {}",
        money(m.good_debt_total),
        money(m.bad_debt_total)
    );
    println!();
    println!("   Real estate equity:  {:>14}", money(m.real_estate_equity));
    println!("   Stocks:              {:>14}", money(m.stocks_value));
    println!("   Crypto:              {:>14}", money(m.crypto_value));
    println!("   Retirement:          {:>14}", money(m.retirement_value));
}

fn print_plan(plan: &DebtPayoffPlan) {
    let duration = if plan.capped {
        format!("{}+ months (not paid off)", plan.months_to_payoff)
    } else {
        format!("{} months", plan.months_to_payoff)
    };
    println!(
        "   {:<10} {:>28}   interest {}",
        plan.method.as_str(),
        duration,
        money(plan.total_interest_paid)
    );

    let order: Vec<String> = plan
        .debts
        .iter()
        .map(|d| truncate(&d.name, 20))
        .collect();
    println!("              order: {}", order.join(" → "));
}

fn print_payoff(payoff: &PayoffComparison) {
    println!();
    println!(
        "🏁 Debt Payoff ({}/month)",
        money(payoff.avalanche.total_monthly_minimum)
    );
    println!("   ─────────────────────────────────────────────────────────────");
    print_plan(&payoff.avalanche);
    print_plan(&payoff.snowball);

    let saved = payoff.interest_saved();
    if saved > 0.0 {
        println!();
        println!("   Avalanche saves {} in interest.", money(saved));
    }
    if let Some(method) = payoff.faster_method() {
        println!("   {} finishes first.", method.as_str());
    }
}
