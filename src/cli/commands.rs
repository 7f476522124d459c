use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::config::Config;
use crate::core::services::{DateRangeService, PerformanceService, PricingService};
use crate::currency::CurrencyCode;
use crate::domain::{DateRangeToken, MonthlyLayout, PerformanceReport};
use crate::errors::ResultsError;
use crate::utils::persistence::{load_records_from_file, save_report_to_file};

use super::args::{OptionSpec, ParsedArgs};
use super::output::{self, MessageKind};
use super::registry::CommandEntry;
use super::views;
use super::{CliContext, CliError, CommandResult};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "range",
            "Resolve a reporting range token",
            "range [7d|30d|3m|6m|ytd|all]",
            cmd_range,
        ),
        CommandEntry::new(
            "report",
            "Aggregate settled results into performance views",
            "report <results.json> [--range TOKEN] [--view cumulative|monthly|bands|all] [--dense] [--json] [--out FILE]",
            cmd_report,
        ),
        CommandEntry::new(
            "quote",
            "Quote the display price for a product",
            "quote <product_id> [--base PRICE]",
            cmd_quote,
        ),
        CommandEntry::new("plans", "List plan tiers with current offers", "plans", cmd_plans),
        CommandEntry::new(
            "config",
            "Inspect or create the configuration file",
            "config [path|show|init]",
            cmd_config,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help),
    ]
}

fn usage(context: &CliContext, name: &str) -> CliError {
    let usage = context
        .command(name)
        .map(|entry| entry.usage)
        .unwrap_or(name);
    CliError::InvalidArguments(format!("usage: {usage}"))
}

/// Which parts of a report to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportView {
    Cumulative,
    Monthly,
    Bands,
    #[default]
    All,
}

impl FromStr for ReportView {
    type Err = CliError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cumulative" | "chart" => Ok(ReportView::Cumulative),
            "monthly" | "months" => Ok(ReportView::Monthly),
            "bands" | "odds" => Ok(ReportView::Bands),
            "all" => Ok(ReportView::All),
            other => Err(CliError::InvalidArguments(format!(
                "unknown view `{other}`; expected cumulative, monthly, bands or all"
            ))),
        }
    }
}

fn cmd_range(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let token = match args {
        [] => DateRangeToken::default(),
        [raw] => DateRangeToken::parse_lenient(raw),
        _ => return Err(usage(context, "range")),
    };
    let range = DateRangeService::resolve_with_clock(token, context.clock());
    output::section(format!("Range {}", token.code()));
    output::block(views::range_summary(&range));
    Ok(())
}

const REPORT_OPTIONS: &[OptionSpec] = &[
    OptionSpec::value("range"),
    OptionSpec::value("view"),
    OptionSpec::switch("dense"),
    OptionSpec::switch("json"),
    OptionSpec::value("out"),
];

fn cmd_report(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, REPORT_OPTIONS)?;
    let [path] = parsed.positional.as_slice() else {
        return Err(usage(context, "report"));
    };
    let view = parsed
        .value("view")
        .map(ReportView::from_str)
        .transpose()?
        .unwrap_or_default();

    let config = context.load_config()?;
    let layout = if parsed.has("dense") {
        MonthlyLayout::Dense
    } else {
        config.monthly_layout
    };
    let token = parsed
        .value("range")
        .map(DateRangeToken::parse_lenient)
        .unwrap_or_default();
    let range = DateRangeService::resolve_with_clock(token, context.clock());

    let records = load_records_from_file(Path::new(path))?;
    let report = PerformanceService::aggregate(&records, &range, &config.odds_bands, layout);

    let json_output = parsed.has("json");
    if let Some(out) = parsed.value("out") {
        save_report_to_file(&report, Path::new(out))?;
        let message = format!("Report written to {out}");
        if json_output {
            output::status(MessageKind::Success, message);
        } else {
            output::success(message);
        }
    }

    if json_output {
        let json = serde_json::to_string_pretty(&report).map_err(ResultsError::from)?;
        output::block(json);
        return Ok(());
    }

    print_report(&report, view, &config.currency);
    Ok(())
}

fn print_report(report: &PerformanceReport, view: ReportView, code: &CurrencyCode) {
    output::block(views::headline(report, code));
    if report.bet_count() == 0 {
        output::info("No settled results in this range.");
    }

    if matches!(view, ReportView::Cumulative | ReportView::All) {
        output::section("Cumulative P/L");
        output::block(views::cumulative_table(&report.cumulative, code).render());
    }
    if matches!(view, ReportView::Monthly | ReportView::All) {
        output::section("Monthly P/L");
        output::block(views::monthly_table(&report.monthly, code).render());
    }
    if matches!(view, ReportView::Bands | ReportView::All) {
        output::section("Odds ranges");
        output::block(views::band_table(&report.by_band, code).render());
    }
}

fn cmd_quote(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[OptionSpec::value("base")])?;
    let [product] = parsed.positional.as_slice() else {
        return Err(usage(context, "quote"));
    };
    let base = parsed
        .value("base")
        .map(|raw| {
            Decimal::from_str(raw.trim().trim_start_matches('£')).map_err(|_| {
                CliError::InvalidArguments(format!("`{raw}` is not a valid price"))
            })
        })
        .transpose()?;

    let config = context.load_config()?;
    let catalog = config.catalog().map_err(ResultsError::from)?;
    let quote = PricingService::quote_product(product, base, &catalog, context.clock().now())?;
    output::block(views::quote_line(product, &quote, &config.currency));
    let label = quote
        .promotion_id()
        .and_then(|id| catalog.promotions().get(id))
        .and_then(|promotion| promotion.label.as_deref());
    if let Some(label) = label {
        output::info(label);
    }
    Ok(())
}

fn cmd_plans(context: &mut CliContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(usage(context, "plans"));
    }
    let config = context.load_config()?;
    let catalog = config.catalog().map_err(ResultsError::from)?;
    output::section("Plans");
    let plans = views::plans_table(&catalog, context.clock().now(), &config.currency);
    output::block(plans.render());
    if let Some(systems) = views::systems_table(&catalog) {
        output::section("Systems");
        output::block(systems.render());
    }
    Ok(())
}

fn cmd_config(context: &mut CliContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["path"] => {
            output::block(context.config.path().display());
        }
        ["show"] => {
            let config = context.load_config()?;
            let json = serde_json::to_string_pretty(&config).map_err(ResultsError::from)?;
            output::block(json);
        }
        ["init"] => {
            let path = context.config.path();
            if path.exists() {
                output::warning(format!("Configuration already exists at {}", path.display()));
            } else {
                context.config.save(&Config::default())?;
                output::success(format!("Configuration written to {}", path.display()));
            }
        }
        _ => return Err(usage(context, "config")),
    }
    Ok(())
}

fn cmd_version(_context: &mut CliContext, _args: &[&str]) -> CommandResult {
    output::section(format!("Results Core {}", env!("CARGO_PKG_VERSION")));
    output::block(format!(
        "  Build hash : {}",
        env!("RESULTS_CORE_BUILD_HASH")
    ));
    output::block(format!(
        "  Built at   : {}",
        env!("RESULTS_CORE_BUILD_TIMESTAMP")
    ));
    output::block(format!(
        "  Target     : {}",
        env!("RESULTS_CORE_BUILD_TARGET")
    ));
    output::block(format!(
        "  Profile    : {}",
        env!("RESULTS_CORE_BUILD_PROFILE")
    ));
    Ok(())
}

fn cmd_help(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let Some(name) = args.first() else {
        return print_overview(context);
    };
    match context.command(&name.to_lowercase()) {
        Some(entry) => {
            output::section(format!("Help: {}", entry.name));
            output::block(format!("  Description: {}", entry.description));
            output::block(format!("  Usage: {}", entry.usage));
            Ok(())
        }
        None => Err(CliError::UnknownCommand {
            name: name.to_string(),
            suggestion: context.registry.suggest(name),
        }),
    }
}

pub(crate) fn print_overview(context: &CliContext) -> CommandResult {
    output::section("Available commands");
    for entry in context.registry.list() {
        output::block(format!("  {:<10} {}", entry.name, entry.description));
    }
    output::block("Use `help <command>` for details.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_view_parses_aliases() {
        assert_eq!("Monthly".parse::<ReportView>().unwrap(), ReportView::Monthly);
        assert_eq!("odds".parse::<ReportView>().unwrap(), ReportView::Bands);
        assert!("pie".parse::<ReportView>().is_err());
    }

    #[test]
    fn every_command_has_usage_starting_with_its_name() {
        for entry in definitions() {
            assert!(entry.usage.starts_with(entry.name), "{}", entry.name);
        }
    }
}
