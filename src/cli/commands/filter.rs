use std::collections::BTreeSet;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::core::{category_options, month_options};
use crate::ledger::{FilterSpec, YearMonth};

const USAGE: &str = "filter [show | clear [category|month] | category <name>... | month <YYYY-MM>...]";

pub(crate) fn definitions() -> Vec<super::CommandDefinition> {
    vec![super::CommandDefinition::new(
        "filter",
        "Restrict views to categories and/or months",
        USAGE,
        cmd_filter,
    )]
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        if context.can_prompt() {
            return pick_filter(context);
        }
        return show_filter(context);
    };

    match action.to_lowercase().as_str() {
        "show" => show_filter(context),
        "clear" => clear_filter(context, rest),
        "category" | "categories" => set_categories(context, rest),
        "month" | "months" => set_months(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown filter action `{other}`; usage: {USAGE}"
        ))),
    }
}

fn show_filter(context: &ShellContext) -> CommandResult {
    let records = context.records()?;
    let matched = records.filtered(&context.filter).len();
    output::info(format!(
        "Filter: {} ({} of {} records)",
        context.filter,
        matched,
        records.len()
    ));
    Ok(())
}

fn clear_filter(context: &mut ShellContext, rest: &[&str]) -> CommandResult {
    let mut filter = context.filter.clone();
    match rest.first().map(|target| target.to_lowercase()) {
        None => filter = FilterSpec::default(),
        Some(target) if target.starts_with("categor") => filter.clear_categories(),
        Some(target) if target.starts_with("month") => filter.clear_months(),
        Some(target) => {
            return Err(CommandError::InvalidArguments(format!(
                "cannot clear `{target}`; expected `category` or `month`"
            )))
        }
    }
    apply(context, filter)
}

fn set_categories(context: &mut ShellContext, names: &[&str]) -> CommandResult {
    if names.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: filter category <name>...".into(),
        ));
    }
    let known: BTreeSet<String> = category_options(context.records()?.records())
        .into_iter()
        .collect();
    for name in names.iter().filter(|name| !known.contains(**name)) {
        output::warning(format!("No records have category `{name}`."));
    }
    let filter = context.filter.clone().with_categories(names.iter().copied());
    apply(context, filter)
}

fn set_months(context: &mut ShellContext, keys: &[&str]) -> CommandResult {
    if keys.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: filter month <YYYY-MM>...".into(),
        ));
    }
    let months = keys
        .iter()
        .map(|key| {
            key.parse::<YearMonth>()
                .map_err(|err| CommandError::InvalidArguments(err.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    context.records()?;
    let filter = context.filter.clone().with_months(months);
    apply(context, filter)
}

/// Interactive pickers; an empty or complete selection lifts the restriction
/// on that dimension.
fn pick_filter(context: &mut ShellContext) -> CommandResult {
    let (categories, months) = {
        let records = context.records()?.records();
        (category_options(records), month_options(records))
    };

    let checked: Vec<bool> = categories
        .iter()
        .map(|c| context.filter.categories().is_empty() || context.filter.categories().contains(c))
        .collect();
    let Some(chosen_categories) = context.pick_many("Categories", &categories, &checked)? else {
        output::info("Filter unchanged.");
        return Ok(());
    };

    let month_labels: Vec<String> = months.iter().map(YearMonth::key).collect();
    let checked: Vec<bool> = months
        .iter()
        .map(|m| context.filter.months().is_empty() || context.filter.months().contains(m))
        .collect();
    let Some(chosen_months) = context.pick_many("Months", &month_labels, &checked)? else {
        output::info("Filter unchanged.");
        return Ok(());
    };

    let mut filter = FilterSpec::default();
    if chosen_categories.len() != categories.len() {
        filter.set_categories(chosen_categories.iter().map(|idx| categories[*idx].clone()));
    }
    if chosen_months.len() != months.len() {
        filter.set_months(chosen_months.iter().map(|idx| months[*idx]));
    }
    apply(context, filter)
}

fn apply(context: &mut ShellContext, filter: FilterSpec) -> CommandResult {
    context.set_filter(filter);
    let records = context.records()?;
    let matched = records.filtered(&context.filter).len();
    if matched == 0 {
        output::warning(format!(
            "Filter set ({}) but no records match.",
            context.filter
        ));
    } else {
        output::success(format!(
            "Filter set: {} ({} of {} records)",
            context.filter,
            matched,
            records.len()
        ));
    }
    Ok(())
}
