use rust_decimal::Decimal;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::table::{Table, TableColumn};
use crate::core::newest_first;
use crate::currency::round_for_display;

const ITEM_WIDTH: usize = 32;

pub(crate) fn definitions() -> Vec<super::CommandDefinition> {
    use super::CommandDefinition as Def;
    vec![
        Def::new(
            "overview",
            "Show total, average, record and category counts",
            "overview",
            cmd_overview,
        ),
        Def::new(
            "categories",
            "Show spending per category",
            "categories",
            cmd_categories,
        ),
        Def::new("months", "Show spending per month", "months", cmd_months),
        Def::new(
            "pivot",
            "Show the month x category spending grid",
            "pivot",
            cmd_pivot,
        ),
        Def::new("top", "Show the largest expenses", "top [n]", cmd_top),
        Def::new(
            "records",
            "List filtered records, newest first",
            "records [limit]",
            cmd_records,
        ),
    ]
}

fn cmd_overview(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let snapshot = context.snapshot(0)?;
    if snapshot.is_empty() {
        return Ok(());
    }
    let overview = snapshot.overview();
    output::section("Overview");
    let mut lines = vec![
        format!("  Total spent : {}", context.money(overview.total, 0)),
        format!(
            "  Average     : {}",
            overview
                .mean
                .map(|mean| context.money(mean, 0))
                .unwrap_or_else(|| "-".into())
        ),
        format!("  Records     : {}", overview.record_count),
        format!("  Categories  : {}", overview.category_count),
    ];
    if let (Some(first), Some(last)) = (overview.first_date, overview.last_date) {
        lines.push(format!("  Date range  : {} to {}", first, last));
    }
    output::block(lines.join("\n"));
    if let Ok(leading) = snapshot.leading() {
        output::info(format!(
            "Largest category: {} ({})",
            leading.category,
            context.money(leading.total, 2)
        ));
    }
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let snapshot = context.snapshot(0)?;
    if snapshot.is_empty() {
        return Ok(());
    }
    let overall = snapshot.overview().total;
    let rows = snapshot
        .categories()
        .iter()
        .map(|summary| {
            vec![
                summary.category.clone(),
                context.money(summary.total, 2),
                summary.count.to_string(),
                context.money(summary.mean, 2),
                share(summary.total, overall),
            ]
        })
        .collect();
    output::section("Spending by category");
    output::block(
        Table::new(
            vec![
                TableColumn::left("Category"),
                TableColumn::right("Total"),
                TableColumn::right("Count"),
                TableColumn::right("Mean"),
                TableColumn::right("Share"),
            ],
            rows,
        )
        .render(),
    );
    Ok(())
}

fn cmd_months(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let snapshot = context.snapshot(0)?;
    if snapshot.is_empty() {
        return Ok(());
    }
    let rows = snapshot
        .months()
        .iter()
        .map(|month| vec![month.month.key(), context.money(month.total, 2)])
        .collect();
    output::section("Spending by month");
    output::block(
        Table::new(
            vec![TableColumn::left("Month"), TableColumn::right("Total")],
            rows,
        )
        .render(),
    );
    Ok(())
}

fn cmd_pivot(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let snapshot = context.snapshot(0)?;
    let pivot = snapshot.pivot();
    if pivot.is_empty() {
        return Ok(());
    }

    let mut columns = vec![TableColumn::left("Month")];
    columns.extend(pivot.categories().iter().map(TableColumn::right));
    columns.push(TableColumn::right("Total"));

    let totals = pivot.row_totals();
    let rows = pivot
        .months()
        .iter()
        .enumerate()
        .map(|(idx, month)| {
            let mut row = vec![month.key()];
            if let Some(values) = pivot.row(idx) {
                row.extend(values.iter().map(|value| context.money(*value, 0)));
            }
            row.push(context.money(totals[idx].total, 0));
            row
        })
        .collect();

    output::section("Monthly spending by category");
    output::block(Table::new(columns, rows).render());
    Ok(())
}

fn cmd_top(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let count = match args.first() {
        Some(raw) => parse_count(raw)?,
        None => context.config.top_n,
    };
    let snapshot = context.snapshot(count)?;
    if snapshot.is_empty() {
        return Ok(());
    }
    let rows = snapshot
        .top()
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            vec![
                (idx + 1).to_string(),
                record.date().to_string(),
                record.item().to_string(),
                record.category().to_string(),
                context.money(record.amount(), 0),
            ]
        })
        .collect();
    output::section(format!("Top {} expenses", snapshot.top().len()));
    output::block(
        Table::new(
            vec![
                TableColumn::right("#"),
                TableColumn::left("Date"),
                TableColumn::left("Item").max_width(ITEM_WIDTH),
                TableColumn::left("Category"),
                TableColumn::right("Amount"),
            ],
            rows,
        )
        .render(),
    );
    Ok(())
}

fn cmd_records(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let limit = args.first().map(|raw| parse_count(raw)).transpose()?;
    let snapshot = context.snapshot(0)?;
    if snapshot.is_empty() {
        return Ok(());
    }
    let records = newest_first(snapshot.records().records());
    let shown = limit.unwrap_or(records.len()).min(records.len());

    let mut columns = vec![
        TableColumn::left("Date"),
        TableColumn::left("Item").max_width(ITEM_WIDTH),
        TableColumn::left("Category"),
        TableColumn::right("Amount"),
    ];
    columns.extend(
        snapshot
            .records()
            .extra_columns()
            .iter()
            .map(|name| TableColumn::left(name.as_str()).max_width(ITEM_WIDTH)),
    );

    let rows = records
        .iter()
        .take(shown)
        .map(|record| {
            let mut row = vec![
                record.date().to_string(),
                record.item().to_string(),
                record.category().to_string(),
                context.money(record.amount(), 2),
            ];
            row.extend(record.extras().iter().cloned());
            row
        })
        .collect();

    output::section("Records");
    output::block(Table::new(columns, rows).render());
    if shown < records.len() {
        output::hint(format!("{} more records not shown.", records.len() - shown));
    }
    Ok(())
}

fn parse_count(raw: &str) -> Result<usize, CommandError> {
    match raw.parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(CommandError::InvalidArguments(format!(
            "expected a positive number, got `{raw}`"
        ))),
    }
}

fn share(part: Decimal, whole: Decimal) -> String {
    match part
        .checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    {
        Some(percent) => format!("{:.1}%", round_for_display(percent, 1)),
        None => "-".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_must_be_positive() {
        assert_eq!(parse_count("5").unwrap(), 5);
        assert!(matches!(
            parse_count("0"),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(parse_count("many").is_err());
    }

    #[test]
    fn share_is_one_decimal_percent() {
        assert_eq!(share(Decimal::from(280), Decimal::from(460)), "60.9%");
        assert_eq!(share(Decimal::ONE, Decimal::ZERO), "-");
        assert_eq!(share(Decimal::from(1_000_000_000_000_000_000i64), Decimal::new(1, 28)), "-");
    }
}
