use crate::errors::{ExpenseError, Result};

/// Semantic roles every ledger sheet must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    Item,
    Amount,
    Category,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Date, Field::Item, Field::Amount, Field::Category];

    pub fn name(self) -> &'static str {
        match self {
            Field::Date => "date",
            Field::Item => "item",
            Field::Amount => "amount",
            Field::Category => "category",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Date => &["date", "日期"],
            Field::Item => &["item", "description", "項目"],
            Field::Amount => &["amount", "金額"],
            Field::Category => &["category", "類別"],
        }
    }

    fn matches(self, header: &str) -> bool {
        self.aliases()
            .iter()
            .any(|alias| header.eq_ignore_ascii_case(alias))
    }
}

/// Calendar columns written by our own exports; ignored on load.
const DERIVED_HEADERS: &[&str] = &["year", "month", "year_month", "年份", "月份", "年月"];

/// Header positions resolved once per sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub item: usize,
    pub amount: usize,
    pub category: usize,
    /// Passthrough columns as (position, header) in sheet order.
    pub extras: Vec<(usize, String)>,
}

impl ColumnMap {
    pub fn resolve(headers: &[String]) -> Result<Self> {
        let mut found: [Option<usize>; 4] = [None; 4];
        let mut extras = Vec::new();

        for (idx, raw) in headers.iter().enumerate() {
            let header = raw.trim();
            if header.is_empty() {
                continue;
            }
            let role = Field::ALL
                .iter()
                .position(|field| field.matches(header));
            match role {
                Some(slot) if found[slot].is_none() => found[slot] = Some(idx),
                _ if is_derived(header) => {}
                _ => extras.push((idx, header.to_string())),
            }
        }

        let missing: Vec<String> = Field::ALL
            .iter()
            .zip(found.iter())
            .filter(|(_, position)| position.is_none())
            .map(|(field, _)| field.name().to_string())
            .collect();

        match found {
            [Some(date), Some(item), Some(amount), Some(category)] => Ok(Self {
                date,
                item,
                amount,
                category,
                extras,
            }),
            _ => Err(ExpenseError::Schema { missing }),
        }
    }

    pub fn extra_headers(&self) -> Vec<String> {
        self.extras.iter().map(|(_, header)| header.clone()).collect()
    }
}

fn is_derived(header: &str) -> bool {
    DERIVED_HEADERS
        .iter()
        .any(|name| header.eq_ignore_ascii_case(name))
}
