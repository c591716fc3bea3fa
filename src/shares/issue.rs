//! "Issue info" table on the Overview tab of the instrument details page.

use chrono::NaiveDate;

use crate::core::conversions::non_placeholder;
use crate::core::html::{self, Element};
use crate::core::{BvbError, Schema};

const SCHEMA: Schema = Schema::IssueInfo;
const TABLE_ID_SUFFIX: &str = "dvInfo";
const HEADINGS: [&str; 2] = ["Issue info", "Informatii emisiune"];
const START_LABELS: [&str; 2] = ["Start trading date", "Data start tranzactionare"];
const DATE_FORMATS: [&str; 3] = ["%m/%d/%Y", "%d.%m.%Y", "%Y-%m-%d"];

fn issue_table(page: &str) -> Option<Element<'_>> {
    html::find_where(page, "table", |open| {
        html::attr(open, "id").is_some_and(|id| id.ends_with(TABLE_ID_SUFFIX))
    })
    .or_else(|| {
        HEADINGS.iter().find_map(|h| {
            html::after_heading(page, "h2", h)
                .and_then(|rest| html::elements(rest, "table").into_iter().next())
        })
    })
}

/// Reads the first trading day. A table without that row yields `None`.
pub(crate) fn parse_start_trading_date(page: &str) -> Result<Option<NaiveDate>, BvbError> {
    let table = issue_table(page)
        .ok_or_else(|| BvbError::parse(SCHEMA, TABLE_ID_SUFFIX, "issue info table not found"))?;

    for row in table.children("tr") {
        let cells = row.children("td");
        let [label, value] = cells.as_slice() else {
            continue;
        };
        let label = label.text();
        if !START_LABELS.iter().any(|l| l.eq_ignore_ascii_case(label.trim())) {
            continue;
        }
        let text = value.text();
        let Some(raw) = non_placeholder(&text) else {
            return Ok(None);
        };
        return DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
            .map(Some)
            .ok_or_else(|| {
                BvbError::parse(SCHEMA, START_LABELS[0], format!("`{raw}` is not a date"))
            });
    }
    Ok(None)
}
