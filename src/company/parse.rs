//! Extraction of the issuer profile tab.

use crate::core::conversions::{non_placeholder, parse_count, parse_decimal_text};
use crate::core::html::{self, Element};
use crate::core::{BvbError, Schema};

use super::model::{
    Company, Shareholder, normalize_email, normalize_registry_code, upper,
};

const SCHEMA: Schema = Schema::CompanyDetail;
const PROFILE_TABLE_ID: &str = "ctl00_body_ctl02_CompanyProfile_dvIssProfile";
const DESCRIPTION_DIV_ID: &str = "ctl00_body_ctl02_CompanyProfile_CDescription";
const SHAREHOLDERS_TABLE_ID: &str = "gvDetails";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProfileField {
    RegistryCode,
    Address,
    Website,
    Email,
    ActivityField,
}

fn profile_field(label: &str) -> Option<ProfileField> {
    let label = label.trim().trim_end_matches(':').trim();
    let is = |s: &str| label.eq_ignore_ascii_case(s);
    if is("Commerce Registry Code") || is("Cod Registrul Comertului") {
        Some(ProfileField::RegistryCode)
    } else if is("Address") || is("Adresa") {
        Some(ProfileField::Address)
    } else if is("Website") {
        Some(ProfileField::Website)
    } else if is("E-mail") {
        Some(ProfileField::Email)
    } else if is("Field of activity") || is("Domeniu de activitate") {
        Some(ProfileField::ActivityField)
    } else {
        None
    }
}

/// Extended company fields scraped from the issuer profile tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct IssuerProfile {
    pub(crate) commerce_registry_code: Option<String>,
    pub(crate) address: Option<String>,
    pub(crate) website: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) activity_field: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) shareholders: Option<Vec<Shareholder>>,
}

impl IssuerProfile {
    pub(crate) fn apply_to(self, company: &mut Company) {
        company.commerce_registry_code = self.commerce_registry_code;
        company.address = self.address;
        company.website = self.website;
        company.email = self.email;
        company.activity_field = self.activity_field;
        company.description = self.description;
        company.shareholders = self.shareholders;
    }
}

pub(crate) fn parse_issuer_profile(page: &str) -> Result<IssuerProfile, BvbError> {
    let table = html::find_by_id(page, "table", PROFILE_TABLE_ID)
        .ok_or_else(|| BvbError::parse(SCHEMA, PROFILE_TABLE_ID, "issuer profile table not found"))?;

    let mut profile = IssuerProfile::default();
    for row in table.children("tr") {
        let cells = row.children("td");
        if cells.len() != 2 {
            return Err(BvbError::parse(
                SCHEMA,
                PROFILE_TABLE_ID,
                format!("profile row has {} cells, expected 2", cells.len()),
            ));
        }
        let Some(field) = profile_field(&cells[0].text()) else {
            continue;
        };
        let value = cells[1].text();
        match field {
            ProfileField::RegistryCode => {
                profile.commerce_registry_code = normalize_registry_code(&value);
            }
            ProfileField::Address => {
                profile.address = non_placeholder(&value).map(str::to_string);
            }
            ProfileField::Website => {
                let href = cells[1]
                    .children("a")
                    .first()
                    .and_then(|a| a.attr("href"));
                profile.website = href
                    .as_deref()
                    .or(Some(value.as_str()))
                    .and_then(non_placeholder)
                    .map(str::to_string);
            }
            ProfileField::Email => profile.email = normalize_email(&value),
            ProfileField::ActivityField => profile.activity_field = upper(&value),
        }
    }

    profile.description = html::find_by_id(page, "div", DESCRIPTION_DIV_ID).and_then(description);
    profile.shareholders = html::find_by_id(page, "table", SHAREHOLDERS_TABLE_ID)
        .map(shareholders)
        .transpose()?
        .filter(|list| !list.is_empty());

    Ok(profile)
}

/// English spans when the description is bilingual, the whole div otherwise.
fn description(div: Element<'_>) -> Option<String> {
    let english: String = div
        .children("span")
        .into_iter()
        .filter(|s| s.attr("lang").is_some_and(|l| l.eq_ignore_ascii_case("EN-US")))
        .map(|s| s.inner)
        .collect();
    let text = if english.is_empty() {
        div.text()
    } else {
        html::text(&english)
    };
    (!text.is_empty()).then_some(text)
}

#[derive(Debug, Clone, Copy)]
struct HolderColumns {
    name: usize,
    shares: Option<usize>,
    percentage: Option<usize>,
}

impl HolderColumns {
    fn from_headers(headers: &[String]) -> Self {
        if headers.is_empty() {
            return Self {
                name: 0,
                shares: Some(1),
                percentage: Some(2),
            };
        }
        let lower: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
        let find = |pred: &dyn Fn(&str) -> bool| lower.iter().position(|h| pred(h));
        let percentage = find(&|h| h.contains('%') || h.contains("percent") || h.contains("procent"));
        let shares = find(&|h| {
            !h.contains('%') && (h.contains("shares") || h.contains("number") || h.contains("actiuni"))
        });
        let name = find(&|h| {
            h.contains("name") || h.contains("shareholder") || h.contains("actionar") || h.contains("nume")
        })
        .filter(|i| Some(*i) != shares && Some(*i) != percentage)
        .unwrap_or(0);
        Self {
            name,
            shares,
            percentage,
        }
    }
}

/// Header row, data rows, trailing total row (excluded).
fn shareholders(table: Element<'_>) -> Result<Vec<Shareholder>, BvbError> {
    let rows = table.children("tr");
    let Some((header, rest)) = rows.split_first() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header.children("th").iter().map(Element::text).collect();
    let cols = HolderColumns::from_headers(&headers);
    let data = match rest.split_last() {
        Some((_total, data)) => data,
        None => return Ok(Vec::new()),
    };

    let mut out = Vec::with_capacity(data.len());
    for row in data {
        let cells: Vec<String> = row.children("td").iter().map(Element::text).collect();
        let cell = |i: Option<usize>| i.and_then(|i| cells.get(i)).map_or("", String::as_str);
        let Some(name) = non_placeholder(cell(Some(cols.name))) else {
            continue;
        };
        let shares = parse_count(&cell(cols.shares).replace('.', ""), SCHEMA, "shareholders.shares")?;
        let percentage = parse_decimal_text(
            cell(cols.percentage).trim_end_matches('%'),
            SCHEMA,
            "shareholders.percentage",
        )?;
        out.push(Shareholder {
            name: name.to_string(),
            shares,
            percentage,
        });
    }
    Ok(out)
}
