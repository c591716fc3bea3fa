//! Instrument details page (`FinancialInstrumentsDetails.aspx`).
//!
//! The page is an ASP.NET WebForms document. Its default tab (Overview) comes back
//! from a plain GET; the other tabs are reached by replaying the page form as a POST
//! with the matching submit button. The session cookie from the GET must accompany
//! the POST, which the default transport's cookie store takes care of.

use url::Url;

use crate::core::html::{self, Element};
use crate::core::{BvbClient, BvbError, Request, Schema, Symbol};

const FORM_ID: &str = "aspnetForm";
const SCRIPT_MANAGER: &str = "ctl00$MasterScriptManager";
const UPDATE_PANEL: &str = "ctl00$body$updIfttc";
const NEWS_CHECKBOXES: [&str; 2] = [
    "ctl00$body$ctl02$NewsBySymbolControl$chOutVolatility",
    "ctl00$body$ctl02$NewsBySymbolControl$chOutInsiders",
];

/// Button captions of the issuer profile tab (English and Romanian sessions).
const ISSUER_PROFILE_BUTTONS: [&str; 2] = ["Issuer profile", "Emitent"];

/// The Overview tab of one symbol, as served by the initial GET.
#[derive(Debug, Clone)]
pub(crate) struct DetailsPage {
    pub(crate) url: Url,
    pub(crate) html: String,
}

pub(crate) async fn fetch_overview(client: &BvbClient, symbol: &Symbol) -> Result<DetailsPage, BvbError> {
    let url = client.details_url(symbol.as_str())?;
    let html = client.send(Request::get(url.clone())).await?;
    Ok(DetailsPage { url, html })
}

pub(crate) async fn fetch_issuer_profile(
    client: &BvbClient,
    page: &DetailsPage,
) -> Result<String, BvbError> {
    let req = issuer_profile_request(page)?;
    client.send(req).await
}

fn page_form(html: &str) -> Option<Element<'_>> {
    html::find_by_id(html, "form", FORM_ID).or_else(|| html::elements(html, "form").into_iter().next())
}

/// Builds the postback that switches the page to its issuer profile tab.
pub(crate) fn issuer_profile_request(page: &DetailsPage) -> Result<Request, BvbError> {
    let schema = Schema::CompanyDetail;
    let form = page_form(&page.html)
        .ok_or_else(|| BvbError::parse(schema, FORM_ID, "no form element in details page"))?;
    let inputs = html::open_tags(form.inner, "input");
    let is_type = |tag: &str, ty: &str| {
        html::attr(tag, "type").is_some_and(|t| t.eq_ignore_ascii_case(ty))
    };

    let mut fields: Vec<(String, String)> = NEWS_CHECKBOXES
        .iter()
        .map(|name| ((*name).to_string(), "on".to_string()))
        .collect();

    for tag in inputs.iter().filter(|t| is_type(t, "hidden")) {
        if let Some(name) = html::attr(tag, "name").filter(|n| n.starts_with("__")) {
            fields.push((name, html::attr(tag, "value").unwrap_or_default()));
        }
    }

    let button = inputs
        .iter()
        .filter(|t| is_type(t, "submit"))
        .find(|t| {
            html::attr(t, "value").is_some_and(|v| {
                ISSUER_PROFILE_BUTTONS
                    .iter()
                    .any(|caption| caption.eq_ignore_ascii_case(v.trim()))
            })
        })
        .ok_or_else(|| BvbError::parse(schema, "Issuer profile", "issuer profile button not found"))?;
    let handler = html::attr(button, "name")
        .filter(|n| !n.is_empty())
        .ok_or_else(|| BvbError::parse(schema, "Issuer profile", "button has no name attribute"))?;
    let caption = html::attr(button, "value").unwrap_or_default();

    fields.push((SCRIPT_MANAGER.to_string(), format!("{UPDATE_PANEL}|{handler}")));
    fields.push((handler, caption));

    Ok(Request::post_form(page.url.clone(), fields).header("Referer", page.url.as_str()))
}
