//! Issuer data: the `Company` model, the details page postback and the issuer
//! profile parser.

pub(crate) mod details;
pub(crate) mod model;
pub(crate) mod parse;

pub use model::{Company, Shareholder};
