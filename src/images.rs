//! Turns model-provided keywords into image URLs.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use crate::constants::{DEFAULT_IMAGE_URL_TEMPLATE, KEYWORD_PLACEHOLDER};
use crate::error::CardNewsError;

/// Everything but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Substitutes an encoded keyword into a fixed image service URL.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImageResolver {
    template: String,
}

impl ImageResolver {
    /// Template must contain `{keyword}` and be an absolute URL once it is filled in.
    pub fn new(template: impl Into<String>) -> Result<Self, CardNewsError> {
        let template = template.into();
        if !template.contains(KEYWORD_PLACEHOLDER) {
            return Err(CardNewsError::InternalServerError(format!(
                "Image URL template {template:?} has no {KEYWORD_PLACEHOLDER} placeholder"
            )));
        }
        Url::parse(&template.replace(KEYWORD_PLACEHOLDER, "keyword")).map_err(|err| {
            CardNewsError::InternalServerError(format!(
                "Image URL template {template:?} is not a valid URL: {err}"
            ))
        })?;
        Ok(Self { template })
    }

    /// Display URL for a keyword.
    pub fn resolve(&self, keyword: &str) -> String {
        self.template
            .replace(KEYWORD_PLACEHOLDER, &encode_keyword(keyword.trim()))
    }
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self {
            template: DEFAULT_IMAGE_URL_TEMPLATE.to_string(),
        }
    }
}

/// Percent-encodes a keyword the way JavaScript's `encodeURIComponent` does.
pub fn encode_keyword(keyword: &str) -> String {
    utf8_percent_encode(keyword, URI_COMPONENT).to_string()
}
