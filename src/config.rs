use web_sys::Element;

use crate::error::{Error, Result};

pub const DEFAULT_BANNER_MS: u32 = 5000;

/// Settings read from the mount element, e.g.
/// `<div id="app" data-api-base="https://school.example" data-banner-ms="5000">`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    /// Prefix for every endpoint. Empty means same origin.
    pub api_base: String,
    pub banner_ms: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            banner_ms: DEFAULT_BANNER_MS,
        }
    }
}

impl BoardConfig {
    pub fn from_attributes(api_base: Option<String>, banner_ms: Option<String>) -> Result<Self> {
        let banner_ms = match banner_ms.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_BANNER_MS,
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|e| Error::Config(format!("data-banner-ms {raw:?}: {e}")))?,
        };
        Ok(Self {
            api_base: api_base.unwrap_or_default().trim().to_string(),
            banner_ms,
        })
    }

    pub fn from_element(el: &Element) -> Result<Self> {
        Self::from_attributes(
            el.get_attribute("data-api-base"),
            el.get_attribute("data-banner-ms"),
        )
    }
}
