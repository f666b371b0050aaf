//! CSV dialect for written files, passed through from configuration.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStyle {
    #[default]
    Necessary,
    Always,
    NonNumeric,
    Never,
}

impl From<QuoteStyle> for csv::QuoteStyle {
    fn from(value: QuoteStyle) -> Self {
        match value {
            QuoteStyle::Necessary => csv::QuoteStyle::Necessary,
            QuoteStyle::Always => csv::QuoteStyle::Always,
            QuoteStyle::NonNumeric => csv::QuoteStyle::NonNumeric,
            QuoteStyle::Never => csv::QuoteStyle::Never,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dialect {
    pub delimiter: char,
    pub quote_style: QuoteStyle,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote_style: QuoteStyle::Necessary,
        }
    }
}

impl Dialect {
    pub fn writer_builder(&self) -> Result<csv::WriterBuilder> {
        if !self.delimiter.is_ascii() {
            bail!("delimiter '{}' must be a single ASCII character", self.delimiter);
        }
        let mut builder = csv::WriterBuilder::new();
        builder
            .delimiter(self.delimiter as u8)
            .quote_style(self.quote_style.into());
        Ok(builder)
    }
}
