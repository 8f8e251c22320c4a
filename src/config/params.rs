use serde::{Deserialize, Serialize};

use crate::error::{Context, Result};
use crate::term::TermSpec;

use super::validator;

/// A named instrument; identity is the provider id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    pub id: String,
    pub name: String,
}

impl Instrument {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Request parameters: `{"term": "1y", "brands": [{"id": "..", "name": ".."}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    pub term: String,
    #[serde(default)]
    pub brands: Vec<Instrument>,
}

impl Params {
    /// Parse and validate request JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Params =
            serde_json::from_str(json).context("failed to parse request parameters JSON")?;
        validator::validate_params(&params)?;
        Ok(params)
    }

    pub fn term_spec(&self) -> Result<TermSpec> {
        TermSpec::parse(&self.term)
    }
}
