use serde::{Deserialize, Serialize};

/// One attributed sale: a unit count for a (model, dealer, salesperson) triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub model_id: String,
    pub dealer_id: String,
    pub salesperson_id: String,
    #[serde(default)]
    pub model_name: String,
    #[serde(default)]
    pub dealer_name: String,
    #[serde(default)]
    pub salesperson_name: String,
    pub units: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummary {
    pub model_id: String,
    pub name: String,
    pub total_units: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerSummary {
    pub model_id: String,
    pub dealer_id: String,
    pub name: String,
    pub units: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalespersonSummary {
    pub model_id: String,
    pub dealer_id: String,
    pub salesperson_id: String,
    pub name: String,
    pub units: i64,
}

/// Common view over the three summary levels.
pub trait Summary {
    /// Grouping key at this level (model, dealer or salesperson id).
    fn key(&self) -> &str;
    fn name(&self) -> &str;
    fn units(&self) -> i64;
}

impl Summary for ModelSummary {
    fn key(&self) -> &str {
        &self.model_id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn units(&self) -> i64 {
        self.total_units
    }
}

impl Summary for DealerSummary {
    fn key(&self) -> &str {
        &self.dealer_id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn units(&self) -> i64 {
        self.units
    }
}

impl Summary for SalespersonSummary {
    fn key(&self) -> &str {
        &self.salesperson_id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn units(&self) -> i64 {
        self.units
    }
}

/// Currently selected parents, derived from the active view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub model_id: Option<String>,
    pub dealer_id: Option<String>,
}
