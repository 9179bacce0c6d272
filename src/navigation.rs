use crate::aggregator::{summarize_dealers, summarize_models, summarize_salespeople};
use crate::error::{Result, SalesError};
use crate::models::{DealerSummary, ModelSummary, SaleRecord, SalespersonSummary, Selection};

/// Drill-down position. Starts at `Models`; there is no terminal view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Models,
    Dealers {
        model_id: String,
    },
    Salespeople {
        model_id: String,
        dealer_id: String,
    },
}

impl View {
    pub fn label(&self) -> &'static str {
        match self {
            View::Models => "models",
            View::Dealers { .. } => "dealers",
            View::Salespeople { .. } => "salespeople",
        }
    }

    pub fn select_model(&self, model_id: &str) -> Result<View> {
        match self {
            View::Models => Ok(View::Dealers {
                model_id: model_id.to_string(),
            }),
            _ => Err(SalesError::InvalidTransition {
                action: "select a model",
                view: self.label(),
            }),
        }
    }

    pub fn select_dealer(&self, dealer_id: &str) -> Result<View> {
        match self {
            View::Dealers { model_id } => Ok(View::Salespeople {
                model_id: model_id.clone(),
                dealer_id: dealer_id.to_string(),
            }),
            _ => Err(SalesError::InvalidTransition {
                action: "select a dealer",
                view: self.label(),
            }),
        }
    }

    /// One level up. A no-op at `Models`.
    pub fn back(&self) -> View {
        match self {
            View::Models | View::Dealers { .. } => View::Models,
            View::Salespeople { model_id, .. } => View::Dealers {
                model_id: model_id.clone(),
            },
        }
    }

    pub fn selection(&self) -> Selection {
        match self {
            View::Models => Selection::default(),
            View::Dealers { model_id } => Selection {
                model_id: Some(model_id.clone()),
                dealer_id: None,
            },
            View::Salespeople {
                model_id,
                dealer_id,
            } => Selection {
                model_id: Some(model_id.clone()),
                dealer_id: Some(dealer_id.clone()),
            },
        }
    }
}

/// Summaries for whichever level the view points at.
#[derive(Debug, Clone, PartialEq)]
pub enum Level {
    Models(Vec<ModelSummary>),
    Dealers(Vec<DealerSummary>),
    Salespeople(Vec<SalespersonSummary>),
}

impl Level {
    pub fn len(&self) -> usize {
        match self {
            Level::Models(v) => v.len(),
            Level::Dealers(v) => v.len(),
            Level::Salespeople(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Record batch plus the current drill-down view. Summaries are recomputed on every query.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    records: Vec<SaleRecord>,
    view: View,
}

impl Dashboard {
    pub fn new(records: Vec<SaleRecord>) -> Self {
        Self {
            records,
            view: View::Models,
        }
    }

    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn selection(&self) -> Selection {
        self.view.selection()
    }

    /// Swap in a new batch (e.g. a different period) and return to the top level.
    pub fn replace_records(&mut self, records: Vec<SaleRecord>) {
        self.records = records;
        self.view = View::Models;
    }

    pub fn select_model(&mut self, model_id: &str) -> Result<()> {
        self.view = self.view.select_model(model_id)?;
        Ok(())
    }

    pub fn select_dealer(&mut self, dealer_id: &str) -> Result<()> {
        self.view = self.view.select_dealer(dealer_id)?;
        Ok(())
    }

    pub fn back(&mut self) {
        self.view = self.view.back();
    }

    pub fn level(&self) -> Level {
        match &self.view {
            View::Models => Level::Models(summarize_models(&self.records)),
            View::Dealers { model_id } => Level::Dealers(summarize_dealers(&self.records, model_id)),
            View::Salespeople {
                model_id,
                dealer_id,
            } => Level::Salespeople(summarize_salespeople(&self.records, model_id, dealer_id)),
        }
    }
}
