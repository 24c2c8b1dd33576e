use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::{AnalyticsError, Result};

// ---------------------------------------------------------------------------
// Transaction - One order line item
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Transaction {
    pub order_id: String,
    pub price: f64,
    pub purchase_year: i32,
    pub purchase_month: u32,
    pub order_status: String,
    pub product_category_name: Option<String>,
    pub customer_state: Option<String>,
    pub delivery_days: Option<f64>,
    pub review_score: Option<f64>,
}

impl Transaction {
    /// Create a line item with none of the optional attributes set.
    pub fn new(order_id: &str, price: f64, purchase_year: i32, purchase_month: u32, status: &str) -> Self {
        Self {
            order_id: order_id.to_string(),
            price,
            purchase_year,
            purchase_month,
            order_status: status.to_string(),
            product_category_name: None,
            customer_state: None,
            delivery_days: None,
            review_score: None,
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.product_category_name = Some(category.to_string());
        self
    }

    pub fn with_region(mut self, state: &str) -> Self {
        self.customer_state = Some(state.to_string());
        self
    }

    pub fn with_delivery_days(mut self, days: f64) -> Self {
        self.delivery_days = Some(days);
        self
    }

    pub fn with_review_score(mut self, score: f64) -> Self {
        self.review_score = Some(score);
        self
    }
}

// ---------------------------------------------------------------------------
// Capabilities - Which optional attributes the source schema carries
// ---------------------------------------------------------------------------

/// Optional-column flags detected once when the dataset is ingested.
///
/// Aggregators consult these instead of inspecting individual rows: a column
/// that exists but is null for some rows is still "present".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub has_category: bool,
    pub has_region: bool,
    pub has_delivery_time: bool,
    pub has_review_score: bool,
}

impl Capabilities {
    /// Every optional attribute present.
    pub fn all() -> Self {
        Self {
            has_category: true,
            has_region: true,
            has_delivery_time: true,
            has_review_score: true,
        }
    }
}

// ---------------------------------------------------------------------------
// SalesFilter - One period selection
// ---------------------------------------------------------------------------

/// A `(year, optional month, status)` selection passed to the data provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesFilter {
    pub year: i32,
    /// `None` selects every month of the year.
    pub month: Option<u32>,
    pub status: String,
}

impl SalesFilter {
    pub fn new(year: i32, month: Option<u32>, status: &str) -> Self {
        Self {
            year,
            month,
            status: status.to_string(),
        }
    }

    /// The same month and status one year earlier.
    pub fn previous_year(&self) -> Self {
        Self {
            year: self.year - 1,
            month: self.month,
            status: self.status.clone(),
        }
    }

    /// Label used for this period on charts.
    pub fn label(&self) -> String {
        self.year.to_string()
    }

    /// Reject months outside 1..=12.
    pub fn validate(&self) -> Result<()> {
        match self.month {
            Some(m) if !(1..=12).contains(&m) => Err(AnalyticsError::InvalidArgument(format!(
                "month must be between 1 and 12, got {}",
                m
            ))),
            _ => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionSet - Immutable filtered collection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionSet {
    rows: Vec<Transaction>,
    capabilities: Capabilities,
}

impl TransactionSet {
    pub fn new(rows: Vec<Transaction>, capabilities: Capabilities) -> Self {
        Self { rows, capabilities }
    }

    pub fn empty(capabilities: Capabilities) -> Self {
        Self::new(Vec::new(), capabilities)
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.rows.iter()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of `price` over every line item.
    pub fn total_revenue(&self) -> f64 {
        self.rows.iter().map(|t| t.price).sum()
    }

    /// Per-order summed price, in first-seen order.
    pub fn order_totals(&self) -> Vec<(String, f64)> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut totals: Vec<(String, f64)> = Vec::new();
        for t in &self.rows {
            match index.get(t.order_id.as_str()) {
                Some(&i) => totals[i].1 += t.price,
                None => {
                    index.insert(t.order_id.as_str(), totals.len());
                    totals.push((t.order_id.clone(), t.price));
                }
            }
        }
        totals
    }

    /// Number of distinct `order_id` values.
    pub fn distinct_orders(&self) -> usize {
        self.rows
            .iter()
            .map(|t| t.order_id.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Distinct purchase months present, ascending.
    pub fn months(&self) -> BTreeSet<u32> {
        self.rows.iter().map(|t| t.purchase_month).collect()
    }

    /// Revenue summed per purchase month, ascending by month.
    pub fn monthly_revenue(&self) -> BTreeMap<u32, f64> {
        let mut sums = BTreeMap::new();
        for t in &self.rows {
            *sums.entry(t.purchase_month).or_insert(0.0) += t.price;
        }
        sums
    }
}

impl<'a> IntoIterator for &'a TransactionSet {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
