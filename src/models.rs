use serde::{Deserialize, Serialize};

/// A stored expense row. Never mutated once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub subcategory: String,
    pub note: String,
}

/// Insert payload. `subcategory` and `note` default to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub date: String,
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub note: String,
}

impl NewExpense {
    pub fn new(date: impl Into<String>, amount: f64, category: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            amount,
            category: category.into(),
            ..Default::default()
        }
    }

    pub fn subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = subcategory.into();
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}

/// One group of a category aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub total_amount: f64,
    pub count: i64,
}
