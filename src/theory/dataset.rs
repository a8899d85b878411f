use std::collections::BTreeSet;
use std::fmt;

use super::record::TheoryRow;

pub const ALL_CATEGORIES: &str = "All";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn from_label(label: &str) -> Self {
        if label == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(label.to_owned())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(category) => category,
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug)]
pub struct Dataset {
    pub rows: Vec<TheoryRow>,
    categories: Vec<String>,
}

impl Dataset {
    pub fn new(rows: Vec<TheoryRow>) -> Self {
        let unique = rows
            .iter()
            .map(|row| row.category.as_str())
            .collect::<BTreeSet<_>>();

        let mut categories = Vec::with_capacity(unique.len() + 1);
        categories.push(ALL_CATEGORIES.to_owned());
        categories.extend(unique.into_iter().map(str::to_owned));

        Self { rows, categories }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn color_domain(&self) -> &[String] {
        &self.categories[1..]
    }

    pub fn has_category(&self, filter: &CategoryFilter) -> bool {
        match filter {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => self.color_domain().contains(category),
        }
    }

    pub fn filtered(&self, filter: &CategoryFilter) -> Vec<&TheoryRow> {
        self.rows
            .iter()
            .filter(|row| filter.matches(&row.category))
            .collect()
    }
}
