//! Portfolio filter categories and their selected options

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Selected options keyed by category name; empty categories are omitted
pub type SelectedFilters = BTreeMap<String, Vec<String>>;

/// One filter category with its fixed option list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCategory {
    pub name: String,
    pub options: Vec<String>,
    pub selected: Vec<String>,
}

impl FilterCategory {
    pub fn new(name: &str, options: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            selected: Vec::new(),
        }
    }

    pub fn is_selected(&self, option: &str) -> bool {
        self.selected.iter().any(|s| s == option)
    }
}

/// The full set of portfolio filter categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    categories: Vec<FilterCategory>,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl FilterSet {
    /// Categories offered on the portfolio filter step
    pub fn standard() -> Self {
        Self {
            categories: vec![
                FilterCategory::new(
                    "Geography",
                    &[
                        "North America",
                        "Canada",
                        "USA",
                        "Toronto",
                        "Vancouver",
                        "New York",
                        "Chicago",
                        "San Francisco",
                    ],
                ),
                FilterCategory::new(
                    "Property Type",
                    &["Office", "Retail", "Industrial", "Multifamily", "Mixed Use", "Hotel"],
                ),
                FilterCategory::new(
                    "LOB / Sub-LOB",
                    &[
                        "Commercial Banking",
                        "Corporate Banking",
                        "Real Estate",
                        "Small Business",
                        "Enterprise",
                    ],
                ),
                FilterCategory::new(
                    "Energy Source",
                    &["Natural Gas", "Electric", "Oil", "District Energy", "Renewable", "Mixed"],
                ),
                FilterCategory::new(
                    "Efficiency Range",
                    &["High (>90%)", "Medium (70-90%)", "Low (<70%)"],
                ),
                FilterCategory::new(
                    "Certifications",
                    &["LEED", "BOMA BEST", "ENERGY STAR", "WELL", "Net Zero", "None"],
                ),
            ],
        }
    }

    pub fn categories(&self) -> &[FilterCategory] {
        &self.categories
    }

    fn category_mut(&mut self, name: &str) -> Option<&mut FilterCategory> {
        self.categories.iter_mut().find(|c| c.name == name)
    }

    /// Select the option if unselected, otherwise deselect it
    ///
    /// Returns false when the category or option does not exist.
    pub fn toggle(&mut self, category: &str, option: &str) -> bool {
        let Some(cat) = self.category_mut(category) else {
            log::warn!("unknown filter category {:?}", category);
            return false;
        };
        if !cat.options.iter().any(|o| o == option) {
            log::warn!("unknown option {:?} in {:?}", option, category);
            return false;
        }
        if cat.is_selected(option) {
            cat.selected.retain(|s| s != option);
        } else {
            cat.selected.push(option.to_string());
        }
        true
    }

    /// Deselect an option; no-op if it was not selected
    pub fn remove(&mut self, category: &str, option: &str) {
        if let Some(cat) = self.category_mut(category) {
            cat.selected.retain(|s| s != option);
        }
    }

    pub fn clear(&mut self) {
        for cat in &mut self.categories {
            cat.selected.clear();
        }
    }

    pub fn total_selected(&self) -> usize {
        self.categories.iter().map(|c| c.selected.len()).sum()
    }

    /// Categories with options narrowed to those containing the search term
    pub fn search(&self, term: &str) -> Vec<FilterCategory> {
        if term.is_empty() {
            return self.categories.clone();
        }
        let term = term.to_lowercase();
        self.categories
            .iter()
            .map(|c| FilterCategory {
                options: c
                    .options
                    .iter()
                    .filter(|o| o.to_lowercase().contains(&term))
                    .cloned()
                    .collect(),
                ..c.clone()
            })
            .collect()
    }

    /// Non-empty selections keyed by category name
    pub fn selected(&self) -> SelectedFilters {
        self.categories
            .iter()
            .filter(|c| !c.selected.is_empty())
            .map(|c| (c.name.clone(), c.selected.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_and_remove() {
        let mut filters = FilterSet::standard();
        assert!(filters.toggle("Geography", "Toronto"));
        assert!(filters.toggle("Geography", "Vancouver"));
        assert!(filters.toggle("Certifications", "LEED"));
        assert_eq!(filters.total_selected(), 3);

        assert!(filters.toggle("Geography", "Toronto"));
        assert_eq!(filters.total_selected(), 2);

        filters.remove("Certifications", "LEED");
        filters.remove("Certifications", "LEED");
        assert_eq!(filters.total_selected(), 1);
    }

    #[test]
    fn test_unknown_category_or_option_is_ignored() {
        let mut filters = FilterSet::standard();
        assert!(!filters.toggle("Color", "Blue"));
        assert!(!filters.toggle("Geography", "Paris"));
        assert_eq!(filters.total_selected(), 0);
    }

    #[test]
    fn test_selected_omits_empty_categories() {
        let mut filters = FilterSet::standard();
        filters.toggle("Property Type", "Office");
        filters.toggle("Property Type", "Retail");
        let selected = filters.selected();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected["Property Type"], vec!["Office", "Retail"]);

        filters.clear();
        assert!(filters.selected().is_empty());
    }

    #[test]
    fn test_search_narrows_options() {
        let filters = FilterSet::standard();
        let result = filters.search("ENERGY");
        assert_eq!(result.len(), 6);
        let certs = result.iter().find(|c| c.name == "Certifications").unwrap();
        assert_eq!(certs.options, vec!["ENERGY STAR"]);
        let energy = result.iter().find(|c| c.name == "Energy Source").unwrap();
        assert_eq!(energy.options, vec!["District Energy"]);
        assert_eq!(filters.search("").len(), 6);
    }
}
