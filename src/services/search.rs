//! Advanced search flow: two-condition boolean query, results, reservation

use std::str::FromStr;
use std::sync::Arc;

use crate::{
    api::LibraryApi,
    error::{ClientError, ClientResult},
    models::{Book, BooleanOperator, SearchCondition, SearchField, SearchRequest},
    services::reservations::ReservationCollector,
    views::{self, ResultRow},
};

pub const MISSING_CRITERIA_MESSAGE: &str =
    "Please select fields, enter expressions, and choose an operator.";
pub const SEARCH_FAILED_MESSAGE: &str = "Error searching for books";
/// Used when the service rejects a query without saying why
pub const SEARCH_REJECTED_MESSAGE: &str = "Search failed";

/// Form input names, as a form control reports them on change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriterionName {
    Option1,
    Expression1,
    Option2,
    Expression2,
    Operator,
}

impl FromStr for CriterionName {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "option1" => Ok(CriterionName::Option1),
            "expression1" => Ok(CriterionName::Expression1),
            "option2" => Ok(CriterionName::Option2),
            "expression2" => Ok(CriterionName::Expression2),
            "operator" => Ok(CriterionName::Operator),
            other => Err(ClientError::Validation(format!("unknown search input: {}", other))),
        }
    }
}

/// Decode a selector value: empty is unselected, otherwise an option index
fn parse_selection<T>(value: &str, from_index: fn(usize) -> Option<T>) -> ClientResult<Option<T>> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<usize>()
        .ok()
        .and_then(from_index)
        .map(Some)
        .ok_or_else(|| ClientError::Validation(format!("unknown option: {}", value)))
}

/// The five search inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub field1: Option<SearchField>,
    pub expression1: String,
    pub field2: Option<SearchField>,
    pub expression2: String,
    pub operator: Option<BooleanOperator>,
}

impl SearchCriteria {
    /// Build the request payload, or `None` while any input is empty
    pub fn to_request(&self) -> Option<SearchRequest> {
        if self.expression1.is_empty() || self.expression2.is_empty() {
            return None;
        }
        Some(SearchRequest {
            conditions: [
                SearchCondition {
                    field: self.field1?,
                    expression: self.expression1.clone(),
                },
                SearchCondition {
                    field: self.field2?,
                    expression: self.expression2.clone(),
                },
            ],
            operator: self.operator?,
        })
    }
}

/// Result of a search submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Blocked by the client-side guard, nothing sent
    Incomplete,
    Matched(usize),
    Rejected(String),
    Failed,
}

/// Advanced search form state
pub struct SearchForm {
    api: Arc<dyn LibraryApi>,
    collector: Arc<dyn ReservationCollector>,
    criteria: SearchCriteria,
    results: Vec<Book>,
    error: String,
}

impl SearchForm {
    pub fn new(api: Arc<dyn LibraryApi>, collector: Arc<dyn ReservationCollector>) -> Self {
        Self {
            api,
            collector,
            criteria: SearchCriteria::default(),
            results: Vec::new(),
            error: String::new(),
        }
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn results(&self) -> &[Book] {
        &self.results
    }

    /// Current error message, empty when there is none
    pub fn error(&self) -> &str {
        &self.error
    }

    /// Update one input by name. Selector values are option indices.
    pub fn handle_change(&mut self, name: &str, value: &str) -> ClientResult<()> {
        match name.parse::<CriterionName>()? {
            CriterionName::Option1 => {
                self.criteria.field1 = parse_selection(value, SearchField::from_index)?
            }
            CriterionName::Option2 => {
                self.criteria.field2 = parse_selection(value, SearchField::from_index)?
            }
            CriterionName::Operator => {
                self.criteria.operator = parse_selection(value, BooleanOperator::from_index)?
            }
            CriterionName::Expression1 => self.criteria.expression1 = value.to_string(),
            CriterionName::Expression2 => self.criteria.expression2 = value.to_string(),
        }
        Ok(())
    }

    pub fn set_first(&mut self, field: Option<SearchField>, expression: impl Into<String>) {
        self.criteria.field1 = field;
        self.criteria.expression1 = expression.into();
    }

    pub fn set_second(&mut self, field: Option<SearchField>, expression: impl Into<String>) {
        self.criteria.field2 = field;
        self.criteria.expression2 = expression.into();
    }

    pub fn set_operator(&mut self, operator: Option<BooleanOperator>) {
        self.criteria.operator = operator;
    }

    /// Validate and send the query, then update results and error
    pub async fn submit(&mut self) -> SearchOutcome {
        let Some(request) = self.criteria.to_request() else {
            self.error = MISSING_CRITERIA_MESSAGE.to_string();
            return SearchOutcome::Incomplete;
        };

        tracing::info!(
            "Searching: {} ~ {:?} {} {} ~ {:?}",
            request.conditions[0].field,
            request.conditions[0].expression,
            request.operator,
            request.conditions[1].field,
            request.conditions[1].expression
        );

        match self.api.search_books(&request).await {
            Ok(response) if response.status => {
                self.results = response.data.unwrap_or_default();
                self.error.clear();
                SearchOutcome::Matched(self.results.len())
            }
            Ok(response) => {
                self.error = response
                    .message
                    .unwrap_or_else(|| SEARCH_REJECTED_MESSAGE.to_string());
                self.results.clear();
                SearchOutcome::Rejected(self.error.clone())
            }
            Err(e) => {
                tracing::error!("Search request failed: {}", e);
                self.error = SEARCH_FAILED_MESSAGE.to_string();
                self.results.clear();
                SearchOutcome::Failed
            }
        }
    }

    /// Reset inputs, results and error
    pub fn clear(&mut self) {
        self.criteria = SearchCriteria::default();
        self.results.clear();
        self.error.clear();
    }

    pub fn rows(&self) -> Vec<ResultRow<'_>> {
        views::result_rows(&self.results)
    }

    /// Hand the result at `index` to the reservation collector.
    /// Only rows whose status is exactly available offer this action.
    pub fn reserve(&self, index: usize) -> ClientResult<()> {
        let book = self
            .results
            .get(index)
            .ok_or_else(|| ClientError::Validation(format!("no search result at row {}", index)))?;

        if !book.is_available() {
            return Err(ClientError::NotReservable(book.accession_label()));
        }

        self.collector.add_reserved_book(book.clone());
        Ok(())
    }

    /// Reserve several rows at once. Every row is checked first, so a bad
    /// index or unavailable book leaves the collector untouched.
    pub fn reserve_rows(&self, indices: &[usize]) -> ClientResult<()> {
        for &index in indices {
            let book = self.results.get(index).ok_or_else(|| {
                ClientError::Validation(format!("no search result at row {}", index))
            })?;
            if !book.is_available() {
                return Err(ClientError::NotReservable(book.accession_label()));
            }
        }
        indices.iter().try_for_each(|&index| self.reserve(index))
    }
}
