use serde::Serialize;

use crate::{
    record::{self, RecordDao},
    registry::ModuleRegistry,
    Db,
};

#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct SearchResult {
    module: String,
    name: String,
    records: Vec<RecordDao>,
}

impl SearchResult {
    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &Vec<RecordDao> {
        &self.records
    }
}

/// Lowercased query terms longer than one character.
pub fn terms(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|t| t.chars().count() > 1)
        .collect()
}

pub fn matches_all(record: &RecordDao, terms: &[String]) -> bool {
    let haystack = record
        .data()
        .values()
        .filter_map(record::stringify)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    terms.iter().all(|t| haystack.contains(t.as_str()))
}

/// Records containing every term, grouped by module in registry order.
/// Modules without hits are left out.
pub async fn search(db: &Db, registry: &ModuleRegistry, query: &str) -> Vec<SearchResult> {
    let terms = terms(query);
    if terms.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    for module in registry.modules() {
        let records = module
            .collection()
            .db_select(db)
            .await
            .into_iter()
            .filter(|r| matches_all(r, &terms))
            .collect::<Vec<_>>();
        if !records.is_empty() {
            results.push(SearchResult {
                module: module.key().to_owned(),
                name: module.name().to_owned(),
                records,
            });
        }
    }
    results
}
