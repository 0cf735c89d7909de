use serde::Deserialize;
use serde_json::{Map, Value};
use validator::Validate;

#[derive(Deserialize)]
pub struct InsertOneRecordReqPath {
    module: String,
}

impl InsertOneRecordReqPath {
    pub fn module(&self) -> &str {
        &self.module
    }
}

pub type InsertOneRecordReqJson = Map<String, Value>;

#[derive(Deserialize)]
pub struct OneRecordReqPath {
    module: String,
    record_id: String,
}

impl OneRecordReqPath {
    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn record_id(&self) -> &str {
        &self.record_id
    }
}

pub type FindOneRecordReqPath = OneRecordReqPath;
pub type UpdateOneRecordReqPath = OneRecordReqPath;
pub type DeleteOneRecordReqPath = OneRecordReqPath;

pub type UpdateOneRecordReqJson = Map<String, Value>;

#[derive(Deserialize)]
pub struct FindManyRecordReqPath {
    module: String,
}

impl FindManyRecordReqPath {
    pub fn module(&self) -> &str {
        &self.module
    }
}

/// List view query: `?search=&status=&sort=&direction=&page=&limit=`.
#[derive(Deserialize, Validate)]
pub struct ListRecordReqQuery {
    search: Option<String>,
    status: Option<String>,
    sort: Option<String>,
    direction: Option<String>,
    #[validate(range(min = 1))]
    page: Option<usize>,
    #[validate(range(min = 1, max = 1000))]
    limit: Option<usize>,
}

impl ListRecordReqQuery {
    pub fn search(&self) -> &Option<String> {
        &self.search
    }

    pub fn status(&self) -> &Option<String> {
        &self.status
    }

    pub fn sort(&self) -> &Option<String> {
        &self.sort
    }

    pub fn direction(&self) -> &Option<String> {
        &self.direction
    }

    pub fn page(&self) -> &Option<usize> {
        &self.page
    }

    pub fn limit(&self) -> &Option<usize> {
        &self.limit
    }
}

#[derive(Deserialize, Validate)]
pub struct FindManyRecordReqJson {
    filter: Option<Map<String, Value>>,
    #[validate(nested)]
    date_range: Option<DateRangeReqJson>,
    sort: Option<String>,
    direction: Option<String>,
    #[validate(range(min = 1))]
    page: Option<usize>,
    #[validate(range(min = 1, max = 1000))]
    limit: Option<usize>,
}

impl FindManyRecordReqJson {
    pub fn filter(&self) -> &Option<Map<String, Value>> {
        &self.filter
    }

    pub fn date_range(&self) -> &Option<DateRangeReqJson> {
        &self.date_range
    }

    pub fn sort(&self) -> &Option<String> {
        &self.sort
    }

    pub fn direction(&self) -> &Option<String> {
        &self.direction
    }

    pub fn page(&self) -> &Option<usize> {
        &self.page
    }

    pub fn limit(&self) -> &Option<usize> {
        &self.limit
    }
}

#[derive(Deserialize, Validate)]
pub struct DateRangeReqJson {
    #[validate(length(min = 1))]
    field: String,
    start: Option<String>,
    end: Option<String>,
}

impl DateRangeReqJson {
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn start(&self) -> &Option<String> {
        &self.start
    }

    pub fn end(&self) -> &Option<String> {
        &self.end
    }
}
