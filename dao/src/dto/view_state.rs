use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    dto::pagination::{Pagination, DEFAULT_PAGE_SIZE},
    filter::{Condition, FilterSpec},
    module::ModuleConfig,
    record::RecordDao,
    sort::SortSpec,
};

/// Status filter value that turns the status filter off.
pub const ALL_STATUSES: &str = "All";

#[derive(Deserialize, Serialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Detail,
    New,
    Edit,
}

/// What one user is looking at in one module.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct ViewState {
    search: String,
    status_filter: Option<String>,
    sort: Option<SortSpec>,
    selected_id: Option<String>,
    mode: ViewMode,
    page: usize,
    page_size: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            status_filter: None,
            sort: None,
            selected_id: None,
            mode: ViewMode::List,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn status_filter(&self) -> &Option<String> {
        &self.status_filter
    }

    pub fn sort(&self) -> &Option<SortSpec> {
        &self.sort
    }

    pub fn selected_id(&self) -> &Option<String> {
        &self.selected_id
    }

    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    pub fn page(&self) -> &usize {
        &self.page
    }

    pub fn page_size(&self) -> &usize {
        &self.page_size
    }

    pub fn set_search(&mut self, search: &str) {
        self.search = search.to_owned();
        self.page = 1;
    }

    pub fn set_status_filter(&mut self, status: &Option<String>) {
        self.status_filter = status.clone();
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: &Option<SortSpec>) {
        self.sort = sort.clone();
    }

    pub fn set_page(&mut self, page: &usize) {
        self.page = (*page).max(1);
    }

    pub fn set_page_size(&mut self, page_size: &usize) {
        self.page_size = (*page_size).max(1);
    }

    /// Same field flips the direction, another field sorts ascending.
    pub fn toggle_sort(&mut self, field: &str) {
        self.sort = Some(match &self.sort {
            Some(sort) if sort.field() == field => SortSpec::new(field, &sort.direction().flip()),
            _ => SortSpec::asc(field),
        });
    }

    pub fn select(&mut self, id: &str) {
        self.selected_id = Some(id.to_owned());
        self.mode = ViewMode::Detail;
    }

    pub fn start_new(&mut self) {
        self.selected_id = None;
        self.mode = ViewMode::New;
    }

    /// Switches to editing the selected record; stays put when nothing is selected.
    pub fn start_edit(&mut self) {
        if self.selected_id.is_some() {
            self.mode = ViewMode::Edit;
        }
    }

    pub fn back_to_list(&mut self) {
        self.selected_id = None;
        self.mode = ViewMode::List;
    }

    pub fn filter_spec(&self, status_field: &Option<String>) -> FilterSpec {
        let mut spec = FilterSpec::new();
        if !self.search.is_empty() {
            spec.push(Condition::SearchText(self.search.clone()));
        }
        if let (Some(field), Some(status)) = (status_field, &self.status_filter) {
            if status != ALL_STATUSES {
                spec.push(Condition::Equals {
                    field: field.to_owned(),
                    value: Value::String(status.to_owned()),
                });
            }
        }
        spec
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(&Some(self.page), &Some(self.page_size))
    }

    /// Filters, sorts and pages `records` for display.
    pub fn list_page(&self, module: &ModuleConfig, records: &[RecordDao]) -> ListPage {
        let filtered = self.filter_spec(module.status_field()).apply(records);
        let sorted = match self.sort.as_ref().or(module.default_sort().as_ref()) {
            Some(sort) => sort.apply(&filtered),
            None => filtered,
        };
        ListPage::new(module, &sorted, &self.pagination())
    }
}

/// One page of list rows projected to the module's list columns.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct ListPage {
    rows: Vec<Map<String, Value>>,
    total: usize,
    count: usize,
    page: usize,
    page_size: usize,
    total_pages: usize,
}

impl ListPage {
    pub fn new(module: &ModuleConfig, records: &[RecordDao], pagination: &Pagination) -> Self {
        let rows = pagination
            .apply(records)
            .iter()
            .map(|r| project(module, r))
            .collect::<Vec<_>>();
        Self {
            count: rows.len(),
            rows,
            total: records.len(),
            page: *pagination.page(),
            page_size: *pagination.limit(),
            total_pages: pagination.total_pages(&records.len()),
        }
    }

    pub fn rows(&self) -> &Vec<Map<String, Value>> {
        &self.rows
    }

    pub fn total(&self) -> &usize {
        &self.total
    }

    pub fn count(&self) -> &usize {
        &self.count
    }

    pub fn page(&self) -> &usize {
        &self.page
    }

    pub fn page_size(&self) -> &usize {
        &self.page_size
    }

    pub fn total_pages(&self) -> &usize {
        &self.total_pages
    }
}

/// List columns of a record with the id always present. Modules without
/// list columns show whole records.
pub fn project(module: &ModuleConfig, record: &RecordDao) -> Map<String, Value> {
    if module.list_columns().is_empty() {
        return record.data().clone();
    }
    let mut row = Map::with_capacity(module.list_columns().len() + 1);
    if !module.list_columns().iter().any(|c| c == module.id_field()) {
        row.insert(
            module.id_field().to_owned(),
            record.get(module.id_field()).cloned().unwrap_or(Value::Null),
        );
    }
    for column in module.list_columns() {
        row.insert(
            column.to_owned(),
            record.get(column).cloned().unwrap_or(Value::Null),
        );
    }
    row
}

type Predicate = Box<dyn Fn(&RecordDao) -> Result<(), String> + Send + Sync>;

/// Form submission check run before create and update.
pub struct FormValidator {
    predicate: Predicate,
}

impl FormValidator {
    pub fn new(predicate: impl Fn(&RecordDao) -> Result<(), String> + Send + Sync + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
        }
    }

    /// Rejects records missing any of the module's required fields.
    pub fn required_fields(module: &ModuleConfig) -> Self {
        let required = module
            .required_fields()
            .iter()
            .map(|f| (f.name().to_owned(), f.label().to_owned()))
            .collect::<Vec<_>>();
        Self::new(move |record| {
            let missing = required
                .iter()
                .filter(|(name, _)| is_blank(record.get(name)))
                .map(|(_, label)| label.as_str())
                .collect::<Vec<_>>();
            if missing.is_empty() {
                Ok(())
            } else {
                Err(format!(
                    "Please fill in the following required fields: {}",
                    missing.join(", ")
                ))
            }
        })
    }

    pub fn validate(&self, record: &RecordDao) -> Result<(), String> {
        (self.predicate)(record)
    }
}

/// Missing, null, empty, false or zero.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::Array(a)) => a.is_empty(),
        Some(Value::Object(o)) => o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{id::IdFormat, module::FieldSpec, sort::SortDirection, value::FieldKind};

    fn module() -> ModuleConfig {
        ModuleConfig::new("rfis", "RFIs", "rfis", "rfis", "id", &IdFormat::new("RFI-", &3))
            .with_list_columns(&["subject", "status"])
            .with_status("status", &["open", "closed"])
            .with_fields(vec![
                FieldSpec::new("subject", "Subject", &FieldKind::Text).required(),
                FieldSpec::new("description", "Description", &FieldKind::Textarea).required(),
                FieldSpec::new("status", "Status", &FieldKind::Select),
            ])
    }

    fn records() -> Vec<RecordDao> {
        serde_json::from_value(json!([
            {"id": "RFI-001", "status": "open", "subject": "Steel beam", "description": "x"},
            {"id": "RFI-002", "status": "closed", "subject": "HVAC", "description": "y"},
            {"id": "RFI-003", "status": "open", "subject": "Anchor bolts", "description": "z"},
        ]))
        .unwrap()
    }

    #[test]
    fn toggle_sort_flips_same_field() {
        let mut view = ViewState::new();
        view.toggle_sort("subject");
        assert_eq!(view.sort(), &Some(SortSpec::asc("subject")));
        view.toggle_sort("subject");
        assert_eq!(view.sort().as_ref().unwrap().direction(), &SortDirection::Desc);
        view.toggle_sort("status");
        assert_eq!(view.sort(), &Some(SortSpec::asc("status")));
    }

    #[test]
    fn all_status_disables_the_filter() {
        let mut view = ViewState::new();
        view.set_status_filter(&Some(ALL_STATUSES.to_owned()));
        assert!(view.filter_spec(&Some("status".to_owned())).is_empty());
        view.set_status_filter(&Some("open".to_owned()));
        assert_eq!(view.filter_spec(&Some("status".to_owned())).conditions().len(), 1);
        assert!(view.filter_spec(&None).is_empty());
    }

    #[test]
    fn mode_transitions() {
        let mut view = ViewState::new();
        view.start_edit();
        assert_eq!(view.mode(), &ViewMode::List);
        view.select("RFI-001");
        assert_eq!(view.mode(), &ViewMode::Detail);
        view.start_edit();
        assert_eq!(view.mode(), &ViewMode::Edit);
        view.back_to_list();
        assert_eq!(view.selected_id(), &None);
        view.start_new();
        assert_eq!(view.mode(), &ViewMode::New);
    }

    #[test]
    fn list_page_filters_sorts_and_projects() {
        let mut view = ViewState::new();
        view.set_status_filter(&Some("open".to_owned()));
        view.toggle_sort("subject");
        view.set_page_size(&1);
        let page = view.list_page(&module(), &records());
        assert_eq!(*page.total(), 2);
        assert_eq!(*page.count(), 1);
        assert_eq!(*page.total_pages(), 2);
        assert_eq!(
            Value::Object(page.rows()[0].clone()),
            json!({"id": "RFI-003", "subject": "Anchor bolts", "status": "open"})
        );
    }

    #[test]
    fn required_fields_message_lists_labels() {
        let validator = FormValidator::required_fields(&module());
        let record: RecordDao = serde_json::from_value(json!({"subject": "", "status": "open"})).unwrap();
        assert_eq!(
            validator.validate(&record),
            Err("Please fill in the following required fields: Subject, Description".to_owned())
        );
        let record: RecordDao =
            serde_json::from_value(json!({"subject": "S", "description": "D"})).unwrap();
        assert!(validator.validate(&record).is_ok());
    }

    #[test]
    fn blank_values() {
        assert!(is_blank(Some(&json!(false))));
        assert!(is_blank(Some(&json!(0))));
        assert!(is_blank(Some(&json!([]))));
        assert!(!is_blank(Some(&json!("x"))));
        assert!(!is_blank(Some(&json!(3))));
    }
}
