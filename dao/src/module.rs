use serde::Serialize;

use crate::{collection::CollectionDao, id::IdFormat, sort::SortSpec, value::FieldKind};

#[derive(Serialize, Clone, Debug)]
pub struct FieldSpec {
    name: String,
    label: String,
    kind: FieldKind,
    required: bool,
    options: Vec<String>,
}

impl FieldSpec {
    pub fn new(name: &str, label: &str, kind: &FieldKind) -> Self {
        Self {
            name: name.to_owned(),
            label: label.to_owned(),
            kind: *kind,
            required: false,
            options: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = options.iter().map(|o| (*o).to_owned()).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn is_required(&self) -> &bool {
        &self.required
    }

    pub fn options(&self) -> &Vec<String> {
        &self.options
    }
}

/// Events a module reports to the workflow log.
#[derive(Serialize, Clone, Debug)]
pub struct WorkflowHooks {
    trigger_module: String,
    on_create: Option<String>,
    on_update: Option<String>,
    on_status: Vec<(String, String)>,
}

impl WorkflowHooks {
    pub fn new(trigger_module: &str) -> Self {
        Self {
            trigger_module: trigger_module.to_owned(),
            on_create: None,
            on_update: None,
            on_status: Vec::new(),
        }
    }

    pub fn with_on_create(mut self, event: &str) -> Self {
        self.on_create = Some(event.to_owned());
        self
    }

    pub fn with_on_update(mut self, event: &str) -> Self {
        self.on_update = Some(event.to_owned());
        self
    }

    pub fn with_on_status(mut self, status: &str, event: &str) -> Self {
        self.on_status.push((status.to_owned(), event.to_owned()));
        self
    }

    pub fn trigger_module(&self) -> &str {
        &self.trigger_module
    }

    pub fn on_create(&self) -> &Option<String> {
        &self.on_create
    }

    pub fn on_update(&self) -> &Option<String> {
        &self.on_update
    }

    pub fn on_status(&self, status: &str) -> Option<&str> {
        self.on_status
            .iter()
            .find(|(s, _)| s == status)
            .map(|(_, event)| event.as_str())
    }
}

/// Everything the engine and presenter need to know about one module.
#[derive(Serialize, Clone, Debug)]
pub struct ModuleConfig {
    key: String,
    name: String,
    category: String,
    file: String,
    id_field: String,
    id_format: IdFormat,
    list_columns: Vec<String>,
    default_sort: Option<SortSpec>,
    status_field: Option<String>,
    filter_options: Vec<String>,
    fields: Vec<FieldSpec>,
    workflow: Option<WorkflowHooks>,
}

impl ModuleConfig {
    pub fn new(
        key: &str,
        name: &str,
        category: &str,
        file: &str,
        id_field: &str,
        id_format: &IdFormat,
    ) -> Self {
        Self {
            key: key.to_owned(),
            name: name.to_owned(),
            category: category.to_owned(),
            file: file.to_owned(),
            id_field: id_field.to_owned(),
            id_format: id_format.clone(),
            list_columns: Vec::new(),
            default_sort: None,
            status_field: None,
            filter_options: Vec::new(),
            fields: Vec::new(),
            workflow: None,
        }
    }

    pub fn with_list_columns(mut self, columns: &[&str]) -> Self {
        self.list_columns = columns.iter().map(|c| (*c).to_owned()).collect();
        self
    }

    pub fn with_default_sort(mut self, sort: SortSpec) -> Self {
        self.default_sort = Some(sort);
        self
    }

    pub fn with_status(mut self, field: &str, options: &[&str]) -> Self {
        self.status_field = Some(field.to_owned());
        self.filter_options = options.iter().map(|o| (*o).to_owned()).collect();
        self
    }

    pub fn with_fields(mut self, fields: Vec<FieldSpec>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_workflow(mut self, hooks: WorkflowHooks) -> Self {
        self.workflow = Some(hooks);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    pub fn id_format(&self) -> &IdFormat {
        &self.id_format
    }

    pub fn list_columns(&self) -> &Vec<String> {
        &self.list_columns
    }

    pub fn default_sort(&self) -> &Option<SortSpec> {
        &self.default_sort
    }

    pub fn status_field(&self) -> &Option<String> {
        &self.status_field
    }

    pub fn filter_options(&self) -> &Vec<String> {
        &self.filter_options
    }

    pub fn fields(&self) -> &Vec<FieldSpec> {
        &self.fields
    }

    pub fn workflow(&self) -> &Option<WorkflowHooks> {
        &self.workflow
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn required_fields(&self) -> Vec<&FieldSpec> {
        self.fields.iter().filter(|f| *f.is_required()).collect()
    }

    pub fn collection(&self) -> CollectionDao {
        CollectionDao::new(
            &self.key,
            &self.category,
            &self.file,
            &self.id_field,
            &self
                .fields
                .iter()
                .map(|f| (f.name().to_owned(), *f.kind()))
                .collect::<Vec<_>>(),
        )
    }
}
