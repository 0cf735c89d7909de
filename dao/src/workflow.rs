use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    collection::CollectionDao,
    module::ModuleConfig,
    record::{self, RecordDao},
    value::FieldKind,
    Db,
};

pub const LOG_CAPACITY: usize = 100;

/// Cross-module link fired by a module event.
#[derive(Serialize, Clone, Debug)]
pub struct Relationship {
    name: &'static str,
    trigger_module: &'static str,
    target_module: &'static str,
    relationship_type: &'static str,
    trigger_events: &'static [&'static str],
    automated_actions: &'static [&'static str],
}

impl Relationship {
    pub fn name(&self) -> &str {
        self.name
    }

    pub fn trigger_module(&self) -> &str {
        self.trigger_module
    }

    pub fn target_module(&self) -> &str {
        self.target_module
    }

    pub fn trigger_events(&self) -> &[&'static str] {
        self.trigger_events
    }

    pub fn automated_actions(&self) -> &[&'static str] {
        self.automated_actions
    }

    pub fn fires_on(&self, trigger_module: &str, event: &str) -> bool {
        self.trigger_module == trigger_module && self.trigger_events.iter().any(|e| *e == event)
    }
}

pub const RELATIONSHIPS: [Relationship; 4] = [
    Relationship {
        name: "contract_to_sov",
        trigger_module: "contracts",
        target_module: "cost_management",
        relationship_type: "one_to_many",
        trigger_events: &["contract_created", "contract_modified"],
        automated_actions: &["create_sov_items", "update_contract_totals"],
    },
    Relationship {
        name: "change_order_to_sov",
        trigger_module: "contracts",
        target_module: "cost_management",
        relationship_type: "many_to_many",
        trigger_events: &["change_order_approved"],
        automated_actions: &["update_sov_values", "recalculate_billing"],
    },
    Relationship {
        name: "sov_to_billing",
        trigger_module: "cost_management",
        target_module: "cost_management",
        relationship_type: "one_to_one",
        trigger_events: &["sov_progress_updated"],
        automated_actions: &["update_g702_g703", "calculate_retainage"],
    },
    Relationship {
        name: "safety_to_field",
        trigger_module: "safety",
        target_module: "field_operations",
        relationship_type: "many_to_one",
        trigger_events: &["incident_logged"],
        automated_actions: &["update_daily_report", "notify_supervisor"],
    },
];

#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct WorkflowStatus {
    total_executions: usize,
    successful: usize,
    failed: usize,
    success_rate: f64,
}

impl WorkflowStatus {
    pub fn from_entries(entries: &[RecordDao]) -> Self {
        let successful = entries
            .iter()
            .filter(|e| e.get("success") == Some(&Value::Bool(true)))
            .count();
        let total = entries.len();
        Self {
            total_executions: total,
            successful,
            failed: total - successful,
            success_rate: if total == 0 {
                0.0
            } else {
                successful as f64 / total as f64 * 100.0
            },
        }
    }

    pub fn total_executions(&self) -> &usize {
        &self.total_executions
    }

    pub fn successful(&self) -> &usize {
        &self.successful
    }

    pub fn failed(&self) -> &usize {
        &self.failed
    }

    pub fn success_rate(&self) -> &f64 {
        &self.success_rate
    }
}

pub fn log_collection() -> CollectionDao {
    CollectionDao::new(
        "workflow_log",
        "relationships",
        "workflow_log",
        "timestamp",
        &[
            ("workflow".to_owned(), FieldKind::Text),
            ("event".to_owned(), FieldKind::Text),
            ("success".to_owned(), FieldKind::Boolean),
        ],
    )
}

/// Runs every relationship listening for `event` from `trigger_module`
/// and appends one log entry per run. Returns the names that ran.
pub async fn trigger(db: &Db, trigger_module: &str, event: &str, data: &RecordDao) -> Vec<String> {
    let fired = RELATIONSHIPS
        .iter()
        .filter(|r| r.fires_on(trigger_module, event))
        .collect::<Vec<_>>();
    if fired.is_empty() {
        return Vec::new();
    }

    let collection = log_collection();
    let mut entries = collection.db_select(db).await;
    let mut executed = Vec::with_capacity(fired.len());
    for relationship in fired {
        for action in relationship.automated_actions() {
            gp_log::info(
                Some("🔗"),
                &format!(
                    "[Workflow] {} -> {}: {action}",
                    relationship.name(),
                    relationship.target_module()
                ),
            );
        }
        entries.push(log_entry(relationship.name(), event, data, true));
        executed.push(relationship.name().to_owned());
    }

    if entries.len() > LOG_CAPACITY {
        entries.drain(..entries.len() - LOG_CAPACITY);
    }
    if let Err(err) = collection.db_replace(db, &entries).await {
        gp_log::warn(None, &format!("[Workflow] Writing execution log failed: {err}"));
    }
    executed
}

/// Fires the module's create hook, if any.
pub async fn fire_created(db: &Db, module: &ModuleConfig, record: &RecordDao) -> Vec<String> {
    match module.workflow() {
        Some(hooks) => match hooks.on_create() {
            Some(event) => trigger(db, hooks.trigger_module(), event, record).await,
            None => Vec::new(),
        },
        None => Vec::new(),
    }
}

/// Fires the module's update hook and, when the status field moved to a
/// hooked value, that status hook.
pub async fn fire_updated(
    db: &Db,
    module: &ModuleConfig,
    previous_status: Option<&Value>,
    record: &RecordDao,
) -> Vec<String> {
    let hooks = match module.workflow() {
        Some(hooks) => hooks,
        None => return Vec::new(),
    };
    let mut executed = Vec::new();
    if let Some(event) = hooks.on_update() {
        executed.extend(trigger(db, hooks.trigger_module(), event, record).await);
    }
    let status = module
        .status_field()
        .as_deref()
        .and_then(|field| record.get(field));
    if let Some(Value::String(status)) = status {
        if previous_status != Some(&Value::String(status.to_owned())) {
            if let Some(event) = hooks.on_status(status) {
                executed.extend(trigger(db, hooks.trigger_module(), event, record).await);
            }
        }
    }
    executed
}

pub async fn status(db: &Db) -> WorkflowStatus {
    WorkflowStatus::from_entries(&log_collection().db_select(db).await)
}

fn log_entry(workflow: &str, event: &str, data: &RecordDao, success: bool) -> RecordDao {
    let mut entry = Map::with_capacity(5);
    entry.insert("timestamp".to_owned(), Value::String(record::now_timestamp()));
    entry.insert("workflow".to_owned(), Value::String(workflow.to_owned()));
    entry.insert("event".to_owned(), Value::String(event.to_owned()));
    entry.insert("success".to_owned(), Value::Bool(success));
    entry.insert(
        "data_keys".to_owned(),
        Value::Array(data.keys().map(|k| Value::String(k.to_owned())).collect()),
    );
    RecordDao::new(entry)
}
