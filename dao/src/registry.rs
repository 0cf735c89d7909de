use crate::{
    id::IdFormat,
    module::{FieldSpec, ModuleConfig, WorkflowHooks},
    sort::SortSpec,
    value::FieldKind,
};

/// Ordered set of modules served by the application.
pub struct ModuleRegistry {
    modules: Vec<ModuleConfig>,
}

impl ModuleRegistry {
    pub fn new(modules: Vec<ModuleConfig>) -> Self {
        Self { modules }
    }

    pub fn modules(&self) -> &Vec<ModuleConfig> {
        &self.modules
    }

    pub fn get(&self, key: &str) -> Option<&ModuleConfig> {
        self.modules.iter().find(|m| m.key() == key)
    }

    pub fn builtin() -> Self {
        Self::new(vec![
            rfis(),
            submittal_packages(),
            transmittals(),
            change_orders(),
            proposals(),
            tm_tickets(),
            budget_items(),
            invoices(),
            aia_billing(),
            owner_contracts(),
            subcontracts(),
            safety_incidents(),
            safety_inspections(),
            hazards(),
            daily_reports(),
            field_issues(),
            closeout_items(),
            equipment(),
            labor_rates(),
            material_rates(),
            equipment_rates(),
        ])
    }
}

fn field(name: &str, label: &str, kind: FieldKind) -> FieldSpec {
    FieldSpec::new(name, label, &kind)
}

fn status(options: &[&str]) -> FieldSpec {
    field("status", "Status", FieldKind::Select).with_options(options)
}

fn rfis() -> ModuleConfig {
    let statuses = ["Draft", "Submitted", "Under Review", "Answered", "Closed", "Overdue"];
    ModuleConfig::new(
        "rfis",
        "RFIs",
        "engineering",
        "rfis",
        "rfi_number",
        &IdFormat::new("RFI-2025-", &3),
    )
    .with_list_columns(&["rfi_number", "title", "priority", "status", "assigned_to", "due_date"])
    .with_default_sort(SortSpec::desc("submitted_date"))
    .with_status("status", &statuses)
    .with_fields(vec![
        field("rfi_number", "RFI Number", FieldKind::Text),
        field("title", "Subject", FieldKind::Text).required(),
        field("description", "Description", FieldKind::Textarea).required(),
        field("question", "Question", FieldKind::Textarea),
        field("category", "Category", FieldKind::Select).with_options(&[
            "Design Clarification",
            "Specification Question",
            "Coordination Issue",
            "Material Substitution",
            "Construction Method",
            "Schedule Impact",
            "Cost Impact",
            "Safety Concern",
        ]),
        field("priority", "Priority", FieldKind::Select)
            .with_options(&["Low", "Medium", "High", "Critical"]),
        status(&statuses),
        field("location", "Location", FieldKind::Text),
        field("drawing_references", "Drawing References", FieldKind::Multiselect),
        field("submitted_by", "Submitted By", FieldKind::Text),
        field("assigned_to", "Assigned To", FieldKind::Text),
        field("submitted_date", "Submitted Date", FieldKind::Date),
        field("due_date", "Due Date", FieldKind::Date),
        field("cost_impact", "Cost Impact", FieldKind::Text),
        field("schedule_impact", "Schedule Impact", FieldKind::Text),
    ])
}

fn submittal_packages() -> ModuleConfig {
    let statuses = [
        "Draft",
        "Submitted",
        "Approved",
        "Approved as Noted",
        "Revise and Resubmit",
        "Rejected",
    ];
    ModuleConfig::new(
        "submittal_packages",
        "Submittal Packages",
        "engineering",
        "submittal_packages",
        "submittal_id",
        &IdFormat::new("SUB-", &3),
    )
    .with_list_columns(&["submittal_id", "title", "spec_section", "subcontractor", "status", "due_date"])
    .with_default_sort(SortSpec::desc("submittal_id"))
    .with_status("status", &statuses)
    .with_fields(vec![
        field("submittal_id", "Submittal ID", FieldKind::Text),
        field("title", "Title", FieldKind::Text).required(),
        field("spec_section", "Spec Section", FieldKind::Text).required(),
        field("subcontractor", "Subcontractor", FieldKind::Text),
        field("description", "Description", FieldKind::Textarea),
        status(&statuses),
        field("submitted_date", "Submitted Date", FieldKind::Date),
        field("due_date", "Due Date", FieldKind::Date),
    ])
}

fn transmittals() -> ModuleConfig {
    let statuses = ["Draft", "Sent", "Delivered", "Acknowledged", "Returned"];
    ModuleConfig::new(
        "transmittals",
        "Transmittals",
        "engineering",
        "transmittals",
        "transmittal_id",
        &IdFormat::new("TRN-", &3),
    )
    .with_list_columns(&["transmittal_id", "date_sent", "recipient", "subject", "status"])
    .with_default_sort(SortSpec::desc("date_sent"))
    .with_status("status", &statuses)
    .with_fields(vec![
        field("transmittal_id", "Transmittal ID", FieldKind::Text),
        field("subject", "Subject", FieldKind::Text).required(),
        field("recipient", "Recipient", FieldKind::Text).required(),
        field("date_sent", "Date Sent", FieldKind::Date),
        field("items", "Items", FieldKind::Textarea),
        status(&statuses),
    ])
}

fn change_orders() -> ModuleConfig {
    let statuses = ["Draft", "Pending Approval", "Approved", "Rejected"];
    ModuleConfig::new(
        "change_orders",
        "Change Orders",
        "cost_management",
        "change_orders",
        "co_id",
        &IdFormat::new("CO-", &3),
    )
    .with_list_columns(&["co_id", "title", "company_name", "total_amount", "submission_date", "status"])
    .with_default_sort(SortSpec::desc("submission_date"))
    .with_status("status", &statuses)
    .with_fields(vec![
        field("co_id", "Change Order ID", FieldKind::Text),
        field("title", "Title", FieldKind::Text).required(),
        field("company_name", "Company", FieldKind::Text).required(),
        field("description", "Description", FieldKind::Textarea),
        field("justification", "Justification", FieldKind::Textarea),
        field("total_amount", "Total Amount", FieldKind::Number),
        field("schedule_impact_days", "Schedule Impact (days)", FieldKind::Integer),
        field("submission_date", "Submission Date", FieldKind::Date),
        status(&statuses),
    ])
    .with_workflow(
        WorkflowHooks::new("contracts").with_on_status("Approved", "change_order_approved"),
    )
}

fn proposals() -> ModuleConfig {
    let statuses = ["Draft", "Submitted", "In Review", "Approved", "Rejected"];
    ModuleConfig::new(
        "proposals",
        "Proposals",
        "cost_management",
        "proposals",
        "proposal_id",
        &IdFormat::new("P-", &3),
    )
    .with_list_columns(&["proposal_id", "title", "company_name", "total_amount", "submission_date", "status"])
    .with_default_sort(SortSpec::desc("submission_date"))
    .with_status("status", &statuses)
    .with_fields(vec![
        field("proposal_id", "Proposal ID", FieldKind::Text),
        field("title", "Title", FieldKind::Text).required(),
        field("company_name", "Company", FieldKind::Text).required(),
        field("description", "Description", FieldKind::Textarea),
        field("total_amount", "Total Amount", FieldKind::Number),
        field("submission_date", "Submission Date", FieldKind::Date),
        status(&statuses),
    ])
}

fn tm_tickets() -> ModuleConfig {
    let statuses = ["Open", "Reviewed", "Approved", "Rejected", "Invoiced"];
    ModuleConfig::new(
        "tm_tickets",
        "T&M Tickets",
        "cost_management",
        "tm_tickets",
        "ticket_id",
        &IdFormat::new("TM-", &3),
    )
    .with_list_columns(&["ticket_id", "description", "company_name", "work_date", "total_amount", "status"])
    .with_default_sort(SortSpec::desc("work_date"))
    .with_status("status", &statuses)
    .with_fields(vec![
        field("ticket_id", "Ticket ID", FieldKind::Text),
        field("description", "Description", FieldKind::Textarea).required(),
        field("company_name", "Company", FieldKind::Text).required(),
        field("work_type", "Work Type", FieldKind::Select).with_options(&[
            "Emergency Repair",
            "Requested Additional Work",
            "Unforeseen Condition",
            "Site Condition",
        ]),
        field("location", "Location", FieldKind::Text),
        field("work_date", "Work Date", FieldKind::Date),
        field("total_amount", "Total Amount", FieldKind::Number),
        status(&statuses),
    ])
}

fn budget_items() -> ModuleConfig {
    let statuses = ["Active", "Pending", "Complete", "Over Budget", "Under Budget"];
    ModuleConfig::new(
        "budget_items",
        "Budget Items",
        "cost_management",
        "budget_items",
        "budget_item_id",
        &IdFormat::new("BI-", &3),
    )
    .with_list_columns(&[
        "budget_item_id",
        "description",
        "cost_code",
        "budgeted_amount",
        "actual_amount",
        "status",
    ])
    .with_default_sort(SortSpec::asc("budget_item_id"))
    .with_status("status", &statuses)
    .with_fields(vec![
        field("budget_item_id", "Budget Item ID", FieldKind::Text),
        field("description", "Description", FieldKind::Text).required(),
        field("cost_code", "Cost Code", FieldKind::Text).required(),
        field("budgeted_amount", "Budgeted Amount", FieldKind::Number),
        field("actual_amount", "Actual Amount", FieldKind::Number),
        status(&statuses),
    ])
}

fn invoices() -> ModuleConfig {
    let statuses = ["Draft", "Submitted", "Approved", "Paid", "Rejected"];
    ModuleConfig::new(
        "invoices",
        "Invoices",
        "cost_management",
        "invoices",
        "invoice_id",
        &IdFormat::new("INV-", &3),
    )
    .with_list_columns(&["invoice_id", "vendor", "amount", "invoice_date", "due_date", "status"])
    .with_default_sort(SortSpec::desc("invoice_date"))
    .with_status("status", &statuses)
    .with_fields(vec![
        field("invoice_id", "Invoice ID", FieldKind::Text),
        field("vendor", "Vendor", FieldKind::Text).required(),
        field("amount", "Amount", FieldKind::Number).required(),
        field("invoice_date", "Invoice Date", FieldKind::Date),
        field("due_date", "Due Date", FieldKind::Date),
        status(&statuses),
    ])
}

fn aia_billing() -> ModuleConfig {
    let statuses = ["Draft", "Submitted", "Approved", "Paid"];
    ModuleConfig::new(
        "aia_billing",
        "AIA Billing",
        "cost_management",
        "aia_billing",
        "payment_app_id",
        &IdFormat::new("PA-", &3),
    )
    .with_list_columns(&["payment_app_id", "period_to", "total_completed", "payment_due", "status"])
    .with_default_sort(SortSpec::desc("period_to"))
    .with_status("status", &statuses)
    .with_fields(vec![
        field("payment_app_id", "Payment Application", FieldKind::Text),
        field("period_to", "Period To", FieldKind::Date).required(),
        field("total_completed", "Total Completed", FieldKind::Number),
        field("retainage", "Retainage", FieldKind::Number),
        field("payment_due", "Payment Due", FieldKind::Number),
        status(&statuses),
    ])
    .with_workflow(
        WorkflowHooks::new("cost_management")
            .with_on_create("sov_progress_updated")
            .with_on_update("sov_progress_updated"),
    )
}

fn owner_contracts() -> ModuleConfig {
    let statuses = ["Draft", "Issued", "Executed", "Active", "Complete", "Terminated"];
    ModuleConfig::new(
        "owner_contracts",
        "Owner Contracts",
        "contracts",
        "owner_contracts",
        "contract_id",
        &IdFormat::new("OC-", &3),
    )
    .with_list_columns(&["contract_id", "title", "type", "value", "execution_date", "status"])
    .with_default_sort(SortSpec::asc("contract_id"))
    .with_status("status", &statuses)
    .with_fields(vec![
        field("contract_id", "Contract ID", FieldKind::Text),
        field("title", "Title", FieldKind::Text).required(),
        field("type", "Type", FieldKind::Select).with_options(&[
            "Lump Sum",
            "GMP",
            "Cost Plus",
            "Unit Price",
        ]),
        field("value", "Value", FieldKind::Number).required(),
        field("execution_date", "Execution Date", FieldKind::Date),
        status(&statuses),
    ])
    .with_workflow(
        WorkflowHooks::new("contracts")
            .with_on_create("contract_created")
            .with_on_update("contract_modified"),
    )
}

fn subcontracts() -> ModuleConfig {
    let statuses = ["Draft", "Issued", "Executed", "In Progress", "Complete", "Terminated"];
    ModuleConfig::new(
        "subcontracts",
        "Subcontracts",
        "contracts",
        "subcontracts",
        "id",
        &IdFormat::new("SC-", &3),
    )
    .with_list_columns(&["id", "company", "scope", "amount", "date", "status"])
    .with_default_sort(SortSpec::asc("id"))
    .with_status("status", &statuses)
    .with_fields(vec![
        field("id", "Subcontract ID", FieldKind::Text),
        field("company", "Company", FieldKind::Text).required(),
        field("scope", "Scope", FieldKind::Textarea).required(),
        field("amount", "Amount", FieldKind::Number),
        field("date", "Date", FieldKind::Date),
        status(&statuses),
    ])
}

fn safety_incidents() -> ModuleConfig {
    let statuses = ["Open", "Investigating", "Resolved", "Closed"];
    ModuleConfig::new(
        "safety_incidents",
        "Safety Incidents",
        "safety",
        "incidents",
        "incident_id",
        &IdFormat::new("INC-", &3),
    )
    .with_list_columns(&["incident_id", "incident_date", "location", "incident_type", "severity", "status"])
    .with_default_sort(SortSpec::desc("incident_date"))
    .with_status("status", &statuses)
    .with_fields(vec![
        field("incident_id", "Incident ID", FieldKind::Text),
        field("incident_date", "Incident Date", FieldKind::Date).required(),
        field("location", "Location", FieldKind::Text).required(),
        field("incident_type", "Incident Type", FieldKind::Select).with_options(&[
            "Near Miss",
            "First Aid",
            "Recordable",
            "Lost Time",
            "Property Damage",
        ]),
        field("severity", "Severity", FieldKind::Select)
            .with_options(&["Low", "Medium", "High", "Critical"]),
        field("description", "Description", FieldKind::Textarea).required(),
        field("osha_recordable", "OSHA Recordable", FieldKind::Boolean),
        status(&statuses),
    ])
    .with_workflow(WorkflowHooks::new("safety").with_on_create("incident_logged"))
}

fn safety_inspections() -> ModuleConfig {
    let statuses = ["Scheduled", "In Progress", "Complete", "Pending Review", "Rework Required"];
    ModuleConfig::new(
        "safety_inspections",
        "Safety Inspections",
        "safety",
        "inspections",
        "inspection_id",
        &IdFormat::new("INSP-", &3),
    )
    .with_list_columns(&[
        "inspection_id",
        "inspection_date",
        "inspection_type",
        "location",
        "inspector",
        "status",
    ])
    .with_default_sort(SortSpec::desc("inspection_date"))
    .with_status("status", &statuses)
    .with_fields(vec![
        field("inspection_id", "Inspection ID", FieldKind::Text),
        field("inspection_date", "Inspection Date", FieldKind::Date).required(),
        field("inspection_type", "Inspection Type", FieldKind::Text).required(),
        field("location", "Location", FieldKind::Text),
        field("inspector", "Inspector", FieldKind::Text),
        field("score", "Score", FieldKind::Integer),
        status(&statuses),
    ])
}

fn hazards() -> ModuleConfig {
    let statuses = ["Open", "Mitigated", "Closed", "In Progress"];
    ModuleConfig::new(
        "hazards",
        "Hazards",
        "safety",
        "hazards",
        "hazard_id",
        &IdFormat::new("HAZ-", &3),
    )
    .with_list_columns(&[
        "hazard_id",
        "identification_date",
        "hazard_type",
        "location",
        "severity",
        "status",
    ])
    .with_default_sort(SortSpec::desc("identification_date"))
    .with_status("status", &statuses)
    .with_fields(vec![
        field("hazard_id", "Hazard ID", FieldKind::Text),
        field("identification_date", "Identification Date", FieldKind::Date).required(),
        field("hazard_type", "Hazard Type", FieldKind::Text).required(),
        field("location", "Location", FieldKind::Text).required(),
        field("severity", "Severity", FieldKind::Select)
            .with_options(&["Low", "Medium", "High", "Critical"]),
        field("mitigation", "Mitigation", FieldKind::Textarea),
        status(&statuses),
    ])
}

fn daily_reports() -> ModuleConfig {
    ModuleConfig::new(
        "daily_reports",
        "Daily Reports",
        "field_operations",
        "daily_reports",
        "report_id",
        &IdFormat::new("DR-", &3),
    )
    .with_list_columns(&[
        "report_id",
        "report_date",
        "weather",
        "temperature",
        "work_completed",
        "submitted_by",
    ])
    .with_default_sort(SortSpec::desc("report_date"))
    .with_fields(vec![
        field("report_id", "Report ID", FieldKind::Text),
        field("report_date", "Report Date", FieldKind::Date).required(),
        field("weather", "Weather", FieldKind::Select).with_options(&[
            "Sunny",
            "Partly Cloudy",
            "Cloudy",
            "Rain",
            "Snow",
            "Windy",
        ]),
        field("temperature", "Temperature", FieldKind::Integer),
        field("work_completed", "Work Completed", FieldKind::Textarea).required(),
        field("crew_count", "Crew Count", FieldKind::Integer),
        field("submitted_by", "Submitted By", FieldKind::Text),
    ])
}

fn field_issues() -> ModuleConfig {
    let statuses = ["Open", "In Progress", "Resolved", "Closed", "Pending Review"];
    ModuleConfig::new(
        "field_issues",
        "Field Issues",
        "field_operations",
        "field_issues",
        "issue_id",
        &IdFormat::new("ISS-", &3),
    )
    .with_list_columns(&["issue_id", "title", "location", "priority", "status", "due_date"])
    .with_default_sort(SortSpec::asc("due_date"))
    .with_status("status", &statuses)
    .with_fields(vec![
        field("issue_id", "Issue ID", FieldKind::Text),
        field("title", "Title", FieldKind::Text).required(),
        field("location", "Location", FieldKind::Text).required(),
        field("priority", "Priority", FieldKind::Select)
            .with_options(&["Low", "Medium", "High", "Critical"]),
        field("assigned_to", "Assigned To", FieldKind::Text),
        field("due_date", "Due Date", FieldKind::Date),
        field("description", "Description", FieldKind::Textarea),
        status(&statuses),
    ])
}

fn closeout_items() -> ModuleConfig {
    let statuses = ["Not Started", "In Progress", "Submitted", "Approved", "Complete", "Overdue"];
    ModuleConfig::new(
        "closeout_items",
        "Closeout Items",
        "closeout",
        "closeout_items",
        "item_id",
        &IdFormat::new("CLO-", &3),
    )
    .with_list_columns(&["item_id", "category", "title", "responsible_party", "due_date", "status"])
    .with_default_sort(SortSpec::asc("due_date"))
    .with_status("status", &statuses)
    .with_fields(vec![
        field("item_id", "Item ID", FieldKind::Text),
        field("title", "Title", FieldKind::Text).required(),
        field("category", "Category", FieldKind::Select).with_options(&[
            "Warranty",
            "O&M Manual",
            "As-Built",
            "Punch List",
            "Training",
            "Attic Stock",
        ]),
        field("responsible_party", "Responsible Party", FieldKind::Text).required(),
        field("due_date", "Due Date", FieldKind::Date),
        status(&statuses),
    ])
}

fn equipment() -> ModuleConfig {
    let statuses = ["Active", "In Use", "Under Maintenance", "Out of Service", "Retired"];
    ModuleConfig::new(
        "equipment",
        "Equipment",
        "equipment",
        "inventory",
        "equipment_id",
        &IdFormat::new("EQ-", &4),
    )
    .with_list_columns(&[
        "equipment_id",
        "name",
        "category",
        "status",
        "location",
        "last_maintenance",
        "next_maintenance",
    ])
    .with_default_sort(SortSpec::asc("equipment_id"))
    .with_status("status", &statuses)
    .with_fields(vec![
        field("equipment_id", "Equipment ID", FieldKind::Text),
        field("name", "Name", FieldKind::Text).required(),
        field("category", "Category", FieldKind::Text).required(),
        field("location", "Location", FieldKind::Text),
        field("hours", "Operating Hours", FieldKind::Number),
        field("last_maintenance", "Last Maintenance", FieldKind::Date),
        field("next_maintenance", "Next Maintenance", FieldKind::Date),
        status(&statuses),
    ])
}

fn labor_rates() -> ModuleConfig {
    ModuleConfig::new(
        "labor_rates",
        "Labor Rates",
        "unit_prices",
        "labor_rates",
        "rate_id",
        &IdFormat::new("LR-", &3),
    )
    .with_list_columns(&["rate_id", "trade", "classification", "rate", "unit"])
    .with_default_sort(SortSpec::asc("trade"))
    .with_fields(vec![
        field("rate_id", "Rate ID", FieldKind::Text),
        field("trade", "Trade", FieldKind::Text).required(),
        field("classification", "Classification", FieldKind::Text).required(),
        field("rate", "Rate", FieldKind::Number).required(),
        field("unit", "Unit", FieldKind::Text),
    ])
}

fn material_rates() -> ModuleConfig {
    ModuleConfig::new(
        "material_rates",
        "Material Rates",
        "unit_prices",
        "material_rates",
        "rate_id",
        &IdFormat::new("MR-", &3),
    )
    .with_list_columns(&["rate_id", "material", "price", "unit"])
    .with_default_sort(SortSpec::asc("material"))
    .with_fields(vec![
        field("rate_id", "Rate ID", FieldKind::Text),
        field("material", "Material", FieldKind::Text).required(),
        field("price", "Price", FieldKind::Number).required(),
        field("unit", "Unit", FieldKind::Text),
    ])
}

fn equipment_rates() -> ModuleConfig {
    ModuleConfig::new(
        "equipment_rates",
        "Equipment Rates",
        "unit_prices",
        "equipment_rates",
        "rate_id",
        &IdFormat::new("ER-", &3),
    )
    .with_list_columns(&["rate_id", "equipment", "rate_type", "rate"])
    .with_default_sort(SortSpec::asc("equipment"))
    .with_fields(vec![
        field("rate_id", "Rate ID", FieldKind::Text),
        field("equipment", "Equipment", FieldKind::Text).required(),
        field("rate_type", "Rate Type", FieldKind::Select)
            .with_options(&["Hourly", "Daily", "Weekly", "Monthly"]),
        field("rate", "Rate", FieldKind::Number).required(),
    ])
}

#[cfg(test)]
mod tests {
    use ahash::{HashSet, HashSetExt};

    use super::*;

    #[test]
    fn builtin_modules_are_unique_and_ordered() {
        let registry = ModuleRegistry::builtin();
        assert_eq!(registry.modules().len(), 21);
        assert_eq!(registry.modules()[0].key(), "rfis");
        assert_eq!(registry.modules()[20].key(), "equipment_rates");

        let mut keys = HashSet::new();
        let mut files = HashSet::new();
        for module in registry.modules() {
            assert!(keys.insert(module.key().to_owned()));
            assert!(files.insert(format!("{}/{}", module.category(), module.file())));
        }
    }

    #[test]
    fn every_module_lists_its_id_and_has_a_form() {
        for module in ModuleRegistry::builtin().modules() {
            assert!(
                module.list_columns().iter().any(|c| c == module.id_field()),
                "{} does not list its id",
                module.key()
            );
            assert!(module.field(module.id_field()).is_some());
            assert!(!module.required_fields().is_empty());
            if let Some(status_field) = module.status_field() {
                let options = module.field(status_field).unwrap().options();
                assert_eq!(options, module.filter_options());
            }
        }
    }

    #[test]
    fn lookup_by_key() {
        let registry = ModuleRegistry::builtin();
        let equipment = registry.get("equipment").unwrap();
        assert_eq!(equipment.id_format().format(&7), "EQ-0007");
        assert!(registry.get("estimates").is_none());
    }
}
