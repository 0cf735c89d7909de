use std::sync::Arc;

use gp_dao::{registry::ModuleRegistry, Db};

pub struct ApiRestCtx {
    dao: ApiRestDaoCtx,
    registry: ModuleRegistry,
    project_name: String,
}

impl ApiRestCtx {
    pub fn new(dao: ApiRestDaoCtx, registry: ModuleRegistry, project_name: &str) -> Self {
        Self {
            dao,
            registry,
            project_name: project_name.to_owned(),
        }
    }

    pub fn dao(&self) -> &ApiRestDaoCtx {
        &self.dao
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }
}

pub struct ApiRestDaoCtx {
    db: Arc<Db>,
}

impl ApiRestDaoCtx {
    pub fn new(db: Arc<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Db {
        &self.db
    }
}
