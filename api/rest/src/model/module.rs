use serde::Deserialize;

#[derive(Deserialize)]
pub struct FindOneModuleReqPath {
    module: String,
}

impl FindOneModuleReqPath {
    pub fn module(&self) -> &str {
        &self.module
    }
}
