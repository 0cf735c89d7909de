use serde::Deserialize;

#[derive(Deserialize)]
pub struct DbJsonConfig {
    path: String,
}

impl DbJsonConfig {
    pub fn path(&self) -> &str {
        &self.path
    }
}
