use serde::Deserialize;

#[derive(Deserialize)]
pub struct AppConfig {
    mode: AppConfigMode,
    #[serde(default = "default_project_name")]
    project_name: String,
}

impl AppConfig {
    pub fn mode(&self) -> &AppConfigMode {
        &self.mode
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }
}

fn default_project_name() -> String {
    "Highland Tower Development".to_owned()
}

#[derive(Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum AppConfigMode {
    Development,
    Production,
}
