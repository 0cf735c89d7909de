use std::fs;

pub fn get() -> String {
    let config_path = match std::env::var("GP_CONFIG_PATH") {
        Ok(path) => path,
        Err(_) => "config.yml".to_owned(),
    };

    if fs::metadata(&config_path).is_err() {
        gp_log::panic(
            None,
            format!("[gcPanel] Config file '{config_path}' from GP_CONFIG_PATH or the current directory must exist"),
        )
    }

    config_path
}
