use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub sqlite_path: String,
    pub database_url: Option<String>,
    pub upload_storage_path: String,
    pub file_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let sqlite_path = var("SQLITE_PATH")
            .unwrap_or_else(|| "./data/workshare.sqlite".to_string());
        let database_url = var("DATABASE_URL").filter(|v| !v.trim().is_empty());

        let upload_storage_path = var("UPLOAD_STORAGE_PATH")
            .unwrap_or_else(|| "./uploads".to_string());

        let file_base_url = var("FILE_BASE_URL")
            .unwrap_or_else(|| "http://localhost:8080".to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            sqlite_path,
            database_url,
            upload_storage_path,
            file_base_url,
        }
    }

    pub fn database_url(&self) -> String {
        if let Some(url) = &self.database_url {
            return url.clone();
        }

        let path = self.sqlite_path.trim();
        if path.starts_with("sqlite:") || path.starts_with("file:") {
            return path.to_string();
        }
        format!("sqlite://{}", path)
    }

    pub fn upload_storage_path(&self) -> String {
        self.upload_storage_path.clone()
    }

    pub fn is_sqlite(&self) -> bool {
        let url = self.database_url();
        url.starts_with("sqlite:") || url.starts_with("file:")
    }
}
