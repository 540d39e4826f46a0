/// Runtime settings read from the environment (and `.env` via dotenv)

use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Fixed name the generated design is saved under
pub const DOWNLOAD_FILE_NAME: &str = "festoscape-design.png";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Gemini API key; generation fails cleanly when absent
    pub api_key: Option<String>,
    pub api_base: String,
    pub image_model: String,
    pub download_dir: PathBuf,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY"));
        let api_base = non_empty("GEMINI_API_BASE")
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let image_model =
            non_empty("GEMINI_IMAGE_MODEL").unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string());
        let download_dir = non_empty("FESTOSCAPE_DOWNLOAD_DIR")
            .map(PathBuf::from)
            .or_else(dirs::download_dir)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            api_key,
            api_base,
            image_model,
            download_dir,
        }
    }

    /// Where "Download Design" writes the PNG
    pub fn download_path(&self) -> PathBuf {
        self.download_dir.join(DOWNLOAD_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings(&[]);
        assert_eq!(settings.api_key, None);
        assert_eq!(settings.api_base, DEFAULT_API_BASE);
        assert_eq!(settings.image_model, DEFAULT_IMAGE_MODEL);
    }

    #[test]
    fn test_api_key_fallback() {
        assert_eq!(settings(&[("API_KEY", "abc")]).api_key.as_deref(), Some("abc"));
        assert_eq!(
            settings(&[("API_KEY", "abc"), ("GEMINI_API_KEY", "xyz")]).api_key.as_deref(),
            Some("xyz")
        );
        assert_eq!(settings(&[("GEMINI_API_KEY", "  ")]).api_key, None);
    }

    #[test]
    fn test_overrides() {
        let settings = settings(&[
            ("GEMINI_API_BASE", "http://localhost:9000/v1beta/"),
            ("GEMINI_IMAGE_MODEL", "gemini-2.5-flash-image-preview"),
            ("FESTOSCAPE_DOWNLOAD_DIR", "/tmp/designs"),
        ]);
        assert_eq!(settings.api_base, "http://localhost:9000/v1beta");
        assert_eq!(settings.image_model, "gemini-2.5-flash-image-preview");
        assert_eq!(
            settings.download_path(),
            PathBuf::from("/tmp/designs/festoscape-design.png")
        );
    }
}
