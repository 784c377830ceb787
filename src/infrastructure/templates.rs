// SQL template store - built-in templates with optional on-disk overrides
use crate::application::template_store::{TemplateKey, TemplateStore};
use anyhow::Context;
use std::collections::HashMap;
use std::path::Path;

const LINE_BAR_SQL: &str = include_str!("../../sql/line_bar.sql");
const PIE_SQL: &str = include_str!("../../sql/pie.sql");

#[derive(Debug, Clone)]
pub struct SqlTemplateStore {
    templates: HashMap<TemplateKey, String>,
}

impl SqlTemplateStore {
    pub fn builtin() -> Self {
        let templates = HashMap::from([
            (TemplateKey::LineBar, LINE_BAR_SQL.to_string()),
            (TemplateKey::Pie, PIE_SQL.to_string()),
        ]);
        Self { templates }
    }

    /// Built-in templates, replaced by `<dir>/<name>.sql` where such a file exists
    pub fn load(dir: Option<&str>) -> anyhow::Result<Self> {
        let mut store = Self::builtin();
        let Some(dir) = dir else {
            return Ok(store);
        };

        for key in TemplateKey::ALL {
            let path = Path::new(dir).join(format!("{}.sql", key.name()));
            if !path.exists() {
                continue;
            }
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read template {}", path.display()))?;
            tracing::info!("Loaded {} template from {}", key.name(), path.display());
            store.templates.insert(key, text);
        }

        Ok(store)
    }
}

impl TemplateStore for SqlTemplateStore {
    fn template(&self, key: TemplateKey) -> Option<&str> {
        self.templates.get(&key).map(String::as_str)
    }
}
