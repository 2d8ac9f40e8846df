use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::application::ports::{ExpectedTextError, ExpectedTextResolver};

/// In-memory lookup by path, for tests and manifest-driven runs.
#[derive(Debug, Clone, Default)]
pub struct StaticExpectedTextResolver {
    texts: HashMap<PathBuf, String>,
}

impl StaticExpectedTextResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.texts.insert(path.into(), text.into());
        self
    }
}

impl ExpectedTextResolver for StaticExpectedTextResolver {
    fn resolve(
        &self,
        audio_path: &Path,
        _preferred_key: Option<&str>,
    ) -> Result<Option<String>, ExpectedTextError> {
        Ok(self.texts.get(audio_path).cloned())
    }
}
