use std::collections::HashMap;

/// Content type used when nothing more specific is known
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Maps document names to content types.
///
/// Lookup order: configured overrides, the `mime_guess` table, then the
/// configured default. Extensions are matched case-insensitively.
#[derive(Debug, Clone)]
pub struct ContentTypeResolver {
    default_type: String,
    overrides: HashMap<String, String>,
}

impl ContentTypeResolver {
    pub fn new() -> Self {
        Self {
            default_type: DEFAULT_CONTENT_TYPE.to_string(),
            overrides: HashMap::new(),
        }
    }

    pub fn with_default(mut self, default_type: impl Into<String>) -> Self {
        self.default_type = default_type.into();
        self
    }

    /// Register an override; `ext` may be given with or without the leading dot
    pub fn with_override(mut self, ext: &str, content_type: impl Into<String>) -> Self {
        self.overrides
            .insert(normalize_extension(ext), content_type.into());
        self
    }

    pub fn with_overrides<'a, I>(self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        overrides
            .into_iter()
            .fold(self, |resolver, (ext, content_type)| {
                resolver.with_override(ext, content_type.clone())
            })
    }

    pub fn default_type(&self) -> &str {
        &self.default_type
    }

    /// Content type for a file name or relative path
    pub fn resolve(&self, file_name: &str) -> String {
        match file_extension(file_name) {
            Some(ext) => self.resolve_extension(ext),
            None => self.default_type.clone(),
        }
    }

    /// Content type for an extension such as `.md` or `MD`
    pub fn resolve_extension(&self, ext: &str) -> String {
        let key = normalize_extension(ext);
        if let Some(content_type) = self.overrides.get(&key) {
            return content_type.clone();
        }

        mime_guess::from_ext(key.trim_start_matches('.'))
            .first()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_else(|| self.default_type.clone())
    }
}

impl Default for ContentTypeResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase with a single leading dot
fn normalize_extension(ext: &str) -> String {
    format!(".{}", ext.trim().trim_start_matches('.').to_lowercase())
}

fn file_extension(file_name: &str) -> Option<&str> {
    let name = file_name.rsplit(['/', '\\']).next()?;
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        None
    } else {
        Some(ext)
    }
}
