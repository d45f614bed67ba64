use serde::Serialize;

/// Branding values written over the stock os-release identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Branding {
    pub name: String,
    pub pretty_name: String,
    pub variant: String,
    pub variant_id: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            name: "Nostalgia OS".to_string(),
            pretty_name: "Nostalgia OS 42".to_string(),
            variant: "Nostalgia CRT (KDE)".to_string(),
            variant_id: "nostalgia-crt".to_string(),
        }
    }
}

impl Branding {
    /// Returns the replacement for an os-release key, if it is one we own.
    ///
    /// Matching is exact: no trimming, no case folding.
    pub fn replacement(&self, key: &str) -> Option<&str> {
        match key {
            "NAME" => Some(&self.name),
            "PRETTY_NAME" => Some(&self.pretty_name),
            "VARIANT" => Some(&self.variant),
            "VARIANT_ID" => Some(&self.variant_id),
            _ => None,
        }
    }
}
