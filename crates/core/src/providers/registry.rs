use std::collections::HashMap;

use crate::models::settings::GEMINI_KEY;

use super::gemini::GeminiProvider;
use super::traits::InsightsProvider;

/// Ordered list of configured insight providers.
///
/// The first entry is tried first; later ones are fallbacks.
pub struct InsightsProviderRegistry {
    providers: Vec<Box<dyn InsightsProvider>>,
}

impl InsightsProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a registry with every provider whose API key is present.
    pub fn new_with_defaults(api_keys: &HashMap<String, String>) -> Self {
        let mut registry = Self::new();

        // Gemini: requires API key
        if let Some(key) = api_keys.get(GEMINI_KEY).filter(|k| !k.trim().is_empty()) {
            registry.register(Box::new(GeminiProvider::new(key.clone())));
        }

        registry
    }

    pub fn register(&mut self, provider: Box<dyn InsightsProvider>) {
        self.providers.push(provider);
    }

    pub fn providers(&self) -> impl Iterator<Item = &dyn InsightsProvider> {
        self.providers.iter().map(|p| p.as_ref())
    }

    pub fn names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for InsightsProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
