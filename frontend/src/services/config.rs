use catalog_core::CatalogConfig;

const BUNDLED_CONFIG: &str = include_str!("../../catalog.yaml");

/// Catalog settings bundled at build time; falls back to defaults when the
/// bundled file does not validate
pub fn load_config() -> CatalogConfig {
    match CatalogConfig::from_yaml_str(BUNDLED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("⚠️ Bundled catalog config rejected, using defaults: {}", e);
            CatalogConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_bundled_config_is_valid() {
        assert!(CatalogConfig::from_yaml_str(BUNDLED_CONFIG).is_ok());
    }
}
