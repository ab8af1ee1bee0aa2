//! Encoder configuration.

/// Package name written when none is configured.
pub const DEFAULT_PACKAGE: &str = "config";

/// Configuration for the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Name in the `package` clause (default: config)
    pub package: String,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
        }
    }
}

impl EncoderConfig {
    /// Create a builder for configuration.
    pub fn builder() -> EncoderConfigBuilder {
        EncoderConfigBuilder::default()
    }
}

/// Builder for encoder configuration.
#[derive(Debug, Default)]
pub struct EncoderConfigBuilder {
    config: EncoderConfig,
}

impl EncoderConfigBuilder {
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.config.package = package.into();
        self
    }

    pub fn build(self) -> EncoderConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_package() {
        assert_eq!(EncoderConfig::default().package, "config");
        assert_eq!(EncoderConfig::builder().build(), EncoderConfig::default());
    }

    #[test]
    fn test_builder_sets_package() {
        let config = EncoderConfig::builder().package("settings").build();
        assert_eq!(config.package, "settings");
    }
}
