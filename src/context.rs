//! Shared state for report calls.

use crate::config::ReportConfig;
use nuzum_fonts::{FontOptions, FontRegistry, register_once};
use nuzum_render_html::HtmlToPdf;
use nuzum_resource::FilesystemResourceProvider;
use nuzum_templates::RenderEnv;
use nuzum_traits::{CancellationToken, Clock, ResourceProvider, SystemClock};
use std::sync::Arc;

/// Everything the report functions need besides the entity. `Send + Sync`;
/// share one behind an `Arc` across threads.
#[derive(Debug, Clone)]
pub struct ReportContext {
    config: ReportConfig,
    env: RenderEnv,
}

impl ReportContext {
    /// Resolves the process-wide font registry and a filesystem asset
    /// provider rooted at `assets_root`.
    pub fn new(config: ReportConfig) -> Self {
        Self::builder(config).build()
    }

    pub fn builder(config: ReportConfig) -> ReportContextBuilder {
        ReportContextBuilder {
            config,
            clock: None,
            resources: None,
            fonts: None,
            cancel: None,
            html_converter: None,
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn fonts(&self) -> &FontRegistry {
        &self.env.fonts
    }

    /// Token checked between report sections. Cancelling it makes the
    /// in-flight and later calls on this context return `Cancelled`.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.env.cancel
    }

    pub(crate) fn env(&self) -> &RenderEnv {
        &self.env
    }
}

/// Injects collaborators that [`ReportContext::new`] would otherwise create.
pub struct ReportContextBuilder {
    config: ReportConfig,
    clock: Option<Arc<dyn Clock>>,
    resources: Option<Arc<dyn ResourceProvider>>,
    fonts: Option<Arc<FontRegistry>>,
    cancel: Option<CancellationToken>,
    html_converter: Option<Arc<dyn HtmlToPdf>>,
}

impl ReportContextBuilder {
    /// Source of footer timestamps and "today".
    pub fn timestamp_provider(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn resources(mut self, resources: Arc<dyn ResourceProvider>) -> Self {
        self.resources = Some(resources);
        self
    }

    /// A private registry instead of the process-wide one.
    pub fn fonts(mut self, fonts: Arc<FontRegistry>) -> Self {
        self.fonts = Some(fonts);
        self
    }

    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Enables the HTML adapter for reports that have an HTML layout.
    pub fn html_converter(mut self, converter: Arc<dyn HtmlToPdf>) -> Self {
        self.html_converter = Some(converter);
        self
    }

    pub fn build(self) -> ReportContext {
        let config = self.config;
        let fonts = self.fonts.unwrap_or_else(|| {
            let options = FontOptions {
                preferred_font: config.preferred_font.clone(),
                system_fonts: config.system_fonts,
            };
            register_once(&config.fonts_dir, &options)
        });
        let resources = self.resources.unwrap_or_else(|| {
            let provider = FilesystemResourceProvider::new(&config.assets_root);
            let provider = match &config.logo_path {
                Some(logo) => provider.with_cached(logo.clone()),
                None => provider,
            };
            Arc::new(provider)
        });

        let mut env = RenderEnv::new(fonts);
        env.resources = resources;
        env.clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        env.cancel = self.cancel.unwrap_or_default();
        env.page_size = config.page_size;
        env.date_format = config.locale.date_format.clone();
        env.emergency_mode = config.emergency_mode;
        env.logo_path = config.logo_path.clone();
        env.html_converter = self.html_converter;

        log::debug!("Report context ready: {:?}", env);
        ReportContext { config, env }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nuzum_traits::{FixedClock, InMemoryResourceProvider};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn context_is_shareable() {
        assert_send_sync::<ReportContext>();
    }

    #[test]
    fn builder_injects_collaborators() {
        let clock = FixedClock::on(2025, 1, 20).unwrap();
        let token = CancellationToken::new();
        let config = ReportConfig { emergency_mode: true, ..Default::default() };
        let ctx = ReportContext::builder(config)
            .fonts(Arc::new(FontRegistry::degraded()))
            .resources(Arc::new(InMemoryResourceProvider::new()))
            .timestamp_provider(Arc::new(clock))
            .cancellation(token.clone())
            .build();

        assert!(ctx.fonts().is_degraded());
        assert!(ctx.env().emergency_mode);
        assert_eq!(ctx.env().timestamp(), "2025-01-20 12:00");
        assert_eq!(ctx.env().resources.name(), "InMemoryResourceProvider");
        token.cancel();
        assert!(ctx.cancellation().is_cancelled());
    }

    #[test]
    fn default_resources_are_rooted_at_assets() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig { assets_root: dir.path().to_path_buf(), ..Default::default() };
        let ctx = ReportContext::builder(config).fonts(Arc::new(FontRegistry::degraded())).build();
        assert_eq!(ctx.env().resources.base_path(), dir.path().to_str());
        assert_eq!(ctx.env().logo_path.as_deref(), Some("images/logo.png"));
    }
}
