use helm2bundle_core::BuildConfig;

/// Generates the Dockerfile that packages a chart archive into a bundle image.
pub struct DockerfileGenerator<'a> {
    config: &'a BuildConfig,
    archive_file_name: &'a str,
}

impl<'a> DockerfileGenerator<'a> {
    pub fn new(config: &'a BuildConfig, archive_file_name: &'a str) -> Self {
        Self {
            config,
            archive_file_name,
        }
    }

    /// The `com.redhat.apb.spec` label is left empty; bundle tooling fills it
    /// with the encoded `apb.yml` at image build time.
    pub fn render(&self) -> String {
        format!(
            r#"FROM {base}

LABEL "com.redhat.apb.spec"=\
""

COPY {archive} {chart_path}

ENTRYPOINT ["{entrypoint}"]
"#,
            base = self.config.base_image,
            archive = self.archive_file_name,
            chart_path = self.config.chart_path,
            entrypoint = self.config.entrypoint,
        )
    }
}
