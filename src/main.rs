use anyhow::Context;
use verso_kernel::Settings;

/// Bootstrap entry: run every registered suite with defaults. The `verso`
/// binary in `crates/cli` is the parameterized surface.
fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load VERSO settings")?;
    verso_telemetry::init(settings.telemetry.log_format);

    tracing::info!(
        base_url = %settings.api.base_url,
        threads = settings.runner.threads,
        "verso-app bootstrap starting"
    );

    let report = verso_app::run(settings, verso_app::RunOptions::default())?;
    print!("{}", report.render_text());

    if !report.summary.success() {
        std::process::exit(1);
    }
    Ok(())
}
