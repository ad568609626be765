use hitlens_api::{Backend, BackendAdapter, NativeBackend};
use hitlens_core::{Aggregator, AggregatorConfig, HitlensError, Result};
use hitlens_memory::{BackendFixture, MemoryBackend};
use std::path::Path;
use std::sync::Arc;

/// Assembles an aggregator over the given adapters.
///
/// Adapters are not initialized here; callers subscribe to lifecycle events
/// first and then call `init`.
pub fn build_aggregator(
    config: AggregatorConfig,
    native: Arc<dyn NativeBackend>,
    browser: Arc<dyn BackendAdapter>,
) -> Arc<Aggregator> {
    Arc::new(Aggregator::new(config, native, browser))
}

/// Builds an aggregator whose backends replay recorded fixture files.
///
/// A backend without a fixture never connects, which is how a session
/// without that runtime looks to the aggregator.
pub fn build_from_fixtures(
    config: AggregatorConfig,
    native_fixture: Option<&Path>,
    browser_fixture: Option<&Path>,
) -> Result<Arc<Aggregator>> {
    let native = memory_backend(Backend::Native, native_fixture)?;
    let browser = memory_backend(Backend::Browser, browser_fixture)?;
    Ok(build_aggregator(config, Arc::new(native), Arc::new(browser)))
}

fn memory_backend(backend: Backend, fixture: Option<&Path>) -> Result<MemoryBackend> {
    let Some(path) = fixture else {
        tracing::debug!(%backend, "no fixture; backend stays disconnected");
        return Ok(MemoryBackend::new(backend).with_connect_on_init(false));
    };

    let fixture = BackendFixture::load(path)
        .map_err(|e| HitlensError::Fixture(format!("{}: {}", path.display(), e)))?;
    tracing::info!(
        %backend,
        path = %path.display(),
        scripts = fixture.scripts.len(),
        "loaded backend fixture"
    );
    Ok(MemoryBackend::from_fixture(backend, fixture))
}

/// Initializes the logging system for a specific component.
/// This delegates to the core logging module.
pub fn init_logging(component: &str, to_stderr: bool) -> Option<impl Drop> {
    Some(hitlens_core::logging::init_logging(component, to_stderr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hitlens_api::ScriptEventKind;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_fixtures_leave_backends_disconnected() {
        let aggregator = build_from_fixtures(AggregatorConfig::default(), None, None).unwrap();
        aggregator.init();

        assert!(!aggregator.is_ready());
        assert!(aggregator.refresh_hit_counts().await.is_none());
    }

    #[tokio::test]
    async fn fixtures_feed_the_aggregator() -> Result<()> {
        let dir = TempDir::new()?;
        let native = dir.path().join("native.json");
        let browser = dir.path().join("browser.json");
        std::fs::write(
            &native,
            r#"{ "scripts": [{ "path": "server.js" }], "hits": { "native:s1": 4, "shared": 1 } }"#,
        )?;
        std::fs::write(&browser, r#"{ "hits": { "shared": 9 } }"#)?;

        let aggregator =
            build_from_fixtures(AggregatorConfig::default(), Some(&native), Some(&browser))?;
        let mut events = aggregator.subscribe();
        aggregator.init();

        let event = events.try_recv().unwrap();
        assert_eq!(event.kind, ScriptEventKind::Registered);
        assert_eq!(event.path, "server.js");

        let merged = aggregator.refresh_hit_counts().await.unwrap();
        assert_eq!(merged.hits_for(&"native:s1".into()), Some(4));
        assert_eq!(merged.hits_for(&"shared".into()), Some(9));
        Ok(())
    }

    #[test]
    fn unconnected_fixture_relays_nothing() -> Result<()> {
        let dir = TempDir::new()?;
        let browser = dir.path().join("browser.json");
        std::fs::write(
            &browser,
            r#"{ "ready": false, "scripts": [{ "path": "x.js" }] }"#,
        )?;

        let aggregator =
            build_from_fixtures(AggregatorConfig::default(), None, Some(&browser))?;
        let mut events = aggregator.subscribe();
        aggregator.init();

        assert!(!aggregator.is_ready());
        assert!(events.try_recv().is_err());
        assert!(aggregator.functions_in_file("x.js").is_empty());
        Ok(())
    }

    #[test]
    fn broken_fixture_names_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("native.json");
        std::fs::write(&path, "not json").unwrap();

        let Err(err) = build_from_fixtures(AggregatorConfig::default(), Some(&path), None) else {
            panic!("expected fixture error");
        };
        assert!(matches!(&err, HitlensError::Fixture(msg) if msg.contains("native.json")));
    }
}
