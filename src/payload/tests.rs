use std::path::PathBuf;

use super::*;
use crate::config::Engine;
use crate::testing::RecordingHost;

struct Fixture {
    _temp: tempfile::TempDir,
    ext: PathBuf,
    document: DocumentId,
    config: PreviewConfig,
}

fn fixture() -> Fixture {
    let temp = tempfile::TempDir::new().unwrap();
    let ext = temp.path().join("ext");
    let models = temp.path().join("models");
    std::fs::create_dir_all(&ext).unwrap();
    std::fs::create_dir_all(&models).unwrap();
    let path = models.join("duck.gltf");
    std::fs::write(&path, "{}").unwrap();

    let mut config = PreviewConfig::default();
    config.surface.root = ext.clone();

    Fixture {
        ext: normalize(&ext),
        document: DocumentId::new(&path),
        config,
        _temp: temp,
    }
}

fn normalize(path: &std::path::Path) -> PathBuf {
    crate::utils::path::normalize_path(path)
}

fn build(
    fx: &Fixture,
    text: &str,
    content_type: ContentType,
    defaults: &DefaultResources,
) -> RenderPayload {
    let host = RecordingHost::new();
    let sandbox = Sandbox::new(&host, fx.config.surface_root(), fx.document.directory());
    let input = PayloadInput {
        document: &fx.document,
        text,
        content_type,
        defaults,
        config: &fx.config,
    };
    RenderPayload::build(&input, &sandbox)
}

#[test]
fn test_title_contains_file_name() {
    let fx = fixture();
    let payload = build(&fx, "{}", ContentType::V2, &DefaultResources::default());
    assert_eq!(payload.title, "glTF Preview [duck.gltf]");
}

#[test]
fn test_engine_follows_content_type() {
    let mut fx = fixture();
    let defaults = DefaultResources::default();

    let v1 = build(&fx, "{}", ContentType::V1, &defaults);
    assert_eq!(v1.manifest.string(ids::DEFAULT_ENGINE), Some("Cesium"));

    fx.config.engine.v2 = Engine::Three;
    let v2 = build(&fx, "{}", ContentType::V2, &defaults);
    assert_eq!(v2.content_type, ContentType::V2);
    assert_eq!(v2.manifest.string(ids::DEFAULT_ENGINE), Some("Three.js"));
}

#[test]
fn test_manifest_carries_every_named_string() {
    let fx = fixture();
    let payload = build(&fx, "{\"asset\":{}}", ContentType::V2, &DefaultResources::default());

    for id in [
        ids::EXTENSION_ROOT_PATH,
        ids::DEFAULT_ENGINE,
        ids::DEFAULT_BABYLON_REFLECTION,
        ids::DEFAULT_THREE_REFLECTION,
        ids::DRACO_LOADER_PATH,
        ids::DRACO_LOADER_WASM_PATH,
        ids::BABYLON_HTML,
        ids::CESIUM_HTML,
        ids::THREE_HTML,
        ids::GLTF,
        ids::GLTF_ROOT_PATH,
        ids::GLTF_FILE_NAME,
    ] {
        assert!(payload.manifest.string(id).is_some(), "missing {id}");
    }

    assert_eq!(payload.manifest.string(ids::GLTF), Some("{\"asset\":{}}"));
    assert_eq!(payload.manifest.string(ids::GLTF_FILE_NAME), Some("duck.gltf"));
    assert_eq!(payload.manifest.string(ids::BABYLON_HTML), Some(BABYLON_HTML));
}

#[test]
fn test_paths_are_sandbox_uris() {
    let fx = fixture();
    let payload = build(&fx, "{}", ContentType::V2, &DefaultResources::default());

    let root = payload.manifest.string(ids::EXTENSION_ROOT_PATH).unwrap();
    assert_eq!(root, format!("sandbox:{}/", fx.ext.display()));

    let gltf_root = payload.manifest.string(ids::GLTF_ROOT_PATH).unwrap();
    assert_eq!(gltf_root, format!("sandbox:{}/", fx.document.directory().display()));

    let draco = payload.manifest.string(ids::DRACO_LOADER_PATH).unwrap();
    assert_eq!(draco, format!("sandbox:{}", fx.ext.join(DRACO_LOADER).display()));

    assert_eq!(payload.manifest.styles.len(), STYLES.len());
    assert_eq!(payload.manifest.scripts.len(), SCRIPTS.len());
    assert!(payload.manifest.scripts.iter().all(|s| s.starts_with("sandbox:")));
    assert!(payload.manifest.scripts.last().unwrap().ends_with("pages/main.js"));
}

#[test]
fn test_missing_defaults_are_empty_strings() {
    let fx = fixture();
    let defaults = DefaultResources {
        babylon: Some("sandbox:/env/studio.env".to_string()),
        three: None,
    };
    let payload = build(&fx, "{}", ContentType::V2, &defaults);
    assert_eq!(
        payload.manifest.string(ids::DEFAULT_BABYLON_REFLECTION),
        Some("sandbox:/env/studio.env")
    );
    assert_eq!(payload.manifest.string(ids::DEFAULT_THREE_REFLECTION), Some(""));
}

#[test]
fn test_build_is_pure() {
    let fx = fixture();
    let defaults = DefaultResources::default();
    let a = build(&fx, "{\"a\":1}", ContentType::V2, &defaults);
    let b = build(&fx, "{\"a\":1}", ContentType::V2, &defaults);
    assert_eq!(a, b);
    assert_eq!(a.to_html("file:"), b.to_html("file:"));
}

#[test]
fn test_html_substitutes_csp_but_not_document_text() {
    let fx = fixture();
    let text = r#"{"extras":{"note":"__CSP_SOURCE__ </script>"}}"#;
    let payload = build(&fx, text, ContentType::V2, &DefaultResources::default());
    let html = payload.to_html("file:");

    assert!(!html.contains(template::ASSETS_PLACEHOLDER));
    assert!(html.contains("img-src file: blob: data:"));
    assert!(html.contains(r#""note":"__CSP_SOURCE__ <\/script>""#));
    assert!(html.contains(r#"<script id="gltf" type="text/plain">"#));
}

fn carried<'h>(html: &'h str, id: &str) -> &'h str {
    let open = format!(r#"<script id="{id}" type="text/plain">"#);
    let start = html.find(&open).unwrap() + open.len();
    let len = html[start..].find("</script>").unwrap();
    &html[start..start + len]
}

#[test]
fn test_engine_markup_is_carried_verbatim() {
    let fx = fixture();
    let payload = build(&fx, "{}", ContentType::V2, &DefaultResources::default());
    let html = payload.to_html("file:");

    assert_eq!(carried(&html, ids::BABYLON_HTML), BABYLON_HTML);
    assert_eq!(carried(&html, ids::CESIUM_HTML), CESIUM_HTML);
    assert_eq!(carried(&html, ids::THREE_HTML), THREE_HTML);
}

#[test]
fn test_invalid_text_is_carried_verbatim() {
    let fx = fixture();
    let text = "{ \"a\": </b> ";
    let payload = build(&fx, text, ContentType::V1, &DefaultResources::default());
    assert_eq!(carried(&payload.to_html("file:"), ids::GLTF), text);
}
