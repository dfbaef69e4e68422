//! Render Payload Builder
//!
//! Builds everything a rendering surface needs to show one document:
//!
//! ```text
//! PayloadInput ──> RenderPayload { title, content_type, manifest }
//!                        │
//!                        └─ to_html(csp_source) ──> PREVIEW_HTML with
//!                                                   __ASSETS__ and __CSP_SOURCE__ filled
//! ```
//!
//! Building is pure with respect to its inputs; the host's sandbox source is
//! substituted last, in [`RenderPayload::to_html`].

mod manifest;
mod sandbox;
mod template;

pub use manifest::{DRACO_LOADER, DRACO_LOADER_WASM, Manifest, ManifestString, SCRIPTS, STYLES, ids};
pub use sandbox::Sandbox;
pub use template::{PreviewVars, Template, TemplateVars};

use crate::config::PreviewConfig;
use crate::document::ContentType;
use crate::panel::{DefaultResources, DocumentId};

/// Preview page. `__ASSETS__` is its only content substitution point.
pub const PREVIEW_HTML: Template<PreviewVars<'static>> =
    Template::new(include_str!("page/preview.html"));

/// Per-engine UI markup, embedded in the manifest.
pub const BABYLON_HTML: &str = include_str!("page/babylon.html");
pub const CESIUM_HTML: &str = include_str!("page/cesium.html");
pub const THREE_HTML: &str = include_str!("page/three.html");

/// Panel title for a document.
pub fn title(document: &DocumentId) -> String {
    format!("glTF Preview [{}]", document.file_name())
}

/// Everything a payload is built from.
pub struct PayloadInput<'a> {
    pub document: &'a DocumentId,
    /// Raw document text, passed through even when it does not parse
    pub text: &'a str,
    pub content_type: ContentType,
    pub defaults: &'a DefaultResources,
    pub config: &'a PreviewConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPayload {
    pub title: String,
    pub content_type: ContentType,
    pub manifest: Manifest,
}

impl RenderPayload {
    pub fn build(input: &PayloadInput<'_>, sandbox: &Sandbox<'_>) -> Self {
        let root = input.config.surface_root();
        let engine = input.config.engine.for_content(input.content_type);
        let asset = |relative: &str| sandbox.uri(&root.join(relative));

        let mut manifest = Manifest::default();
        manifest.push_string(ids::EXTENSION_ROOT_PATH, sandbox.dir_uri(root).unwrap_or_default());
        manifest.push_string(ids::DEFAULT_ENGINE, engine.label());
        manifest.push_string(
            ids::DEFAULT_BABYLON_REFLECTION,
            input.defaults.babylon.clone().unwrap_or_default(),
        );
        manifest.push_string(
            ids::DEFAULT_THREE_REFLECTION,
            input.defaults.three.clone().unwrap_or_default(),
        );
        manifest.push_string(ids::DRACO_LOADER_PATH, asset(DRACO_LOADER).unwrap_or_default());
        manifest.push_string(
            ids::DRACO_LOADER_WASM_PATH,
            asset(DRACO_LOADER_WASM).unwrap_or_default(),
        );
        manifest.push_string(ids::BABYLON_HTML, BABYLON_HTML);
        manifest.push_string(ids::CESIUM_HTML, CESIUM_HTML);
        manifest.push_string(ids::THREE_HTML, THREE_HTML);
        manifest.push_string(ids::GLTF, input.text);
        manifest.push_string(
            ids::GLTF_ROOT_PATH,
            sandbox.dir_uri(input.document.directory()).unwrap_or_default(),
        );
        manifest.push_string(ids::GLTF_FILE_NAME, input.document.file_name());

        manifest.styles = STYLES.iter().filter_map(|style| asset(style)).collect();
        manifest.scripts = SCRIPTS.iter().filter_map(|script| asset(script)).collect();

        Self {
            title: title(input.document),
            content_type: input.content_type,
            manifest,
        }
    }

    /// Full page markup for a host whose sandbox source is `csp_source`.
    pub fn to_html(&self, csp_source: &str) -> String {
        PREVIEW_HTML.render(&PreviewVars {
            assets: &self.manifest.render(),
            csp_source,
        })
    }
}

#[cfg(test)]
mod tests;
