//! Asset manifest: what the preview page loads.
//!
//! ```text
//! <link rel="stylesheet" href="…">                       styles, in order
//! <script id="gltf" type="text/plain">…</script>         named strings
//! <script src="…"></script>                              scripts, in order
//! ```
//!
//! Strings ride in raw-text containers the page scripts read by id.

use std::fmt::Write;

use crate::utils::html::{escape_attr, raw_text};

/// Stylesheets, relative to the extension root.
pub const STYLES: &[&str] = &[
    "engines/Cesium/Widgets/widgets.css",
    "pages/preview.css",
];

/// Scripts, relative to the extension root. Engine libraries come before
/// the page scripts that drive them.
pub const SCRIPTS: &[&str] = &[
    "engines/Babylon/babylon.js",
    "engines/Babylon/babylon.inspector.bundle.js",
    "engines/Babylon/babylonjs.loaders.min.js",
    "engines/Cesium/Cesium.js",
    "engines/Three/three.min.js",
    "engines/Three/OrbitControls.js",
    "engines/Three/GLTFLoader.js",
    "engines/Three/DRACOLoader.js",
    "pages/babylonView.js",
    "pages/cesiumView.js",
    "pages/threeView.js",
    "pages/main.js",
];

/// Draco mesh decoder, relative to the extension root.
pub const DRACO_LOADER: &str = "engines/Draco/draco_decoder.js";
pub const DRACO_LOADER_WASM: &str = "engines/Draco/draco_decoder.wasm";

/// Named string ids, in the order they are emitted.
pub mod ids {
    pub const EXTENSION_ROOT_PATH: &str = "extensionRootPath";
    pub const DEFAULT_ENGINE: &str = "defaultEngine";
    pub const DEFAULT_BABYLON_REFLECTION: &str = "defaultBabylonReflection";
    pub const DEFAULT_THREE_REFLECTION: &str = "defaultThreeReflection";
    pub const DRACO_LOADER_PATH: &str = "dracoLoaderPath";
    pub const DRACO_LOADER_WASM_PATH: &str = "dracoLoaderWasmPath";
    pub const BABYLON_HTML: &str = "babylonHtml";
    pub const CESIUM_HTML: &str = "cesiumHtml";
    pub const THREE_HTML: &str = "threeHtml";
    pub const GLTF: &str = "gltf";
    pub const GLTF_ROOT_PATH: &str = "gltfRootPath";
    pub const GLTF_FILE_NAME: &str = "gltfFileName";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestString {
    pub id: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub strings: Vec<ManifestString>,
    /// Stylesheet URIs
    pub styles: Vec<String>,
    /// Script URIs
    pub scripts: Vec<String>,
}

impl Manifest {
    pub fn push_string(&mut self, id: &'static str, text: impl Into<String>) {
        self.strings.push(ManifestString {
            id,
            text: text.into(),
        });
    }

    pub fn string(&self, id: &str) -> Option<&str> {
        self.strings
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.text.as_str())
    }

    /// Markup consumed by the page's single substitution point.
    pub fn render(&self) -> String {
        let mut html = String::new();

        for href in &self.styles {
            let _ = writeln!(html, r#"<link rel="stylesheet" href="{}">"#, escape_attr(href));
        }
        for string in &self.strings {
            let _ = writeln!(
                html,
                r#"<script id="{}" type="text/plain">{}</script>"#,
                string.id,
                raw_text(&string.text)
            );
        }
        for src in &self.scripts {
            let _ = writeln!(html, r#"<script src="{}"></script>"#, escape_attr(src));
        }

        html
    }
}
