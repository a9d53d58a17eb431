//! Scene description files (YAML or JSON).
//!
//! ```yaml
//! map:
//!   cell_size: 1.0
//!   rows:
//!     - "111"
//!     - "1 1"
//!     - "111"
//! player: { x: 1.5, y: 1.5, angle: 0.0, fov: 1.0471975511965976 }
//! entities:
//!   - { x: 1.2, y: 1.4, kind: 2 }
//! splash:
//!   - { img_path: "assets/splash.png", display_ms: 3000 }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tilecast_common::{Entity, Player};

use crate::{Map, Scene, SceneError, Splash};

fn default_cell_size() -> f64 {
    1.0
}

/// Serialized form of the map grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSection {
    pub rows: Vec<String>,
    #[serde(default = "default_cell_size")]
    pub cell_size: f64,
}

/// Serialized form of a whole scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    pub map: MapSection,
    pub player: Player,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub splash: Vec<Splash>,
}

impl SceneFile {
    pub fn from_yaml_str(text: &str) -> Result<Self, SceneError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a scene file, choosing the format from the extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let file = match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            "json" => Self::from_json_str(&text)?,
            other => return Err(SceneError::UnsupportedFormat(other.to_string())),
        };
        tracing::info!(path = %path.display(), "scene file loaded");
        Ok(file)
    }

    /// Capture a scene back into its file form.
    pub fn from_scene(scene: &Scene) -> Self {
        Self {
            map: MapSection {
                rows: scene.map.rows(),
                cell_size: scene.map.cell_size(),
            },
            player: scene.player,
            entities: scene.entities.clone(),
            splash: scene.splash_images.clone(),
        }
    }

    pub fn to_yaml(&self) -> Result<String, SceneError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate and build the live scene.
    pub fn into_scene(self) -> Result<Scene, SceneError> {
        let map = Map::from_rows(&self.map.rows)?.with_cell_size(self.map.cell_size)?;
        let mut scene = Scene::new(map, self.player, self.entities)?;
        for splash in self.splash {
            scene.load_splash(splash);
        }
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tilecast_common::SpriteKind;

    const YAML: &str = r#"
map:
  rows:
    - "111"
    - "1 1"
    - "111"
player: { x: 1.5, y: 1.5, angle: 0.0, fov: 1.0 }
entities:
  - { x: 1.2, y: 1.4, kind: 2 }
splash:
  - { img_path: "intro.png", display_ms: 1500 }
"#;

    #[test]
    fn yaml_builds_scene() {
        let scene = SceneFile::from_yaml_str(YAML).unwrap().into_scene().unwrap();
        assert_eq!(scene.map.width(), 3);
        assert_eq!(scene.map.cell_size(), 1.0);
        assert_eq!(scene.entities.len(), 1);
        assert_eq!(scene.entities[0].kind, SpriteKind(2));
        assert_eq!(scene.splash_images, vec![Splash::new("intro.png", 1500)]);
    }

    #[test]
    fn malformed_map_fails_at_construction() {
        let text = YAML.replace("\"1 1\"", "\"1 \"");
        let err = SceneFile::from_yaml_str(&text).unwrap().into_scene().unwrap_err();
        assert!(matches!(err, SceneError::RaggedRow { row: 1, .. }));
    }

    #[test]
    fn json_and_yaml_agree() {
        let file = SceneFile::from_yaml_str(YAML).unwrap();
        let json = serde_json::to_string(&file).unwrap();
        assert_eq!(SceneFile::from_json_str(&json).unwrap(), file);
    }

    #[test]
    fn load_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("room.yaml");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(YAML.as_bytes())
            .unwrap();
        let file = SceneFile::load(&path).unwrap();
        assert_eq!(file.map.rows.len(), 3);

        let txt = dir.path().join("room.txt");
        std::fs::write(&txt, YAML).unwrap();
        assert!(matches!(
            SceneFile::load(&txt),
            Err(SceneError::UnsupportedFormat(_))
        ));

        let missing = dir.path().join("missing.yaml");
        assert!(matches!(SceneFile::load(&missing), Err(SceneError::Io { .. })));
    }

    #[test]
    fn scene_captures_back_to_file() {
        let scene = SceneFile::from_yaml_str(YAML).unwrap().into_scene().unwrap();
        let file = SceneFile::from_scene(&scene);
        assert_eq!(file.map.rows, vec!["111", "1 1", "111"]);
        let yaml = file.to_yaml().unwrap();
        assert_eq!(SceneFile::from_yaml_str(&yaml).unwrap(), file);
    }
}
