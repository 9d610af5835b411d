//! Bookkeeping for scenes and the node tree displayed in them.

use rerun::RecordingStream;

use crate::Geometry;

/// A scene, and the recording it streams to once it is attached to a window.
///
/// Rerun has no separate notion of window and scene: a recording is created for the
/// pair (application id = window, recording id = scene) when the scene is attached.
pub struct Scene {
    name: String,
    window: Option<String>,
    recording: Option<RecordingStream>,
}

impl Scene {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            window: None,
            recording: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The window this scene was attached to, if any.
    pub fn window(&self) -> Option<&str> {
        self.window.as_deref()
    }

    pub fn recording(&self) -> Option<&RecordingStream> {
        self.recording.as_ref()
    }

    pub(crate) fn attach(&mut self, window: &str, recording: RecordingStream) {
        self.window = Some(window.to_owned());
        self.recording = Some(recording);
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("name", &self.name)
            .field("window", &self.window)
            .field("attached", &self.recording.is_some())
            .finish()
    }
}

/// Where a node is currently displayed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    pub scene: String,
    pub entity_path: String,
}

impl Placement {
    pub fn new(scene: impl Into<String>, entity_path: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
            entity_path: entity_path.into(),
        }
    }

    /// The placement of a child node below this one.
    pub fn child(&self, child: &str) -> Self {
        Self {
            scene: self.scene.clone(),
            entity_path: format!("{}/{child}", self.entity_path),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeContent {
    Entity(Geometry),

    /// Child node names, in insertion order.
    Group(Vec<String>),
}

/// A named entity or group, and every place it is displayed at.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub(crate) content: NodeContent,
    pub(crate) placements: Vec<Placement>,
}

impl Node {
    pub(crate) fn entity(geometry: Geometry) -> Self {
        Self {
            content: NodeContent::Entity(geometry),
            placements: Vec::new(),
        }
    }

    pub(crate) fn group() -> Self {
        Self {
            content: NodeContent::Group(Vec::new()),
            placements: Vec::new(),
        }
    }

    pub fn content(&self) -> &NodeContent {
        &self.content
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        match &self.content {
            NodeContent::Entity(geometry) => Some(geometry),
            NodeContent::Group(_) => None,
        }
    }

    pub fn children(&self) -> &[String] {
        match &self.content {
            NodeContent::Entity(_) => &[],
            NodeContent::Group(children) => children,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.content, NodeContent::Group(_))
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn is_displayed(&self) -> bool {
        !self.placements.is_empty()
    }

    /// Records a placement. Returns `false` if it was already known.
    pub(crate) fn add_placement(&mut self, placement: Placement) -> bool {
        if self.placements.contains(&placement) {
            false
        } else {
            self.placements.push(placement);
            true
        }
    }

    /// Adds a child to a group. Returns `false` for entities and already known children.
    pub(crate) fn add_child(&mut self, child: &str) -> bool {
        match &mut self.content {
            NodeContent::Group(children) if !children.iter().any(|c| c == child) => {
                children.push(child.to_owned());
                true
            }
            _ => false,
        }
    }

    pub(crate) fn remove_child(&mut self, child: &str) {
        if let NodeContent::Group(children) = &mut self.content {
            children.retain(|c| c != child);
        }
    }
}

/// Splits `<scene>/<rest>` into its two parts. `None` when there is no `/`, or nothing after it.
pub fn split_scene_prefix(name: &str) -> Option<(&str, &str)> {
    name.split_once('/').filter(|(_, rest)| !rest.is_empty())
}
