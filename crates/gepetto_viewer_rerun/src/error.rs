use std::path::PathBuf;

/// Errors that can occur when building or displaying a scene through the [`crate::Gui`].
#[derive(thiserror::Error, Debug)]
pub enum GuiError {
    /// Node, group and scene names must be non-empty, and scene names may not contain `/`.
    #[error("Invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("Scene '{0}' already exists")]
    SceneAlreadyExists(String),

    /// Entities and groups share a single namespace.
    #[error("A node named '{0}' already exists")]
    NodeAlreadyExists(String),

    #[error("Unknown scene '{0}'")]
    UnknownScene(String),

    #[error("Unknown window '{0}'")]
    UnknownWindow(String),

    #[error("Unknown node '{0}'")]
    UnknownNode(String),

    /// The target of `add_to_group` is neither a scene nor a group.
    #[error("'{0}' is neither a scene nor a group")]
    UnknownGroup(String),

    /// The scene was never passed to `add_scene_to_window`, so it has no recording yet.
    #[error("Scene '{0}' is not attached to any window")]
    SceneNotAttached(String),

    #[error("Cannot add group '{node}' to '{group}': it would create a cycle")]
    GroupCycle { node: String, group: String },

    /// The entity exists but has never been displayed, so there is nothing to remove from the viewer.
    #[error("Node '{0}' is not displayed in any scene")]
    NodeNotDisplayed(String),

    #[error("Mesh file not found: {0:?}")]
    MeshNotFound(PathBuf),

    /// Error within the Rerun SDK.
    #[error(transparent)] // makes bubbling all the way up to main look nice
    Recording(#[from] rerun::RecordingStreamError),
}

pub type GuiResult<T> = Result<T, GuiError>;
