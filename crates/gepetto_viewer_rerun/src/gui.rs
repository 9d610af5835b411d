use std::path::PathBuf;

use indexmap::IndexMap;

use crate::geometry::{Geometry, GeometryKind, Position, Rgba};
use crate::scene::{Node, NodeContent, Placement, Scene, split_scene_prefix};
use crate::{Connector, GuiError, GuiResult};

/// A gepetto-viewer style scene API on top of Rerun.
///
/// * Windows and scenes are only names until a scene is attached to a window with
///   [`Self::add_scene_to_window`], which creates the scene's recording.
/// * Shapes (`add_box`, `add_sphere`, …) register a node. A node named `<scene>/<name>` is
///   displayed right away in that scene, any other node waits for [`Self::add_to_group`].
/// * Groups are nodes too: adding a group to a scene displays its whole subtree, and nodes
///   added to a displayed group show up below it.
///
/// Failing operations log an error and return it.
#[derive(Debug, Default)]
pub struct Gui {
    connector: Connector,
    windows: Vec<String>,
    scenes: IndexMap<String, Scene>,

    /// Entities and groups, in creation order.
    nodes: IndexMap<String, Node>,
}

impl Gui {
    pub fn new(connector: Connector) -> Self {
        Self {
            connector,
            windows: Vec::new(),
            scenes: IndexMap::new(),
            nodes: IndexMap::new(),
        }
    }

    pub fn connector(&self) -> &Connector {
        &self.connector
    }

    pub fn window_list(&self) -> &[String] {
        &self.windows
    }

    pub fn scene_list(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.values()
    }

    pub fn scene(&self, name: &str) -> Option<&Scene> {
        self.scenes.get(name)
    }

    pub fn group_list(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.is_group())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    /// The archetype of an entity node. `None` for groups and unknown nodes.
    pub fn node_kind(&self, name: &str) -> Option<GeometryKind> {
        self.nodes
            .get(name)
            .and_then(Node::geometry)
            .map(Geometry::kind)
    }

    // --- Windows & scenes ---

    /// Records a window name. The window itself is created by [`Self::add_scene_to_window`].
    pub fn create_window(&mut self, name: &str) -> String {
        if !self.windows.iter().any(|window| window == name) {
            self.windows.push(name.to_owned());
        }
        re_log::info!(
            "create_window() does not create any window: Rerun creates window and scene at the \
             same time. Window '{name}' will be created by add_scene_to_window()."
        );
        name.to_owned()
    }

    /// Records a scene. Its recording is created by [`Self::add_scene_to_window`].
    pub fn create_scene(&mut self, name: &str) -> GuiResult<()> {
        self.create_scene_impl(name).inspect_err(log_error)
    }

    fn create_scene_impl(&mut self, name: &str) -> GuiResult<()> {
        if name.is_empty() {
            return Err(invalid_name(name, "scene names cannot be empty"));
        }
        if name.contains('/') {
            return Err(invalid_name(name, "scene names cannot contain '/'"));
        }
        if self.scenes.contains_key(name) {
            return Err(GuiError::SceneAlreadyExists(name.to_owned()));
        }

        self.scenes.insert(name.to_owned(), Scene::new(name));
        re_log::info!(
            "create_scene() does not create any scene yet: Rerun creates window and scene at the \
             same time. Scene '{name}' will be created by add_scene_to_window()."
        );
        Ok(())
    }

    /// Creates the recording of `scene_name` in window `window`, through the [`Connector`].
    ///
    /// Attaching an already attached scene replaces its recording. What was displayed in the
    /// previous recording is not replayed.
    pub fn add_scene_to_window(&mut self, scene_name: &str, window: &str) -> GuiResult<()> {
        self.add_scene_to_window_impl(scene_name, window)
            .inspect_err(log_error)
    }

    fn add_scene_to_window_impl(&mut self, scene_name: &str, window: &str) -> GuiResult<()> {
        if !self.scenes.contains_key(scene_name) {
            return Err(GuiError::UnknownScene(scene_name.to_owned()));
        }
        if !self.windows.iter().any(|w| w == window) {
            return Err(GuiError::UnknownWindow(window.to_owned()));
        }

        let recording = self.connector.connect(window, scene_name)?;

        let Some(scene) = self.scenes.get_mut(scene_name) else {
            return Err(GuiError::UnknownScene(scene_name.to_owned()));
        };
        if let Some(previous) = scene.window() {
            re_log::warn!(
                "Scene '{scene_name}' was already attached to window '{previous}', replacing its recording."
            );
            for node in self.nodes.values_mut() {
                node.placements.retain(|placement| placement.scene != scene_name);
            }
        }
        scene.attach(window, recording);

        re_log::debug!("Scene '{scene_name}' attached to window '{window}'");
        Ok(())
    }

    // --- Groups ---

    pub fn create_group(&mut self, name: &str) -> GuiResult<()> {
        self.create_group_impl(name).inspect_err(log_error)
    }

    fn create_group_impl(&mut self, name: &str) -> GuiResult<()> {
        self.check_new_node_name(name)?;
        self.nodes.insert(name.to_owned(), Node::group());
        re_log::debug!("Created group '{name}'");
        Ok(())
    }

    /// Adds `node` to `group`, which is either a scene or a group.
    ///
    /// In a scene, the node is displayed at entity path `node`. In a group, the node becomes a
    /// child of the group and is displayed below every placement of the group.
    pub fn add_to_group(&mut self, node: &str, group: &str) -> GuiResult<()> {
        self.add_to_group_impl(node, group).inspect_err(log_error)
    }

    fn add_to_group_impl(&mut self, node: &str, group: &str) -> GuiResult<()> {
        if !self.nodes.contains_key(node) {
            return Err(GuiError::UnknownNode(node.to_owned()));
        }

        if self.scenes.contains_key(group) {
            return self.display(node, &Placement::new(group, node));
        }

        match self.nodes.get(group).map(Node::is_group) {
            Some(true) => {}
            Some(false) | None => return Err(GuiError::UnknownGroup(group.to_owned())),
        }
        if node == group || self.is_descendant(group, node) {
            return Err(GuiError::GroupCycle {
                node: node.to_owned(),
                group: group.to_owned(),
            });
        }

        let placements = {
            let Some(group_node) = self.nodes.get_mut(group) else {
                return Err(GuiError::UnknownGroup(group.to_owned()));
            };
            group_node.add_child(node);
            group_node.placements.clone()
        };
        re_log::debug!("Added '{node}' to group '{group}'");

        for placement in &placements {
            self.display(node, &placement.child(node))?;
        }
        Ok(())
    }

    /// Is `node` somewhere below `ancestor` in the group tree?
    fn is_descendant(&self, node: &str, ancestor: &str) -> bool {
        let Some(ancestor) = self.nodes.get(ancestor) else {
            return false;
        };
        ancestor
            .children()
            .iter()
            .any(|child| child == node || self.is_descendant(node, child))
    }

    /// Logs `name` (and for groups, its whole subtree) at `placement`.
    fn display(&mut self, name: &str, placement: &Placement) -> GuiResult<()> {
        let Some(scene) = self.scenes.get(&placement.scene) else {
            return Err(GuiError::UnknownScene(placement.scene.clone()));
        };
        let Some(rec) = scene.recording().cloned() else {
            return Err(GuiError::SceneNotAttached(placement.scene.clone()));
        };
        let Some(node) = self.nodes.get_mut(name) else {
            return Err(GuiError::UnknownNode(name.to_owned()));
        };

        let children = match &node.content {
            NodeContent::Entity(geometry) => {
                geometry.log(&rec, &placement.entity_path)?;
                re_log::info!(
                    "Logging {} '{name}' in scene '{}' at '{}'",
                    geometry.kind(),
                    placement.scene,
                    placement.entity_path
                );
                Vec::new()
            }
            NodeContent::Group(children) => children.clone(),
        };
        node.add_placement(placement.clone());

        for child in &children {
            self.display(child, &placement.child(child))?;
        }
        Ok(())
    }

    /// Removes a group or a displayed entity, and clears it from every scene it is displayed in.
    ///
    /// With `all`, the clear is recursive and a group's descendants are removed too.
    /// Without it, the descendants are kept as free nodes.
    pub fn delete_node(&mut self, name: &str, all: bool) -> GuiResult<()> {
        self.delete_node_impl(name, all).inspect_err(log_error)
    }

    fn delete_node_impl(&mut self, name: &str, all: bool) -> GuiResult<()> {
        let Some(node) = self.nodes.get(name) else {
            return Err(GuiError::UnknownNode(name.to_owned()));
        };
        if !node.is_group() && !node.is_displayed() {
            return Err(GuiError::NodeNotDisplayed(name.to_owned()));
        }

        let mut removed = vec![name.to_owned()];
        if all {
            self.collect_descendants(name, &mut removed);
        }

        let mut placements = Vec::new();
        for name in &removed {
            let Some(node) = self.nodes.shift_remove(name) else {
                continue; // reachable through more than one path
            };
            placements.extend(node.placements);
            for other in self.nodes.values_mut() {
                other.remove_child(name);
            }
        }
        re_log::info!("Deleted {}", removed.join(", "));

        // Every clear is attempted, the first failure is returned.
        let mut first_err = None;
        for placement in &placements {
            if let Err(err) = self.clear(placement, all) {
                first_err.get_or_insert(err);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn collect_descendants(&self, name: &str, out: &mut Vec<String>) {
        let Some(node) = self.nodes.get(name) else {
            return;
        };
        for child in node.children() {
            out.push(child.clone());
            self.collect_descendants(child, out);
        }
    }

    fn clear(&self, placement: &Placement, recursive: bool) -> GuiResult<()> {
        if let Some(rec) = self.scenes.get(&placement.scene).and_then(Scene::recording) {
            rec.log(
                placement.entity_path.as_str(),
                &rerun::Clear::new(recursive),
            )?;
        }
        Ok(())
    }

    // --- Shapes ---

    pub fn add_floor(&mut self, name: &str) -> GuiResult<()> {
        self.add_geometry(name, Geometry::floor())
    }

    pub fn add_box(
        &mut self,
        name: &str,
        size_x: f32,
        size_y: f32,
        size_z: f32,
        color: Rgba,
    ) -> GuiResult<()> {
        let geometry = Geometry::Box {
            size: [size_x, size_y, size_z],
            color,
            label: Some(name.to_owned()),
        };
        self.add_geometry(name, geometry)
    }

    /// An arrow from the origin, along `+Z` (`-Z` for a negative `length`).
    pub fn add_arrow(&mut self, name: &str, radius: f32, length: f32, color: Rgba) -> GuiResult<()> {
        let geometry = Geometry::Arrow {
            radius,
            length,
            color,
            label: name.to_owned(),
        };
        self.add_geometry(name, geometry)
    }

    pub fn add_capsule(
        &mut self,
        name: &str,
        radius: f32,
        height: f32,
        color: Rgba,
    ) -> GuiResult<()> {
        let geometry = Geometry::Capsule {
            radius,
            length: height,
            color,
        };
        self.add_geometry(name, geometry)
    }

    pub fn add_line(&mut self, name: &str, from: Position, to: Position, color: Rgba) -> GuiResult<()> {
        let geometry = Geometry::Line {
            from,
            to,
            color,
            label: name.to_owned(),
        };
        self.add_geometry(name, geometry)
    }

    pub fn add_square_face(
        &mut self,
        name: &str,
        corners: [Position; 4],
        color: Rgba,
    ) -> GuiResult<()> {
        self.add_geometry(name, Geometry::square_face(corners, color))
    }

    pub fn add_triangle_face(
        &mut self,
        name: &str,
        corners: [Position; 3],
        color: Rgba,
    ) -> GuiResult<()> {
        self.add_geometry(name, Geometry::triangle_face(corners, color))
    }

    pub fn add_sphere(&mut self, name: &str, radius: f32, color: Rgba) -> GuiResult<()> {
        let geometry = Geometry::Sphere {
            radius,
            color,
            label: name.to_owned(),
        };
        self.add_geometry(name, geometry)
    }

    /// A mesh read from a file (`.stl`, `.obj`, `.glb`, `.dae`, `.urdf`, …) by Rerun's data loaders.
    pub fn add_mesh(&mut self, name: &str, path: impl Into<PathBuf>) -> GuiResult<()> {
        let path = path.into();
        if !path.exists() {
            let err = GuiError::MeshNotFound(path);
            log_error(&err);
            return Err(err);
        }
        self.add_geometry(name, Geometry::MeshFromPath { path })
    }

    /// Registers an entity node, displaying it right away if `name` is `<scene>/<name>`.
    pub fn add_geometry(&mut self, name: &str, geometry: Geometry) -> GuiResult<()> {
        self.add_geometry_impl(name, geometry).inspect_err(log_error)
    }

    fn add_geometry_impl(&mut self, name: &str, geometry: Geometry) -> GuiResult<()> {
        let kind = geometry.kind();

        let target_scene = split_scene_prefix(name)
            .and_then(|(scene, node_name)| Some((self.scenes.get(scene)?, node_name)));

        if let Some((scene, node_name)) = target_scene {
            if scene.recording().is_none() {
                return Err(GuiError::SceneNotAttached(scene.name().to_owned()));
            }
            let scene = scene.name().to_owned();
            self.check_new_node_name(node_name)?;
            self.nodes
                .insert(node_name.to_owned(), Node::entity(geometry));
            re_log::info!("Created {kind} '{name}', displaying it in scene '{scene}'");
            return self
                .display(node_name, &Placement::new(scene, node_name))
                .inspect_err(|_| {
                    self.nodes.shift_remove(node_name);
                });
        }

        self.check_new_node_name(name)?;
        self.nodes.insert(name.to_owned(), Node::entity(geometry));
        re_log::info!(
            "Created {kind} '{name}'. It will be displayed once added to a scene or group with add_to_group()."
        );
        Ok(())
    }

    fn check_new_node_name(&self, name: &str) -> GuiResult<()> {
        if name.is_empty() {
            return Err(invalid_name(name, "node names cannot be empty"));
        }
        if self.nodes.contains_key(name) {
            return Err(GuiError::NodeAlreadyExists(name.to_owned()));
        }
        Ok(())
    }
}

impl std::fmt::Display for Gui {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scenes: Vec<_> = self.scenes.keys().collect();
        let nodes: Vec<_> = self
            .nodes
            .iter()
            .map(|(name, node)| match node.geometry() {
                Some(geometry) => format!("{name}: {}", geometry.kind()),
                None => format!("{name}: group"),
            })
            .collect();
        write!(
            f,
            "Gui(windows={:?}, scenes={scenes:?}, groups={:?}, nodes={nodes:?})",
            self.windows,
            self.group_list(),
        )
    }
}

fn invalid_name(name: &str, reason: &'static str) -> GuiError {
    GuiError::InvalidName {
        name: name.to_owned(),
        reason,
    }
}

fn log_error(err: &GuiError) {
    re_log::error!("{err}");
}
