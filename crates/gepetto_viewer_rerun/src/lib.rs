//! A gepetto-viewer style client for the [Rerun](https://rerun.io) Viewer.
//!
//! Robotics code written against gepetto-viewer's vocabulary (windows, scenes, groups and
//! nodes) can use [`Client`] to stream its scene to Rerun instead:
//!
//! ```no_run
//! use gepetto_viewer_rerun::Client;
//!
//! let mut client = Client::new();
//! client.gui.create_window("w1");
//! client.gui.create_scene("s1")?;
//! client.gui.add_scene_to_window("s1", "w1")?;
//!
//! // `<scene>/<name>` is displayed right away…
//! client.gui.add_box("s1/box", 2.0, 2.0, 2.0, [255, 0, 0, 255])?;
//!
//! // …anything else once it is added to a scene or group.
//! client.gui.add_sphere("sphere", 2.0, [62, 255, 20, 255])?;
//! client.gui.add_to_group("sphere", "s1")?;
//! # Ok::<(), gepetto_viewer_rerun::GuiError>(())
//! ```
//!
//! Files passed to [`Gui::add_mesh`] are decoded by Rerun's data loaders. Formats without a
//! built-in loader (COLLADA, or URDF on older viewers) need an external `rerun-loader-*`
//! executable on the `PATH`.

mod client;
mod connector;
mod error;
mod gui;

pub mod geometry;
pub mod scene;

pub use self::client::Client;
pub use self::connector::{Connector, MemoryRecordings};
pub use self::error::{GuiError, GuiResult};
pub use self::geometry::{Geometry, GeometryKind, Position, Rgba};
pub use self::gui::Gui;
pub use self::scene::{Node, NodeContent, Placement, Scene};
