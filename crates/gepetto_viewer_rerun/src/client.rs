use crate::{Connector, Gui};

/// Entry point of the library, mirroring gepetto-viewer's `Client`: everything goes through [`Self::gui`].
///
/// ```no_run
/// let mut client = gepetto_viewer_rerun::Client::new();
/// client.gui.create_window("w1");
/// client.gui.create_scene("s1")?;
/// client.gui.add_scene_to_window("s1", "w1")?;
/// client.gui.add_box("s1/box", 2.0, 2.0, 2.0, [255, 0, 0, 255])?;
/// # Ok::<(), gepetto_viewer_rerun::GuiError>(())
/// ```
#[derive(Debug, Default)]
pub struct Client {
    pub gui: Gui,
}

impl Client {
    /// A client that spawns a Rerun Viewer for the first scene attached to a window.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_connector(connector: Connector) -> Self {
        Self {
            gui: Gui::new(connector),
        }
    }
}

impl std::fmt::Display for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Client({})", self.gui)
    }
}
