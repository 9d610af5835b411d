//! The crate must expose the client under its package name.

use gepetto_viewer_rerun::{Client, Connector, Gui};

#[test]
fn client_is_importable() {
    let client = Client::with_connector(Connector::Disabled);
    let _gui: &Gui = &client.gui;
    assert!(client.to_string().starts_with("Client(Gui("));
}
