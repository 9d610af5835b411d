//! Builds a scene with every primitive shape and streams it to Rerun.
//!
//! Usage:
//! ```
//! cargo run -p basic_geometries -- --help
//! ```

use std::path::PathBuf;

use gepetto_viewer_rerun::{Client, Connector};

#[derive(Debug, clap::Parser)]
#[clap(author, version, about)]
struct Args {
    /// Saves one rrd file per scene into this directory rather than visualizing it immediately.
    #[clap(long)]
    save: Option<PathBuf>,

    /// Connects and sends the logged data to a remote Rerun viewer.
    ///
    /// Optionally takes a URL to connect to, the default is `rerun+http://127.0.0.1:9876/proxy`.
    #[clap(long)]
    connect: Option<Option<String>>,

    /// Also displays the mesh (or URDF) at this path.
    #[clap(long)]
    mesh: Option<PathBuf>,
}

impl Args {
    fn connector(&self) -> Connector {
        if let Some(dir) = &self.save {
            return Connector::Save(dir.clone());
        }

        match &self.connect {
            Some(Some(url)) => Connector::Connect(url.clone()),
            Some(None) => Connector::Connect("rerun+http://127.0.0.1:9876/proxy".to_owned()),
            None => Connector::Spawn,
        }
    }
}

fn run(client: &mut Client, args: &Args) -> anyhow::Result<()> {
    let gui = &mut client.gui;

    gui.create_window("w1");
    gui.create_scene("s1")?;
    gui.add_scene_to_window("s1", "w1")?;

    gui.add_box("s1/box", 2.0, 2.0, 2.0, [255, 0, 0, 255])?;

    gui.add_arrow("arrow", 0.5, -5.0, [100, 0, 50, 255])?;
    gui.add_to_group("arrow", "s1")?;

    gui.add_capsule("capsule", 0.5, 5.0, [100, 0, 155, 255])?;
    gui.add_to_group("capsule", "s1")?;

    gui.add_line("s1/line", [-5.0, -2.0, -4.0], [9.0, 4.0, -5.0], [100, 0, 155, 255])?;

    gui.create_group("faces")?;
    gui.add_square_face(
        "square",
        [[-4.0, 0.0, 1.0], [2.0, 6.0, 2.0], [3.0, 2.0, 3.0], [5.0, 4.0, 4.0]],
        [25, 50, 130, 255],
    )?;
    gui.add_triangle_face(
        "triangle",
        [[5.0, 3.0, 1.0], [8.0, 6.0, -2.0], [5.0, 2.0, 3.0]],
        [70, 30, 130, 255],
    )?;
    gui.add_to_group("square", "faces")?;
    gui.add_to_group("triangle", "faces")?;
    gui.add_to_group("faces", "s1")?;

    gui.add_sphere("s1/sphere", 2.0, [62, 255, 20, 255])?;

    if let Some(mesh) = &args.mesh {
        gui.add_mesh("s1/mesh", mesh)?;
    }

    re_log::info!("{client}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    re_log::setup_logging();

    use clap::Parser as _;
    let args = Args::parse();

    let mut client = Client::with_connector(args.connector());
    run(&mut client, &args)
}
