//! The primitive shapes a node can carry, and how each one is turned into a Rerun archetype.

use std::path::PathBuf;

use rerun::{RecordingStream, RecordingStreamResult};

/// An RGBA color, unmultiplied alpha, one byte per channel.
pub type Rgba = [u8; 4];

/// A point in 3D space.
pub type Position = [f32; 3];

/// Size of the floor created by [`Geometry::floor`].
pub const FLOOR_SIZE: [f32; 3] = [200.0, 200.0, 0.5];

/// Color of the floor created by [`Geometry::floor`].
pub const FLOOR_COLOR: Rgba = [125, 125, 125, 255];

/// Radius of the strip logged for a [`Geometry::Line`].
pub const LINE_RADIUS: f32 = 0.1;

/// Triangulation of a square face: all four triangles of its vertices.
pub const SQUARE_FACE_TRIANGLES: [[u32; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];

/// The Rerun archetype a [`Geometry`] is logged as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Arrows3D,
    Boxes3D,
    Capsules3D,
    LineStrips3D,
    Mesh3D,

    /// A mesh file handed over to Rerun's data loaders.
    MeshFromPath,
    Points3D,
}

impl GeometryKind {
    pub const ALL: [Self; 7] = [
        Self::Arrows3D,
        Self::Boxes3D,
        Self::Capsules3D,
        Self::LineStrips3D,
        Self::Mesh3D,
        Self::MeshFromPath,
        Self::Points3D,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Arrows3D => "Arrows3D",
            Self::Boxes3D => "Boxes3D",
            Self::Capsules3D => "Capsules3D",
            Self::LineStrips3D => "LineStrips3D",
            Self::Mesh3D => "Mesh3D",
            Self::MeshFromPath => "MeshFromPath",
            Self::Points3D => "Points3D",
        }
    }
}

impl std::fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The shape carried by an entity node.
///
/// Shapes are kept as plain data and only converted to Rerun archetypes when they are
/// displayed, so the same node can be logged into several scenes.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// An arrow starting at the origin and pointing along `+Z` (`-Z` for negative lengths).
    Arrow {
        radius: f32,
        length: f32,
        color: Rgba,
        label: String,
    },

    Box {
        size: [f32; 3],
        color: Rgba,
        label: Option<String>,
    },

    Capsule {
        radius: f32,
        length: f32,
        color: Rgba,
    },

    Line {
        from: Position,
        to: Position,
        color: Rgba,
        label: String,
    },

    /// A triangle mesh. Without triangles the vertices are read as a triangle soup.
    Mesh {
        vertices: Vec<Position>,
        triangles: Vec<[u32; 3]>,
        color: Rgba,
    },

    MeshFromPath { path: PathBuf },

    /// A sphere, drawn as a single fat point at the origin.
    Sphere {
        radius: f32,
        color: Rgba,
        label: String,
    },
}

impl Geometry {
    pub fn floor() -> Self {
        Self::Box {
            size: FLOOR_SIZE,
            color: FLOOR_COLOR,
            label: None,
        }
    }

    pub fn square_face(corners: [Position; 4], color: Rgba) -> Self {
        Self::Mesh {
            vertices: corners.to_vec(),
            triangles: SQUARE_FACE_TRIANGLES.to_vec(),
            color,
        }
    }

    pub fn triangle_face(corners: [Position; 3], color: Rgba) -> Self {
        Self::Mesh {
            vertices: corners.to_vec(),
            triangles: Vec::new(),
            color,
        }
    }

    pub fn kind(&self) -> GeometryKind {
        match self {
            Self::Arrow { .. } => GeometryKind::Arrows3D,
            Self::Box { .. } => GeometryKind::Boxes3D,
            Self::Capsule { .. } => GeometryKind::Capsules3D,
            Self::Line { .. } => GeometryKind::LineStrips3D,
            Self::Mesh { .. } => GeometryKind::Mesh3D,
            Self::MeshFromPath { .. } => GeometryKind::MeshFromPath,
            Self::Sphere { .. } => GeometryKind::Points3D,
        }
    }

    /// Logs the shape at `entity_path` in the given recording.
    pub(crate) fn log(&self, rec: &RecordingStream, entity_path: &str) -> RecordingStreamResult<()> {
        match self {
            Self::Arrow {
                radius,
                length,
                color,
                label,
            } => rec.log(
                entity_path,
                &rerun::Arrows3D::from_vectors([arrow_vector(*length)])
                    .with_radii([*radius])
                    .with_colors([to_color(*color)])
                    .with_labels([label.as_str()]),
            ),

            Self::Box { size, color, label } => {
                let mut boxes = rerun::Boxes3D::from_sizes([*size])
                    .with_colors([to_color(*color)])
                    .with_fill_mode(rerun::FillMode::Solid);
                if let Some(label) = label {
                    boxes = boxes.with_labels([label.as_str()]);
                }
                rec.log(entity_path, &boxes)
            }

            Self::Capsule {
                radius,
                length,
                color,
            } => rec.log(
                entity_path,
                &rerun::Capsules3D::from_lengths_and_radii([*length], [*radius])
                    .with_colors([to_color(*color)]),
            ),

            Self::Line {
                from,
                to,
                color,
                label,
            } => rec.log(
                entity_path,
                &rerun::LineStrips3D::new([[*from, *to]])
                    .with_radii([LINE_RADIUS])
                    .with_colors([to_color(*color)])
                    .with_labels([label.as_str()]),
            ),

            Self::Mesh {
                vertices,
                triangles,
                color,
            } => {
                let mut mesh = rerun::Mesh3D::new(vertices.iter().copied()).with_vertex_colors(
                    std::iter::repeat_n(to_color(*color), vertices.len()),
                );
                if !triangles.is_empty() {
                    mesh = mesh.with_triangle_indices(triangles.iter().copied());
                }
                rec.log(entity_path, &mesh)
            }

            Self::MeshFromPath { path } => {
                rec.log_file_from_path(path, Some(entity_path.into()), false)
            }

            Self::Sphere {
                radius,
                color,
                label,
            } => rec.log(
                entity_path,
                &rerun::Points3D::new([[0.0_f32, 0.0, 0.0]])
                    .with_radii([*radius])
                    .with_colors([to_color(*color)])
                    .with_labels([label.as_str()]),
            ),
        }
    }
}

/// The vector of an arrow of the given length: it lies on the `Z` axis.
pub fn arrow_vector(length: f32) -> [f32; 3] {
    [0.0, 0.0, length]
}

fn to_color([r, g, b, a]: Rgba) -> rerun::Color {
    rerun::Color::from_unmultiplied_rgba(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_distinct() {
        let geometries = [
            Geometry::Arrow {
                radius: 0.5,
                length: 5.0,
                color: [100, 0, 50, 255],
                label: "arrow".to_owned(),
            },
            Geometry::floor(),
            Geometry::Capsule {
                radius: 0.5,
                length: 5.0,
                color: [100, 0, 155, 255],
            },
            Geometry::Line {
                from: [-5.0, -2.0, -4.0],
                to: [9.0, 4.0, -5.0],
                color: [100, 0, 155, 255],
                label: "line".to_owned(),
            },
            Geometry::triangle_face([[5.0, 3.0, 1.0], [8.0, 6.0, -2.0], [5.0, 2.0, 3.0]], [70, 30, 130, 255]),
            Geometry::MeshFromPath {
                path: "cube.stl".into(),
            },
            Geometry::Sphere {
                radius: 2.0,
                color: [62, 255, 20, 255],
                label: "sphere".to_owned(),
            },
        ];

        let kinds: Vec<_> = geometries.iter().map(Geometry::kind).collect();
        similar_asserts::assert_eq!(kinds, GeometryKind::ALL.to_vec());
    }

    #[test]
    fn arrow_points_along_z() {
        assert_eq!(arrow_vector(5.0), [0.0, 0.0, 5.0]);
        assert_eq!(arrow_vector(-5.0), [0.0, 0.0, -5.0]);
    }

    #[test]
    fn floor_is_a_flat_grey_box() {
        let Geometry::Box { size, color, label } = Geometry::floor() else {
            panic!("floor should be a box");
        };
        assert_eq!(size, [200.0, 200.0, 0.5]);
        assert_eq!(color, [125, 125, 125, 255]);
        assert_eq!(label, None);
    }

    #[test]
    fn faces() {
        let square = Geometry::square_face(
            [[-4.0, 0.0, 1.0], [2.0, 6.0, 2.0], [3.0, 2.0, 3.0], [5.0, 4.0, 4.0]],
            [25, 50, 130, 255],
        );
        let Geometry::Mesh {
            vertices, triangles, ..
        } = square
        else {
            panic!("square face should be a mesh");
        };
        assert_eq!(vertices.len(), 4);
        assert_eq!(triangles, SQUARE_FACE_TRIANGLES.to_vec());
        for triangle in &triangles {
            assert!(triangle.iter().all(|&index| (index as usize) < vertices.len()));
        }

        let triangle = Geometry::triangle_face(
            [[5.0, 3.0, 1.0], [8.0, 6.0, -2.0], [5.0, 2.0, 3.0]],
            [70, 30, 130, 255],
        );
        let Geometry::Mesh {
            vertices, triangles, ..
        } = triangle
        else {
            panic!("triangle face should be a mesh");
        };
        assert_eq!(vertices.len(), 3);
        assert!(triangles.is_empty());
    }

    #[test]
    fn log_into_memory() {
        let (rec, storage) = rerun::RecordingStreamBuilder::new("gepetto_test_geometry")
            .memory()
            .unwrap();
        storage.take();

        Geometry::Sphere {
            radius: 2.0,
            color: [62, 255, 20, 255],
            label: "sphere".to_owned(),
        }
        .log(&rec, "sphere")
        .unwrap();
        Geometry::square_face(
            [[-4.0, 0.0, 1.0], [2.0, 6.0, 2.0], [3.0, 2.0, 3.0], [5.0, 4.0, 4.0]],
            [25, 50, 130, 255],
        )
        .log(&rec, "square")
        .unwrap();
        Geometry::Line {
            from: [-5.0, -2.0, -4.0],
            to: [9.0, 4.0, -5.0],
            color: [100, 0, 155, 255],
            label: "line".to_owned(),
        }
        .log(&rec, "line")
        .unwrap();

        rec.flush_blocking();
        assert!(!storage.take().is_empty());
    }
}
