//! Renderable entities and the shared shading program handle.

use crate::constants::*;
use crate::geometry::{self, MeshData};
use glam::{EulerRot, Mat4, Quat, Vec3};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, applied X then Y then Z.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }

    /// The scene's spin: `x = -0.1 t`, `y = 0.2 t`.
    pub fn spin(&mut self, elapsed_sec: f32) {
        self.rotation.x = ROTATION_RATE_X * elapsed_sec;
        self.rotation.y = ROTATION_RATE_Y * elapsed_sec;
    }
}

/// Handle to the one shading program every lit entity shares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

#[derive(Clone, Debug)]
pub struct MeshNode {
    pub name: String,
    pub geometry: Rc<MeshData>,
    pub program: Option<ProgramHandle>,
    pub transform: Transform,
}

#[derive(Clone, Debug, Default)]
pub struct GroupNode {
    pub name: String,
    pub transform: Transform,
    pub children: Vec<SceneNode>,
}

/// A node of a loaded hierarchy, tagged by what it can do.
#[derive(Clone, Debug)]
pub enum SceneNode {
    Mesh(MeshNode),
    Group(GroupNode),
    /// Anything that is neither drawable nor a container (lines, points,
    /// empty objects).
    Other { name: String, transform: Transform },
}

impl SceneNode {
    pub fn mesh(name: impl Into<String>, geometry: MeshData, transform: Transform) -> Self {
        SceneNode::Mesh(MeshNode {
            name: name.into(),
            geometry: Rc::new(geometry),
            program: None,
            transform,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            SceneNode::Mesh(m) => &m.name,
            SceneNode::Group(g) => &g.name,
            SceneNode::Other { name, .. } => name,
        }
    }

    pub fn transform(&self) -> &Transform {
        match self {
            SceneNode::Mesh(m) => &m.transform,
            SceneNode::Group(g) => &g.transform,
            SceneNode::Other { transform, .. } => transform,
        }
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        match self {
            SceneNode::Mesh(m) => &mut m.transform,
            SceneNode::Group(g) => &mut g.transform,
            SceneNode::Other { transform, .. } => transform,
        }
    }

    /// Give every `Mesh` in this subtree the shared program. Groups are
    /// descended into; `Other` nodes are left untouched. Returns the number
    /// of meshes assigned.
    pub fn assign_program(&mut self, program: ProgramHandle) -> usize {
        match self {
            SceneNode::Mesh(m) => {
                m.program = Some(program);
                1
            }
            SceneNode::Group(g) => g
                .children
                .iter_mut()
                .map(|c| c.assign_program(program))
                .sum(),
            SceneNode::Other { .. } => 0,
        }
    }

    /// Visit each mesh with its world matrix.
    pub fn visit_meshes(&self, parent: Mat4, f: &mut dyn FnMut(&MeshNode, Mat4)) {
        let world = parent * self.transform().matrix();
        match self {
            SceneNode::Mesh(m) => f(m, world),
            SceneNode::Group(g) => {
                for child in &g.children {
                    child.visit_meshes(world, f);
                }
            }
            SceneNode::Other { .. } => {}
        }
    }

    pub fn mesh_count(&self) -> usize {
        let mut n = 0;
        self.visit_meshes(Mat4::IDENTITY, &mut |_, _| n += 1);
        n
    }
}

/// One mesh ready to draw.
#[derive(Clone, Debug)]
pub struct DrawItem {
    pub geometry: Rc<MeshData>,
    pub model: Mat4,
    pub program: ProgramHandle,
}

/// The statically built entities plus whatever hierarchies have been
/// attached after their fetch resolved.
#[derive(Debug)]
pub struct Scene {
    program: ProgramHandle,
    statics: Vec<SceneNode>,
    loaded: Vec<SceneNode>,
}

impl Scene {
    pub fn new(program: ProgramHandle) -> Self {
        Self {
            program,
            statics: Vec::new(),
            loaded: Vec::new(),
        }
    }

    /// Torus knot on the right, capsule on the left.
    pub fn with_default_objects(program: ProgramHandle) -> Self {
        let mut scene = Self::new(program);
        scene.add_static(SceneNode::mesh(
            "torus_knot",
            geometry::default_torus_knot(),
            Transform::at(Vec3::from_array(TORUS_KNOT_POSITION)),
        ));
        scene.add_static(SceneNode::mesh(
            "capsule",
            geometry::default_capsule(),
            Transform::at(Vec3::from_array(CAPSULE_POSITION)),
        ));
        scene
    }

    pub fn program(&self) -> ProgramHandle {
        self.program
    }

    pub fn add_static(&mut self, mut node: SceneNode) {
        node.assign_program(self.program);
        self.statics.push(node);
    }

    /// Attach a fetched hierarchy, binding its meshes to the shared program.
    pub fn attach_loaded(&mut self, mut node: SceneNode) -> usize {
        let meshes = node.assign_program(self.program);
        log::info!("[scene] attached {} ({} meshes)", node.name(), meshes);
        self.loaded.push(node);
        meshes
    }

    pub fn statics(&self) -> &[SceneNode] {
        &self.statics
    }

    pub fn loaded(&self) -> &[SceneNode] {
        &self.loaded
    }

    /// Apply the time-driven spin to every entity.
    pub fn apply_rotation(&mut self, elapsed_sec: f32) {
        for node in self.loaded.iter_mut().chain(self.statics.iter_mut()) {
            node.transform_mut().spin(elapsed_sec);
        }
    }

    /// Meshes bound to a program, with world matrices.
    pub fn draw_list(&self) -> Vec<DrawItem> {
        let mut out = Vec::new();
        for node in self.statics.iter().chain(self.loaded.iter()) {
            node.visit_meshes(Mat4::IDENTITY, &mut |mesh, model| {
                if let Some(program) = mesh.program {
                    out.push(DrawItem {
                        geometry: Rc::clone(&mesh.geometry),
                        model,
                        program,
                    });
                }
            });
        }
        out
    }
}
