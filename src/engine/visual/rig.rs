// Body + head quad rig driven through the `SpriteTarget` interface

use glam::{Vec2, Vec3};
use log::debug;

use super::atlas::{Cell, SpriteSheetConfig};
use super::quad::QuadMesh;

/// Receiver of sprite state produced by the facing animator.
///
/// Implementations re-texture and reposition their quads; they never decide
/// which cells to show.
pub trait SpriteTarget {
    /// Whether the target can currently accept updates.
    /// Callers skip all updates while this is false.
    fn is_available(&self) -> bool {
        true
    }

    fn set_body_cell(&mut self, cell: Cell);

    fn set_head_cell(&mut self, cell: Cell);

    /// Mirror both quads horizontally
    fn set_flipped(&mut self, flipped: bool);

    /// Local position of the head quad relative to the body
    fn set_head_offset(&mut self, offset: Vec3);

    /// Vertical offset applied to the whole visual container (walk bounce, breathing)
    fn set_body_bob(&mut self, _offset: f32) {}
}

/// Layout of a character's quads
#[derive(Debug, Clone, PartialEq)]
pub struct QuadRigConfig {
    pub sheet: SpriteSheetConfig,
    pub body_size: Vec2,
    pub head_size: Vec2,
    /// Cells shown before the animator takes over
    pub body_cell: Cell,
    pub head_cell: Cell,
    pub head_offset: Vec3,
}

impl QuadRigConfig {
    /// 1x1 body and head on the standard 2x3 sheet, facing south
    pub fn standard_character() -> Self {
        Self {
            sheet: SpriteSheetConfig::standard_character(),
            body_size: Vec2::ONE,
            head_size: Vec2::ONE,
            body_cell: Cell::new(0, 0),
            head_cell: Cell::new(1, 0),
            head_offset: Vec3::new(0.0, 0.8, -0.1),
        }
    }
}

impl Default for QuadRigConfig {
    fn default() -> Self {
        Self::standard_character()
    }
}

/// Two CPU-side quads (body and head) sharing one spritesheet.
///
/// Meshes only exist between `build` and `teardown`. Setters called while the
/// meshes are missing still record the requested state, which is applied the
/// next time the rig is built.
#[derive(Debug, Clone)]
pub struct QuadRig {
    config: QuadRigConfig,
    body: Option<QuadMesh>,
    head: Option<QuadMesh>,
    body_cell: Cell,
    head_cell: Cell,
    head_offset: Vec3,
    flipped: bool,
    bob: f32,
}

impl QuadRig {
    /// Create an unbuilt rig
    pub fn new(config: QuadRigConfig) -> Self {
        Self {
            body_cell: config.body_cell,
            head_cell: config.head_cell,
            head_offset: config.head_offset,
            config,
            body: None,
            head: None,
            flipped: false,
            bob: 0.0,
        }
    }

    /// Create and build a rig in one go
    pub fn built(config: QuadRigConfig) -> Self {
        let mut rig = Self::new(config);
        rig.build();
        rig
    }

    /// Create the meshes from the recorded state
    pub fn build(&mut self) {
        let sheet = self.config.sheet;

        let mut body = QuadMesh::new(self.config.body_size, sheet.cell_uvs(self.body_cell));
        let mut head = QuadMesh::new(self.config.head_size, sheet.cell_uvs(self.head_cell));
        body.set_flipped(self.flipped);
        head.set_flipped(self.flipped);

        self.body = Some(body);
        self.head = Some(head);
        debug!(
            "Quad rig built: body {} head {} flipped {}",
            self.body_cell, self.head_cell, self.flipped
        );
    }

    /// Drop the meshes; the rig becomes unavailable until rebuilt
    pub fn teardown(&mut self) {
        self.body = None;
        self.head = None;
    }

    #[allow(dead_code)]
    pub fn body_mesh(&self) -> Option<&QuadMesh> {
        self.body.as_ref()
    }

    #[allow(dead_code)]
    pub fn head_mesh(&self) -> Option<&QuadMesh> {
        self.head.as_ref()
    }

    pub fn body_cell(&self) -> Cell {
        self.body_cell
    }

    pub fn head_cell(&self) -> Cell {
        self.head_cell
    }

    #[allow(dead_code)]
    pub fn head_offset(&self) -> Vec3 {
        self.head_offset
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn bob(&self) -> f32 {
        self.bob
    }

    /// Local position of the visual container (body origin)
    pub fn body_position(&self) -> Vec3 {
        Vec3::new(0.0, self.bob, 0.0)
    }

    /// Local position of the head quad
    pub fn head_position(&self) -> Vec3 {
        self.body_position() + self.head_offset
    }

    #[allow(dead_code)]
    pub fn sheet(&self) -> &SpriteSheetConfig {
        &self.config.sheet
    }
}

impl SpriteTarget for QuadRig {
    fn is_available(&self) -> bool {
        self.body.is_some() && self.head.is_some()
    }

    fn set_body_cell(&mut self, cell: Cell) {
        self.body_cell = cell;
        let uvs = self.config.sheet.cell_uvs(cell);
        if let Some(body) = self.body.as_mut() {
            body.set_uvs(uvs);
        }
    }

    fn set_head_cell(&mut self, cell: Cell) {
        self.head_cell = cell;
        let uvs = self.config.sheet.cell_uvs(cell);
        if let Some(head) = self.head.as_mut() {
            head.set_uvs(uvs);
        }
    }

    fn set_flipped(&mut self, flipped: bool) {
        if self.flipped == flipped {
            return;
        }
        self.flipped = flipped;
        for mesh in [self.body.as_mut(), self.head.as_mut()].into_iter().flatten() {
            mesh.set_flipped(flipped);
        }
    }

    fn set_head_offset(&mut self, offset: Vec3) {
        self.head_offset = offset;
    }

    fn set_body_bob(&mut self, offset: f32) {
        self.bob = offset;
    }
}
