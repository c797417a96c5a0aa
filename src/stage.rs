//! The stage: node arena, tree mutation, and per-frame passes
//!
//! A [`Stage`] owns every node of the scene tree in an arena and exposes
//! the ordered-children operations through ids. Nodes are never destroyed;
//! a body leaves the tree either by plain removal (detached, still alive)
//! or through the pool transfer points [`Stage::recycle`] and
//! [`Stage::restore`], which recycle instead of reallocating.
//!
//! Each frame is one ordered sweep over the tree: gravity, integration,
//! collision resolution, movement clamp (see [`crate::sim::tick`]), then
//! the camera and the caller's render. Pass order is what correctness
//! hangs on; there is no concurrency anywhere in the engine.

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::children::ChildList;
use crate::error::StageError;
use crate::pool::Pool;
use crate::sim::body::Body;
use crate::sim::collision::Obstacle;
use crate::surface::{Color, DrawSurface, Visual};

/// Handle to a node on a [`Stage`].
///
/// Ids are dense indices handed out in spawn order and never reused -
/// recycling reuses *nodes*, not ids - so a stale handle can never alias a
/// different entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A gravity-gated sub-container.
///
/// Groups carry their own child order and a flag deciding whether the
/// gravity pass descends into them at all; everything else about them is
/// the shared [`ChildList`] capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub(crate) children: ChildList,
    pub gravity: bool,
}

impl Group {
    pub fn new(gravity: bool) -> Self {
        Self {
            children: ChildList::new(),
            gravity,
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NodeKind {
    Body(Body),
    Group(Group),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    parent: Option<NodeId>,
    pub kind: NodeKind,
}

impl Node {
    /// The container this node was last added to. Non-owning: the parent's
    /// child list owns the slot, the node only points back.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// The root container and arena for a whole scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Stage {
    /// Create an empty stage with its root group.
    ///
    /// The root's gravity gate starts open: the root pass applies gravity
    /// to every direct child unconditionally.
    pub fn new() -> Self {
        let root = NodeId(0);
        let stage = Self {
            nodes: vec![Node {
                parent: None,
                kind: NodeKind::Group(Group::new(true)),
            }],
            root,
        };
        log::info!("stage created");
        stage
    }

    /// The root group's id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes ever spawned, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // --- spawning -------------------------------------------------------

    /// Put a body on the stage, detached. Attach it with
    /// [`Stage::add_child`].
    pub fn spawn_body(&mut self, body: Body) -> NodeId {
        self.push_node(NodeKind::Body(body))
    }

    /// Put a group on the stage, detached.
    pub fn spawn_group(&mut self, group: Group) -> NodeId {
        self.push_node(NodeKind::Group(group))
    }

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node { parent: None, kind });
        id
    }

    // --- accessors ------------------------------------------------------

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn body(&self, id: NodeId) -> Option<&Body> {
        match self.nodes.get(id.index()).map(|n| &n.kind) {
            Some(NodeKind::Body(body)) => Some(body),
            _ => None,
        }
    }

    pub fn body_mut(&mut self, id: NodeId) -> Option<&mut Body> {
        match self.nodes.get_mut(id.index()).map(|n| &mut n.kind) {
            Some(NodeKind::Body(body)) => Some(body),
            _ => None,
        }
    }

    pub fn group(&self, id: NodeId) -> Option<&Group> {
        match self.nodes.get(id.index()).map(|n| &n.kind) {
            Some(NodeKind::Group(group)) => Some(group),
            _ => None,
        }
    }

    pub fn group_mut(&mut self, id: NodeId) -> Option<&mut Group> {
        match self.nodes.get_mut(id.index()).map(|n| &mut n.kind) {
            Some(NodeKind::Group(group)) => Some(group),
            _ => None,
        }
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.index()).and_then(|n| n.parent)
    }

    fn children(&self, parent: NodeId) -> Result<&ChildList, StageError> {
        self.group(parent)
            .map(|g| &g.children)
            .ok_or(StageError::NoSuchNode(parent))
    }

    fn children_mut(&mut self, parent: NodeId) -> Result<&mut ChildList, StageError> {
        self.group_mut(parent)
            .map(|g| &mut g.children)
            .ok_or(StageError::NoSuchNode(parent))
    }

    // --- tree mutation --------------------------------------------------

    /// Append `child` to `parent`'s child list and set its back-reference.
    ///
    /// This is the only place a parent back-reference is ever written.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), StageError> {
        if self.node(child).is_none() {
            return Err(StageError::NoSuchNode(child));
        }
        self.children_mut(parent)?.push(child);
        self.nodes[child.index()].parent = Some(parent);
        Ok(())
    }

    /// 0-based position of `child` under `parent`.
    pub fn child_index(&self, parent: NodeId, child: NodeId) -> Result<usize, StageError> {
        self.children(parent)?.index_of(child)
    }

    /// Child of `parent` at `index`.
    pub fn child_at(&self, parent: NodeId, index: usize) -> Result<NodeId, StageError> {
        self.children(parent)?.at(index)
    }

    /// Exchange the slots of `a` and `b` under `parent`.
    pub fn swap_children(&mut self, parent: NodeId, a: NodeId, b: NodeId) -> Result<(), StageError> {
        self.children_mut(parent)?.swap(a, b)
    }

    /// Detach `child` from `parent` and return it. The node stays alive on
    /// the stage.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, StageError> {
        let removed = self.children_mut(parent)?.remove(child)?;
        self.nodes[removed.index()].parent = None;
        Ok(removed)
    }

    /// Detach the child at `index` under `parent` and return it.
    pub fn remove_child_at(&mut self, parent: NodeId, index: usize) -> Result<NodeId, StageError> {
        let removed = self.children_mut(parent)?.remove_at(index)?;
        self.nodes[removed.index()].parent = None;
        Ok(removed)
    }

    /// Move `child` up to `n` slots toward the tail of `parent`'s order.
    pub fn raise_child(&mut self, parent: NodeId, child: NodeId, n: usize) -> Result<(), StageError> {
        self.children_mut(parent)?.raise(child, n)
    }

    /// Move `child` up to `n` slots toward the head of `parent`'s order.
    pub fn lower_child(&mut self, parent: NodeId, child: NodeId, n: usize) -> Result<(), StageError> {
        self.children_mut(parent)?.lower(child, n)
    }

    // --- frame passes ---------------------------------------------------

    /// Gravity pass: depth-first from the root. A group whose gravity gate
    /// is closed prunes its whole subtree; each body applies its own
    /// gravity rule.
    pub fn apply_gravity(&mut self, multiplier: f32) {
        self.apply_gravity_node(self.root, multiplier);
    }

    fn apply_gravity_node(&mut self, id: NodeId, multiplier: f32) {
        let child_ids = match self.nodes.get_mut(id.index()).map(|n| &mut n.kind) {
            Some(NodeKind::Body(body)) => {
                body.apply_gravity(multiplier);
                return;
            }
            Some(NodeKind::Group(group)) => {
                if !group.gravity {
                    return;
                }
                group.children.iter().collect::<Vec<_>>()
            }
            None => return,
        };
        for child in child_ids {
            self.apply_gravity_node(child, multiplier);
        }
    }

    /// Integration pass: `position += velocity * dt` for every body in the
    /// tree. `None` means the unit step `dt = 1.0`; hosts normally pass
    /// real elapsed seconds.
    pub fn update_positions(&mut self, dt: Option<f32>) {
        let dt = dt.unwrap_or(1.0);
        self.update_positions_node(self.root, dt);
    }

    fn update_positions_node(&mut self, id: NodeId, dt: f32) {
        let child_ids = match self.nodes.get_mut(id.index()).map(|n| &mut n.kind) {
            Some(NodeKind::Body(body)) => {
                body.integrate(dt);
                return;
            }
            Some(NodeKind::Group(group)) => group.children.iter().collect::<Vec<_>>(),
            None => return,
        };
        for child in child_ids {
            self.update_positions_node(child, dt);
        }
    }

    /// Collision pass: resolve every collidable body under `scope` against
    /// the candidate set, walking each child list in reverse order and
    /// recursing into nested groups. An empty candidate set is a no-op,
    /// never an error.
    pub fn resolve_collisions(
        &mut self,
        scope: NodeId,
        candidates: &[NodeId],
    ) -> Result<(), StageError> {
        if self.node(scope).is_none() {
            return Err(StageError::NoSuchNode(scope));
        }
        if candidates.is_empty() {
            return Ok(());
        }
        self.resolve_collisions_node(scope, candidates);
        Ok(())
    }

    fn resolve_collisions_node(&mut self, id: NodeId, candidates: &[NodeId]) {
        // None marks a body scope; a group yields its children reversed
        let child_ids: Option<Vec<NodeId>> = match self.nodes.get(id.index()).map(|n| &n.kind) {
            Some(NodeKind::Body(_)) => None,
            Some(NodeKind::Group(group)) => Some(group.children.iter().rev().collect()),
            None => return,
        };
        match child_ids {
            None => self.collide_body(id, candidates),
            Some(child_ids) => {
                for child in child_ids {
                    self.resolve_collisions_node(child, candidates);
                }
            }
        }
    }

    /// Resolve one body against the candidate set.
    ///
    /// Candidates are snapshotted up front (position + collision box of
    /// every collidable candidate, the body itself excluded); the body
    /// then sweeps the snapshot in reverse with no re-testing. Candidates
    /// that are groups, dead ids, or non-collidable are skipped with their
    /// relative order preserved.
    fn collide_body(&mut self, id: NodeId, candidates: &[NodeId]) {
        let obstacles: Vec<Obstacle> = candidates
            .iter()
            .filter(|&&candidate| candidate != id)
            .filter_map(|&candidate| self.body(candidate))
            .filter(|body| body.collide)
            .map(|body| Obstacle {
                position: body.position.clone(),
                collider: body.collider,
            })
            .collect();

        if let Some(body) = self.body_mut(id) {
            body.apply_collision(&obstacles);
        }
    }

    /// Movement clamp pass: zero every velocity component still pointing
    /// into a contact flagged by the collision pass. Runs every frame
    /// after collision resolution.
    pub fn update_movement(&mut self) {
        self.update_movement_node(self.root);
    }

    fn update_movement_node(&mut self, id: NodeId) {
        let child_ids = match self.nodes.get_mut(id.index()).map(|n| &mut n.kind) {
            Some(NodeKind::Body(body)) => {
                body.update_movement();
                return;
            }
            Some(NodeKind::Group(group)) => group.children.iter().collect::<Vec<_>>(),
            None => return,
        };
        for child in child_ids {
            self.update_movement_node(child);
        }
    }

    // --- pool transfer points -------------------------------------------

    /// Detach `id` from its parent (if any) and hand it to the pool.
    ///
    /// A pool at capacity rejects the transfer with `Ok(false)` and the
    /// tree is left untouched. Returns `Ok(true)` once the node is held by
    /// the pool and nothing else.
    pub fn recycle(&mut self, pool: &mut Pool<NodeId>, id: NodeId) -> Result<bool, StageError> {
        let parent = self.node(id).ok_or(StageError::NoSuchNode(id))?.parent;
        match parent {
            Some(parent) => {
                let list = self.children_mut(parent)?;
                let moved = pool.adopt(&id, list.ids_mut())?;
                if moved {
                    self.nodes[id.index()].parent = None;
                } else {
                    log::warn!("pool at capacity, node {id:?} stays in the tree");
                }
                Ok(moved)
            }
            None => Ok(pool.insert(id).is_ok()),
        }
    }

    /// Extract the oldest pooled node and attach it under `parent`.
    /// `Ok(None)` when the pool is empty.
    pub fn restore(
        &mut self,
        pool: &mut Pool<NodeId>,
        parent: NodeId,
    ) -> Result<Option<NodeId>, StageError> {
        let Some(id) = pool.extract() else {
            return Ok(None);
        };
        self.add_child(parent, id)?;
        Ok(Some(id))
    }

    // --- rendering ------------------------------------------------------

    /// Clear the surface and draw the whole tree depth-first in child
    /// order, offset by the camera position. The camera and surface are
    /// explicit parameters on purpose: there is no ambient "current
    /// camera" anywhere in the engine.
    pub fn render(&self, surface: &mut dyn DrawSurface, camera: &Camera) {
        surface.clear();
        self.render_node(self.root, surface, camera);
    }

    fn render_node(&self, id: NodeId, surface: &mut dyn DrawSurface, camera: &Camera) {
        match self.nodes.get(id.index()).map(|n| &n.kind) {
            Some(NodeKind::Body(body)) => Self::render_body(body, surface, camera),
            Some(NodeKind::Group(group)) => {
                for child in group.children.iter() {
                    self.render_node(child, surface, camera);
                }
            }
            None => {}
        }
    }

    fn render_body(body: &Body, surface: &mut dyn DrawSurface, camera: &Camera) {
        let x = body.position.x - body.extent.half_width() - camera.position.x;
        let y = body.position.y - body.extent.half_height() - camera.position.y;
        match &body.visual {
            Visual::Rect { color } => {
                surface.fill_rect(x, y, body.extent.width, body.extent.height, *color);
            }
            Visual::Image { texture } => {
                surface.draw_image(*texture, x, y, body.extent.width, body.extent.height);
            }
            // pixel blits land in surface space, ignoring the camera
            Visual::Pixels { buffer } => {
                surface.put_pixels(buffer, body.position.x, body.position.y);
            }
            Visual::None => {}
        }
    }

    /// Outline every body's collision box, offset by the camera position.
    pub fn render_bounding_boxes(&self, surface: &mut dyn DrawSurface, camera: &Camera) {
        self.render_bounding_boxes_node(self.root, surface, camera);
    }

    fn render_bounding_boxes_node(
        &self,
        id: NodeId,
        surface: &mut dyn DrawSurface,
        camera: &Camera,
    ) {
        match self.nodes.get(id.index()).map(|n| &n.kind) {
            Some(NodeKind::Body(body)) => {
                surface.stroke_rect(
                    body.position.x - body.collider.half_width() - camera.position.x,
                    body.position.y - body.collider.half_height() - camera.position.y,
                    body.collider.width,
                    body.collider.height,
                    Color::DEBUG_BOX,
                );
            }
            Some(NodeKind::Group(group)) => {
                for child in group.children.iter() {
                    self.render_bounding_boxes_node(child, surface, camera);
                }
            }
            None => {}
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{Camera, CameraOptions};
    use crate::surface::recording::{DrawCall, RecordingSurface};

    fn stage_with_bodies(n: usize) -> (Stage, Vec<NodeId>) {
        let mut stage = Stage::new();
        let root = stage.root();
        let ids = (0..n)
            .map(|_| {
                let id = stage.spawn_body(Body::invisible(4.0, 4.0));
                stage.add_child(root, id).unwrap();
                id
            })
            .collect();
        (stage, ids)
    }

    #[test]
    fn add_child_sets_the_back_reference() {
        let mut stage = Stage::new();
        let root = stage.root();
        let id = stage.spawn_body(Body::invisible(2.0, 2.0));
        assert_eq!(stage.parent_of(id), None);

        stage.add_child(root, id).unwrap();
        assert_eq!(stage.parent_of(id), Some(root));
        assert_eq!(stage.child_index(root, id).unwrap(), 0);
    }

    #[test]
    fn insertion_order_is_the_child_order() {
        let (stage, ids) = stage_with_bodies(4);
        let root = stage.root();
        for (rank, &id) in ids.iter().enumerate() {
            assert_eq!(stage.child_index(root, id).unwrap(), rank);
            assert_eq!(stage.child_at(root, rank).unwrap(), id);
        }
    }

    #[test]
    fn remove_child_detaches_but_keeps_the_node_alive() {
        let (mut stage, ids) = stage_with_bodies(2);
        let root = stage.root();
        let removed = stage.remove_child(root, ids[0]).unwrap();
        assert_eq!(removed, ids[0]);
        assert_eq!(stage.parent_of(ids[0]), None);
        assert!(stage.body(ids[0]).is_some());
        assert_eq!(stage.child_index(root, ids[1]).unwrap(), 0);
    }

    #[test]
    fn tree_ops_against_a_body_parent_fail() {
        let (mut stage, ids) = stage_with_bodies(2);
        assert_eq!(
            stage.add_child(ids[0], ids[1]),
            Err(StageError::NoSuchNode(ids[0]))
        );
    }

    #[test]
    fn gravity_pass_respects_the_group_gate() {
        let mut stage = Stage::new();
        let root = stage.root();

        let mut falling = Body::invisible(2.0, 2.0);
        falling.gravity = true;
        let loose = stage.spawn_body(falling.clone());
        stage.add_child(root, loose).unwrap();

        let closed = stage.spawn_group(Group::new(false));
        stage.add_child(root, closed).unwrap();
        let sheltered = stage.spawn_body(falling);
        stage.add_child(closed, sheltered).unwrap();

        stage.apply_gravity(1.0);

        assert_eq!(stage.body(loose).unwrap().velocity.y, 10.0);
        // the closed gate prunes the whole subtree
        assert_eq!(stage.body(sheltered).unwrap().velocity.y, 0.0);
    }

    #[test]
    fn gravity_descends_into_open_groups() {
        let mut stage = Stage::new();
        let root = stage.root();
        let open = stage.spawn_group(Group::new(true));
        stage.add_child(root, open).unwrap();
        let mut falling = Body::invisible(2.0, 2.0);
        falling.gravity = true;
        let id = stage.spawn_body(falling);
        stage.add_child(open, id).unwrap();

        stage.apply_gravity(1.0);
        assert_eq!(stage.body(id).unwrap().velocity.y, 10.0);
    }

    #[test]
    fn update_positions_defaults_to_the_unit_step() {
        let (mut stage, ids) = stage_with_bodies(1);
        stage.body_mut(ids[0]).unwrap().velocity.set(3.0, -2.0);
        stage.update_positions(None);
        let body = stage.body(ids[0]).unwrap();
        assert_eq!(body.position.x, 3.0);
        assert_eq!(body.position.y, -2.0);
    }

    #[test]
    fn collision_pass_skips_non_collidable_candidates() {
        let (mut stage, ids) = stage_with_bodies(2);
        let root = stage.root();
        {
            let mover = stage.body_mut(ids[0]).unwrap();
            mover.collide = true;
            mover.velocity.set(0.0, 5.0);
        }
        // ids[1] overlaps but is not collidable, so nothing resolves
        stage.resolve_collisions(root, &[ids[1]]).unwrap();
        assert!(!stage.body(ids[0]).unwrap().hit.any());
    }

    #[test]
    fn collision_pass_excludes_the_body_itself() {
        let (mut stage, ids) = stage_with_bodies(1);
        let root = stage.root();
        {
            let body = stage.body_mut(ids[0]).unwrap();
            body.collide = true;
            body.velocity.set(0.0, 5.0);
        }
        stage.resolve_collisions(root, &[ids[0]]).unwrap();
        let body = stage.body(ids[0]).unwrap();
        assert!(!body.hit.any());
        assert_eq!(body.velocity.y, 5.0);
    }

    #[test]
    fn empty_candidate_set_is_a_no_op() {
        let (mut stage, _) = stage_with_bodies(3);
        let root = stage.root();
        assert_eq!(stage.resolve_collisions(root, &[]), Ok(()));
    }

    #[test]
    fn recycle_and_restore_transfer_exclusive_ownership() {
        let (mut stage, ids) = stage_with_bodies(2);
        let root = stage.root();
        let mut pool: Pool<NodeId> = Pool::new(4);

        assert_eq!(stage.recycle(&mut pool, ids[0]), Ok(true));
        assert_eq!(stage.parent_of(ids[0]), None);
        assert_eq!(stage.child_index(root, ids[0]), Err(StageError::NotAChild(ids[0])));
        assert_eq!(pool.len(), 1);

        let back = stage.restore(&mut pool, root).unwrap();
        assert_eq!(back, Some(ids[0]));
        assert_eq!(stage.parent_of(ids[0]), Some(root));
        assert!(pool.is_empty());
        // re-attached at the tail, after ids[1]
        assert_eq!(stage.child_index(root, ids[0]).unwrap(), 1);
    }

    #[test]
    fn recycle_into_a_full_pool_leaves_the_tree_alone() {
        let (mut stage, ids) = stage_with_bodies(2);
        let root = stage.root();
        let mut pool: Pool<NodeId> = Pool::new(1);
        assert_eq!(stage.recycle(&mut pool, ids[0]), Ok(true));
        assert_eq!(stage.recycle(&mut pool, ids[1]), Ok(false));
        assert_eq!(stage.parent_of(ids[1]), Some(root));
        assert_eq!(stage.child_index(root, ids[1]).unwrap(), 0);
    }

    #[test]
    fn render_walks_children_in_z_order_with_the_camera_offset() {
        let mut stage = Stage::new();
        let root = stage.root();

        let mut first = Body::rect(10.0, 10.0, Color::BLACK);
        first.position.set(100.0, 50.0);
        let first = stage.spawn_body(first);
        stage.add_child(root, first).unwrap();

        let mut second = Body::rect(10.0, 10.0, Color::BLACK);
        second.position.set(200.0, 50.0);
        let second = stage.spawn_body(second);
        stage.add_child(root, second).unwrap();

        let mut camera = Camera::new(CameraOptions::default());
        camera.position.set(20.0, 5.0);

        let mut surface = RecordingSurface::default();
        stage.render(&mut surface, &camera);

        assert_eq!(
            surface.calls,
            vec![
                DrawCall::Clear,
                DrawCall::FillRect { x: 75.0, y: 40.0, w: 10.0, h: 10.0 },
                DrawCall::FillRect { x: 175.0, y: 40.0, w: 10.0, h: 10.0 },
            ]
        );
    }

    #[test]
    fn raising_a_child_reorders_rendering() {
        let mut stage = Stage::new();
        let root = stage.root();
        let mut a = Body::rect(2.0, 2.0, Color::BLACK);
        a.position.set(10.0, 0.0);
        let a = stage.spawn_body(a);
        let mut b = Body::rect(2.0, 2.0, Color::BLACK);
        b.position.set(20.0, 0.0);
        let b = stage.spawn_body(b);
        stage.add_child(root, a).unwrap();
        stage.add_child(root, b).unwrap();

        stage.raise_child(root, a, 1).unwrap();

        let camera = Camera::new(CameraOptions::default());
        let mut surface = RecordingSurface::default();
        stage.render(&mut surface, &camera);
        let xs: Vec<f32> = surface
            .calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::FillRect { x, .. } => Some(*x),
                _ => None,
            })
            .collect();
        assert_eq!(xs, vec![19.0, 9.0]);
    }

    #[test]
    fn pixel_visuals_ignore_the_camera_offset() {
        let mut stage = Stage::new();
        let root = stage.root();
        let buffer = crate::surface::PixelBuffer {
            width: 2,
            height: 2,
            data: vec![0; 16],
        };
        let mut body = Body::pixels(buffer);
        body.position.set(30.0, 40.0);
        let id = stage.spawn_body(body);
        stage.add_child(root, id).unwrap();

        let mut camera = Camera::new(CameraOptions::default());
        camera.position.set(100.0, 100.0);
        let mut surface = RecordingSurface::default();
        stage.render(&mut surface, &camera);

        assert_eq!(
            surface.calls,
            vec![DrawCall::Clear, DrawCall::PutPixels { x: 30.0, y: 40.0 }]
        );
    }

    #[test]
    fn bounding_boxes_outline_the_collider_not_the_extent() {
        let mut stage = Stage::new();
        let root = stage.root();
        let mut body = Body::rect(10.0, 10.0, Color::BLACK);
        body.collider = crate::sim::Size::new(4.0, 4.0);
        body.position.set(0.0, 0.0);
        let id = stage.spawn_body(body);
        stage.add_child(root, id).unwrap();

        let camera = Camera::new(CameraOptions::default());
        let mut surface = RecordingSurface::default();
        stage.render_bounding_boxes(&mut surface, &camera);

        assert_eq!(
            surface.calls,
            vec![DrawCall::StrokeRect { x: -2.0, y: -2.0, w: 4.0, h: 4.0 }]
        );
    }

    #[test]
    fn snapshot_round_trip_preserves_order_and_state() {
        let (mut stage, ids) = stage_with_bodies(3);
        let root = stage.root();
        stage.body_mut(ids[1]).unwrap().position.set(12.0, -7.0);
        stage.swap_children(root, ids[0], ids[2]).unwrap();

        let json = serde_json::to_string(&stage).unwrap();
        let restored: Stage = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.child_index(root, ids[2]).unwrap(), 0);
        assert_eq!(restored.child_index(root, ids[0]).unwrap(), 2);
        let body = restored.body(ids[1]).unwrap();
        assert_eq!(body.position.x, 12.0);
        assert_eq!(body.position.y, -7.0);
    }
}
