use crate::forces::{
    Collision, CollisionHandler, Detection, DestructiveCollision, Drag, ForceGenerator,
    NewtonianGravity, PhysicsCollision, Spring, WrappingGravity,
};
use crate::objects::body::Body;

use super::body_set::{BodyId, BodySet};

/// A registered force generator together with the bodies it depends on.
///
/// When any of those bodies is removed the entry is dropped, which drops the
/// generator and everything it captured.
pub struct ForceEntry {
    generator: Box<dyn ForceGenerator>,
    bodies: Vec<BodyId>,
}

impl ForceEntry {
    /// Bodies whose removal tears this entry down.
    pub fn bodies(&self) -> &[BodyId] {
        &self.bodies
    }
}

/// Owns every body and force generator and advances them in lockstep.
pub struct Scene {
    bodies: BodySet,
    forces: Vec<ForceEntry>,
}

impl Scene {
    /// Most bodies a single force entry may depend on.
    pub const MAX_ENTRY_BODIES: usize = 2;

    /// Creates an empty scene.
    pub fn new() -> Self {
        Self {
            bodies: BodySet::new(),
            forces: Vec::new(),
        }
    }

    /// Adds a body to the end of the scene and returns its handle.
    pub fn add_body(&mut self, body: Body) -> BodyId {
        self.bodies.insert(body)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Body at `index` in insertion order. Panics if out of bounds.
    pub fn body(&self, index: usize) -> &Body {
        assert!(
            index < self.bodies.len(),
            "Body index {} out of bounds for scene with {} bodies",
            index,
            self.bodies.len()
        );
        self.bodies.at(index)
    }

    /// Body at `index` in insertion order. Panics if out of bounds.
    pub fn body_mut(&mut self, index: usize) -> &mut Body {
        assert!(
            index < self.bodies.len(),
            "Body index {} out of bounds for scene with {} bodies",
            index,
            self.bodies.len()
        );
        self.bodies.at_mut(index)
    }

    /// Looks a body up by handle. Returns `None` once it has been reaped.
    pub fn body_by_id(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id)
    }

    pub fn body_by_id_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id)
    }

    pub fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.index_of(id)
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.iter()
    }

    pub fn bodies_mut(&mut self) -> impl Iterator<Item = &mut Body> + '_ {
        self.bodies.iter_mut()
    }

    /// The underlying body collection, as force generators see it.
    pub fn body_set(&self) -> &BodySet {
        &self.bodies
    }

    pub fn force_count(&self) -> usize {
        self.forces.len()
    }

    pub fn forces(&self) -> &[ForceEntry] {
        &self.forces
    }

    /// Registers a generator to run once per tick.
    ///
    /// `bodies` lists the bodies (at most two) whose removal should tear the
    /// generator down. Panics if there are more than two, or if any of them is
    /// not in this scene.
    pub fn add_force_creator<G>(&mut self, generator: G, bodies: &[BodyId])
    where
        G: ForceGenerator + 'static,
    {
        assert!(
            bodies.len() <= Self::MAX_ENTRY_BODIES,
            "A force entry can depend on at most {} bodies, got {}",
            Self::MAX_ENTRY_BODIES,
            bodies.len()
        );
        for &id in bodies {
            assert!(self.bodies.contains(id), "{:?} is not in this scene", id);
        }

        self.forces.push(ForceEntry {
            generator: Box::new(generator),
            bodies: bodies.to_vec(),
        });
    }

    /// Mutual inverse-square attraction between `body_a` and `body_b`.
    pub fn add_newtonian_gravity(&mut self, g: f64, body_a: BodyId, body_b: BodyId) {
        self.add_force_creator(NewtonianGravity::new(g, body_a, body_b), &[body_a, body_b]);
    }

    /// Gravity along the shortest path on a `width` x `height` torus.
    pub fn add_wrapping_gravity(
        &mut self,
        g: f64,
        body_a: BodyId,
        body_b: BodyId,
        width: f64,
        height: f64,
    ) {
        self.add_force_creator(
            WrappingGravity::new(g, body_a, body_b, width, height),
            &[body_a, body_b],
        );
    }

    pub fn add_spring(&mut self, k: f64, body_a: BodyId, body_b: BodyId) {
        self.add_force_creator(Spring::new(k, body_a, body_b), &[body_a, body_b]);
    }

    pub fn add_drag(&mut self, gamma: f64, body: BodyId) {
        self.add_force_creator(Drag::new(gamma, body), &[body]);
    }

    /// Calls `handler` whenever the outlines of the two bodies overlap.
    pub fn add_collision<H>(&mut self, body_a: BodyId, body_b: BodyId, handler: H)
    where
        H: CollisionHandler + 'static,
    {
        self.add_force_creator(Collision::new(body_a, body_b, handler), &[body_a, body_b]);
    }

    /// Like [`Scene::add_collision`], treating both bodies as circles of their radius.
    pub fn add_circle_collision<H>(&mut self, body_a: BodyId, body_b: BodyId, handler: H)
    where
        H: CollisionHandler + 'static,
    {
        self.add_force_creator(
            Collision::new(body_a, body_b, handler).with_detection(Detection::Circle),
            &[body_a, body_b],
        );
    }

    /// Removes both bodies when they touch.
    pub fn add_destructive_collision(&mut self, body_a: BodyId, body_b: BodyId) {
        self.add_collision(body_a, body_b, DestructiveCollision);
    }

    /// Bounces the bodies off each other with the given elasticity.
    pub fn add_physics_collision(&mut self, elasticity: f64, body_a: BodyId, body_b: BodyId) {
        self.add_collision(body_a, body_b, PhysicsCollision::new(elasticity));
    }

    /// Advances the simulation by one time step `dt`.
    ///
    /// Runs every force generator in registration order, then drops entries
    /// that depend on removed bodies, then drops removed bodies and
    /// integrates the rest. A body removed during this tick never moves again.
    pub fn tick(&mut self, dt: f64) {
        log::trace!(
            "tick dt={}: {} bodies, {} forces",
            dt,
            self.bodies.len(),
            self.forces.len()
        );

        // 1. Apply forces
        for entry in self.forces.iter_mut() {
            entry.generator.apply(&mut self.bodies);
        }

        // 2. Prune entries whose bodies are going away
        let before = self.forces.len();
        let bodies = &self.bodies;
        self.forces.retain(|entry| !entry.bodies.iter().any(|&id| bodies.is_gone(id)));
        let pruned = before - self.forces.len();
        if pruned > 0 {
            log::debug!("pruned {} force entries", pruned);
        }

        // 3. Reap removed bodies and integrate the survivors
        let reaped = self.bodies.reap_and_tick(dt);
        if reaped > 0 {
            log::debug!("reaped {} bodies", reaped);
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RgbColor;
    use crate::math::vec2::Vec2;
    use crate::shapes::square;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    const EPSILON: f64 = 1e-9;

    struct DropCounter(Rc<Cell<usize>>);

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn body_at(x: f64, y: f64) -> Body {
        let mut body = Body::new(square(10.0), 1.0, RgbColor::WHITE);
        body.set_centroid(Vec2::new(x, y));
        body
    }

    #[test]
    fn test_scene_new() {
        let scene = Scene::new();
        assert_eq!(scene.body_count(), 0);
        assert_eq!(scene.force_count(), 0);
        assert_eq!(scene.bodies().count(), 0);
    }

    #[test]
    fn test_add_body() {
        let mut scene = Scene::new();
        let a = scene.add_body(body_at(1.0, 0.0));
        let b = scene.add_body(body_at(2.0, 0.0));
        assert_eq!(scene.body_count(), 2);
        assert_eq!(scene.index_of(a), Some(0));
        assert_eq!(scene.index_of(b), Some(1));
        assert_eq!(scene.body(1).centroid(), Vec2::new(2.0, 0.0));
        assert_eq!(scene.body_by_id(a).unwrap().centroid(), Vec2::new(1.0, 0.0));

        scene.body_mut(0).set_velocity(Vec2::new(5.0, 0.0));
        assert_eq!(scene.body_by_id(a).unwrap().velocity(), Vec2::new(5.0, 0.0));
    }

    #[test]
    #[should_panic]
    fn test_body_invalid_index_panics() {
        let mut scene = Scene::new();
        scene.add_body(body_at(0.0, 0.0));
        scene.body(1);
    }

    #[test]
    fn test_tick_moves_bodies() {
        let mut scene = Scene::new();
        let id = scene.add_body(body_at(0.0, 0.0));
        scene.body_by_id_mut(id).unwrap().set_velocity(Vec2::new(2.0, -1.0));
        scene.tick(0.5);
        let centroid = scene.body(0).centroid();
        assert!((centroid.x - 1.0).abs() < EPSILON);
        assert!((centroid.y + 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_forces_run_in_registration_order() {
        let mut scene = Scene::new();
        scene.add_body(body_at(0.0, 0.0));
        let log = Rc::new(RefCell::new(Vec::new()));
        for name in ["first", "second", "third"] {
            let log = log.clone();
            scene.add_force_creator(move |_: &mut BodySet| log.borrow_mut().push(name), &[]);
        }
        scene.tick(0.1);
        scene.tick(0.1);
        assert_eq!(
            *log.borrow(),
            vec!["first", "second", "third", "first", "second", "third"]
        );
        assert_eq!(scene.force_count(), 3);
    }

    #[test]
    fn test_gravity_pulls_bodies_together() {
        let mut scene = Scene::new();
        let a = scene.add_body(body_at(0.0, 0.0));
        let b = scene.add_body(body_at(100.0, 0.0));
        scene.add_newtonian_gravity(1000.0, a, b);
        for _ in 0..10 {
            scene.tick(0.1);
        }
        assert!(scene.body(0).centroid().x > 0.0);
        assert!(scene.body(1).centroid().x < 100.0);
        // Equal masses move symmetrically
        let midpoint = (scene.body(0).centroid().x + scene.body(1).centroid().x) / 2.0;
        assert!((midpoint - 50.0).abs() < EPSILON);
    }

    #[test]
    fn test_removed_body_entry_pruned_and_state_dropped_once() {
        let mut scene = Scene::new();
        let a = scene.add_body(body_at(0.0, 0.0));
        let drops = Rc::new(Cell::new(0));
        let state = DropCounter(drops.clone());
        let calls = Rc::new(Cell::new(0));
        let calls_in = calls.clone();
        scene.add_force_creator(
            move |_: &mut BodySet| {
                let _keep = &state;
                calls_in.set(calls_in.get() + 1);
            },
            &[a],
        );

        scene.body_mut(0).remove();
        scene.tick(0.1);
        assert_eq!(scene.force_count(), 0);
        assert_eq!(scene.body_count(), 0);
        assert_eq!(drops.get(), 1);
        // Still ran in the tick the body was removed
        assert_eq!(calls.get(), 1);

        scene.tick(0.1);
        drop(scene);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_removed_body_force_is_discarded() {
        let mut scene = Scene::new();
        let a = scene.add_body(body_at(0.0, 0.0));
        let b = scene.add_body(body_at(50.0, 0.0));
        scene.add_force_creator(
            move |bodies: &mut BodySet| {
                if let Some(body) = bodies.get_mut(a) {
                    body.add_force(Vec2::new(1e6, 0.0));
                    body.remove();
                }
            },
            &[],
        );
        scene.tick(1.0);
        assert!(scene.body_by_id(a).is_none());
        assert_eq!(scene.body_count(), 1);
        assert_eq!(scene.index_of(b), Some(0));
        assert_eq!(scene.force_count(), 1);
    }

    #[test]
    fn test_destructive_collision_reaps_both() {
        let mut scene = Scene::new();
        let a = scene.add_body(body_at(0.0, 0.0));
        let b = scene.add_body(body_at(5.0, 0.0));
        let c = scene.add_body(body_at(100.0, 0.0));
        scene.add_destructive_collision(a, b);
        scene.add_drag(0.1, b);
        scene.add_drag(0.1, c);

        scene.tick(0.1);
        assert_eq!(scene.body_count(), 1);
        assert_eq!(scene.index_of(c), Some(0));
        assert_eq!(scene.force_count(), 1);
        assert_eq!(scene.forces()[0].bodies(), &[c]);
    }

    #[test]
    fn test_physics_collision_swaps_velocities() {
        let mut scene = Scene::new();
        let a = scene.add_body(body_at(0.0, 0.0));
        let b = scene.add_body(body_at(9.0, 0.0));
        scene.body_mut(0).set_velocity(Vec2::new(1.0, 0.0));
        scene.body_mut(1).set_velocity(Vec2::new(-1.0, 0.0));
        scene.add_physics_collision(1.0, a, b);

        scene.tick(0.01);
        assert!((scene.body(0).velocity().x + 1.0).abs() < EPSILON);
        assert!((scene.body(1).velocity().x - 1.0).abs() < EPSILON);

        // Now separating, so the next tick leaves them alone
        scene.tick(0.01);
        assert!((scene.body(0).velocity().x + 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_static_wall_never_moves() {
        let mut scene = Scene::new();
        let mut wall = Body::new(square(10.0), f64::INFINITY, RgbColor::WHITE);
        wall.set_centroid(Vec2::new(0.0, 0.0));
        let wall = scene.add_body(wall);
        let ball = scene.add_body(body_at(9.0, 0.0));
        scene.body_by_id_mut(ball).unwrap().set_velocity(Vec2::new(-3.0, 0.0));
        scene.add_physics_collision(1.0, wall, ball);

        for _ in 0..5 {
            scene.tick(0.1);
        }
        assert_eq!(scene.body_by_id(wall).unwrap().centroid(), Vec2::ZERO);
        assert!((scene.body_by_id(ball).unwrap().velocity().x - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_circle_collision_handler_sees_axis() {
        let mut scene = Scene::new();
        let a = scene.add_body(body_at(0.0, 0.0));
        let b = scene.add_body(body_at(0.0, 3.0));
        scene.body_mut(0).set_radius(2.0);
        scene.body_mut(1).set_radius(2.0);

        let seen = Rc::new(Cell::new(None));
        let seen_in = seen.clone();
        scene.add_circle_collision(a, b, move |_: &mut Body, _: &mut Body, axis: Vec2| {
            seen_in.set(Some(axis));
        });
        scene.tick(0.1);
        let axis = seen.get().unwrap();
        assert!(axis.x.abs() < EPSILON);
        assert!((axis.y - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_dropping_scene_releases_everything() {
        let body_drops = Rc::new(Cell::new(0));
        let state_drops = Rc::new(Cell::new(0));
        {
            let mut scene = Scene::new();
            let mut ids = Vec::new();
            for i in 0..3 {
                let body = Body::with_info(
                    square(1.0),
                    1.0,
                    RgbColor::WHITE,
                    DropCounter(body_drops.clone()),
                );
                let id = scene.add_body(body);
                scene.body_by_id_mut(id).unwrap().set_centroid(Vec2::new(i as f64 * 10.0, 0.0));
                ids.push(id);
            }
            for pair in ids.windows(2) {
                let state = DropCounter(state_drops.clone());
                scene.add_force_creator(
                    move |_: &mut BodySet| {
                        let _keep = &state;
                    },
                    pair,
                );
            }
            scene.tick(0.1);
            assert_eq!(body_drops.get(), 0);
            assert_eq!(state_drops.get(), 0);
        }
        assert_eq!(body_drops.get(), 3);
        assert_eq!(state_drops.get(), 2);
    }

    #[test]
    fn test_reaped_body_payload_dropped() {
        let drops = Rc::new(Cell::new(0));
        let mut scene = Scene::new();
        scene.add_body(body_at(0.0, 0.0));
        let id = scene.add_body(Body::with_info(
            square(1.0),
            1.0,
            RgbColor::WHITE,
            DropCounter(drops.clone()),
        ));
        scene.add_body(body_at(20.0, 0.0));

        scene.body_by_id_mut(id).unwrap().remove();
        assert_eq!(drops.get(), 0);
        scene.tick(0.1);
        assert_eq!(drops.get(), 1);
        assert_eq!(scene.body_count(), 2);
        assert_eq!(scene.body(1).centroid().x, 20.0);
    }

    #[test]
    #[should_panic]
    fn test_force_creator_unknown_body_panics() {
        let mut other = Scene::new();
        other.add_body(body_at(0.0, 0.0));
        let stray = other.add_body(body_at(0.0, 0.0));

        let mut scene = Scene::new();
        scene.add_body(body_at(0.0, 0.0));
        scene.add_drag(1.0, stray);
    }

    #[test]
    fn test_ids_do_not_cross_scenes() {
        let mut scene_a = Scene::new();
        let mut scene_b = Scene::new();
        let from_a = scene_a.add_body(body_at(0.0, 0.0));
        let from_b = scene_b.add_body(body_at(0.0, 0.0));
        scene_b.body_mut(0).set_velocity(Vec2::new(10.0, 0.0));

        assert_ne!(from_a, from_b);
        assert!(scene_b.body_by_id(from_a).is_none());
        assert_eq!(scene_b.index_of(from_a), None);

        let registered = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            scene_b.add_drag(1.0, from_a);
        }));
        assert!(registered.is_err());
        assert_eq!(scene_b.force_count(), 0);

        scene_b.tick(0.1);
        assert_eq!(scene_b.body(0).velocity(), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_spring_entry_pulls_and_is_pruned() {
        let mut scene = Scene::new();
        let a = scene.add_body(body_at(0.0, 0.0));
        let b = scene.add_body(body_at(10.0, 0.0));
        scene.add_spring(2.0, a, b);

        scene.tick(0.1);
        assert_eq!(scene.force_count(), 1);
        // F = 20 on unit masses, towards each other
        assert!((scene.body(0).velocity().x - 2.0).abs() < EPSILON);
        assert!((scene.body(1).velocity().x + 2.0).abs() < EPSILON);

        scene.body_by_id_mut(b).unwrap().remove();
        scene.tick(0.1);
        assert_eq!(scene.force_count(), 0);
        assert_eq!(scene.body_count(), 1);
    }

    #[test]
    fn test_wrapping_gravity_entry_pulls_across_edge_and_is_pruned() {
        let mut scene = Scene::new();
        let a = scene.add_body(body_at(5.0, 50.0));
        let b = scene.add_body(body_at(95.0, 50.0));
        scene.add_wrapping_gravity(400.0, a, b, 100.0, 100.0);

        scene.tick(0.1);
        assert_eq!(scene.force_count(), 1);
        // 10 apart through the edge, clamped to 20: |F| = 400 / 400
        assert!((scene.body(0).velocity().x + 0.1).abs() < EPSILON);
        assert!((scene.body(1).velocity().x - 0.1).abs() < EPSILON);
        assert!(scene.body(0).velocity().y.abs() < EPSILON);

        scene.body_by_id_mut(a).unwrap().remove();
        scene.tick(0.1);
        assert_eq!(scene.force_count(), 0);
        assert_eq!(scene.index_of(b), Some(0));
    }

    #[test]
    #[should_panic]
    fn test_force_creator_too_many_bodies_panics() {
        let mut scene = Scene::new();
        let ids: Vec<BodyId> = (0..3).map(|i| scene.add_body(body_at(i as f64, 0.0))).collect();
        scene.add_force_creator(|_: &mut BodySet| {}, &ids);
    }
}
