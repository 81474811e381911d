#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that resolves contact between the wizard, enemies, and projectiles.
//!
//! Resolution runs over immutable snapshots captured before any removal takes
//! place, so a projectile that both kills an enemy and meets an enemy
//! projectile in the same frame is reported as spent exactly once.

use std::collections::BTreeSet;

use gremlins_core::{
    CollisionCategory, EnemyId, EnemyView, PixelPoint, ProjectileId, ProjectileSnapshot,
    ProjectileView,
};

/// What caused the wizard to lose a life.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerHit {
    /// The wizard touched an enemy.
    Body(EnemyId),
    /// An enemy projectile reached the wizard.
    Projectile(ProjectileId),
}

/// Outcome of a single resolution pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Set when the wizard was hit; no other outcome is reported in that case.
    pub player_hit: Option<PlayerHit>,
    /// Enemies killed by player projectiles, in identifier order.
    pub dead_enemies: Vec<EnemyId>,
    /// Projectiles to remove, in identifier order.
    pub spent_projectiles: Vec<ProjectileId>,
}

/// Collision system that reuses its scratch sets between frames.
#[derive(Debug, Default)]
pub struct Collisions {
    dead: BTreeSet<EnemyId>,
    spent: BTreeSet<ProjectileId>,
}

impl Collisions {
    /// Creates a new collision system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves every contact for the current frame.
    ///
    /// A hit on the wizard ends resolution immediately, since the level is
    /// reloaded and all other outcomes become moot.
    pub fn resolve(
        &mut self,
        player: PixelPoint,
        enemies: &EnemyView,
        projectiles: &ProjectileView,
    ) -> Resolution {
        if let Some(enemy) = enemies.iter().find(|enemy| enemy.position.overlaps(player)) {
            return Resolution::hit(PlayerHit::Body(enemy.id));
        }

        if let Some(projectile) = projectiles
            .iter()
            .filter(|projectile| is_hostile(projectile))
            .find(|projectile| projectile.position.overlaps(player))
        {
            return Resolution::hit(PlayerHit::Projectile(projectile.id));
        }

        self.dead.clear();
        self.spent.clear();

        for shot in projectiles.iter().filter(|projectile| !is_hostile(projectile)) {
            for enemy in enemies.iter() {
                if shot.position.overlaps(enemy.position) {
                    let _ = self.dead.insert(enemy.id);
                    let _ = self.spent.insert(shot.id);
                }
            }

            for other in projectiles.iter().filter(|projectile| is_hostile(projectile)) {
                if shot.position.overlaps(other.position) {
                    let _ = self.spent.insert(shot.id);
                    let _ = self.spent.insert(other.id);
                }
            }
        }

        Resolution {
            player_hit: None,
            dead_enemies: self.dead.iter().copied().collect(),
            spent_projectiles: self.spent.iter().copied().collect(),
        }
    }
}

impl Resolution {
    fn hit(cause: PlayerHit) -> Self {
        Self {
            player_hit: Some(cause),
            ..Self::default()
        }
    }
}

fn is_hostile(projectile: &ProjectileSnapshot) -> bool {
    projectile.kind.category() == CollisionCategory::Enemy
}

#[cfg(test)]
mod tests {
    use super::*;
    use gremlins_core::{Direction, EnemyKind, EnemySnapshot, ProjectileKind};

    const PLAYER: PixelPoint = PixelPoint::new(20, 20);

    #[test]
    fn enemy_body_costs_a_life() {
        let mut system = Collisions::new();
        let enemies = EnemyView::from_snapshots(vec![enemy(4, 30, 25)]);

        let resolution = system.resolve(PLAYER, &enemies, &ProjectileView::default());

        assert_eq!(
            resolution.player_hit,
            Some(PlayerHit::Body(EnemyId::new(4)))
        );
        assert!(resolution.spent_projectiles.is_empty());
    }

    #[test]
    fn enemy_projectile_costs_a_life() {
        let mut system = Collisions::new();
        let projectiles = ProjectileView::from_snapshots(vec![
            projectile(1, ProjectileKind::Fireball, 20, 25),
            projectile(2, ProjectileKind::Slimeball, 25, 20),
        ]);

        let resolution = system.resolve(PLAYER, &EnemyView::default(), &projectiles);

        assert_eq!(
            resolution.player_hit,
            Some(PlayerHit::Projectile(ProjectileId::new(2)))
        );
    }

    #[test]
    fn player_projectile_kills_every_enemy_it_touches() {
        let mut system = Collisions::new();
        let enemies = EnemyView::from_snapshots(vec![
            enemy(3, 200, 200),
            enemy(1, 210, 190),
            enemy(2, 400, 400),
        ]);
        let projectiles =
            ProjectileView::from_snapshots(vec![projectile(9, ProjectileKind::Fireball, 200, 200)]);

        let resolution = system.resolve(PLAYER, &enemies, &projectiles);

        assert_eq!(resolution.player_hit, None);
        assert_eq!(
            resolution.dead_enemies,
            vec![EnemyId::new(1), EnemyId::new(3)]
        );
        assert_eq!(resolution.spent_projectiles, vec![ProjectileId::new(9)]);
    }

    #[test]
    fn opposing_projectiles_destroy_each_other() {
        let mut system = Collisions::new();
        let projectiles = ProjectileView::from_snapshots(vec![
            projectile(1, ProjectileKind::Hydroball, 100, 100),
            projectile(2, ProjectileKind::Furyball, 110, 100),
        ]);

        let resolution = system.resolve(PLAYER, &EnemyView::default(), &projectiles);

        assert_eq!(
            resolution.spent_projectiles,
            vec![ProjectileId::new(1), ProjectileId::new(2)]
        );
    }

    #[test]
    fn same_side_projectiles_pass_through_each_other() {
        let mut system = Collisions::new();
        let projectiles = ProjectileView::from_snapshots(vec![
            projectile(1, ProjectileKind::Fireball, 100, 100),
            projectile(2, ProjectileKind::Thunderball, 100, 100),
            projectile(3, ProjectileKind::Slimeball, 300, 100),
            projectile(4, ProjectileKind::Ghostball, 300, 100),
        ]);

        let resolution = system.resolve(PLAYER, &EnemyView::default(), &projectiles);

        assert_eq!(resolution, Resolution::default());
    }

    #[test]
    fn projectile_spent_twice_is_reported_once() {
        let mut system = Collisions::new();
        let enemies = EnemyView::from_snapshots(vec![enemy(1, 100, 100)]);
        let projectiles = ProjectileView::from_snapshots(vec![
            projectile(5, ProjectileKind::Fireball, 100, 100),
            projectile(6, ProjectileKind::Slimeball, 100, 110),
        ]);

        let resolution = system.resolve(PLAYER, &enemies, &projectiles);

        assert_eq!(resolution.dead_enemies, vec![EnemyId::new(1)]);
        assert_eq!(
            resolution.spent_projectiles,
            vec![ProjectileId::new(5), ProjectileId::new(6)]
        );
    }

    #[test]
    fn scratch_state_does_not_leak_between_frames() {
        let mut system = Collisions::new();
        let enemies = EnemyView::from_snapshots(vec![enemy(1, 100, 100)]);
        let projectiles =
            ProjectileView::from_snapshots(vec![projectile(5, ProjectileKind::Fireball, 100, 100)]);
        let _ = system.resolve(PLAYER, &enemies, &projectiles);

        let resolution = system.resolve(PLAYER, &enemies, &ProjectileView::default());

        assert_eq!(resolution, Resolution::default());
    }

    fn enemy(id: u32, x: i32, y: i32) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            kind: EnemyKind::Gremlin,
            position: PixelPoint::new(x, y),
            facing: Some(Direction::East),
        }
    }

    fn projectile(id: u32, kind: ProjectileKind, x: i32, y: i32) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: ProjectileId::new(id),
            kind,
            position: PixelPoint::new(x, y),
            facing: Direction::East,
        }
    }
}
