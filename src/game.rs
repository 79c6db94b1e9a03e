//! The simulation core: owns the live entity collections and the plant-slot
//! grid, and advances them one fixed tick at a time.

use crate::config::SimConfig;
use crate::entities::{Adversary, Defender, DefenderId, Projectile};
use crate::grid::{Grid, GridError};
use crate::types::{EntityKind, Point, SimCommand};
use crate::{debug_combat, debug_place, debug_spawn, debug_tick};
use log::{info, warn};
use rand::prelude::*;
use thiserror::Error;

/// Defender placement errors. The original treated an occupied cell as a
/// silent no-op; surfacing it keeps the boundary testable, and the CLI driver
/// downgrades it back to a warning.
#[derive(Error, Debug, PartialEq, Eq, Copy, Clone)]
pub enum PlacementError {
    #[error(transparent)]
    InvalidIndex(#[from] GridError),
    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },
}

/// Whether the simulation is still running after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Running,
    /// An adversary reached the defense line. Terminal; all further ticks
    /// leave the simulation frozen.
    Breached,
}

/// Read-only view of one damageable entity, for rendering.
#[derive(Debug, Clone, Copy)]
pub struct EntityView {
    pub kind: EntityKind,
    pub position: Point,
    pub hp_ratio: f64,
}

/// Read-only view of all live entities at the end of a tick.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub defenders: Vec<EntityView>,
    pub adversaries: Vec<EntityView>,
    pub projectiles: Vec<Point>,
}

/// Result of advancing the simulation by one tick.
#[derive(Debug, Clone)]
pub struct TickReport {
    pub status: TickStatus,
    pub snapshot: Snapshot,
}

// The Game struct encapsulates the whole simulation state. The tick pipeline
// never removes an entity while a collision scan is iterating; deaths are
// resolved by the cleanup phase at the end of the tick.
#[derive(Debug)]
pub struct Game {
    pub config: SimConfig,
    pub grid: Grid,
    pub defenders: Vec<Defender>,
    pub adversaries: Vec<Adversary>,
    pub projectiles: Vec<Projectile>,
    /// Row-major cell occupancy; `Some(id)` refers to a live defender.
    pub slots: Vec<Option<DefenderId>>,
    status: TickStatus,
    next_defender_id: u32,
    clock_ms: f64,
    last_spawn_ms: f64,
    tick_count: u64,
    rng: StdRng,
}

impl Game {
    /// Create a new simulation from the given parameters. The seed fixes the
    /// adversary spawn rows, making runs reproducible.
    pub fn new(config: SimConfig, seed: u64) -> Self {
        let grid = Grid::new(&config);
        let slots = vec![None; config.grid_rows * config.grid_cols];
        Game {
            grid,
            defenders: Vec::new(),
            adversaries: Vec::new(),
            projectiles: Vec::new(),
            slots,
            status: TickStatus::Running,
            next_defender_id: 0,
            clock_ms: 0.0,
            last_spawn_ms: 0.0,
            tick_count: 0,
            rng: StdRng::seed_from_u64(seed),
            config,
        }
    }

    pub fn status(&self) -> TickStatus {
        self.status
    }

    fn slot_index(&self, row: usize, col: usize) -> usize {
        row * self.config.grid_cols + col
    }

    /// Dispatch a boundary command from the input collaborator. Failures are
    /// logged, not propagated, matching the original's forgiving click
    /// handling. Commands arriving after a breach are ignored; the terminal
    /// state stays frozen.
    pub fn apply_command(&mut self, command: SimCommand) {
        if self.status == TickStatus::Breached {
            debug_place!("simulation over; ignoring {:?}", command);
            return;
        }
        match command {
            SimCommand::PlaceDefender { row, col } => {
                if let Err(e) = self.place_defender(row, col) {
                    warn!("place defender at ({}, {}) rejected: {}", row, col, e);
                }
            }
            SimCommand::RemoveDefender { row, col } => match self.remove_defender(row, col) {
                Ok(removed) => {
                    if !removed {
                        debug_place!("no defender to remove at ({}, {})", row, col);
                    }
                }
                Err(e) => warn!("remove defender at ({}, {}) rejected: {}", row, col, e),
            },
        }
    }

    /// Plants a defender at the cell's center. Rejects out-of-bounds indices
    /// and occupied cells.
    pub fn place_defender(&mut self, row: usize, col: usize) -> Result<(), PlacementError> {
        let center = self.grid.center_of(row, col)?;
        let index = self.slot_index(row, col);
        if self.slots[index].is_some() {
            return Err(PlacementError::Occupied { row, col });
        }

        let id = DefenderId(self.next_defender_id);
        self.next_defender_id += 1;
        self.defenders.push(Defender::new(id, center, &self.config));
        self.slots[index] = Some(id);
        debug_place!("defender {} planted at ({}, {})", id.0, row, col);
        Ok(())
    }

    /// Removes the defender occupying the cell, if any (the shovel tool).
    /// Returns whether a defender was removed.
    pub fn remove_defender(&mut self, row: usize, col: usize) -> Result<bool, GridError> {
        if row >= self.grid.rows() || col >= self.grid.cols() {
            return Err(GridError::InvalidIndex { row, col });
        }
        let index = self.slot_index(row, col);
        match self.slots[index].take() {
            Some(id) => {
                self.defenders.retain(|d| d.id != id);
                debug_place!("defender {} shoveled from ({}, {})", id.0, row, col);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Delegates a pixel-point query to the grid.
    pub fn cell_at(&self, point: Point) -> Option<(usize, usize)> {
        self.grid.cell_at(point)
    }

    /// Advance the simulation by one tick of `dt_ms` milliseconds.
    ///
    /// Once breached the simulation is frozen: the call returns immediately
    /// with the final snapshot and no entity moves again.
    pub fn tick(&mut self, dt_ms: f64) -> TickReport {
        if self.status == TickStatus::Breached {
            return TickReport {
                status: self.status,
                snapshot: self.snapshot(),
            };
        }

        self.tick_count += 1;
        self.clock_ms += dt_ms;
        debug_tick!(
            self.tick_count,
            "dt={:.2}ms defenders={} adversaries={} projectiles={}",
            dt_ms,
            self.defenders.len(),
            self.adversaries.len(),
            self.projectiles.len()
        );

        self.spawn_phase();
        self.movement_phase(dt_ms);
        self.fire_phase();
        self.projectile_collision_phase();
        self.contact_and_breach_phase();
        self.cleanup_phase();

        TickReport {
            status: self.status,
            snapshot: self.snapshot(),
        }
    }

    /// Phase 1: spawn one adversary at a random row when the interval has
    /// elapsed.
    fn spawn_phase(&mut self) {
        if self.clock_ms - self.last_spawn_ms < self.config.spawn_interval_ms {
            return;
        }
        self.last_spawn_ms = self.clock_ms;

        let row = self.rng.gen_range(0..self.config.grid_rows);
        let Ok(row_center) = self.grid.center_of(row, 0) else {
            return;
        };
        let position = Point {
            x: self.config.field_width - self.config.spawn_inset,
            y: row_center.y,
        };
        debug_spawn!(
            self.tick_count,
            "adversary spawned at row {} ({:.0}, {:.0})",
            row,
            position.x,
            position.y
        );
        self.adversaries.push(Adversary::new(position, &self.config));
    }

    /// Phase 2: advance every adversary and projectile, then cull projectiles
    /// that left the field. Adversaries marked attacking last tick hold
    /// position.
    fn movement_phase(&mut self, dt_ms: f64) {
        for adversary in self.adversaries.iter_mut() {
            adversary.advance(dt_ms);
        }
        for projectile in self.projectiles.iter_mut() {
            projectile.advance(dt_ms);
        }
        let field_width = self.config.field_width;
        self.projectiles.retain(|p| !p.past_right_edge(field_width));
    }

    /// Phase 3: each defender with an adversary near its row center fires if
    /// its cooldown has elapsed.
    fn fire_phase(&mut self) {
        let now = self.clock_ms;
        for defender in self.defenders.iter_mut() {
            let row_has_adversary = self
                .adversaries
                .iter()
                .any(|a| (a.position.y - defender.position.y).abs() < self.config.row_tolerance);
            if row_has_adversary && defender.can_fire(now) {
                let projectile = defender.fire(now, &self.config);
                debug_combat!(
                    self.tick_count,
                    "defender {} fires from ({:.0}, {:.0})",
                    defender.id.0,
                    projectile.position.x,
                    projectile.position.y
                );
                self.projectiles.push(projectile);
            }
        }
    }

    /// Phase 4: resolve projectile hits. Each projectile damages at most the
    /// first adversary it overlaps and is then spent; several projectiles may
    /// stack damage on one adversary in the same tick.
    fn projectile_collision_phase(&mut self) {
        let mut i = 0;
        while i < self.projectiles.len() {
            let rect = self.projectiles[i].rect();
            let damage = self.projectiles[i].damage;
            match self
                .adversaries
                .iter_mut()
                .find(|a| a.rect().intersects(&rect))
            {
                Some(adversary) => {
                    adversary.take_damage(damage);
                    debug_combat!(
                        self.tick_count,
                        "projectile hit adversary at ({:.0}, {:.0}), hp now {:.1}",
                        adversary.position.x,
                        adversary.position.y,
                        adversary.hp
                    );
                    self.projectiles.remove(i);
                }
                None => i += 1,
            }
        }
    }

    /// Phase 5: reset attacking flags, then scan adversaries. The first
    /// breach found ends the simulation and the scan; otherwise each
    /// adversary gnaws on at most the first defender it overlaps.
    /// Adversaries killed by this tick's projectile pass are already dead
    /// and can neither breach nor gnaw.
    fn contact_and_breach_phase(&mut self) {
        for adversary in self.adversaries.iter_mut() {
            adversary.attacking = false;
        }

        for adversary in self.adversaries.iter_mut() {
            if adversary.is_dead() {
                continue;
            }
            if adversary.has_breached() {
                info!(
                    "defense line breached at y={:.0}; simulation over",
                    adversary.position.y
                );
                self.status = TickStatus::Breached;
                break;
            }

            let rect = adversary.rect();
            if let Some(defender) = self
                .defenders
                .iter_mut()
                .find(|d| d.rect().intersects(&rect))
            {
                adversary.attacking = true;
                defender.take_damage(adversary.damage_per_tick());
                debug_combat!(
                    self.tick_count,
                    "adversary gnaws defender {}, hp now {:.1}",
                    defender.id.0,
                    defender.hp
                );
            }
        }
    }

    /// Phase 6: drop dead entities from the live collections and reconcile
    /// the plant-slot grid.
    fn cleanup_phase(&mut self) {
        let dead: Vec<DefenderId> = self
            .defenders
            .iter()
            .filter(|d| d.is_dead())
            .map(|d| d.id)
            .collect();
        if !dead.is_empty() {
            for slot in self.slots.iter_mut() {
                if slot.is_some_and(|id| dead.contains(&id)) {
                    *slot = None;
                }
            }
            self.defenders.retain(|d| !d.is_dead());
            debug_combat!(self.tick_count, "{} defender(s) eaten", dead.len());
        }

        let before = self.adversaries.len();
        self.adversaries.retain(|a| !a.is_dead());
        if self.adversaries.len() < before {
            debug_combat!(
                self.tick_count,
                "{} adversary(ies) destroyed",
                before - self.adversaries.len()
            );
        }
    }

    /// Builds the read-only snapshot handed to the rendering collaborator.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            defenders: self
                .defenders
                .iter()
                .map(|d| EntityView {
                    kind: d.kind(),
                    position: d.position,
                    hp_ratio: d.hp_ratio(),
                })
                .collect(),
            adversaries: self
                .adversaries
                .iter()
                .map(|a| EntityView {
                    kind: a.kind(),
                    position: a.position,
                    hp_ratio: a.hp_ratio(),
                })
                .collect(),
            projectiles: self.projectiles.iter().map(|p| p.position).collect(),
        }
    }
}
