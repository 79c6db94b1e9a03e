//! The three entity kinds that live on the field: stationary defenders,
//! advancing adversaries, and the projectiles that connect them.

use crate::config::SimConfig;
use crate::types::{EntityKind, Point, Rect};

/// Stable identity for a placed defender, used by the plant-slot grid so
/// occupancy can be reconciled after deaths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefenderId(pub u32);

// A planted defender. Fixed in place for its lifetime; fires rightward when
// its cooldown allows and an adversary shares its row.
#[derive(Debug, Clone)]
pub struct Defender {
    pub id: DefenderId,
    pub position: Point, // Cell center, never moves
    pub max_hp: f64,
    pub hp: f64,
    width: f64,
    height: f64,
    fire_interval_ms: f64,
    last_fire_ms: Option<f64>, // None until the first shot
}

impl Defender {
    pub fn new(id: DefenderId, position: Point, config: &SimConfig) -> Self {
        Defender {
            id,
            position,
            max_hp: config.defender_max_hp,
            hp: config.defender_max_hp,
            width: config.defender_width,
            height: config.defender_height,
            fire_interval_ms: config.defender_fire_interval_ms,
            last_fire_ms: None,
        }
    }

    pub fn kind(&self) -> EntityKind {
        EntityKind::Defender
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(self.position, self.width, self.height)
    }

    /// True when the cooldown has elapsed. A defender that has never fired
    /// may fire immediately.
    pub fn can_fire(&self, now_ms: f64) -> bool {
        match self.last_fire_ms {
            Some(last) => now_ms - last >= self.fire_interval_ms,
            None => true,
        }
    }

    /// Emits a projectile at this defender's right edge, vertically centered,
    /// and starts the cooldown.
    pub fn fire(&mut self, now_ms: f64, config: &SimConfig) -> Projectile {
        self.last_fire_ms = Some(now_ms);
        let muzzle = Point {
            x: self.rect().right(),
            y: self.position.y,
        };
        Projectile::new(muzzle, config)
    }

    /// Health may go negative; death is resolved by the tick cleanup phase.
    pub fn take_damage(&mut self, amount: f64) {
        self.hp -= amount;
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }

    /// Remaining health as a 0..=1 fraction for rendering.
    pub fn hp_ratio(&self) -> f64 {
        (self.hp / self.max_hp).clamp(0.0, 1.0)
    }
}

// A mobile adversary. Walks left at a fixed speed unless it is gnawing on a
// defender; breaches the defense line when its left edge reaches x = 0.
#[derive(Debug, Clone)]
pub struct Adversary {
    pub position: Point,
    pub max_hp: f64,
    pub hp: f64,
    pub attacking: bool, // True iff overlapping a defender this tick
    speed: f64,          // px/s, leftward
    dps: f64,
    damage_per_tick: f64, // Recomputed by advance() from the tick's dt
    width: f64,
    height: f64,
}

impl Adversary {
    pub fn new(position: Point, config: &SimConfig) -> Self {
        Adversary {
            position,
            max_hp: config.adversary_max_hp,
            hp: config.adversary_max_hp,
            attacking: false,
            speed: config.adversary_speed,
            dps: config.adversary_dps,
            damage_per_tick: 0.0,
            width: config.adversary_width,
            height: config.adversary_height,
        }
    }

    pub fn kind(&self) -> EntityKind {
        EntityKind::Adversary
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(self.position, self.width, self.height)
    }

    /// Moves left by `speed * dt` unless attacking, and recomputes the
    /// contact damage this tick is worth either way.
    pub fn advance(&mut self, dt_ms: f64) {
        if !self.attacking {
            self.position.x -= self.speed * dt_ms / 1000.0;
        }
        self.damage_per_tick = self.dps * dt_ms / 1000.0;
    }

    /// Contact damage dealt to a defender this tick, as computed by the most
    /// recent `advance`.
    pub fn damage_per_tick(&self) -> f64 {
        self.damage_per_tick
    }

    /// True when the leading edge has crossed the defense line.
    pub fn has_breached(&self) -> bool {
        self.rect().left() <= 0.0
    }

    pub fn take_damage(&mut self, amount: f64) {
        self.hp -= amount;
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }

    pub fn hp_ratio(&self) -> f64 {
        (self.hp / self.max_hp).clamp(0.0, 1.0)
    }
}

// A projectile in flight. Travels right until it hits an adversary or leaves
// the field.
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub position: Point,
    pub damage: f64,
    speed: f64, // px/s, rightward
    size: f64,
}

impl Projectile {
    pub fn new(position: Point, config: &SimConfig) -> Self {
        Projectile {
            position,
            damage: config.projectile_damage,
            speed: config.projectile_speed,
            size: config.projectile_size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(self.position, self.size, self.size)
    }

    pub fn advance(&mut self, dt_ms: f64) {
        self.position.x += self.speed * dt_ms / 1000.0;
    }

    /// True once the projectile has fully left the field to the right.
    pub fn past_right_edge(&self, field_width: f64) -> bool {
        self.rect().left() > field_width
    }
}
