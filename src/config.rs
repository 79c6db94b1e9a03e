//! Simulation configuration for the lawn defense game.

/// Nominal duration of one simulation tick in milliseconds (60 Hz pacing).
pub const TICK_MS: f64 = 1000.0 / 60.0;

/// Immutable simulation parameters, fixed at construction.
///
/// All distances are in pixels, all durations in milliseconds, all speeds in
/// pixels per second.
#[derive(Debug, Clone)]
pub struct SimConfig {
    // Play field
    pub field_width: f64, // Right boundary; projectiles are culled past it

    // Lawn grid
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub cell_size: f64, // Square cells
    pub grid_offset_x: f64,
    pub grid_offset_y: f64,

    // Defender parameters
    pub defender_max_hp: f64,
    pub defender_fire_interval_ms: f64,
    pub defender_width: f64,
    pub defender_height: f64,

    // Adversary parameters
    pub adversary_max_hp: f64,
    pub adversary_speed: f64, // Leftward, px/s (0.5 px/frame at 60 Hz)
    pub adversary_dps: f64,   // Contact damage per second against a defender
    pub adversary_width: f64,
    pub adversary_height: f64,
    pub spawn_interval_ms: f64,
    pub spawn_inset: f64, // Spawn x is field_width - spawn_inset

    // Projectile parameters
    pub projectile_speed: f64, // Rightward, px/s (5 px/frame at 60 Hz)
    pub projectile_damage: f64,
    pub projectile_size: f64, // Square body

    // Fire resolution
    pub row_tolerance: f64, // Max |dy| between adversary and defender centers
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            field_width: 900.0,
            grid_rows: 5,
            grid_cols: 9,
            cell_size: 80.0,
            grid_offset_x: 50.0,
            grid_offset_y: 50.0,
            defender_max_hp: 100.0,
            defender_fire_interval_ms: 1000.0,
            defender_width: 50.0,
            defender_height: 60.0,
            adversary_max_hp: 150.0,
            adversary_speed: 30.0,
            adversary_dps: 20.0,
            adversary_width: 60.0,
            adversary_height: 80.0,
            spawn_interval_ms: 3000.0,
            spawn_inset: 20.0,
            projectile_speed: 300.0,
            projectile_damage: 25.0,
            projectile_size: 10.0,
            row_tolerance: 10.0,
        }
    }
}
