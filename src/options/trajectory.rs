use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Trajectory", inline)]
#[serde(default)]
/// Random ranges used when planning exploded poses.
pub struct TrajectoryOptions {
    /// Smallest outward travel along the radial direction.
    #[schemars(title = "Min Distance", range(min = 0.0, max = 20.0), extend("step" = 0.5))]
    pub radial_min: f32,
    /// Largest outward travel along the radial direction.
    #[schemars(title = "Max Distance", range(min = 0.0, max = 20.0), extend("step" = 0.5))]
    pub radial_max: f32,
    /// Half-width of the lateral (x/z) scatter.
    #[schemars(title = "Scatter", range(min = 0.0, max = 10.0), extend("step" = 0.5))]
    pub jitter_lateral: f32,
    /// Smallest upward lift added to every trajectory.
    #[schemars(skip)]
    pub jitter_lift_min: f32,
    /// Largest upward lift added to every trajectory.
    #[schemars(skip)]
    pub jitter_lift_max: f32,
    /// Extra full turns of tumble a fragment may pick up per axis.
    #[schemars(title = "Tumble Turns", range(min = 0.0, max = 4.0), extend("step" = 0.25))]
    pub tumble_turns: f32,
    /// Scalar noise added to every component of a blowout direction.
    #[schemars(skip)]
    pub blowout_spread: f32,
    /// Smallest per-axis blowout speed.
    #[schemars(skip)]
    pub blowout_speed_min: f32,
    /// Largest per-axis blowout speed.
    #[schemars(skip)]
    pub blowout_speed_max: f32,
    /// Smallest chunk scatter distance.
    #[schemars(skip)]
    pub scatter_min: f32,
    /// Largest chunk scatter distance.
    #[schemars(skip)]
    pub scatter_max: f32,
    /// Upper bound of the upward component of a chunk scatter direction.
    #[schemars(skip)]
    pub scatter_lift: f32,
    /// Largest per-axis tumble of a scattered chunk, in radians.
    #[schemars(skip)]
    pub chunk_tumble: f32,
}

impl Default for TrajectoryOptions {
    fn default() -> Self {
        Self {
            radial_min: 3.0,
            radial_max: 7.0,
            jitter_lateral: 4.0,
            jitter_lift_min: 2.0,
            jitter_lift_max: 8.0,
            tumble_turns: 2.0,
            blowout_spread: 0.3,
            blowout_speed_min: 2.0,
            blowout_speed_max: 6.0,
            scatter_min: 0.25,
            scatter_max: 0.40,
            scatter_lift: 0.6,
            chunk_tumble: 0.4,
        }
    }
}
