use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
/// Progress filter and easing parameters for the fragment animator.
pub struct AnimationOptions {
    /// Filter speed for fragments driven by their own hover state.
    #[schemars(title = "Hover Speed", range(min = 0.5, max = 10.0), extend("step" = 0.1))]
    pub local_speed: f32,
    /// Filter speed for sets where hovering any part explodes the group.
    #[schemars(title = "Group Speed", range(min = 0.5, max = 10.0), extend("step" = 0.1))]
    pub group_speed: f32,
    /// Distance from the target progress below which a fragment is settled.
    #[schemars(skip)]
    pub epsilon: f32,
    /// Fraction of the remaining distance left after one second at speed 1.
    #[schemars(skip)]
    pub decay_base: f32,
    /// Rate at which ballistic particles are pulled back to their anchor.
    #[schemars(title = "Return Rate", range(min = 0.5, max = 20.0), extend("step" = 0.5))]
    pub ballistic_return_rate: f32,
    /// Largest frame delta the clock hands out, in seconds.
    #[schemars(skip)]
    pub max_delta: f32,
    /// Curve applied to progress before interpolating poses.
    #[schemars(skip)]
    pub easing: EasingFunction,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            local_speed: 3.0,
            group_speed: 2.0,
            epsilon: 0.001,
            decay_base: 0.001,
            ballistic_return_rate: 4.0,
            max_delta: 0.1,
            easing: EasingFunction::DEFAULT,
        }
    }
}
