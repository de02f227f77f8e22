//! Explosion controller: owns the fragment set and turns host input into
//! per-frame poses.

use rustc_hash::FxHashSet;

use super::animator::FragmentAnimator;
use super::state::Phase;
use crate::decompose::{decompose, DecompositionKey, HoverScope, ShapeSource};
use crate::error::ShatterError;
use crate::fragment::{
    Fragment, FragmentId, FragmentPose, FragmentSet, PoseInstance,
};
use crate::options::Options;

/// What a pointer event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// A single fragment.
    Fragment(FragmentId),
    /// The shape as a whole (used when the host hit-tests the shape, not
    /// individual fragments).
    Group,
}

/// Drives the explosion effect for one shape.
///
/// Responsibilities:
/// - Rebuild the fragment set only when the source, seed or
///   decomposition-relevant options change
/// - Track the global explode switch and pointer hover state
/// - Advance all fragments once per frame and expose the resulting poses
pub struct ExplosionController {
    options: Options,
    seed: Option<u64>,
    key: Option<DecompositionKey>,
    /// Options the current set was decomposed with.
    built_with: Option<Options>,
    stale: bool,
    set: Option<FragmentSet>,
    animator: FragmentAnimator,
    exploded: bool,
    hovered: FxHashSet<FragmentId>,
    group_hovered: bool,
}

impl ExplosionController {
    /// Controller with no shape loaded yet.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            options,
            seed: None,
            key: None,
            built_with: None,
            stale: false,
            set: None,
            animator: FragmentAnimator::default(),
            exploded: false,
            hovered: FxHashSet::default(),
            group_hovered: false,
        }
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the options. Animation settings apply from the next frame;
    /// changes to decomposition or trajectory settings rebuild the set on
    /// the next [`set_source`](Self::set_source).
    pub fn set_options(&mut self, options: Options) {
        self.options = options;
    }

    /// Seed used for future decompositions; `None` draws from the OS.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    /// Current seed.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Force the next [`set_source`](Self::set_source) to rebuild.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Load `source`, decomposing it unless the current set already came
    /// from the same source, seed and options.
    ///
    /// Returns whether a rebuild happened. A rebuild resets all animation
    /// state and hover flags. On failure the previous set stays in place
    /// untouched.
    pub fn set_source(
        &mut self,
        source: &ShapeSource,
    ) -> Result<bool, ShatterError> {
        let key = DecompositionKey {
            source: source.key(),
            seed: self.seed,
        };
        let options_match = self
            .built_with
            .as_ref()
            .is_some_and(|built| !built.affects_decomposition(&self.options));
        if !self.stale
            && options_match
            && self.set.is_some()
            && self.key == Some(key)
        {
            return Ok(false);
        }

        let set = match decompose(source, &self.options, self.seed) {
            Ok(set) => set,
            Err(err) => {
                log::error!(
                    "decomposition failed, keeping previous set: {err}"
                );
                return Err(err);
            }
        };
        log::debug!(
            "rebuilt fragment set: {} ({} fragments)",
            set.strategy(),
            set.len()
        );
        self.animator = FragmentAnimator::new(&set);
        self.hovered.clear();
        self.group_hovered = false;
        self.set = Some(set);
        self.key = Some(key);
        self.built_with = Some(self.options.clone());
        self.stale = false;
        Ok(true)
    }

    /// Global explode switch.
    pub fn set_exploded(&mut self, exploded: bool) {
        self.exploded = exploded;
    }

    /// Whether the global switch is on.
    #[must_use]
    pub fn is_exploded(&self) -> bool {
        self.exploded
    }

    /// Record a pointer entering (`entered = true`) or leaving a target.
    /// The latest event for a target wins. Ids outside the current set are
    /// ignored.
    pub fn pointer_event(&mut self, target: PointerTarget, entered: bool) {
        match target {
            PointerTarget::Group => self.group_hovered = entered,
            PointerTarget::Fragment(id) => {
                let known =
                    self.set.as_ref().is_some_and(|s| s.get(id).is_some());
                if !known {
                    log::debug!(
                        "ignoring pointer event for unknown fragment {id}"
                    );
                    return;
                }
                if entered {
                    let _ = self.hovered.insert(id);
                } else {
                    let _ = self.hovered.remove(&id);
                }
            }
        }
    }

    /// Advance the animation by `dt` seconds and return the new poses.
    ///
    /// Negative or non-finite `dt` is treated as 0. Without a loaded set
    /// the result is empty.
    pub fn advance(&mut self, dt: f32) -> &[FragmentPose] {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let Some(set) = &self.set else {
            return &[];
        };

        let animation = &self.options.animation;
        let scope = set.hover_scope();
        let speed = match scope {
            HoverScope::PerFragment => animation.local_speed,
            HoverScope::Group => animation.group_speed,
        };
        let exploded = self.exploded;
        let hovered = &self.hovered;
        let any_hover = self.group_hovered || !hovered.is_empty();
        let intent = |id: FragmentId| {
            exploded
                || match scope {
                    HoverScope::PerFragment => hovered.contains(&id),
                    HoverScope::Group => any_hover,
                }
        };

        self.animator.advance(set, intent, dt, animation, speed)
    }

    /// Poses from the last [`advance`](Self::advance).
    #[must_use]
    pub fn poses(&self) -> &[FragmentPose] {
        self.animator.poses()
    }

    /// Poses packed for GPU upload.
    #[must_use]
    pub fn instances(&self) -> Vec<PoseInstance> {
        self.poses().iter().map(FragmentPose::to_instance).collect()
    }

    /// Phase of one fragment, `None` for unknown ids.
    #[must_use]
    pub fn phase(&self, id: FragmentId) -> Option<Phase> {
        let set = self.set.as_ref()?;
        self.animator.phase(set, id, self.options.animation.epsilon)
    }

    /// Raw progress of one bounded fragment.
    #[must_use]
    pub fn progress(&self, id: FragmentId) -> Option<f32> {
        self.set
            .as_ref()
            .and_then(|_| self.animator.progress(id))
    }

    /// Fragments of the current set.
    #[must_use]
    pub fn fragments(&self) -> &[Fragment] {
        self.set.as_ref().map_or(&[][..], FragmentSet::fragments)
    }

    /// The current set, if a source is loaded.
    #[must_use]
    pub fn fragment_set(&self) -> Option<&FragmentSet> {
        self.set.as_ref()
    }

    /// Whether a source is loaded but produced no fragments, so the host
    /// should draw the shape whole.
    #[must_use]
    pub fn renders_whole_shape(&self) -> bool {
        self.set.as_ref().is_some_and(FragmentSet::is_empty)
    }

    /// Whether every fragment has come to rest at its current target.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.set.as_ref().is_none_or(|set| {
            self.animator
                .is_settled(set, self.options.animation.epsilon)
        })
    }

    /// Drop the shape and all animation and input state.
    pub fn clear(&mut self) {
        self.set = None;
        self.key = None;
        self.built_with = None;
        self.stale = false;
        self.animator = FragmentAnimator::default();
        self.exploded = false;
        self.hovered.clear();
        self.group_hovered = false;
    }
}

impl Default for ExplosionController {
    fn default() -> Self {
        Self::new(Options::default())
    }
}
