//! Advances every fragment of a set by one frame.

use super::state::{AnimationState, BallisticState, DecayFilter, Phase};
use crate::decompose::MotionMode;
use crate::fragment::{FragmentId, FragmentPose, FragmentSet};
use crate::options::AnimationOptions;

/// Per-fragment state, parallel to the fragment arena.
#[derive(Debug, Clone)]
enum Tracks {
    Bounded(Vec<AnimationState>),
    Ballistic(Vec<BallisticState>),
}

/// Owns the animation state of one [`FragmentSet`] and the poses of the
/// current frame.
///
/// The animator is rebuilt from scratch for every new set: all progress
/// starts at 0 and every ballistic fragment starts at rest.
#[derive(Debug, Clone)]
pub struct FragmentAnimator {
    tracks: Tracks,
    poses: Vec<FragmentPose>,
}

impl Default for FragmentAnimator {
    fn default() -> Self {
        Self {
            tracks: Tracks::Bounded(Vec::new()),
            poses: Vec::new(),
        }
    }
}

impl FragmentAnimator {
    /// Fresh state for `set`, every fragment at rest.
    #[must_use]
    pub fn new(set: &FragmentSet) -> Self {
        let tracks = match set.motion() {
            MotionMode::Bounded => {
                Tracks::Bounded(vec![AnimationState::REST; set.len()])
            }
            MotionMode::Ballistic => Tracks::Ballistic(
                set.fragments()
                    .iter()
                    .map(|f| BallisticState::at_rest(f.rest_position()))
                    .collect(),
            ),
        };
        let poses = set.fragments().iter().map(|f| f.pose_at(0.0)).collect();
        Self { tracks, poses }
    }

    /// Step every fragment by `dt` and recompute its pose.
    ///
    /// `intent` says whether a fragment should currently be exploded; it is
    /// evaluated once per fragment per frame. `set` must be the set this
    /// animator was built for.
    pub fn advance(
        &mut self,
        set: &FragmentSet,
        intent: impl Fn(FragmentId) -> bool,
        dt: f32,
        options: &AnimationOptions,
        speed: f32,
    ) -> &[FragmentPose] {
        let filter = DecayFilter::from_options(options);
        let fragments = set.fragments();

        match &mut self.tracks {
            Tracks::Bounded(states) => {
                for ((fragment, state), pose) in
                    fragments.iter().zip(states).zip(&mut self.poses)
                {
                    state.advance(intent(fragment.id()), dt, speed, &filter);
                    let shown = state.settled_progress(filter.epsilon);
                    *pose = fragment.pose_at(options.easing.evaluate(shown));
                }
            }
            Tracks::Ballistic(states) => {
                for ((fragment, state), pose) in
                    fragments.iter().zip(states).zip(&mut self.poses)
                {
                    let rest = fragment.rest_position();
                    state.advance(
                        intent(fragment.id()),
                        fragment.velocity().unwrap_or_default(),
                        rest,
                        dt,
                        options.ballistic_return_rate,
                    );
                    *pose = fragment
                        .pose_at_position(state.displayed(rest, filter.epsilon));
                }
            }
        }

        &self.poses
    }

    /// Poses computed by the last [`advance`](Self::advance).
    #[must_use]
    pub fn poses(&self) -> &[FragmentPose] {
        &self.poses
    }

    /// Phase of one fragment.
    #[must_use]
    pub fn phase(
        &self,
        set: &FragmentSet,
        id: FragmentId,
        epsilon: f32,
    ) -> Option<Phase> {
        match &self.tracks {
            Tracks::Bounded(states) => {
                states.get(id.index()).map(|s| s.phase(epsilon))
            }
            Tracks::Ballistic(states) => {
                let rest = set.get(id)?.rest_position();
                states.get(id.index()).map(|s| s.phase(rest, epsilon))
            }
        }
    }

    /// Raw progress of a bounded fragment; `None` for unknown ids and for
    /// ballistic sets, which have no bounded progress.
    #[must_use]
    pub fn progress(&self, id: FragmentId) -> Option<f32> {
        match &self.tracks {
            Tracks::Bounded(states) => {
                states.get(id.index()).map(AnimationState::progress)
            }
            Tracks::Ballistic(_) => None,
        }
    }

    /// Whether every fragment has converged and nothing is flying.
    #[must_use]
    pub fn is_settled(&self, set: &FragmentSet, epsilon: f32) -> bool {
        match &self.tracks {
            Tracks::Bounded(states) => {
                states.iter().all(|s| s.is_settled(epsilon))
            }
            Tracks::Ballistic(states) => {
                states.iter().zip(set.fragments()).all(|(s, f)| {
                    !s.is_flying() && s.is_home(f.rest_position(), epsilon)
                })
            }
        }
    }
}
