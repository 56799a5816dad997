use crate::blendshape::BlendshapeAccessor;

/// Muscle-group activations derived from one frame's blendshape scores.
/// Computed once per frame and consumed by both the emotion classifier and
/// the metrics estimator, so the label and the scores always come from the
/// same reading of the face.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActivationSet {
    /// Zygomaticus major: lip corners pulled up
    pub smile_muscle: f32,
    /// Orbicularis oculi: cheek raise / eye crinkle (Duchenne marker)
    pub cheek_muscle: f32,
    /// Corrugator supercilii: brow lowering
    pub brow_furrow: f32,
    /// Frontalis, inner: inner brow raise
    pub brow_inner_up: f32,
    /// Frontalis, outer: outer brow raise
    pub brow_outer_up: f32,
    /// Upper lid raiser
    pub eye_wide: f32,
    /// Levator labii superioris: nose wrinkle
    pub nose_wrinkle: f32,
    /// Mouth corners pulled down
    pub mouth_frown: f32,
    /// Orbicularis oris: lips pressed together
    pub lip_press: f32,
    /// Jaw opening
    pub jaw_drop: f32,
    /// Left lid tightener, used by the anger formula
    pub eye_squint: f32,
    /// Gaze away from camera, left + right
    pub look_out: f32,
    /// Gaze down, left + right
    pub look_down: f32,
    /// Blink, left + right
    pub blink: f32,
}

impl ActivationSet {
    pub fn from_accessor(accessor: &BlendshapeAccessor) -> Self {
        Self {
            smile_muscle: bilateral(accessor, "mouthSmileLeft", "mouthSmileRight"),
            cheek_muscle: bilateral(accessor, "cheekSquintLeft", "cheekSquintRight"),
            brow_furrow: bilateral(accessor, "browDownLeft", "browDownRight"),
            brow_inner_up: accessor.score("browInnerUp"),
            brow_outer_up: bilateral(accessor, "browOuterUpLeft", "browOuterUpRight"),
            eye_wide: bilateral(accessor, "eyeWideLeft", "eyeWideRight"),
            nose_wrinkle: bilateral(accessor, "noseSneerLeft", "noseSneerRight"),
            mouth_frown: bilateral(accessor, "mouthFrownLeft", "mouthFrownRight"),
            lip_press: bilateral(accessor, "mouthPressLeft", "mouthPressRight"),
            jaw_drop: accessor.score("jawOpen"),
            eye_squint: accessor.score("eyeSquintLeft"),
            // Gaze and blink are additive: both eyes drifting doubles the signal
            look_out: additive(accessor, "eyeLookOutLeft", "eyeLookOutRight"),
            look_down: additive(accessor, "eyeLookDownLeft", "eyeLookDownRight"),
            blink: additive(accessor, "eyeBlinkLeft", "eyeBlinkRight"),
        }
    }
}

/// Symmetric activation for a bilateral blendshape pair.
fn bilateral(accessor: &BlendshapeAccessor, left: &str, right: &str) -> f32 {
    (accessor.score(left) + accessor.score(right)) / 2.0
}

fn additive(accessor: &BlendshapeAccessor, left: &str, right: &str) -> f32 {
    accessor.score(left) + accessor.score(right)
}
