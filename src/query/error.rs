use crate::math::Real;

/// Error indicating that a view frustum could not be fitted to the projection of a volume.
///
/// When this is returned, the frustum is left in its zero state: its near distance, far
/// distance, and inverse far distance are all zero.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum FrustumFitError {
    /// The projection origin coincides with the center of the volume, so no view direction can
    /// be derived.
    #[error("the projection origin coincides with the center of the volume.")]
    DegenerateDirection,
    /// Part of the volume is too close to the projection origin, or behind it.
    #[error("the volume reaches a depth of {depth} from the projection origin, which is below the minimal near distance.")]
    ApexInsideVolume {
        /// The smallest depth of the volume along the fitted view direction.
        depth: Real,
    },
}
