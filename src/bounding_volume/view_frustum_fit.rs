//! Fitting view frustums to the projection of bounding volumes, and trimming their far plane.

use crate::bounding_volume::{Aabb, BoundingSphere, OrientedBox, ViewFrustum};
use crate::math::{Matrix, Point, Real, Vector};
use crate::query::FrustumFitError;
use crate::utils::{orthonormal_frame, orthonormal_frame_with_hint};

#[cfg(not(feature = "std"))]
use na::{ComplexField, RealField};

/// The depth kept between the near and the far plane when a frustum is constrained to a volume
/// lying entirely behind its near plane.
pub const MIN_DEPTH_GAP: Real = 1.0;

/// Configuration of the projection fits of [`ViewFrustum`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProjectionFitOptions {
    /// The far distance of the fitted frustum.
    ///
    /// It is not checked against the depth of the volume: use one of the `constrain_to_*`
    /// methods to bring the far plane back to the volume.
    pub far_distance: Real,
    /// The fit fails if any part of the volume is closer than this to the projection origin,
    /// along the fitted view direction.
    pub min_near_distance: Real,
}

impl ProjectionFitOptions {
    /// Creates a [`ProjectionFitOptions`] with the default values except for the far distance.
    pub fn with_far_distance(far_distance: Real) -> Self {
        Self {
            far_distance,
            ..Default::default()
        }
    }
}

impl Default for ProjectionFitOptions {
    fn default() -> Self {
        Self {
            far_distance: 1000.0,
            min_near_distance: 1.0,
        }
    }
}

/// Box corners expressed in a candidate frustum frame, with their extreme indices.
struct ProjectedCorners {
    frame: Matrix<Real>,
    points: [Point<Real>; 8],
    min_x: usize,
    min_y: usize,
    max_y: usize,
    min_z: usize,
    max_z: usize,
}

impl ProjectedCorners {
    fn new(
        corners: &[Point<Real>; 8],
        apex: &Point<Real>,
        dir: &Vector<Real>,
        hint: &Vector<Real>,
    ) -> Self {
        let frame = orthonormal_frame_with_hint(dir, hint);
        let points: [Point<Real>; 8] = corners.map(|corner| frame.tr_mul(&(corner - apex)).into());
        let mut result = Self {
            frame,
            points,
            min_x: 0,
            min_y: 0,
            max_y: 0,
            min_z: 0,
            max_z: 0,
        };

        let p = &result.points;
        for i in 1..8 {
            if p[i].x < p[result.min_x].x {
                result.min_x = i;
            }

            // Slopes are compared through cross-multiplication, all depths being positive
            // once the near check passed.
            if p[result.min_y].x * p[i].y < p[i].x * p[result.min_y].y {
                result.min_y = i;
            } else if p[result.max_y].x * p[i].y > p[i].x * p[result.max_y].y {
                result.max_y = i;
            }

            if p[result.min_z].x * p[i].z < p[i].x * p[result.min_z].z {
                result.min_z = i;
            } else if p[result.max_z].x * p[i].z > p[i].x * p[result.max_z].z {
                result.max_z = i;
            }
        }

        result
    }

    fn check_depth(&self, options: &ProjectionFitOptions) -> Result<(), FrustumFitError> {
        let depth = self.points[self.min_x].x;

        if depth <= options.min_near_distance {
            log::debug!(
                "Cannot fit a frustum to a box reaching the depth {} from the apex.",
                depth
            );
            Err(FrustumFitError::ApexInsideVolume { depth })
        } else {
            Ok(())
        }
    }

    /// The mean of the extreme angles in the plane spanned by the view direction and the
    /// frame axis `k`.
    fn mid_angle(&self, min: usize, max: usize, k: usize) -> Real {
        let (lo, hi) = (&self.points[min], &self.points[max]);
        0.5 * (lo[k].atan2(lo.x) + hi[k].atan2(hi.x))
    }

    fn max_slope(&self, min: usize, max: usize, k: usize) -> Real {
        let (lo, hi) = (&self.points[min], &self.points[max]);
        (lo[k] / lo.x).abs().max((hi[k] / hi.x).abs())
    }
}

impl ViewFrustum {
    /// Builds the frustum with its apex at `apex` enclosing the projection of `aabb`.
    pub fn from_aabb_projection(
        aabb: &Aabb,
        apex: &Point<Real>,
        options: &ProjectionFitOptions,
    ) -> Result<Self, FrustumFitError> {
        let mut result = Self::default();
        result.fit_to_aabb_projection(aabb, apex, options)?;
        Ok(result)
    }

    /// Builds the frustum with its apex at `apex` enclosing the projection of `obb`.
    pub fn from_box_projection(
        obb: &OrientedBox,
        apex: &Point<Real>,
        options: &ProjectionFitOptions,
    ) -> Result<Self, FrustumFitError> {
        let mut result = Self::default();
        result.fit_to_box_projection(obb, apex, options)?;
        Ok(result)
    }

    /// Builds the frustum with its apex at `apex` enclosing the projection of `sphere`.
    pub fn from_sphere_projection(
        sphere: &BoundingSphere,
        apex: &Point<Real>,
        options: &ProjectionFitOptions,
    ) -> Result<Self, FrustumFitError> {
        let mut result = Self::default();
        result.fit_to_sphere_projection(sphere, apex, options)?;
        Ok(result)
    }

    /// Reshapes this frustum so it has its apex at `apex` and encloses the projection of
    /// `aabb`.
    ///
    /// On failure, this frustum is left with its near, far, and inverse far distances set to
    /// zero.
    pub fn fit_to_aabb_projection(
        &mut self,
        aabb: &Aabb,
        apex: &Point<Real>,
        options: &ProjectionFitOptions,
    ) -> Result<(), FrustumFitError> {
        let obb = OrientedBox::from_aabb(aabb, &Point::origin(), &Matrix::identity());
        self.fit_to_box_projection(&obb, apex, options)
    }

    /// Reshapes this frustum so it has its apex at `apex` and encloses the projection of
    /// `obb`.
    ///
    /// The view direction starts along the line from the apex to the box center, and is
    /// corrected once toward the middle of the angular extent of the box. The frustum is
    /// not guaranteed to be the tightest one, but it always contains the box as long as
    /// [`ProjectionFitOptions::far_distance`] reaches past it.
    ///
    /// On failure, this frustum is left with its near, far, and inverse far distances set to
    /// zero.
    pub fn fit_to_box_projection(
        &mut self,
        obb: &OrientedBox,
        apex: &Point<Real>,
        options: &ProjectionFitOptions,
    ) -> Result<(), FrustumFitError> {
        self.near = 0.0;
        self.far = 0.0;
        self.inv_far = 0.0;

        let Some(mut dir) = (obb.center - apex).try_normalize(0.0) else {
            log::debug!("Cannot fit a frustum to a box centered on its apex.");
            return Err(FrustumFitError::DegenerateDirection);
        };

        // The box axis closest to the image plane, favoring large extents.
        let sq_extents = obb.half_extents.component_mul(&obb.half_extents);
        let mut best_axis = 0;
        let mut best_value = obb.axis.column(0).dot(&dir).abs();

        for i in 1..3 {
            let value = obb.axis.column(i).dot(&dir).abs();
            if value * sq_extents[best_axis] < best_value * sq_extents[i] {
                best_axis = i;
                best_value = value;
            }
        }

        let hint = obb.axis.column(best_axis).into_owned();
        let corners = obb.to_points();

        let first = ProjectedCorners::new(&corners, apex, &dir, &hint);
        first.check_depth(options)?;
        dir += first.frame.column(1) * first.mid_angle(first.min_y, first.max_y, 1).tan();
        dir += first.frame.column(2) * first.mid_angle(first.min_z, first.max_z, 2).tan();
        let _ = dir.normalize_mut();

        let fit = ProjectedCorners::new(&corners, apex, &dir, &hint);
        fit.check_depth(options)?;

        let far = options.far_distance;
        self.origin = *apex;
        self.axis = fit.frame;
        self.near = fit.points[fit.min_x].x;
        self.far = far;
        self.far_left = fit.max_slope(fit.min_y, fit.max_y, 1) * far;
        self.far_up = fit.max_slope(fit.min_z, fit.max_z, 2) * far;
        self.inv_far = 1.0 / far;

        Ok(())
    }

    /// Reshapes this frustum so it has its apex at `apex` and encloses the projection of
    /// `sphere`.
    ///
    /// The resulting frustum has a square cross-section whose sides are tangent to the sphere.
    /// On failure, this frustum is left with its near, far, and inverse far distances set to
    /// zero.
    pub fn fit_to_sphere_projection(
        &mut self,
        sphere: &BoundingSphere,
        apex: &Point<Real>,
        options: &ProjectionFitOptions,
    ) -> Result<(), FrustumFitError> {
        self.near = 0.0;
        self.far = 0.0;
        self.inv_far = 0.0;

        let dir = sphere.center - apex;
        let dist = dir.norm();
        let radius = sphere.radius;

        if dist <= radius + options.min_near_distance {
            log::debug!(
                "Cannot fit a frustum to a sphere of radius {} seen from the distance {}.",
                radius,
                dist
            );
            return Err(FrustumFitError::ApexInsideVolume {
                depth: dist - radius,
            });
        }

        let far = options.far_distance;
        let tangent_len = (dist * dist - radius * radius).sqrt();

        self.origin = *apex;
        self.axis = orthonormal_frame(&(dir / dist));
        self.near = dist - radius;
        self.far = far;
        self.far_left = radius / tangent_len * far;
        self.far_up = self.far_left;
        self.inv_far = 1.0 / far;

        Ok(())
    }

    /// Moves the far plane of this frustum to the farthest point of a volume, given the
    /// projection of that volume on the view direction.
    fn constrain_far_to(&mut self, (_, max): (Real, Real)) -> bool {
        let new_far = max - self.view_dir().dot(&self.origin.coords);

        if new_far <= self.near {
            self.move_far_distance(self.near + MIN_DEPTH_GAP);
            false
        } else {
            self.move_far_distance(new_far);
            true
        }
    }

    /// Moves the far plane of this frustum onto the farthest point of `aabb`, keeping the
    /// opening angles.
    ///
    /// Returns `false` if `aabb` lies entirely before the near plane, in which case the far
    /// plane is set just past the near plane.
    pub fn constrain_to_aabb(&mut self, aabb: &Aabb) -> bool {
        let projection = aabb.project_on_axis(&self.view_dir());
        self.constrain_far_to(projection)
    }

    /// Moves the far plane of this frustum onto the farthest point of `obb`, keeping the
    /// opening angles.
    ///
    /// Returns `false` if `obb` lies entirely before the near plane, in which case the far
    /// plane is set just past the near plane.
    pub fn constrain_to_box(&mut self, obb: &OrientedBox) -> bool {
        let projection = obb.project_on_axis(&self.view_dir());
        self.constrain_far_to(projection)
    }

    /// Moves the far plane of this frustum onto the farthest point of `sphere`, keeping the
    /// opening angles.
    ///
    /// Returns `false` if `sphere` lies entirely before the near plane, in which case the far
    /// plane is set just past the near plane.
    pub fn constrain_to_sphere(&mut self, sphere: &BoundingSphere) -> bool {
        let projection = sphere.project_on_axis(&self.view_dir());
        self.constrain_far_to(projection)
    }

    /// Moves the far plane of this frustum onto the farthest point of `other`, keeping the
    /// opening angles.
    ///
    /// Returns `false` if `other` lies entirely before the near plane, in which case the far
    /// plane is set just past the near plane.
    pub fn constrain_to_frustum(&mut self, other: &ViewFrustum) -> bool {
        let projection = other.project_on_axis(&self.view_dir());
        self.constrain_far_to(projection)
    }
}
