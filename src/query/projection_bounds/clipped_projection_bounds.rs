use super::projection_bounds_view_frustum::{forward_hit, full_cross_section, non_empty};
use super::SideCull;
use crate::bounding_volume::details::box_corners;
use crate::bounding_volume::{Aabb, OrientedBox, ViewFrustum};
use crate::math::{Point, Real, DIM, WORLD_INFINITY};
use crate::query::Ray;
use crate::utils::{BoxFaces, BOX_EDGES, BOX_VERTEX_FACES};

impl ViewFrustum {
    /// Cuts the four lateral edges of this frustum where they leave `obb`.
    ///
    /// Returns, for each far corner in the order of [`Self::to_points`], the fraction of the
    /// lateral edge from the apex to that corner kept inside of the box, along with the box
    /// face cutting it. Fractions never go below `(near + 1) / far`, so the clipped frustum
    /// keeps some depth past its near plane.
    pub fn clip_frustum_to_box(&self, obb: &OrientedBox) -> ([Real; 4], [BoxFaces; 4]) {
        let local_origin = obb.to_local_point(&self.origin);
        let local_axis = obb.axis.tr_mul(&self.axis);
        let view = local_axis.column(0) * self.far;
        let left = local_axis.column(1) * self.far_left;
        let up = local_axis.column(2) * self.far_up;
        let corner_vecs = [
            view + left + up,
            view - left + up,
            view - left - up,
            view + left - up,
        ];

        let min_fraction = (self.near + 1.0) * self.inv_far;
        let mut fractions = [WORLD_INFINITY; 4];
        let mut faces = [BoxFaces::empty(); 4];

        for (i, corner_vec) in corner_vecs.iter().enumerate() {
            for k in 0..DIM {
                // Parallel to both faces along this axis.
                if corner_vec[k] == 0.0 {
                    continue;
                }

                let positive = (corner_vec[k] > 0.0) as usize;
                let bound = if positive == 1 {
                    obb.half_extents[k]
                } else {
                    -obb.half_extents[k]
                };
                let f = (bound - local_origin[k]) / corner_vec[k];

                if f < fractions[i] {
                    fractions[i] = f;
                    faces[i] = BoxFaces::along_axis(k, positive);
                }
            }

            fractions[i] = fractions[i].max(min_fraction);
        }

        (fractions, faces)
    }

    /// Computes the bounds, in the projection space of this frustum, of `frustum` once clipped
    /// to `clip_box`.
    ///
    /// The lateral edges of `frustum` are first cut where they leave `clip_box` (see
    /// [`Self::clip_frustum_to_box`]). The edges of `clip_box` inside of `frustum` then close
    /// the clipped volume. This is typically used to trim the frustum of a light to the bounds
    /// of a scene before fitting a shadow frustum to it.
    ///
    /// Returns `None` if nothing of the clipped volume is seen through this frustum.
    pub fn clipped_projection_bounds(
        &self,
        frustum: &ViewFrustum,
        clip_box: &OrientedBox,
    ) -> Option<Aabb> {
        if frustum.contains_point(&self.origin) {
            let base = self.apex_depth();
            let (box_min, box_max) = clip_box.project_on_axis(&self.view_dir());
            let (frustum_min, frustum_max) = frustum.project_on_axis(&self.view_dir());
            return non_empty(full_cross_section(
                box_min.max(frustum_min) - base,
                box_max.min(frustum_max) - base,
            ));
        }

        let (fractions, faces) = frustum.clip_frustum_to_box(clip_box);
        let used_faces = faces.iter().fold(BoxFaces::empty(), |acc, f| acc | *f);

        let local = frustum.localized_in(&self.origin, &self.axis);
        let clip_points = local.to_clipped_points(&fractions);

        let mut bounds = Aabb::new_invalid();
        let clip_culls = self.add_local_lateral_edges(&clip_points, &mut bounds);
        let mut outside = clip_culls.iter().fold(SideCull::empty(), |acc, c| acc | *c);
        let near_cull = clip_culls[..4].iter().fold(SideCull::all(), |acc, c| acc & *c);
        let far_cull = clip_culls[4..].iter().fold(SideCull::all(), |acc, c| acc & *c);

        if !outside.is_empty() {
            if near_cull.is_empty() && local.near > 0.0 {
                self.add_local_ring(&clip_points, &clip_culls, 0, &mut bounds);
            }

            if far_cull.is_empty() {
                self.add_local_ring(&clip_points, &clip_culls, 1, &mut bounds);
            }
        }

        let far_outside = !far_cull.is_empty() && (near_cull & far_cull).is_empty();
        let single_face = faces.iter().all(|f| *f == faces[0]);

        // The box closes the clipped frustum with the faces it was cut by.
        if !far_outside && !single_face {
            let points_in_frustum = box_corners(
                &frustum.to_local_point(&clip_box.center),
                &clip_box.half_extents,
                &frustum.axis.tr_mul(&clip_box.axis),
            );
            let points_in_self = box_corners(
                &self.to_local_point(&clip_box.center),
                &clip_box.half_extents,
                &self.axis.tr_mul(&clip_box.axis),
            );

            let left_scale = frustum.far_left * frustum.inv_far;
            let up_scale = frustum.far_up * frustum.inv_far;
            let mut box_culls = [SideCull::all(); 8];

            for (i, pt) in points_in_frustum.iter().enumerate() {
                if (BOX_VERTEX_FACES[i] & used_faces).is_empty() || pt.x <= 0.0 {
                    continue;
                }

                let mut cull = SideCull::empty();
                if pt.y.abs() > pt.x * left_scale {
                    cull |= if pt.y < 0.0 { SideCull::RIGHT } else { SideCull::LEFT };
                }
                if pt.z.abs() > pt.x * up_scale {
                    cull |= if pt.z < 0.0 { SideCull::DOWN } else { SideCull::UP };
                }
                box_culls[i] = cull;
            }

            for [p1, p2] in BOX_EDGES {
                if !(box_culls[p1] & box_culls[p2]).is_empty() {
                    continue;
                }

                let Some(segment) =
                    frustum.clip_local_segment(&points_in_frustum, &points_in_self, p1, p2)
                else {
                    continue;
                };

                let (start_cull, end_cull) =
                    self.add_local_segment_set_cull(&segment.start, &segment.end, &mut bounds);
                let _ = self.add_local_caps(
                    &clip_points,
                    &clip_culls,
                    &segment.start,
                    start_cull,
                    segment.start_clip,
                    &mut bounds,
                );
                let _ = self.add_local_caps(
                    &clip_points,
                    &clip_culls,
                    &segment.end,
                    end_cull,
                    segment.end_clip,
                    &mut bounds,
                );
                outside |= start_cull | end_cull;
            }
        }

        let origin_in_frustum = frustum.to_local_point(&self.origin);
        let origin_in_box = clip_box.to_local_point(&self.origin);
        let box_bounds = Aabb::from_half_extents(Point::origin(), clip_box.half_extents);

        self.add_corner_rays(outside, &mut bounds, |dir| {
            let in_frustum = frustum
                .local_ray_intersection(&Ray::new(origin_in_frustum, frustum.axis.tr_mul(dir)));
            let (s1, s2) = forward_hit(&in_frustum)?;
            let in_box = box_bounds.ray_interval(&Ray::new(origin_in_box, clip_box.axis.tr_mul(dir)));

            (in_box.crosses() && in_box.scale2 > s1 && in_box.scale1 < s2).then_some((s1, s2))
        });

        non_empty(bounds)
    }
}
