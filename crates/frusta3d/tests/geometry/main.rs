#[macro_use]
extern crate approx;

mod box_growth;
mod box_rays;
mod cull_soundness;
mod frustum_regions;
mod projection_bounds;
mod scenarios;
mod util;
