//! Conservative rejection of volumes lying outside of a view frustum.

mod cull_view_frustum;
