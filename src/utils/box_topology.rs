//! Fixed combinatorial data of a box with the corner labeling of
//! [`OrientedBox::to_points`](crate::bounding_volume::OrientedBox::to_points).
//!
//! Corner `k` sits at `(±1, ±1, ±1)` in box coordinates with the signs
//! `0:(-,-,-) 1:(+,-,-) 2:(+,+,-) 3:(-,+,-) 4:(-,-,+) 5:(+,-,+) 6:(+,+,+) 7:(-,+,+)`.

/// A set of faces of a box.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BoxFaces(u8);

bitflags::bitflags! {
    /// Flags identifying the six faces of a box.
    ///
    /// The face orthogonal to the local axis `i` on the negative side has the bit `2 * i`
    /// and the one on the positive side has the bit `2 * i + 1`.
    impl BoxFaces: u8 {
        /// The face on the `-x` side of the box.
        const MIN_X = 1 << 0;
        /// The face on the `+x` side of the box.
        const MAX_X = 1 << 1;
        /// The face on the `-y` side of the box.
        const MIN_Y = 1 << 2;
        /// The face on the `+y` side of the box.
        const MAX_Y = 1 << 3;
        /// The face on the `-z` side of the box.
        const MIN_Z = 1 << 4;
        /// The face on the `+z` side of the box.
        const MAX_Z = 1 << 5;
    }
}

impl BoxFaces {
    /// The face orthogonal to the local axis `axis`, on its negative side if `positive` is `0`
    /// and on its positive side if it is `1`.
    #[inline]
    pub fn along_axis(axis: usize, positive: usize) -> Self {
        Self::from_bits_retain(1 << (2 * axis + positive))
    }
}

/// The three faces adjacent to each box corner.
pub const BOX_VERTEX_FACES: [BoxFaces; 8] = [
    BoxFaces::MIN_X.union(BoxFaces::MIN_Y).union(BoxFaces::MIN_Z),
    BoxFaces::MAX_X.union(BoxFaces::MIN_Y).union(BoxFaces::MIN_Z),
    BoxFaces::MAX_X.union(BoxFaces::MAX_Y).union(BoxFaces::MIN_Z),
    BoxFaces::MIN_X.union(BoxFaces::MAX_Y).union(BoxFaces::MIN_Z),
    BoxFaces::MIN_X.union(BoxFaces::MIN_Y).union(BoxFaces::MAX_Z),
    BoxFaces::MAX_X.union(BoxFaces::MIN_Y).union(BoxFaces::MAX_Z),
    BoxFaces::MAX_X.union(BoxFaces::MAX_Y).union(BoxFaces::MAX_Z),
    BoxFaces::MIN_X.union(BoxFaces::MAX_Y).union(BoxFaces::MAX_Z),
];

/// The twelve edges of a box: the `-z` ring, the `+z` ring, then the four edges along `z`.
pub const BOX_EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

/// The indices, into [`BOX_EDGES`], of the three edges incident to each corner.
pub const BOX_VERTEX_EDGES: [[usize; 3]; 8] = [
    [3, 0, 8],
    [0, 1, 9],
    [1, 2, 10],
    [2, 3, 11],
    [7, 4, 8],
    [4, 5, 9],
    [5, 6, 10],
    [6, 7, 11],
];

/// The two faces adjacent to each edge of [`BOX_EDGES`], as indices of face bits.
pub const BOX_EDGE_FACES: [[usize; 2]; 12] = [
    [4, 2],
    [4, 1],
    [4, 3],
    [4, 0],
    [5, 2],
    [5, 1],
    [5, 3],
    [5, 0],
    [0, 2],
    [2, 1],
    [1, 3],
    [3, 0],
];

// Silhouette loops indexed by the set of faces turned toward the viewer.
// Sets containing both faces orthogonal to the same axis cannot happen and map to
// an empty loop.
static BOX_SILHOUETTE_VERTICES: [&[u8]; 64] = [
    &[],
    &[7, 4, 0, 3],
    &[5, 6, 2, 1],
    &[],
    &[4, 5, 1, 0],
    &[3, 7, 4, 5, 1, 0],
    &[4, 5, 6, 2, 1, 0],
    &[],
    &[6, 7, 3, 2],
    &[6, 7, 4, 0, 3, 2],
    &[5, 6, 7, 3, 2, 1],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[0, 1, 2, 3],
    &[0, 1, 2, 3, 7, 4],
    &[3, 2, 6, 5, 1, 0],
    &[],
    &[1, 2, 3, 0, 4, 5],
    &[1, 2, 3, 7, 4, 5],
    &[2, 3, 0, 4, 5, 6],
    &[],
    &[0, 1, 2, 6, 7, 3],
    &[0, 1, 2, 6, 7, 4],
    &[0, 1, 5, 6, 7, 3],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[7, 6, 5, 4],
    &[7, 6, 5, 4, 0, 3],
    &[5, 4, 7, 6, 2, 1],
    &[],
    &[4, 7, 6, 5, 1, 0],
    &[3, 7, 6, 5, 1, 0],
    &[4, 7, 6, 2, 1, 0],
    &[],
    &[6, 5, 4, 7, 3, 2],
    &[6, 5, 4, 0, 3, 2],
    &[5, 4, 7, 3, 2, 1],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
];

static_assertions::const_assert_eq!(BoxFaces::all().bits(), 0b11_1111);
static_assertions::assert_eq_size!(BoxFaces, u8);

/// The corners, in loop order, of the silhouette of a box whose faces `front_faces` are
/// turned toward the viewer.
///
/// The loop has 4 corners when a single face is visible and 6 corners when two or three
/// faces are. Geometrically inconsistent face sets yield an empty slice.
#[inline]
pub fn box_silhouette_vertices(front_faces: BoxFaces) -> &'static [u8] {
    BOX_SILHOUETTE_VERTICES[front_faces.bits() as usize]
}
