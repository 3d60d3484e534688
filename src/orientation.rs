use crate::types::{Crate, Dims, Orientation};

/// The six axis permutations of a crate, in search priority order.
///
/// Crates with repeated dimensions produce repeated entries.
pub fn orientations(c: &Crate) -> [Orientation; 6] {
    let Dims {
        width: w,
        height: h,
        length: l,
    } = c.dims;
    [
        Dims::new(w, h, l),
        Dims::new(l, h, w),
        Dims::new(h, w, l),
        Dims::new(l, w, h),
        Dims::new(w, l, h),
        Dims::new(h, l, w),
    ]
    .map(|dims| Orientation {
        crate_id: c.id,
        dims,
    })
}

/// Same order as [`orientations`], keeping only the first of each equal triple.
pub fn distinct_orientations(c: &Crate) -> Vec<Orientation> {
    let mut out: Vec<Orientation> = Vec::with_capacity(6);
    for o in orientations(c) {
        if !out.iter().any(|seen| seen.dims == o.dims) {
            out.push(o);
        }
    }
    out
}
