//! Circular gap codec.
//!
//! Control and finish circles can be interrupted by angular gaps so the
//! circle does not obscure map detail. Gaps are stored as a 32-bit circular
//! mask: bit *i* covers the 11.25° sector starting at `i * 360 / 32`
//! degrees (counter-clockwise from +x), and a set bit means the sector is
//! drawn.
//!
//! Decoding produces the list of gap intervals `(start_deg, end_deg)` in
//! bit-scan encounter order. A gap crossing 0° is emitted with end < start;
//! consumers use modular interval containment.

use kurbo::Point;

/// Degrees covered by one mask bit.
pub const SECTOR_DEG: f64 = 360.0 / 32.0;

/// Synthetic end angle used when the mask is fully gapped, so callers can
/// still render a degenerate near-zero stroke.
pub const FULL_GAP_END: f64 = 359.9999;

fn bit(mask: u32, i: u32) -> u32 {
    (mask >> (i % 32)) & 1
}

/// Decode a gap mask into gap intervals.
///
/// `0xFFFF_FFFF` means no gaps and decodes to `None` (distinct from an
/// empty list). `0` decodes to the single synthetic interval
/// `[0, 359.9999)`. Otherwise the scan starts at the first 1→0 bit
/// transition and pairs each 0→1 transition (gap end) with the preceding
/// gap start. The flattened angle count is always even.
pub fn decode_gaps(mask: u32) -> Option<Vec<(f64, f64)>> {
    if mask == u32::MAX {
        return None;
    }
    if mask == 0 {
        return Some(vec![(0.0, FULL_GAP_END)]);
    }

    // Scan origin: the first drawn→gapped transition.
    let mut origin = 0;
    for i in 0..32 {
        if bit(mask, i) == 1 && bit(mask, i + 1) == 0 {
            origin = i + 1;
            break;
        }
    }

    let mut gaps = Vec::new();
    let mut gap_start = f64::from(origin % 32) * SECTOR_DEG;
    for i in origin..origin + 32 {
        let cur = bit(mask, i);
        let next = bit(mask, i + 1);
        if cur == 0 && next == 1 {
            gaps.push((gap_start, f64::from((i + 1) % 32) * SECTOR_DEG));
        } else if cur == 1 && next == 0 {
            gap_start = f64::from((i + 1) % 32) * SECTOR_DEG;
        }
    }
    Some(gaps)
}

/// True if `angle` (degrees, any value) lies inside the gap `(start, end)`,
/// where end < start means the gap wraps through 0°.
fn in_gap(angle: f64, start: f64, end: f64) -> bool {
    let a = angle.rem_euclid(360.0);
    if start <= end {
        a >= start && a < end
    } else {
        a >= start || a < end
    }
}

/// Re-encode gap intervals into a mask. A sector is cleared iff its
/// midpoint angle falls inside some gap.
pub fn encode_gaps(gaps: &[(f64, f64)]) -> u32 {
    let mut mask = u32::MAX;
    for i in 0..32u32 {
        let mid = (f64::from(i) + 0.5) * SECTOR_DEG;
        if gaps.iter().any(|&(s, e)| in_gap(mid, s, e)) {
            mask &= !(1 << i);
        }
    }
    mask
}

/// The drawn complement of a gap list: `(start_deg, sweep_deg)` arcs.
/// `None` gaps give the full circle.
pub fn arcs_from_gaps(gaps: &Option<Vec<(f64, f64)>>) -> Vec<(f64, f64)> {
    match gaps {
        None => vec![(0.0, 360.0)],
        Some(gaps) if gaps.is_empty() => vec![(0.0, 360.0)],
        Some(gaps) => {
            let mut arcs = Vec::with_capacity(gaps.len());
            for (i, &(_, end)) in gaps.iter().enumerate() {
                let next_start = gaps[(i + 1) % gaps.len()].0;
                let sweep = (next_start - end).rem_euclid(360.0);
                if sweep > 0.0 {
                    arcs.push((end, sweep));
                }
            }
            arcs
        }
    }
}

/// World-space handle positions at the gap boundaries of a circle.
pub fn gap_boundary_points(center: Point, radius: f64, mask: u32) -> Vec<Point> {
    let mut out = Vec::new();
    if let Some(gaps) = decode_gaps(mask) {
        for (start, end) in gaps {
            for angle in [start, end] {
                let rad = angle.to_radians();
                out.push(Point::new(
                    center.x + radius * rad.cos(),
                    center.y + radius * rad.sin(),
                ));
            }
        }
    }
    out
}

/// Move the gap boundary nearest to `old_angle` (within half a sector) to
/// `new_angle`, returning the re-encoded mask. Unmatched angles leave the
/// mask unchanged.
pub fn move_gap_boundary(mask: u32, old_angle: f64, new_angle: f64) -> u32 {
    let Some(mut gaps) = decode_gaps(mask) else {
        return mask;
    };
    let old = old_angle.rem_euclid(360.0);
    let new = new_angle.rem_euclid(360.0);
    let mut best: Option<(usize, usize, f64)> = None;
    for (gi, &(s, e)) in gaps.iter().enumerate() {
        for (side, angle) in [(0, s), (1, e)] {
            let diff = angle_diff(angle, old);
            if diff <= SECTOR_DEG / 2.0 && best.map_or(true, |(_, _, d)| diff < d) {
                best = Some((gi, side, diff));
            }
        }
    }
    match best {
        Some((gi, 0, _)) => gaps[gi].0 = new,
        Some((gi, _, _)) => gaps[gi].1 = new,
        None => return mask,
    }
    encode_gaps(&gaps)
}

fn angle_diff(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn full_mask_means_no_gaps() {
        assert_eq!(decode_gaps(u32::MAX), None);
    }

    #[test]
    fn zero_mask_is_one_synthetic_gap() {
        assert_eq!(decode_gaps(0), Some(vec![(0.0, FULL_GAP_END)]));
    }

    #[test]
    fn single_interior_gap() {
        // clear sectors 4..8 (45°..90°)
        let mask = u32::MAX & !(0b1111 << 4);
        let gaps = decode_gaps(mask).unwrap();
        assert_eq!(gaps, vec![(45.0, 90.0)]);
    }

    #[test]
    fn gap_wrapping_zero_reports_end_before_start() {
        // clear sectors 30, 31, 0, 1 (337.5° through 22.5°)
        let mask = u32::MAX & !(1 << 30) & !(1 << 31) & !1 & !(1 << 1);
        let gaps = decode_gaps(mask).unwrap();
        assert_eq!(gaps.len(), 1);
        let (s, e) = gaps[0];
        assert_eq!(s, 337.5);
        assert_eq!(e, 22.5);
    }

    #[test]
    fn two_gaps_in_encounter_order() {
        let mask = u32::MAX & !(0b11 << 2) & !(0b11 << 16);
        let gaps = decode_gaps(mask).unwrap();
        assert_eq!(gaps, vec![(22.5, 45.0), (180.0, 202.5)]);
    }

    #[test]
    fn encode_inverts_decode() {
        let mask = u32::MAX & !(0b1111 << 8) & !(0b11 << 24);
        let gaps = decode_gaps(mask).unwrap();
        assert_eq!(encode_gaps(&gaps), mask);
    }

    #[test]
    fn arcs_are_the_drawn_complement() {
        let mask = u32::MAX & !(0b1111 << 4);
        let arcs = arcs_from_gaps(&decode_gaps(mask));
        assert_eq!(arcs, vec![(90.0, 315.0)]);
        assert_eq!(arcs_from_gaps(&None), vec![(0.0, 360.0)]);
    }

    #[test]
    fn boundary_points_lie_on_the_circle() {
        let mask = u32::MAX & !(0b1111 << 4);
        let pts = gap_boundary_points(Point::new(10.0, 10.0), 3.0, mask);
        assert_eq!(pts.len(), 2);
        for p in pts {
            let r = ((p.x - 10.0).powi(2) + (p.y - 10.0).powi(2)).sqrt();
            assert!((r - 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn moving_a_gap_boundary_widens_the_gap() {
        let mask = u32::MAX & !(0b1111 << 4); // gap 45..90
        let moved = move_gap_boundary(mask, 90.0, 112.5);
        let gaps = decode_gaps(moved).unwrap();
        assert_eq!(gaps, vec![(45.0, 112.5)]);
        // an angle nowhere near a boundary is a no-op
        assert_eq!(move_gap_boundary(mask, 200.0, 210.0), mask);
    }

    proptest! {
        #[test]
        fn decoded_angles_are_even_count_in_range(mask in any::<u32>()) {
            if let Some(gaps) = decode_gaps(mask) {
                // flat pair list: always an even number of boundary angles
                prop_assert!(!gaps.is_empty() || mask == u32::MAX);
                for (s, e) in gaps {
                    prop_assert!((0.0..360.0).contains(&s));
                    prop_assert!((0.0..360.0).contains(&e));
                }
            } else {
                prop_assert_eq!(mask, u32::MAX);
            }
        }

        #[test]
        fn encode_decode_round_trip(mask in any::<u32>()) {
            match decode_gaps(mask) {
                None => prop_assert_eq!(mask, u32::MAX),
                Some(gaps) => {
                    if mask == 0 {
                        prop_assert_eq!(encode_gaps(&gaps), 0);
                    } else {
                        prop_assert_eq!(encode_gaps(&gaps), mask);
                    }
                }
            }
        }
    }
}
