use crate::geometry::{Point, position_from_angle};
use strum::Display;

pub const SLOT_COUNT: usize = 5;
/// Arc position the selected slot lands on when the menu is open.
pub const CENTER_SLOT: usize = (SLOT_COUNT - 1) / 2;
pub const START_ANGLE: f64 = 90.0;
pub const FULL_CIRCLE: f64 = 360.0;
pub const HALF_CIRCLE: f64 = 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Layout {
    Closed,
    Open,
}

impl Layout {
    pub fn from_open(open: bool) -> Self {
        if open { Self::Open } else { Self::Closed }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    closed_radius: f64,
    open_radius: f64,
    closed_step: f64,
    open_step: f64,
}

impl LayoutParams {
    pub fn new(closed_radius: f64, open_radius: f64) -> Self {
        Self {
            closed_radius,
            open_radius,
            closed_step: FULL_CIRCLE / SLOT_COUNT as f64,
            open_step: HALF_CIRCLE / (SLOT_COUNT - 1) as f64,
        }
    }

    pub fn radius(&self, layout: Layout) -> f64 {
        match layout {
            Layout::Closed => self.closed_radius,
            Layout::Open => self.open_radius,
        }
    }

    pub fn step(&self, layout: Layout) -> f64 {
        match layout {
            Layout::Closed => self.closed_step,
            Layout::Open => self.open_step,
        }
    }

    pub fn closed_angle(&self, index: usize) -> f64 {
        START_ANGLE + index as f64 * self.closed_step
    }

    /// Target angle of every slot. `selected` only matters for [`Layout::Open`].
    pub fn circular_angles(&self, layout: Layout, selected: usize) -> [f64; SLOT_COUNT] {
        std::array::from_fn(|i| match layout {
            Layout::Closed => self.closed_angle(i),
            Layout::Open => START_ANGLE + arc_index(i, selected) as f64 * self.open_step,
        })
    }

    pub fn circular_positions(&self, layout: Layout, selected: usize) -> [Point; SLOT_COUNT] {
        let radius = self.radius(layout);
        self.circular_angles(layout, selected)
            .map(|angle| position_from_angle(angle, radius))
    }
}

/// How many arc positions the open layout is rotated so `selected` sits on [`CENTER_SLOT`].
pub fn rotation_steps(selected: usize) -> isize {
    selected as isize - CENTER_SLOT as isize
}

pub fn arc_index(index: usize, selected: usize) -> usize {
    let n = SLOT_COUNT as isize;
    (index as isize - rotation_steps(selected)).rem_euclid(n) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{angle_of, wrap_degrees};

    const EPS: f64 = 1e-9;

    fn params() -> LayoutParams {
        LayoutParams::new(100.0, 200.0)
    }

    #[test]
    fn test_steps_derived_from_slot_count() {
        let p = params();
        assert!((p.step(Layout::Closed) - 72.0).abs() < EPS);
        assert!((p.step(Layout::Open) - 45.0).abs() < EPS);
        assert_eq!(CENTER_SLOT, 2);
    }

    #[test]
    fn test_closed_layout_is_full_circle() {
        let angles = params().circular_angles(Layout::Closed, 4);
        for (i, angle) in angles.iter().enumerate() {
            assert!((angle - (90.0 + i as f64 * 72.0)).abs() < EPS);
        }

        for pos in params().circular_positions(Layout::Closed, 0) {
            assert!((pos.length() - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_open_layout_centres_selection() {
        let p = params();
        for selected in 0..SLOT_COUNT {
            let angles = p.circular_angles(Layout::Open, selected);
            assert!((angles[selected] - 180.0).abs() < EPS);

            let mut sorted = angles;
            sorted.sort_by(f64::total_cmp);
            for w in sorted.windows(2) {
                assert!(w[1] - w[0] > 1.0, "angles must be distinct: {angles:?}");
            }
            assert!(sorted.iter().all(|a| (90.0..=270.0).contains(a)));
        }
    }

    #[test]
    fn test_open_layout_without_rotation() {
        let angles = params().circular_angles(Layout::Open, CENTER_SLOT);
        assert_eq!(rotation_steps(CENTER_SLOT), 0);
        for (i, angle) in angles.iter().enumerate() {
            assert!((angle - (90.0 + i as f64 * 45.0)).abs() < EPS);
        }
    }

    #[test]
    fn test_arc_index_wraps() {
        // selecting slot 4 rotates the arc by two positions
        assert_eq!(rotation_steps(4), 2);
        let mapping: Vec<usize> = (0..SLOT_COUNT).map(|i| arc_index(i, 4)).collect();
        assert_eq!(mapping, vec![3, 4, 0, 1, 2]);

        assert_eq!(rotation_steps(0), -2);
        let mapping: Vec<usize> = (0..SLOT_COUNT).map(|i| arc_index(i, 0)).collect();
        assert_eq!(mapping, vec![2, 3, 4, 0, 1]);
    }

    #[test]
    fn test_open_positions_on_left_half() {
        for pos in params().circular_positions(Layout::Open, 3) {
            assert!((pos.length() - 200.0).abs() < 1e-9);
            assert!(pos.x <= 1e-9);
            let angle = wrap_degrees(angle_of(pos));
            assert!((90.0 - 1e-9..=270.0 + 1e-9).contains(&angle));
        }
    }
}
