use crate::{
    containers::Stack,
    generators::Frame,
    maze::{Cell, Grid, Orientation},
    rng::MazeRng,
};

/// A rectangle still to be divided, with inclusive bounds. Bounds always fall on even
/// coordinates, so walls go on odd lines and passages on even ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    x0: u16,
    y0: u16,
    x1: u16,
    y1: u16,
    /// Orientation of the wall line that will split this region.
    orientation: Orientation,
}

impl Region {
    /// Regions narrower than two cells in either direction are left open.
    fn new(x0: u16, x1: u16, y0: u16, y1: u16) -> Option<Self> {
        if x1 <= x0 + 1 || y1 <= y0 + 1 {
            return None;
        }
        let orientation = if x1 - x0 > y1 - y0 {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        };
        Some(Region {
            x0,
            y0,
            x1,
            y1,
            orientation,
        })
    }
}

pub(super) fn init<R: MazeRng>(grid: &mut Grid, stack: &mut Stack<Frame>, rng: &mut R) {
    grid.fill(Cell::Path);

    let orientation = if rng.next_u32() & 1 == 1 {
        Orientation::Vertical
    } else {
        Orientation::Horizontal
    };
    stack.push(Frame::Division(Region {
        x0: 0,
        y0: 0,
        x1: grid.width() - 1,
        y1: grid.height() - 1,
        orientation,
    }));
}

/// Draws one wall line across `region`, opens one or two passages through it, and pushes the
/// two halves.
pub(super) fn step<R: MazeRng>(
    grid: &mut Grid,
    region: Region,
    stack: &mut Stack<Frame>,
    rng: &mut R,
) {
    let Region {
        x0,
        y0,
        x1,
        y1,
        orientation,
    } = region;

    // Both lines are drawn every time so the random sequence does not depend on orientation
    let x_wall = (rng.range(x0 as u32, x1 as u32 - 1) | 1) as u16;
    let y_wall = (rng.range(y0 as u32, y1 as u32 - 1) | 1) as u16;

    match orientation {
        Orientation::Vertical => {
            (y0..=y1).for_each(|y| grid.set((x_wall, y), Cell::Wall));
            for y in passages(rng, y0, y1, grid.height()) {
                grid.set((x_wall, y), Cell::Path);
            }

            let halves = [
                Region::new(x0, x_wall - 1, y0, y1),
                Region::new(x_wall + 1, x1, y0, y1),
            ];
            halves
                .into_iter()
                .flatten()
                .for_each(|half| stack.push(Frame::Division(half)));
        }
        Orientation::Horizontal => {
            (x0..=x1).for_each(|x| grid.set((x, y_wall), Cell::Wall));
            for x in passages(rng, x0, x1, grid.width()) {
                grid.set((x, y_wall), Cell::Path);
            }

            let halves = [
                Region::new(x0, x1, y0, y_wall - 1),
                Region::new(x0, x1, y_wall + 1, y1),
            ];
            halves
                .into_iter()
                .flatten()
                .for_each(|half| stack.push(Frame::Division(half)));
        }
    }
}

/// Even positions in `lo..=hi` to open in a wall line spanning that range.
///
/// Long lines occasionally get a second passage, one in each half. The chance grows with the
/// length of the line relative to the whole grid side `side`.
fn passages<R: MazeRng>(rng: &mut R, lo: u16, hi: u16, side: u16) -> Vec<u16> {
    let span = (hi - lo) as u32;
    let chance = rng.next_u32() % ((side as u32 - 1) / span);
    let even = |v: u32| (v & !1) as u16;

    if span > 5 && chance == 0 {
        let mid = lo as u32 + span / 2;
        vec![
            even(rng.range(lo as u32, mid)),
            even(rng.range(mid, hi as u32)),
        ]
    } else {
        vec![even(rng.range(lo as u32, hi as u32))]
    }
}
