use fastrand::Rng;

/// Moore neighbourhood offsets, row by row
const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

// ——> GRID ENGINE

/// Bounded game of life board.
///
/// Cells are stored row-major in two buffers: `front` holds the current generation and
/// `back` receives the next one during [`Grid::step`], after which the two are swapped.
/// The edges are hard boundaries, nothing wraps around.
#[derive(Debug, Clone)]
pub struct Grid {
    front: Vec<bool>,
    back: Vec<bool>,
    /// the amount of cells on the x axis
    width: usize,
    /// the amount of cells on the y axis
    height: usize,
    /// pixels per cell
    cell_size: u32,
    /// last known container size in pixels
    container: (u32, u32),
    /// generations stepped since the last rebuild
    generation: u64,
    rng: Rng,
}

impl Grid {
    /// Sizes the grid to fit the container and fills it at random.
    pub fn new(container_width: u32, container_height: u32, cell_size: u32) -> Self {
        Self::with_rng(container_width, container_height, cell_size, Rng::new())
    }

    /// Same as [`Grid::new`], drawing cell states from the given generator.
    pub fn with_rng(
        container_width: u32,
        container_height: u32,
        cell_size: u32,
        rng: Rng,
    ) -> Self {
        let mut grid = Self {
            front: Vec::new(),
            back: Vec::new(),
            width: 0,
            height: 0,
            cell_size: sanitize_cell_size(cell_size),
            container: (container_width, container_height),
            generation: 0,
            rng,
        };
        grid.resize(container_width, container_height);
        grid
    }

    /// Throws away the current generation and fills every cell with a coin flip.
    pub fn randomize(&mut self) {
        let len = self.width * self.height;
        let rng = &mut self.rng;
        self.front.clear();
        self.front.extend((0..len).map(|_| rng.bool()));
        self.back.clear();
        self.back.resize(len, false);
        self.generation = 0;
    }

    /// Recomputes the dimensions for a new container size and rebuilds the board.
    ///
    /// Nothing of the previous generation survives, even where the old and new boards overlap.
    pub fn resize(&mut self, container_width: u32, container_height: u32) {
        self.container = (container_width, container_height);
        self.width = (container_width / self.cell_size) as usize;
        self.height = (container_height / self.cell_size) as usize;
        self.randomize();
    }

    /// Changes the pixels per cell and rebuilds the board for the last known container.
    pub fn set_cell_size(&mut self, cell_size: u32) {
        self.cell_size = sanitize_cell_size(cell_size);
        let (w, h) = self.container;
        self.resize(w, h);
    }

    /// Advances the board by one generation.
    ///
    /// Every cell is computed from `front` only and written to `back`, so updates are
    /// simultaneous. The buffers trade places afterwards.
    pub fn step(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = self.idx(x, y);
                let alive = next_state(self.front[idx], self.live_neighbours(x, y));
                self.back[idx] = alive;
            }
        }
        std::mem::swap(&mut self.front, &mut self.back);
        self.generation += 1;
    }

    /// Kills every cell without touching the dimensions.
    pub fn clear(&mut self) {
        self.front.fill(false);
        self.generation = 0;
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    #[inline]
    pub fn container(&self) -> (u32, u32) {
        self.container
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// the state of a cell, cells outside the board are dead
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.front[self.idx(x, y)]
    }

    /// sets the state of a cell, ignored outside the board
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        if x < self.width && y < self.height {
            let idx = self.idx(x, y);
            self.front[idx] = alive;
        }
    }

    /// rows of the current generation, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        (0..self.height).map(move |y| &self.front[y * self.width..(y + 1) * self.width])
    }

    /// number of alive cells
    pub fn population(&self) -> usize {
        self.front.iter().filter(|alive| **alive).count()
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// counts alive cells around (x, y), skipping positions outside the board
    fn live_neighbours(&self, x: usize, y: usize) -> u8 {
        NEIGHBOUR_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| {
                let nx = x.checked_add_signed(dx).filter(|nx| *nx < self.width)?;
                let ny = y.checked_add_signed(dy).filter(|ny| *ny < self.height)?;
                Some(self.front[self.idx(nx, ny)])
            })
            .filter(|alive| *alive)
            .count() as u8
    }
}

#[inline]
fn next_state(alive: bool, neighbours: u8) -> bool {
    matches!((alive, neighbours), (true, 2) | (true, 3) | (false, 3))
}

fn sanitize_cell_size(cell_size: u32) -> u32 {
    debug_assert!(cell_size > 0, "cell size must be positive");
    cell_size.max(1)
}

#[cfg(test)]
mod test {
    use super::*;

    /// a dead board of `width` x `height` cells, one pixel per cell
    fn dead_grid(width: u32, height: u32) -> Grid {
        let mut grid = Grid::with_rng(width, height, 1, Rng::with_seed(7));
        grid.clear();
        grid
    }

    fn alive_cells(grid: &Grid) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                if grid.get(x, y) {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    #[test]
    fn dimensions_follow_container() {
        let grid = Grid::with_rng(101, 49, 5, Rng::with_seed(1));
        assert_eq!(20, grid.width());
        assert_eq!(9, grid.height());
        assert_eq!(9, grid.rows().count());
        assert!(grid.rows().all(|row| row.len() == 20));

        let mut grid = grid;
        for (w, h) in [(0, 0), (4, 100), (1000, 3), (999, 999)] {
            grid.resize(w, h);
            assert_eq!((w / 5) as usize, grid.width());
            assert_eq!((h / 5) as usize, grid.height());
            assert_eq!(grid.height(), grid.rows().count());
            assert_eq!((w, h), grid.container());
        }
    }

    #[test]
    fn empty_container_gives_empty_grid() {
        let mut grid = Grid::with_rng(0, 300, 2, Rng::with_seed(3));
        assert_eq!(0, grid.width());
        assert_eq!(150, grid.height());
        assert_eq!(grid.height(), grid.rows().count());
        assert!(grid.rows().all(|row| row.is_empty()));
        assert_eq!(0, grid.population());
        grid.step();
        assert_eq!(0, grid.population());
        assert_eq!(1, grid.generation());
    }

    #[test]
    fn set_cell_size_rebuilds_for_last_container() {
        let mut grid = Grid::with_rng(100, 60, 2, Rng::with_seed(5));
        assert_eq!((50, 30), (grid.width(), grid.height()));
        grid.step();
        grid.set_cell_size(25);
        assert_eq!(25, grid.cell_size());
        assert_eq!((4, 2), (grid.width(), grid.height()));
        assert_eq!(0, grid.generation());
    }

    #[test]
    fn randomize_keeps_dimensions() {
        let mut grid = Grid::with_rng(64, 48, 1, Rng::with_seed(11));
        for _ in 0..5 {
            grid.randomize();
            assert_eq!(64, grid.width());
            assert_eq!(48, grid.height());
            assert_eq!(48, grid.rows().count());
            assert!(grid.rows().all(|row| row.len() == 64));
        }
    }

    #[test]
    fn random_fill_is_roughly_half_alive() {
        let grid = Grid::with_rng(100, 100, 1, Rng::with_seed(42));
        let population = grid.population();
        assert!((4000..6000).contains(&population), "population {population}");
    }

    #[test]
    fn dead_grid_stays_dead() {
        let mut grid = dead_grid(16, 9);
        grid.step();
        assert_eq!(0, grid.population());
    }

    #[test]
    fn lonely_cell_dies() {
        let mut grid = dead_grid(5, 5);
        grid.set(2, 2, true);
        grid.step();
        assert!(!grid.get(2, 2));
        assert_eq!(0, grid.population());
    }

    #[test]
    fn block_is_stable() {
        let mut grid = dead_grid(8, 8);
        let block = [(3, 3), (4, 3), (3, 4), (4, 4)];
        for (x, y) in block {
            grid.set(x, y, true);
        }
        grid.step();
        assert_eq!(block.to_vec(), alive_cells(&grid));
        grid.step();
        assert_eq!(block.to_vec(), alive_cells(&grid));
    }

    #[test]
    fn blinker_oscillates() {
        let mut grid = dead_grid(5, 5);
        for x in 1..=3 {
            grid.set(x, 2, true);
        }
        grid.step();
        assert_eq!(vec![(2, 1), (2, 2), (2, 3)], alive_cells(&grid));
        grid.step();
        assert_eq!(vec![(1, 2), (2, 2), (3, 2)], alive_cells(&grid));
        assert_eq!(2, grid.generation());
    }

    #[test]
    fn edges_do_not_wrap() {
        // a blinker laid along the top edge loses its upper phase
        let mut grid = dead_grid(5, 5);
        for x in 1..=3 {
            grid.set(x, 0, true);
        }
        grid.step();
        assert_eq!(vec![(2, 0), (2, 1)], alive_cells(&grid));

        // cells on the opposite edges never see each other
        let mut grid = dead_grid(4, 4);
        grid.set(3, 0, true);
        grid.set(3, 1, true);
        grid.set(0, 3, true);
        assert_eq!(0, grid.live_neighbours(0, 0));
        assert_eq!(0, grid.live_neighbours(0, 1));
        assert_eq!(2, grid.live_neighbours(2, 0));
    }

    #[test]
    fn corner_counts_only_in_bounds_neighbours() {
        let mut grid = dead_grid(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                grid.set(x, y, true);
            }
        }
        assert_eq!(3, grid.live_neighbours(0, 0));
        assert_eq!(3, grid.live_neighbours(2, 2));
        assert_eq!(5, grid.live_neighbours(1, 0));
        assert_eq!(8, grid.live_neighbours(1, 1));

        // full 3x3: corners survive, edges and center die
        grid.step();
        assert_eq!(vec![(0, 0), (2, 0), (0, 2), (2, 2)], alive_cells(&grid));
    }

    #[test]
    fn birth_needs_exactly_three() {
        assert!(next_state(false, 3));
        assert!(!next_state(false, 2));
        assert!(!next_state(false, 4));
        assert!(next_state(true, 2));
        assert!(next_state(true, 3));
        assert!(!next_state(true, 1));
        assert!(!next_state(true, 4));
    }

    #[test]
    fn step_matches_reference_on_random_board() {
        let mut grid = Grid::with_rng(30, 20, 1, Rng::with_seed(99));
        for _ in 0..4 {
            let before = grid.clone();
            grid.step();
            for y in 0..grid.height() {
                for x in 0..grid.width() {
                    let mut n = 0;
                    for dy in -1i32..=1 {
                        for dx in -1i32..=1 {
                            let (nx, ny) = (x as i32 + dx, y as i32 + dy);
                            if (dx, dy) != (0, 0)
                                && nx >= 0
                                && ny >= 0
                                && before.get(nx as usize, ny as usize)
                            {
                                n += 1;
                            }
                        }
                    }
                    let expected = n == 3 || (n == 2 && before.get(x, y));
                    assert_eq!(expected, grid.get(x, y), "cell ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn out_of_bounds_access_is_harmless() {
        let mut grid = dead_grid(2, 2);
        grid.set(5, 0, true);
        grid.set(0, 5, true);
        assert_eq!(0, grid.population());
        assert!(!grid.get(2, 0));
        assert!(!grid.get(0, 2));
    }
}
