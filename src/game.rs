use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step for this direction. The y axis grows downward, as on screen.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Direction {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Toroidal board: every step off one edge re-enters on the opposite edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    pub fn step(&self, pos: Position, dir: Direction) -> Position {
        let (dx, dy) = dir.delta();
        Position::new(
            (pos.x + dx).rem_euclid(self.width),
            (pos.y + dy).rem_euclid(self.height),
        )
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Moved,
    Collided,
}

#[derive(Clone, Debug)]
pub struct Snake {
    pub body: VecDeque<Position>,
    pub length: usize,
    pub direction: Direction,
    pub next_direction: Option<Direction>,
    start: Position,
}

impl Snake {
    pub fn new(start: Position, direction: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_back(start);
        Self {
            body,
            length: 1,
            direction,
            next_direction: None,
            start,
        }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn start(&self) -> Position {
        self.start
    }

    /// Queues a turn for the next tick. Reversals are ignored; a later
    /// request in the same tick replaces an earlier one.
    pub fn steer(&mut self, dir: Direction) {
        if dir != self.direction.opposite() {
            self.next_direction = Some(dir);
        }
    }

    pub fn update_direction(&mut self) {
        if let Some(dir) = self.next_direction.take() {
            self.direction = dir;
        }
    }

    pub fn grow(&mut self) {
        self.length += 1;
    }

    pub fn advance<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) -> Step {
        let new_head = grid.step(self.head(), self.direction);

        // Index 1 is the neck; the head can never reach it without reversing.
        if self.body.iter().skip(2).any(|&p| p == new_head) {
            self.reset(rng);
            return Step::Collided;
        }

        self.body.push_front(new_head);
        if self.body.len() > self.length {
            self.body.pop_back();
        }
        Step::Moved
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.length = 1;
        self.body.clear();
        self.body.push_back(self.start);
        self.direction = Direction::random(rng);
        self.next_direction = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Apple {
    pub position: Position,
}

impl Apple {
    /// Cells under the snake are not excluded, so an apple may spawn on it.
    pub fn random<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Self {
        Self {
            position: grid.random_cell(rng),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Moved,
    Ate { length: usize },
    Reset { length: usize },
}

pub struct GameState<R = StdRng> {
    pub snake: Snake,
    pub apple: Apple,
    pub grid: Grid,
    rng: R,
}

impl GameState<StdRng> {
    pub fn new(grid: Grid) -> Self {
        Self::with_rng(grid, StdRng::from_entropy())
    }
}

impl<R: Rng> GameState<R> {
    pub fn with_rng(grid: Grid, mut rng: R) -> Self {
        let snake = Snake::new(grid.center(), Direction::Right);
        let apple = Apple::random(&grid, &mut rng);
        Self {
            snake,
            apple,
            grid,
            rng,
        }
    }

    pub fn steer(&mut self, dir: Direction) {
        self.snake.steer(dir);
    }

    /// One simulation step: turn, move, then eat.
    pub fn update(&mut self) -> GameEvent {
        self.snake.update_direction();

        let reached = self.snake.length;
        let mut event = match self.snake.advance(&self.grid, &mut self.rng) {
            Step::Moved => GameEvent::Moved,
            Step::Collided => GameEvent::Reset { length: reached },
        };

        if self.snake.head() == self.apple.position {
            self.snake.grow();
            self.apple = Apple::random(&self.grid, &mut self.rng);
            if event == GameEvent::Moved {
                event = GameEvent::Ate {
                    length: self.snake.length,
                };
            }
        }

        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(width: i32, height: i32) -> GameState<StdRng> {
        GameState::with_rng(Grid::new(width, height), StdRng::seed_from_u64(7))
    }

    fn place_snake(game: &mut GameState<StdRng>, cells: &[(i32, i32)], dir: Direction) {
        game.snake.body = cells.iter().map(|&(x, y)| Position::new(x, y)).collect();
        game.snake.length = cells.len();
        game.snake.direction = dir;
        game.snake.next_direction = None;
    }

    /// Moves the apple somewhere the snake will not reach in the next tick.
    fn park_apple(game: &mut GameState<StdRng>, x: i32, y: i32) {
        game.apple.position = Position::new(x, y);
    }

    #[test]
    fn test_starts_centered_heading_right() {
        let game = seeded(32, 24);
        assert_eq!(game.snake.head(), Position::new(16, 12));
        assert_eq!(game.snake.body.len(), 1);
        assert_eq!(game.snake.length, 1);
        assert_eq!(game.snake.direction, Direction::Right);
        assert!(game.grid.contains(game.apple.position));
    }

    #[test]
    fn test_wraps_around_every_edge() {
        let grid = Grid::new(5, 4);
        assert_eq!(grid.step(Position::new(4, 2), Direction::Right), Position::new(0, 2));
        assert_eq!(grid.step(Position::new(0, 2), Direction::Left), Position::new(4, 2));
        assert_eq!(grid.step(Position::new(1, 0), Direction::Up), Position::new(1, 3));
        assert_eq!(grid.step(Position::new(1, 3), Direction::Down), Position::new(1, 0));
    }

    #[test]
    fn test_head_stays_on_grid() {
        let mut game = seeded(6, 5);
        let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];
        for tick in 0..500 {
            if tick % 7 == 0 {
                game.steer(turns[(tick / 7) % turns.len()]);
            }
            game.update();
            assert!(game.grid.contains(game.snake.head()));
            assert!(game.snake.body.len() <= game.snake.length);
        }
    }

    #[test]
    fn test_body_trimmed_to_target_length() {
        let mut game = seeded(20, 20);
        place_snake(&mut game, &[(5, 5), (4, 5), (3, 5)], Direction::Right);
        park_apple(&mut game, 0, 19);

        assert_eq!(game.update(), GameEvent::Moved);
        let cells: Vec<_> = game.snake.body.iter().copied().collect();
        assert_eq!(
            cells,
            vec![Position::new(6, 5), Position::new(5, 5), Position::new(4, 5)]
        );
    }

    #[test]
    fn test_eating_grows_by_one_and_moves_apple() {
        let mut game = seeded(20, 20);
        place_snake(&mut game, &[(5, 5), (4, 5)], Direction::Right);
        park_apple(&mut game, 6, 5);

        let event = game.update();
        assert_eq!(event, GameEvent::Ate { length: 3 });
        assert_eq!(game.snake.length, 3);
        assert_eq!(game.snake.body.len(), 2);
        assert!(game.grid.contains(game.apple.position));

        // The extra segment shows up on the following move.
        park_apple(&mut game, 0, 19);
        game.update();
        assert_eq!(game.snake.body.len(), 3);
    }

    #[test]
    fn test_apple_relocates_uniformly_over_grid() {
        let grid = Grid::new(3, 2);
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            let apple = Apple::random(&grid, &mut rng);
            assert!(grid.contains(apple.position));
            seen.insert(apple.position);
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_self_collision_resets_to_start() {
        let mut game = seeded(10, 10);
        // Head at (3,4) turning down into (3,5), which is body index 3.
        place_snake(
            &mut game,
            &[(3, 4), (4, 4), (4, 5), (3, 5), (2, 5)],
            Direction::Left,
        );
        park_apple(&mut game, 9, 0);
        game.steer(Direction::Down);

        assert_eq!(game.update(), GameEvent::Reset { length: 5 });
        assert_eq!(game.snake.length, 1);
        let cells: Vec<_> = game.snake.body.iter().copied().collect();
        assert_eq!(cells, vec![game.snake.start()]);
        assert_eq!(game.snake.next_direction, None);
    }

    #[test]
    fn test_moving_onto_neck_index_is_not_a_collision() {
        let mut snake = Snake::new(Position::new(2, 2), Direction::Right);
        snake.body = [Position::new(2, 2), Position::new(3, 2)].into_iter().collect();
        snake.length = 2;
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(snake.advance(&Grid::new(8, 8), &mut rng), Step::Moved);
        assert_eq!(snake.head(), Position::new(3, 2));
        assert_eq!(snake.length, 2);
    }

    #[test]
    fn test_collision_with_tail_still_resets() {
        let mut game = seeded(10, 10);
        // A tight loop whose tail sits right in front of the head.
        place_snake(&mut game, &[(1, 1), (1, 2), (2, 2), (2, 1)], Direction::Up);
        park_apple(&mut game, 9, 9);
        game.steer(Direction::Right);

        assert_eq!(game.update(), GameEvent::Reset { length: 4 });
        assert_eq!(game.snake.body.len(), 1);
    }

    #[test]
    fn test_reverse_is_ignored() {
        let mut game = seeded(10, 10);
        place_snake(&mut game, &[(5, 5), (4, 5)], Direction::Right);
        park_apple(&mut game, 0, 0);

        game.steer(Direction::Left);
        assert_eq!(game.snake.next_direction, None);
        game.update();
        assert_eq!(game.snake.direction, Direction::Right);
        assert_eq!(game.snake.head(), Position::new(6, 5));
    }

    #[test]
    fn test_direction_applies_once_per_tick() {
        let mut game = seeded(10, 10);
        place_snake(&mut game, &[(5, 5)], Direction::Right);
        park_apple(&mut game, 0, 0);

        game.steer(Direction::Up);
        game.steer(Direction::Down);
        assert_eq!(game.snake.next_direction, Some(Direction::Down));

        game.update();
        assert_eq!(game.snake.direction, Direction::Down);
        assert_eq!(game.snake.head(), Position::new(5, 6));
        assert_eq!(game.snake.next_direction, None);
    }

    #[test]
    fn test_random_direction_covers_all() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = Vec::new();
        for _ in 0..200 {
            let dir = Direction::random(&mut rng);
            if !seen.contains(&dir) {
                seen.push(dir);
            }
        }
        assert_eq!(seen.len(), 4);
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }
}
