use crate::Cell;
use crate::grid::{Direction::{*, self}, Grid};
use crate::snake::Snake;

/// Clockwise rotation of a sprite, in quarter turns.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rotation {
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// Rotation that turns a right-facing sprite to face `direction`.
    pub fn facing(direction: Direction) -> Rotation {
        match direction {
            Right => Rotation::R0,
            Down => Rotation::R90,
            Left => Rotation::R180,
            Up => Rotation::R270,
        }
    }

    pub fn apply(self, direction: Direction) -> Direction {
        let quarter_turns = match self {
            Rotation::R0 => 0,
            Rotation::R90 => 1,
            Rotation::R180 => 2,
            Rotation::R270 => 3,
        };
        (0..quarter_turns).fold(direction, |dir, _| match dir {
            Up => Right,
            Right => Down,
            Down => Left,
            Left => Up,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Head,
    Body,
    Tail,
    Turn,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub cell: Cell,
    pub rotation: Rotation,
    /// Flipped top to bottom before rotating.
    pub mirror: bool,
}

/// Edges joined by the turn sprite as drawn, before any transform.
pub const TURN_BASE_EDGES: [Direction; 2] = [Left, Down];

/// (incoming, outgoing) travel direction of a corner segment to the
/// transform of the turn sprite. Right turns use the plain sprite, left
/// turns the mirrored one.
const TURN_TABLE: [((Direction, Direction), (Rotation, bool)); 8] = [
    ((Right, Down), (Rotation::R0, false)),
    ((Down, Left), (Rotation::R90, false)),
    ((Left, Up), (Rotation::R180, false)),
    ((Up, Right), (Rotation::R270, false)),
    ((Right, Up), (Rotation::R0, true)),
    ((Down, Right), (Rotation::R90, true)),
    ((Left, Down), (Rotation::R180, true)),
    ((Up, Left), (Rotation::R270, true)),
];

pub fn turn_transform(incoming: Direction, outgoing: Direction) -> Option<(Rotation, bool)> {
    TURN_TABLE.iter()
        .find(|(pair, _)| *pair == (incoming, outgoing))
        .map(|(_, transform)| *transform)
}

/// Edges a sprite built from `base` touches once mirrored and rotated.
pub fn transformed_edges(base: [Direction; 2], rotation: Rotation, mirror: bool) -> [Direction; 2] {
    let flip = |dir: Direction| match dir {
        Up => Down,
        Down => Up,
        other => other,
    };
    let place = |dir: Direction| rotation.apply(if mirror { flip(dir) } else { dir });
    [place(base[0]), place(base[1])]
}

/// Works out which sprite to draw for every segment, head first.
/// Segments stacked on one cell after growing are drawn once.
pub fn snake_sprites(snake: &Snake, grid: &Grid) -> Vec<Sprite> {
    let mut cells: Vec<Cell> = snake.body().to_vec();
    cells.dedup();

    let last = cells.len() - 1;
    cells.iter().enumerate().map(|(i, &cell)| {
        if i == 0 {
            // Faces away from the neck, a lone head faces where it's going
            let facing = cells.get(1)
                .and_then(|&neck| grid.direction_between(neck, cell))
                .unwrap_or_else(|| snake.get_direction());
            return Sprite { kind: SpriteKind::Head, cell, rotation: Rotation::facing(facing), mirror: false };
        }

        // Travel goes from the tail towards the head
        let outgoing = grid.direction_between(cell, cells[i - 1]);
        if i == last {
            let rotation = outgoing.map_or(Rotation::R0, Rotation::facing);
            return Sprite { kind: SpriteKind::Tail, cell, rotation, mirror: false };
        }

        let incoming = grid.direction_between(cells[i + 1], cell);
        match (incoming, outgoing) {
            (Some(inc), Some(out)) if inc != out => {
                let (rotation, mirror) = turn_transform(inc, out).unwrap_or((Rotation::R0, false));
                Sprite { kind: SpriteKind::Turn, cell, rotation, mirror }
            },
            (_, Some(Up)) | (_, Some(Down)) => Sprite { kind: SpriteKind::Body, cell, rotation: Rotation::R90, mirror: false },
            _ => Sprite { kind: SpriteKind::Body, cell, rotation: Rotation::R0, mirror: false },
        }
    }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID: Grid = Grid::new(640, 480, 40);

    #[test]
    fn every_corner_joins_its_entry_and_exit() {
        for incoming in Direction::ALL.iter().copied() {
            for outgoing in Direction::ALL.iter().copied() {
                let transform = turn_transform(incoming, outgoing);
                if incoming == outgoing || incoming == outgoing.opposite() {
                    assert_eq!(transform, None);
                    continue;
                }

                let (rotation, mirror) = transform.unwrap();
                let mut edges = transformed_edges(TURN_BASE_EDGES, rotation, mirror);
                let mut expected = [incoming.opposite(), outgoing];
                edges.sort_by_key(|d| *d as u8);
                expected.sort_by_key(|d| *d as u8);
                assert_eq!(edges, expected, "{:?} -> {:?}", incoming, outgoing);
            }
        }
    }

    #[test]
    fn straight_snake() {
        let snake = Snake::new((320, 240), 3, Right, &GRID);
        let sprites = snake_sprites(&snake, &GRID);

        assert_eq!(sprites.len(), 3);
        assert_eq!((sprites[0].kind, sprites[0].rotation), (SpriteKind::Head, Rotation::R0));
        assert_eq!((sprites[1].kind, sprites[1].rotation), (SpriteKind::Body, Rotation::R0));
        assert_eq!((sprites[2].kind, sprites[2].rotation), (SpriteKind::Tail, Rotation::R0));
    }

    #[test]
    fn corner_and_vertical_body() {
        let mut snake = Snake::new((320, 240), 3, Right, &GRID);
        snake.set_direction(Up);
        snake.step(snake.next_head(&GRID));
        snake.step(snake.next_head(&GRID));
        let sprites = snake_sprites(&snake, &GRID);
        assert_eq!(sprites[0].rotation, Rotation::R270);
        assert_eq!((sprites[1].kind, sprites[1].rotation), (SpriteKind::Body, Rotation::R90));
        assert_eq!(sprites[2].kind, SpriteKind::Tail);
        assert_eq!(sprites[2].rotation, Rotation::R270);

        let mut snake = Snake::new((320, 240), 3, Right, &GRID);
        snake.set_direction(Up);
        snake.step(snake.next_head(&GRID));
        let sprites = snake_sprites(&snake, &GRID);
        assert_eq!(sprites[1], Sprite { kind: SpriteKind::Turn, cell: (320, 240), rotation: Rotation::R0, mirror: true });
    }

    #[test]
    fn head_faces_away_from_its_neck() {
        // Turned but not moved yet, as after a blocked step
        let mut snake = Snake::new((320, 240), 3, Right, &GRID);
        snake.set_direction(Up);
        let sprites = snake_sprites(&snake, &GRID);
        assert_eq!(sprites[0].rotation, Rotation::R0);

        let lone = Snake::new((320, 240), 1, Down, &GRID);
        assert_eq!(snake_sprites(&lone, &GRID)[0].rotation, Rotation::R90);
    }

    #[test]
    fn wrapped_neighbours_count_as_adjacent() {
        let snake = Snake::new((0, 240), 3, Right, &GRID);
        let sprites = snake_sprites(&snake, &GRID);
        assert_eq!((sprites[1].kind, sprites[1].rotation), (SpriteKind::Body, Rotation::R0));
        assert_eq!(sprites[2].rotation, Rotation::R0);
    }

    #[test]
    fn grown_tail_drawn_once() {
        let mut snake = Snake::new((320, 240), 3, Right, &GRID);
        snake.grow();
        let sprites = snake_sprites(&snake, &GRID);
        assert_eq!(sprites.len(), 3);
        assert_eq!(sprites[2].kind, SpriteKind::Tail);
    }
}
