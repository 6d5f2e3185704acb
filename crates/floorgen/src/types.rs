use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn distance_squared(self, other: Pos) -> u64 {
        let dx = u64::from(self.x.abs_diff(other.x));
        let dy = u64::from(self.y.abs_diff(other.y));
        dx * dx + dy * dy
    }

    pub fn orthogonal_neighbors(self) -> [Pos; 4] {
        [
            Pos { y: self.y - 1, x: self.x },
            Pos { y: self.y, x: self.x + 1 },
            Pos { y: self.y + 1, x: self.x },
            Pos { y: self.y, x: self.x - 1 },
        ]
    }

    pub fn surrounding(self) -> [Pos; 8] {
        [
            Pos { y: self.y - 1, x: self.x - 1 },
            Pos { y: self.y - 1, x: self.x },
            Pos { y: self.y - 1, x: self.x + 1 },
            Pos { y: self.y, x: self.x - 1 },
            Pos { y: self.y, x: self.x + 1 },
            Pos { y: self.y + 1, x: self.x - 1 },
            Pos { y: self.y + 1, x: self.x },
            Pos { y: self.y + 1, x: self.x + 1 },
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// One display record handed to the renderer: a glyph with foreground and background colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Graphic {
    pub glyph: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

const fn graphic(glyph: char, fg: Rgb, bg: Rgb) -> Graphic {
    Graphic { glyph, fg, bg }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TileKind {
    Wall,
    Floor,
    DownStairs,
    UpStairs,
    LooseGrass,
    Grass,
    DenseGrass,
    LooseRubble,
    Rubble,
    Stalactite,
    Stalagmite,
    ShallowWater,
}

impl TileKind {
    pub fn is_decoration(self) -> bool {
        !matches!(self, Self::Wall | Self::Floor | Self::DownStairs | Self::UpStairs)
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Wall => 0,
            Self::Floor => 1,
            Self::DownStairs => 2,
            Self::UpStairs => 3,
            Self::LooseGrass => 4,
            Self::Grass => 5,
            Self::DenseGrass => 6,
            Self::LooseRubble => 7,
            Self::Rubble => 8,
            Self::Stalactite => 9,
            Self::Stalagmite => 10,
            Self::ShallowWater => 11,
        }
    }

    pub fn tile(self) -> Tile {
        const WHITE: Rgb = Rgb(255, 255, 255);
        const BLACK: Rgb = Rgb(0, 0, 0);
        const DIM: Rgb = Rgb(50, 50, 50);
        const LIT: Rgb = Rgb(100, 100, 100);

        let (light, dark) = match self {
            Self::Wall => (graphic('#', WHITE, Rgb(150, 150, 150)), graphic('#', WHITE, DIM)),
            Self::Floor => (graphic('.', WHITE, LIT), graphic('.', WHITE, DIM)),
            Self::DownStairs => (graphic('>', WHITE, LIT), graphic('>', Rgb(0, 0, 100), DIM)),
            Self::UpStairs => (graphic('<', WHITE, LIT), graphic('<', Rgb(0, 0, 100), DIM)),
            Self::LooseGrass => {
                (graphic(',', Rgb(90, 160, 60), LIT), graphic(',', Rgb(45, 80, 30), DIM))
            }
            Self::Grass => {
                (graphic('"', Rgb(60, 170, 50), LIT), graphic('"', Rgb(30, 85, 25), DIM))
            }
            Self::DenseGrass => {
                (graphic('"', Rgb(30, 120, 30), LIT), graphic('"', Rgb(15, 60, 15), DIM))
            }
            Self::LooseRubble => {
                (graphic(',', Rgb(150, 130, 110), LIT), graphic(',', Rgb(75, 65, 55), DIM))
            }
            Self::Rubble => {
                (graphic(';', Rgb(140, 120, 100), LIT), graphic(';', Rgb(70, 60, 50), DIM))
            }
            Self::Stalactite => {
                (graphic('\'', Rgb(180, 170, 160), LIT), graphic('\'', Rgb(90, 85, 80), DIM))
            }
            Self::Stalagmite => {
                (graphic('^', Rgb(180, 170, 160), LIT), graphic('^', Rgb(90, 85, 80), DIM))
            }
            Self::ShallowWater => (
                graphic('~', Rgb(80, 140, 220), Rgb(20, 40, 90)),
                graphic('~', Rgb(40, 70, 110), BLACK),
            ),
        };

        let walkable = self != Self::Wall;
        Tile { kind: self, walkable, transparent: walkable, light, dark }
    }
}

/// Static per-kind tile record. Only built through [`TileKind::tile`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub walkable: bool,
    pub transparent: bool,
    pub light: Graphic,
    pub dark: Graphic,
}

impl Tile {
    pub fn wall() -> Self {
        TileKind::Wall.tile()
    }

    pub fn floor() -> Self {
        TileKind::Floor.tile()
    }
}
