use std::fmt;

/// 麻将牌类型
///
/// 整副牌共 148 张：
/// - 序数牌：索子（Bamboo）、万子（Character）、筒子（Dot）各 36 张（1-9 各 4 张）
/// - 字牌：四风（东南西北）+ 三元（红中、发财、白板）各 4 张，共 28 张
/// - 花牌：花 1-4、季 1-4、四只动物牌，各 1 张，共 12 张
///
/// 花牌不参与组牌，摸到即亮出并补牌（见回合引擎）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Tile {
    /// 索子（1-9）
    Bamboo(u8),
    /// 万子（1-9）
    Character(u8),
    /// 筒子（1-9）
    Dot(u8),
    /// 风牌
    Wind(Wind),
    /// 三元牌
    Dragon(Dragon),
    /// 花牌（1-4）
    Flower(u8),
    /// 季牌（1-4）
    Season(u8),
    /// 动物牌
    Animal(Animal),
}

impl Tile {
    /// 序数牌 + 字牌总数：108 + 28 = 136 张
    pub const STANDARD_COUNT: usize = 136;

    /// 花牌总数：12 张（花 4 + 季 4 + 动物 4，各 1 张）
    pub const BONUS_COUNT: usize = 12;

    /// 含花牌的总牌数：148 张
    pub const TOTAL_COUNT: usize = Self::STANDARD_COUNT + Self::BONUS_COUNT;

    /// 序数牌的数字范围：1-9
    pub const MIN_RANK: u8 = 1;
    pub const MAX_RANK: u8 = 9;

    /// 创建一张序数牌，验证数字有效性
    pub fn suited(suit: Suit, rank: u8) -> Option<Self> {
        if rank < Self::MIN_RANK || rank > Self::MAX_RANK {
            return None;
        }
        Some(match suit {
            Suit::Bamboo => Tile::Bamboo(rank),
            Suit::Character => Tile::Character(rank),
            Suit::Dot => Tile::Dot(rank),
        })
    }

    /// 获取花色（仅序数牌有花色）
    pub fn suit(&self) -> Option<Suit> {
        match self {
            Tile::Bamboo(_) => Some(Suit::Bamboo),
            Tile::Character(_) => Some(Suit::Character),
            Tile::Dot(_) => Some(Suit::Dot),
            _ => None,
        }
    }

    /// 获取数字（仅序数牌有数字）
    pub fn rank(&self) -> Option<u8> {
        match self {
            Tile::Bamboo(r) | Tile::Character(r) | Tile::Dot(r) => Some(*r),
            _ => None,
        }
    }

    /// 是否为序数牌
    pub fn is_suited(&self) -> bool {
        self.suit().is_some()
    }

    /// 是否为字牌（风牌或三元牌）
    pub fn is_honor(&self) -> bool {
        matches!(self, Tile::Wind(_) | Tile::Dragon(_))
    }

    /// 是否为花牌（花、季、动物）
    pub fn is_bonus(&self) -> bool {
        matches!(self, Tile::Flower(_) | Tile::Season(_) | Tile::Animal(_))
    }

    /// 规范排序键
    ///
    /// 排序规则：索、万、筒按数字升序，字牌按固定字母序殿后，
    /// 花牌再排最后。仅用于显示，不影响游戏逻辑
    pub fn order_key(&self) -> u16 {
        match self {
            Tile::Bamboo(r) => *r as u16,
            Tile::Character(r) => 16 + *r as u16,
            Tile::Dot(r) => 32 + *r as u16,
            // 字牌字母序：East, Green, North, Red, South, West, White
            Tile::Wind(Wind::East) => 100,
            Tile::Dragon(Dragon::Green) => 101,
            Tile::Wind(Wind::North) => 102,
            Tile::Dragon(Dragon::Red) => 103,
            Tile::Wind(Wind::South) => 104,
            Tile::Wind(Wind::West) => 105,
            Tile::Dragon(Dragon::White) => 106,
            Tile::Flower(n) => 200 + *n as u16,
            Tile::Season(n) => 210 + *n as u16,
            Tile::Animal(a) => 220 + *a as u16,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tile::Bamboo(r) => write!(f, "{}B", r),
            Tile::Character(r) => write!(f, "{}C", r),
            Tile::Dot(r) => write!(f, "{}D", r),
            Tile::Wind(w) => write!(f, "{}", w.name()),
            Tile::Dragon(d) => write!(f, "{}", d.name()),
            Tile::Flower(n) => write!(f, "Flower {}", n),
            Tile::Season(n) => write!(f, "Season {}", n),
            Tile::Animal(a) => write!(f, "{}", a.name()),
        }
    }
}

/// 序数牌花色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Suit {
    Bamboo = 0,
    Character = 1,
    Dot = 2,
}

impl Suit {
    /// 所有花色
    pub fn all() -> [Suit; 3] {
        [Suit::Bamboo, Suit::Character, Suit::Dot]
    }
}

/// 风牌
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Wind {
    East,
    South,
    West,
    North,
}

impl Wind {
    pub fn all() -> [Wind; 4] {
        [Wind::East, Wind::South, Wind::West, Wind::North]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Wind::East => "East",
            Wind::South => "South",
            Wind::West => "West",
            Wind::North => "North",
        }
    }
}

/// 三元牌
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Dragon {
    Red,
    Green,
    White,
}

impl Dragon {
    pub fn all() -> [Dragon; 3] {
        [Dragon::Red, Dragon::Green, Dragon::White]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dragon::Red => "Red",
            Dragon::Green => "Green",
            Dragon::White => "White",
        }
    }
}

/// 动物牌（每张 1 只，摸到 +1 台）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Animal {
    Cat = 0,
    Mouse = 1,
    Chicken = 2,
    Centipede = 3,
}

impl Animal {
    pub fn all() -> [Animal; 4] {
        [Animal::Cat, Animal::Mouse, Animal::Chicken, Animal::Centipede]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Animal::Cat => "Cat",
            Animal::Mouse => "Mouse",
            Animal::Chicken => "Chicken",
            Animal::Centipede => "Centipede",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_creation() {
        let tile = Tile::suited(Suit::Bamboo, 1).unwrap();
        assert_eq!(tile.suit(), Some(Suit::Bamboo));
        assert_eq!(tile.rank(), Some(1));

        let tile = Tile::suited(Suit::Dot, 9).unwrap();
        assert_eq!(tile.suit(), Some(Suit::Dot));
        assert_eq!(tile.rank(), Some(9));

        // 无效的数字
        assert!(Tile::suited(Suit::Bamboo, 0).is_none());
        assert!(Tile::suited(Suit::Bamboo, 10).is_none());
    }

    #[test]
    fn test_tile_kinds() {
        assert!(Tile::Bamboo(5).is_suited());
        assert!(!Tile::Bamboo(5).is_honor());
        assert!(Tile::Wind(Wind::East).is_honor());
        assert!(Tile::Dragon(Dragon::White).is_honor());
        assert!(Tile::Flower(1).is_bonus());
        assert!(Tile::Season(4).is_bonus());
        assert!(Tile::Animal(Animal::Cat).is_bonus());
        assert!(!Tile::Wind(Wind::East).is_suited());
        assert_eq!(Tile::Wind(Wind::East).rank(), None);
    }

    #[test]
    fn test_canonical_order() {
        // 索 < 万 < 筒 < 字牌
        assert!(Tile::Bamboo(9).order_key() < Tile::Character(1).order_key());
        assert!(Tile::Character(9).order_key() < Tile::Dot(1).order_key());
        assert!(Tile::Dot(9).order_key() < Tile::Wind(Wind::East).order_key());

        // 字牌按字母序：East < Green < North < Red < South < West < White
        assert!(Tile::Wind(Wind::East).order_key() < Tile::Dragon(Dragon::Green).order_key());
        assert!(Tile::Dragon(Dragon::Green).order_key() < Tile::Wind(Wind::North).order_key());
        assert!(Tile::Wind(Wind::North).order_key() < Tile::Dragon(Dragon::Red).order_key());
        assert!(Tile::Wind(Wind::West).order_key() < Tile::Dragon(Dragon::White).order_key());
    }

    #[test]
    fn test_display() {
        assert_eq!(Tile::Bamboo(1).to_string(), "1B");
        assert_eq!(Tile::Character(5).to_string(), "5C");
        assert_eq!(Tile::Dot(9).to_string(), "9D");
        assert_eq!(Tile::Wind(Wind::East).to_string(), "East");
        assert_eq!(Tile::Dragon(Dragon::White).to_string(), "White");
        assert_eq!(Tile::Flower(2).to_string(), "Flower 2");
        assert_eq!(Tile::Animal(Animal::Centipede).to_string(), "Centipede");
    }
}
