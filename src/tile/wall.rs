use super::tile::{Animal, Dragon, Suit, Tile, Wind};
use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// 牌墙（Wall）
///
/// 开局生成一次，洗牌一次，之后只通过 `draw` 从末尾消耗，绝不重排、绝不补充
///
/// 使用 Box<[Tile]> 存储，大小固定（136 或 148 张）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wall {
    /// 牌堆（从末尾抽取）
    tiles: Box<[Tile]>,
    /// 已抽取的牌数
    drawn_count: usize,
}

impl Wall {
    /// 生成一副完整的牌墙（未洗牌，给定参数下完全确定）
    ///
    /// # 参数
    ///
    /// - `include_bonus`: 是否包含花牌（花、季、动物），不含时共 136 张
    pub fn new(include_bonus: bool) -> Self {
        let mut tiles = Vec::with_capacity(Tile::TOTAL_COUNT);

        // 序数牌：每种花色 1-9，各 4 张
        for suit in Suit::all() {
            for rank in Tile::MIN_RANK..=Tile::MAX_RANK {
                for _ in 0..4 {
                    // suited() 的入参范围受循环约束，总是有效
                    if let Some(tile) = Tile::suited(suit, rank) {
                        tiles.push(tile);
                    }
                }
            }
        }

        // 字牌：四风 + 三元，各 4 张
        for wind in Wind::all() {
            for _ in 0..4 {
                tiles.push(Tile::Wind(wind));
            }
        }
        for dragon in Dragon::all() {
            for _ in 0..4 {
                tiles.push(Tile::Dragon(dragon));
            }
        }

        // 花牌：各 1 张
        if include_bonus {
            for n in 1..=4 {
                tiles.push(Tile::Flower(n));
            }
            for n in 1..=4 {
                tiles.push(Tile::Season(n));
            }
            for animal in Animal::all() {
                tiles.push(Tile::Animal(animal));
            }
        }

        Self {
            tiles: tiles.into_boxed_slice(),
            drawn_count: 0,
        }
    }

    /// 洗牌（Fisher-Yates，O(n)）
    ///
    /// 随机源由调用方提供，便于测试时固定种子
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        let mut tiles_vec: Vec<Tile> = self.tiles.to_vec();
        tiles_vec.shuffle(rng);
        self.tiles = tiles_vec.into_boxed_slice();
        self.drawn_count = 0;
    }

    /// 生成并按种子洗好的牌墙
    ///
    /// 相同种子必然产生相同的牌序
    pub fn shuffled(include_bonus: bool, seed: u64) -> Self {
        let mut wall = Self::new(include_bonus);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        wall.shuffle(&mut rng);
        wall
    }

    /// 抽取一张牌（从牌堆末尾，O(1)）
    ///
    /// # 返回
    ///
    /// - `Some(Tile)`：成功抽取一张牌
    /// - `None`：牌堆已空
    pub fn draw(&mut self) -> Option<Tile> {
        if self.drawn_count >= self.tiles.len() {
            return None;
        }
        let index = self.tiles.len() - 1 - self.drawn_count;
        self.drawn_count += 1;
        Some(self.tiles[index])
    }

    /// 查询剩余牌数（O(1)）
    pub fn remaining_count(&self) -> usize {
        self.tiles.len().saturating_sub(self.drawn_count)
    }

    /// 检查牌堆是否为空
    pub fn is_empty(&self) -> bool {
        self.remaining_count() == 0
    }

    /// 获取已抽取的牌数
    pub fn drawn_count(&self) -> usize {
        self.drawn_count
    }

    /// 获取总牌数（136 或 148）
    pub fn total_count(&self) -> usize {
        self.tiles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_wall_creation() {
        let wall = Wall::new(true);
        assert_eq!(wall.total_count(), Tile::TOTAL_COUNT);
        assert_eq!(wall.remaining_count(), Tile::TOTAL_COUNT);
        assert!(!wall.is_empty());

        let wall = Wall::new(false);
        assert_eq!(wall.total_count(), Tile::STANDARD_COUNT);
    }

    #[test]
    fn test_wall_tile_distribution() {
        let wall = Wall::new(true);
        let mut counts: HashMap<Tile, usize> = HashMap::new();
        for tile in wall.tiles.iter() {
            *counts.entry(*tile).or_insert(0) += 1;
        }

        // 序数牌每种 4 张
        for suit in Suit::all() {
            for rank in 1..=9 {
                let tile = Tile::suited(suit, rank).unwrap();
                assert_eq!(counts.get(&tile), Some(&4), "{} 应有 4 张", tile);
            }
        }
        // 字牌每种 4 张
        for wind in Wind::all() {
            assert_eq!(counts.get(&Tile::Wind(wind)), Some(&4));
        }
        for dragon in Dragon::all() {
            assert_eq!(counts.get(&Tile::Dragon(dragon)), Some(&4));
        }
        // 花牌每种 1 张
        for n in 1..=4 {
            assert_eq!(counts.get(&Tile::Flower(n)), Some(&1));
            assert_eq!(counts.get(&Tile::Season(n)), Some(&1));
        }
        for animal in Animal::all() {
            assert_eq!(counts.get(&Tile::Animal(animal)), Some(&1));
        }
    }

    #[test]
    fn test_wall_draw_all() {
        let mut wall = Wall::shuffled(true, 7);

        let mut count = 0;
        while wall.draw().is_some() {
            count += 1;
        }

        assert_eq!(count, Tile::TOTAL_COUNT);
        assert_eq!(wall.remaining_count(), 0);
        assert!(wall.is_empty());

        // 再次抽取应该返回 None
        assert!(wall.draw().is_none());
    }

    #[test]
    fn test_seeded_shuffle_deterministic() {
        let mut wall1 = Wall::shuffled(true, 42);
        let mut wall2 = Wall::shuffled(true, 42);
        let mut wall3 = Wall::shuffled(true, 43);

        let seq1: Vec<_> = std::iter::from_fn(|| wall1.draw()).collect();
        let seq2: Vec<_> = std::iter::from_fn(|| wall2.draw()).collect();
        let seq3: Vec<_> = std::iter::from_fn(|| wall3.draw()).collect();

        assert_eq!(seq1, seq2);
        assert_ne!(seq1, seq3);
    }
}
