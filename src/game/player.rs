use crate::game::scoring::{Meld, TaiCalculator};
use crate::tile::{Hand, Tile};

/// 玩家状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// 座位（0-3）
    pub seat: u8,
    /// 暗牌
    pub hand: Hand,
    /// 副露（碰/吃/杠）
    pub melds: Vec<Meld>,
    /// 已亮出的花牌
    pub bonus_tiles: Vec<Tile>,
    /// 花牌累计台数（胡牌时与牌型台相加）
    pub bonus_tai: u32,
}

impl Player {
    /// 创建新玩家
    pub fn new(seat: u8) -> Self {
        Self {
            seat,
            hand: Hand::new(),
            melds: Vec::new(),
            bonus_tiles: Vec::new(),
            bonus_tai: 0,
        }
    }

    /// 副露组数（胡牌判定用）
    pub fn melds_count(&self) -> u8 {
        self.melds.len() as u8
    }

    /// 亮出一张花牌并累计台数
    ///
    /// # 返回
    ///
    /// 这张花牌带来的台数（0 或 1）
    pub fn reveal_bonus(&mut self, tile: Tile) -> u32 {
        let tai = TaiCalculator::bonus_tile_tai(tile, self.seat);
        self.bonus_tiles.push(tile);
        self.bonus_tai += tai;
        tai
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::tile::Animal;

    #[test]
    fn test_player_creation() {
        let player = Player::new(2);
        assert_eq!(player.seat, 2);
        assert!(player.hand.is_empty());
        assert!(player.melds.is_empty());
        assert_eq!(player.bonus_tai, 0);
    }

    #[test]
    fn test_reveal_bonus_accumulates() {
        let mut player = Player::new(0);

        // 动物牌 +1
        assert_eq!(player.reveal_bonus(Tile::Animal(Animal::Mouse)), 1);
        // 对号花牌 +1（座位 0 对应 1 号）
        assert_eq!(player.reveal_bonus(Tile::Flower(1)), 1);
        // 不对号花牌 +0
        assert_eq!(player.reveal_bonus(Tile::Season(3)), 0);

        assert_eq!(player.bonus_tai, 2);
        assert_eq!(player.bonus_tiles.len(), 3);
    }
}
