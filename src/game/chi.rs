use crate::game::player::Player;
use crate::game::scoring::Meld;
use crate::tile::{Hand, Tile};
use smallvec::SmallVec;

/// 吃牌操作器
///
/// 吃只对上家的弃牌有效（座位限制由引擎执行，本模块只管牌面）
pub struct ChiHandler;

impl ChiHandler {
    /// 查找所有可吃的组合
    ///
    /// 弃牌数字为 r 时有三个窗口：
    /// - (r-2, r-1)：弃牌做顺子尾张
    /// - (r-1, r+1)：弃牌做顺子中张
    /// - (r+1, r+2)：弃牌做顺子头张
    ///
    /// # 返回
    ///
    /// 所有可行顺子的起始数字（最多 3 个），字牌和花牌返回空
    pub fn find_valid_chis(hand: &Hand, tile: Tile) -> SmallVec<[u8; 3]> {
        let mut options = SmallVec::new();
        let (suit, rank) = match (tile.suit(), tile.rank()) {
            (Some(suit), Some(rank)) => (suit, rank),
            _ => return options,
        };

        // 每个窗口：弃牌之外的两张必须都在手牌中
        for start_offset in -2i8..=0 {
            let start = rank as i8 + start_offset;
            if start < Tile::MIN_RANK as i8 || start + 2 > Tile::MAX_RANK as i8 {
                continue;
            }
            let start = start as u8;

            let complete = (start..start + 3)
                .filter(|&r| r != rank)
                .all(|r| match Tile::suited(suit, r) {
                    Some(needed) => hand.has_tile(needed),
                    None => false,
                });
            if complete {
                options.push(start);
            }
        }
        options
    }

    /// 检查是否可以吃牌
    pub fn can_chi(hand: &Hand, tile: Tile) -> bool {
        !Self::find_valid_chis(hand, tile).is_empty()
    }

    /// 执行吃牌
    ///
    /// 从手牌中移除顺子里弃牌之外的两张，形成吃副露
    ///
    /// # 参数
    ///
    /// - `player`: 响应者
    /// - `tile`: 上家的弃牌
    /// - `start`: 顺子起始数字（来自 `find_valid_chis`）
    ///
    /// # 返回
    ///
    /// 是否成功吃牌
    pub fn chi(player: &mut Player, tile: Tile, start: u8) -> bool {
        let (suit, rank) = match (tile.suit(), tile.rank()) {
            (Some(suit), Some(rank)) => (suit, rank),
            _ => return false,
        };
        if !Self::find_valid_chis(&player.hand, tile).contains(&start) {
            return false;
        }

        for r in start..start + 3 {
            if r == rank {
                continue;
            }
            // find_valid_chis 已确认两张都在手牌中
            if let Some(needed) = Tile::suited(suit, r) {
                if !player.hand.remove_tile(needed) {
                    return false;
                }
            }
        }

        player.melds.push(Meld::Chi { suit, start });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::tile::{Suit, Wind};

    #[test]
    fn test_chi_windows() {
        let mut hand = Hand::new();
        hand.add_tile(Tile::Bamboo(3));
        hand.add_tile(Tile::Bamboo(4));

        // {3B,4B} + 2B => 顺子 2-3-4
        assert_eq!(
            ChiHandler::find_valid_chis(&hand, Tile::Bamboo(2)).as_slice(),
            &[2]
        );
        // {3B,4B} + 5B => 顺子 3-4-5
        assert_eq!(
            ChiHandler::find_valid_chis(&hand, Tile::Bamboo(5)).as_slice(),
            &[3]
        );
        // {3B,4B} + 7B => 不相邻
        assert!(ChiHandler::find_valid_chis(&hand, Tile::Bamboo(7)).is_empty());
        // 花色不同不能吃
        assert!(ChiHandler::find_valid_chis(&hand, Tile::Dot(2)).is_empty());
    }

    #[test]
    fn test_chi_multiple_options() {
        // {3B,4B,5B,6B,7B} + 5B：三个窗口都成立
        let mut hand = Hand::new();
        for r in 3..=7 {
            hand.add_tile(Tile::Bamboo(r));
        }
        let options = ChiHandler::find_valid_chis(&hand, Tile::Bamboo(5));
        assert_eq!(options.as_slice(), &[3, 4, 5]);
    }

    #[test]
    fn test_chi_rank_bounds() {
        let mut hand = Hand::new();
        hand.add_tile(Tile::Dot(1));
        hand.add_tile(Tile::Dot(2));

        // 1D2D + 3D：只有 1-2-3（不存在 0 或负数起点）
        assert_eq!(
            ChiHandler::find_valid_chis(&hand, Tile::Dot(3)).as_slice(),
            &[1]
        );

        let mut hand = Hand::new();
        hand.add_tile(Tile::Dot(8));
        hand.add_tile(Tile::Dot(9));
        // 8D9D + 7D：只有 7-8-9（顺子不能越过 9）
        assert_eq!(
            ChiHandler::find_valid_chis(&hand, Tile::Dot(7)).as_slice(),
            &[7]
        );
    }

    #[test]
    fn test_honors_cannot_be_chied() {
        let mut hand = Hand::new();
        hand.add_tile(Tile::Wind(Wind::East));
        hand.add_tile(Tile::Wind(Wind::South));
        assert!(ChiHandler::find_valid_chis(&hand, Tile::Wind(Wind::West)).is_empty());
    }

    #[test]
    fn test_chi_execution() {
        let mut player = Player::new(1);
        player.hand.add_tile(Tile::Bamboo(3));
        player.hand.add_tile(Tile::Bamboo(4));
        player.hand.add_tile(Tile::Bamboo(9));

        assert!(ChiHandler::chi(&mut player, Tile::Bamboo(2), 2));

        assert!(player
            .melds
            .iter()
            .any(|m| matches!(m, Meld::Chi { suit: Suit::Bamboo, start: 2 })));
        // 两张补牌已移除，无关的 9B 还在
        assert!(!player.hand.has_tile(Tile::Bamboo(3)));
        assert!(!player.hand.has_tile(Tile::Bamboo(4)));
        assert!(player.hand.has_tile(Tile::Bamboo(9)));
    }

    #[test]
    fn test_chi_invalid_option_rejected() {
        let mut player = Player::new(1);
        player.hand.add_tile(Tile::Bamboo(3));
        player.hand.add_tile(Tile::Bamboo(4));

        // 手里没有 5B6B，起点 5 不合法
        assert!(!ChiHandler::chi(&mut player, Tile::Bamboo(5), 5));
        assert_eq!(player.hand.total_count(), 2);
        assert!(player.melds.is_empty());
    }
}
