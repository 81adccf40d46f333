use crate::game::player::Player;
use crate::game::scoring::Meld;
use crate::tile::{Hand, Tile};

/// 碰牌操作器
pub struct PongHandler;

impl PongHandler {
    /// 检查是否可以碰牌
    ///
    /// 碰牌条件：手牌中至少有两张与弃牌相同的牌
    ///
    /// # 参数
    ///
    /// - `hand`: 响应者的暗牌
    /// - `tile`: 别人打出的牌
    pub fn can_pong(hand: &Hand, tile: Tile) -> bool {
        hand.tile_count(tile) >= 2
    }

    /// 执行碰牌
    ///
    /// 从手牌中移除两张，加上弃牌形成刻子副露。
    /// 弃牌本身由引擎从弃牌堆中取出，不经过手牌
    ///
    /// # 返回
    ///
    /// 是否成功碰牌
    pub fn pong(player: &mut Player, tile: Tile) -> bool {
        if !Self::can_pong(&player.hand, tile) {
            return false;
        }

        for _ in 0..2 {
            if !player.hand.remove_tile(tile) {
                return false;
            }
        }

        player.melds.push(Meld::Pong { tile });
        true
    }
}
