use crate::game::player::Player;
use crate::game::scoring::{GangKind, Meld};
use crate::tile::{Hand, Tile};
use smallvec::SmallVec;

/// 杠牌操作器
///
/// 三种杠：直杠（响应弃牌）、暗杠（手牌四张）、加杠（碰后补第四张）。
/// 杠成立后由引擎立即补摸一张
pub struct GangHandler;

impl GangHandler {
    /// 检查是否可以直杠：手牌中恰好有三张与弃牌相同的牌
    pub fn can_claim_gang(hand: &Hand, tile: Tile) -> bool {
        hand.tile_count(tile) == 3
    }

    /// 执行直杠
    ///
    /// 从手牌中移除三张，加上弃牌形成四张的杠副露
    pub fn claim_gang(player: &mut Player, tile: Tile) -> bool {
        if !Self::can_claim_gang(&player.hand, tile) {
            return false;
        }
        for _ in 0..3 {
            if !player.hand.remove_tile(tile) {
                return false;
            }
        }
        player.melds.push(Meld::Gang { tile, kind: GangKind::Claimed });
        true
    }

    /// 查找所有可暗杠的牌（手牌中数量为 4 的牌）
    pub fn concealed_gang_tiles(hand: &Hand) -> SmallVec<[Tile; 2]> {
        let mut tiles: SmallVec<[Tile; 2]> = hand
            .tiles_map()
            .iter()
            .filter(|(_, &count)| count == 4)
            .map(|(tile, _)| *tile)
            .collect();
        tiles.sort_by_key(|tile| tile.order_key());
        tiles
    }

    /// 执行暗杠：从手牌中移除四张
    pub fn concealed_gang(player: &mut Player, tile: Tile) -> bool {
        if player.hand.tile_count(tile) != 4 {
            return false;
        }
        for _ in 0..4 {
            if !player.hand.remove_tile(tile) {
                return false;
            }
        }
        player.melds.push(Meld::Gang { tile, kind: GangKind::Concealed });
        true
    }

    /// 查找所有可加杠的牌（已有碰副露且手牌中有第四张）
    pub fn supplemental_gang_tiles(player: &Player) -> SmallVec<[Tile; 2]> {
        let mut tiles: SmallVec<[Tile; 2]> = player
            .melds
            .iter()
            .filter_map(|meld| match meld {
                Meld::Pong { tile } if player.hand.has_tile(*tile) => Some(*tile),
                _ => None,
            })
            .collect();
        tiles.sort_by_key(|tile| tile.order_key());
        tiles
    }

    /// 执行加杠
    ///
    /// 按副露下标定位对应的碰，原地升级为杠（显式更新，不产生别名）
    pub fn supplemental_gang(player: &mut Player, tile: Tile) -> bool {
        let meld_index = player
            .melds
            .iter()
            .position(|meld| matches!(meld, Meld::Pong { tile: t } if *t == tile));
        let meld_index = match meld_index {
            Some(index) => index,
            None => return false,
        };
        if !player.hand.remove_tile(tile) {
            return false;
        }
        player.melds[meld_index] = Meld::Gang { tile, kind: GangKind::Supplemental };
        true
    }
}
