use crate::game::decision::{ClaimChoice, DecisionSource};
use crate::game::state::{ClaimEligibility, GameState};
use crate::tile::{Hand, Tile};

/// 机器人出牌策略
///
/// 留牌规则：
/// - 已成对的牌（数量 >= 2）保留
/// - 序数牌若有同花色、数字距离 <= 2 的邻牌，保留
///
/// 按规范序打出第一张不满足留牌规则的牌；全部满足时打最后一张
pub struct BotPolicy;

impl BotPolicy {
    /// 选择要打出的牌（手牌非空时必有返回）
    pub fn choose_discard(hand: &Hand) -> Option<Tile> {
        let mut distinct: Vec<Tile> = hand.distinct_tiles().into_vec();
        if distinct.is_empty() {
            return None;
        }
        distinct.sort_by_key(|tile| tile.order_key());

        for tile in &distinct {
            if !Self::should_retain(hand, *tile) {
                return Some(*tile);
            }
        }
        distinct.last().copied()
    }

    /// 留牌判断
    fn should_retain(hand: &Hand, tile: Tile) -> bool {
        if hand.tile_count(tile) >= 2 {
            return true;
        }
        let (suit, rank) = match (tile.suit(), tile.rank()) {
            (Some(suit), Some(rank)) => (suit, rank),
            // 孤立字牌不保留
            _ => return false,
        };

        // 同花色邻牌（距离 1 或 2）可成顺
        for offset in [-2i8, -1, 1, 2] {
            let neighbor_rank = rank as i8 + offset;
            if !(Tile::MIN_RANK as i8..=Tile::MAX_RANK as i8).contains(&neighbor_rank) {
                continue;
            }
            if let Some(neighbor) = Tile::suited(suit, neighbor_rank as u8) {
                if hand.has_tile(neighbor) {
                    return true;
                }
            }
        }
        false
    }
}

/// 机器人决策来源
///
/// 出牌走 BotPolicy；响应窗口贪心（杠 > 碰 > 吃第一档）；
/// 出牌前有杠必杠（取第一个可杠的牌）
pub struct BotSource;

impl DecisionSource for BotSource {
    fn choose_discard(&mut self, state: &GameState, seat: u8) -> Option<Tile> {
        BotPolicy::choose_discard(&state.player_ref(seat).hand)
    }

    fn choose_claim(
        &mut self,
        _state: &GameState,
        _seat: u8,
        _tile: Tile,
        eligibility: &ClaimEligibility,
    ) -> ClaimChoice {
        if eligibility.gang {
            ClaimChoice::Gang
        } else if eligibility.pong {
            ClaimChoice::Pong
        } else if !eligibility.chi_options.is_empty() {
            ClaimChoice::Chi { option: 0 }
        } else {
            ClaimChoice::Pass
        }
    }

    fn choose_gang(&mut self, _state: &GameState, _seat: u8, options: &[Tile]) -> Option<Tile> {
        options.first().copied()
    }
}
