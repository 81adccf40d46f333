use crate::tile::win_check::{Group, WinResult};
use crate::tile::{Hand, Suit, Tile};
use smallvec::SmallVec;

/// 杠的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GangKind {
    /// 直杠（手里三张，杠别人打出的第四张）
    Claimed,
    /// 暗杠（手里四张自己杠）
    Concealed,
    /// 加杠（已碰的刻子摸到第四张补成杠）
    Supplemental,
}

/// 副露（已亮出的牌组，不可撤销）
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Meld {
    /// 碰（三张相同牌）
    Pong { tile: Tile },
    /// 吃（同花色连续三张，记起始数字）
    Chi { suit: Suit, start: u8 },
    /// 杠（四张相同牌）
    Gang { tile: Tile, kind: GangKind },
}

impl Meld {
    /// 枚举该副露占用的实体牌（碰/吃 3 张，杠 4 张）
    ///
    /// 用于守恒检查：全场实体牌总数在整局中不变
    pub fn tiles(&self) -> SmallVec<[Tile; 4]> {
        let mut out = SmallVec::new();
        match self {
            Meld::Pong { tile } => {
                for _ in 0..3 {
                    out.push(*tile);
                }
            }
            Meld::Chi { suit, start } => {
                for offset in 0..3 {
                    if let Some(tile) = Tile::suited(*suit, start + offset) {
                        out.push(tile);
                    }
                }
            }
            Meld::Gang { tile, .. } => {
                for _ in 0..4 {
                    out.push(*tile);
                }
            }
        }
        out
    }

    /// 胡牌判定时副露占的组数：每组副露折算一组，杠的第四张不重复计
    pub fn is_triplet_like(&self) -> bool {
        matches!(self, Meld::Pong { .. } | Meld::Gang { .. })
    }
}

/// 台数计算器
///
/// 牌型台数是加法叠加的；花牌台数在摸到花牌时已累加到玩家身上，
/// 胡牌时直接相加。总台数为 0 的完整牌型不允许胡
pub struct TaiCalculator;

impl TaiCalculator {
    /// 对碰（全刻子）：所有副露是碰/杠，暗牌拆解全是刻子
    pub const TAI_ALL_TRIPLETS: u32 = 2;
    /// 混一色（单一花色 + 字牌）
    pub const TAI_HALF_FLUSH: u32 = 2;
    /// 清一色（纯单一花色）
    pub const TAI_FULL_FLUSH: u32 = 3;
    /// 平胡（门清、四顺子、非字牌对子）
    pub const TAI_PING_HU: u32 = 4;

    /// 计算牌型台数（不含花牌台数）
    ///
    /// # 参数
    ///
    /// - `hand`: 胡牌时的暗牌（含所胡的那张）
    /// - `melds`: 副露
    /// - `win`: 胡牌拆解结果
    pub fn pattern_tai(hand: &Hand, melds: &[Meld], win: &WinResult) -> u32 {
        let mut tai = 0;

        // 对碰
        let all_triplets = melds.iter().all(|m| m.is_triplet_like())
            && win.groups.iter().all(|g| matches!(g, Group::Triplet { .. }));
        if all_triplets {
            tai += Self::TAI_ALL_TRIPLETS;
        }

        // 混一色 / 清一色：统计所有可见牌（暗牌 + 副露）的花色构成
        let mut suits_seen = [false; 3];
        let mut has_honor = false;
        for (tile, &count) in hand.tiles_map() {
            if count == 0 {
                continue;
            }
            match tile.suit() {
                Some(suit) => suits_seen[suit as usize] = true,
                None => has_honor = true,
            }
        }
        for meld in melds {
            for tile in meld.tiles() {
                match tile.suit() {
                    Some(suit) => suits_seen[suit as usize] = true,
                    None => has_honor = true,
                }
            }
        }
        let suit_count = suits_seen.iter().filter(|&&s| s).count();
        if suit_count == 1 {
            if has_honor {
                tai += Self::TAI_HALF_FLUSH;
            } else {
                tai += Self::TAI_FULL_FLUSH;
            }
        }

        // 平胡：无副露、四顺子、对子非字牌
        let pair_is_honor = win.pair.map(|t| t.is_honor()).unwrap_or(false);
        if melds.is_empty()
            && win.groups.len() == 4
            && win.groups.iter().all(|g| matches!(g, Group::Run { .. }))
            && !pair_is_honor
        {
            tai += Self::TAI_PING_HU;
        }

        tai
    }

    /// 计算总台数：牌型台数 + 已累计的花牌台数
    pub fn score(hand: &Hand, melds: &[Meld], bonus_tai: u32, win: &WinResult) -> u32 {
        if !win.is_win {
            return 0;
        }
        Self::pattern_tai(hand, melds, win) + bonus_tai
    }

    /// 花牌入手时的台数
    ///
    /// - 动物牌：+1
    /// - 花/季：数字与座位号（座位下标 + 1）相同时 +1，否则 0
    pub fn bonus_tile_tai(tile: Tile, seat: u8) -> u32 {
        match tile {
            Tile::Animal(_) => 1,
            Tile::Flower(n) | Tile::Season(n) if n == seat + 1 => 1,
            _ => 0,
        }
    }
}
