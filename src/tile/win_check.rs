use super::hand::Hand;
use super::tile::{Suit, Tile};
use smallvec::SmallVec;
use std::collections::HashMap;

/// 胡牌判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinResult {
    /// 是否凑成完整牌型
    pub is_win: bool,
    /// 对子（如果胡牌）
    pub pair: Option<Tile>,
    /// 暗牌部分拆解出的顺子/刻子
    pub groups: SmallVec<[Group; 4]>,
}

impl WinResult {
    fn miss() -> Self {
        Self {
            is_win: false,
            pair: None,
            groups: SmallVec::new(),
        }
    }
}

/// 牌组（顺子或刻子）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    /// 顺子（同花色连续三张）
    Run { suit: Suit, start: u8 },
    /// 刻子（三张相同牌，序数牌或字牌）
    Triplet { tile: Tile },
}

/// 胡牌判定器
///
/// 递归回溯拆解：先取对子，再逐花色剥刻子/顺子。
/// 相同多重集的判定结果按哈希缓存，避免重复计算
#[derive(Debug, Clone)]
pub struct WinChecker {
    /// 结果缓存：多重集哈希 -> 判定结果
    result_cache: HashMap<u64, WinResult>,
    /// 最大缓存大小（超过后清空重建）
    max_cache_size: usize,
}

impl WinChecker {
    /// 创建新的胡牌判定器
    pub fn new() -> Self {
        Self {
            result_cache: HashMap::new(),
            max_cache_size: 1000,
        }
    }

    /// 创建新的胡牌判定器（自定义缓存大小）
    pub fn with_cache_size(max_cache_size: usize) -> Self {
        Self {
            result_cache: HashMap::new(),
            max_cache_size,
        }
    }

    /// 判定暗牌 + 副露是否凑成完整牌型
    ///
    /// 完整牌型：1 个对子 + 4 组（顺子/刻子），其中每组副露算一组。
    /// 因此暗牌必须恰好是 14 - 3 × 副露组数 张（杠的第 4 张不重复计数）。
    /// 字牌只能做刻子或对子，绝不参与顺子；花牌不参与组牌。
    ///
    /// # 参数
    ///
    /// - `hand`: 暗牌（含摸进/所胡的那张）
    /// - `melds_count`: 副露组数（0-4）
    pub fn check_win(&mut self, hand: &Hand, melds_count: u8) -> WinResult {
        if melds_count > 4 {
            return WinResult::miss();
        }
        let required = 14 - 3 * melds_count as usize;
        if hand.total_count() != required {
            return WinResult::miss();
        }

        // 检查缓存（哈希包含副露组数）
        let hash = Self::hand_hash(hand) ^ (melds_count as u64).rotate_left(48);
        if let Some(cached) = self.result_cache.get(&hash) {
            return cached.clone();
        }

        let groups_needed = 4 - melds_count as usize;
        let result = Self::decompose(hand, groups_needed).unwrap_or_else(WinResult::miss);

        // 缓存结果（缓存已满时清空重建）
        if self.result_cache.len() >= self.max_cache_size {
            self.result_cache.clear();
        }
        self.result_cache.insert(hash, result.clone());
        result
    }

    /// 尝试拆解：遍历每个可作对子的牌值，剩余牌递归剥组
    fn decompose(hand: &Hand, groups_needed: usize) -> Option<WinResult> {
        // 对子候选按规范序遍历，保证结果确定
        let mut candidates: Vec<Tile> = hand
            .tiles_map()
            .iter()
            .filter(|(_, &count)| count >= 2)
            .map(|(tile, _)| *tile)
            .collect();
        candidates.sort_by_key(|tile| tile.order_key());

        for pair in candidates {
            let mut rest = hand.clone();
            rest.remove_tile(pair);
            rest.remove_tile(pair);

            if let Some(groups) = Self::find_groups(&rest) {
                if groups.len() == groups_needed {
                    return Some(WinResult {
                        is_win: true,
                        pair: Some(pair),
                        groups,
                    });
                }
            }
        }
        None
    }

    /// 把剩余暗牌完全剥成顺子/刻子，失败返回 None
    fn find_groups(hand: &Hand) -> Option<SmallVec<[Group; 4]>> {
        if hand.total_count() % 3 != 0 {
            return None;
        }

        let mut all_groups: SmallVec<[Group; 4]> = SmallVec::new();
        let mut suit_counts: [Vec<(u8, u8)>; 3] = [Vec::new(), Vec::new(), Vec::new()];

        for (tile, &count) in hand.tiles_map() {
            if count == 0 {
                continue;
            }
            match (tile.suit(), tile.rank()) {
                (Some(suit), Some(rank)) => {
                    suit_counts[suit as usize].push((rank, count));
                }
                _ if tile.is_honor() => {
                    // 字牌只能成刻子：数量必须恰好是 3
                    if count != 3 {
                        return None;
                    }
                    all_groups.push(Group::Triplet { tile: *tile });
                }
                // 花牌或畸形牌值：不参与任何组合
                _ => return None,
            }
        }

        // 逐花色递归剥组
        for (suit_idx, counts) in suit_counts.iter_mut().enumerate() {
            if counts.is_empty() {
                continue;
            }
            counts.sort_by_key(|&(rank, _)| rank);
            let suit = Suit::all()[suit_idx];
            let groups = Self::find_groups_for_suit(counts, suit)?;
            all_groups.extend(groups);
        }

        Some(all_groups)
    }

    /// 为单个花色查找顺子/刻子组合（递归回溯）
    fn find_groups_for_suit(counts: &[(u8, u8)], suit: Suit) -> Option<SmallVec<[Group; 4]>> {
        if counts.is_empty() {
            return Some(SmallVec::new());
        }

        let (rank, count) = counts[0];

        // 尝试刻子（最小数字三张相同）
        if count >= 3 {
            let mut new_counts = counts.to_vec();
            new_counts[0].1 -= 3;
            if new_counts[0].1 == 0 {
                new_counts.remove(0);
            }

            if let Some(mut groups) = Self::find_groups_for_suit(&new_counts, suit) {
                if let Some(tile) = Tile::suited(suit, rank) {
                    groups.push(Group::Triplet { tile });
                    return Some(groups);
                }
            }
        }

        // 尝试顺子（以最小数字开头的连续三张）
        if counts.len() >= 3 && counts[1].0 == rank + 1 && counts[2].0 == rank + 2 {
            let mut new_counts = counts.to_vec();
            for slot in new_counts.iter_mut().take(3) {
                slot.1 -= 1;
            }
            new_counts.retain(|&(_, c)| c > 0);

            if let Some(mut groups) = Self::find_groups_for_suit(&new_counts, suit) {
                groups.push(Group::Run { suit, start: rank });
                return Some(groups);
            }
        }

        // 最小数字既进不了刻子也进不了顺子，整个分支失败
        None
    }

    /// 计算手牌多重集的哈希值（用于缓存）
    ///
    /// 先按规范序排序，相同的多重集必然产生相同的哈希
    #[inline]
    fn hand_hash(hand: &Hand) -> u64 {
        let mut tiles: Vec<(Tile, u8)> =
            hand.tiles_map().iter().map(|(tile, &count)| (*tile, count)).collect();
        tiles.sort_by_key(|(tile, _)| tile.order_key());

        let mut hash = 0u64;
        for (tile, count) in tiles {
            let tile_hash = tile.order_key() as u64;
            hash = hash
                .wrapping_mul(31)
                .wrapping_add(tile_hash * 8 + count as u64);
        }
        hash
    }

    /// 清空缓存
    pub fn clear_cache(&mut self) {
        self.result_cache.clear();
    }

    /// 获取当前缓存大小（用于测试和监控）
    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.result_cache.len()
    }
}

impl Default for WinChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// 便捷函数：检查暗牌 + 副露是否凑成完整牌型
pub fn is_complete(hand: &Hand, melds_count: u8) -> bool {
    let mut checker = WinChecker::new();
    checker.check_win(hand, melds_count).is_win
}
