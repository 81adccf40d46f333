use super::tile::Tile;
use smallvec::SmallVec;
use std::collections::HashMap;

/// 暗牌手牌（Hand）
///
/// 使用 HashMap 存储每张牌的数量，支持 O(1) 的添加、移除和查询。
/// 手牌是多重集：顺序没有语义，`to_sorted_vec` 仅供显示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    /// 牌的数量映射：Tile -> 数量（1-4）
    tiles: HashMap<Tile, u8>,
    /// 总牌数（用于快速查询）
    total_count: usize,
}

impl Hand {
    /// 创建空手牌
    pub fn new() -> Self {
        Self {
            tiles: HashMap::new(),
            total_count: 0,
        }
    }

    /// 添加一张牌
    ///
    /// # 返回
    ///
    /// - `true`：成功添加
    /// - `false`：该牌已有 4 张（同种牌最多 4 张）
    pub fn add_tile(&mut self, tile: Tile) -> bool {
        let count = self.tiles.entry(tile).or_insert(0);
        if *count >= 4 {
            return false;
        }
        *count += 1;
        self.total_count += 1;
        true
    }

    /// 移除恰好一张牌
    ///
    /// # 返回
    ///
    /// - `true`：成功移除
    /// - `false`：手牌中没有该牌
    pub fn remove_tile(&mut self, tile: Tile) -> bool {
        match self.tiles.get_mut(&tile) {
            Some(count) if *count > 0 => {
                *count -= 1;
                self.total_count -= 1;
                if *count == 0 {
                    self.tiles.remove(&tile);
                }
                true
            }
            _ => false,
        }
    }

    /// 检查是否有某张牌（O(1)）
    pub fn has_tile(&self, tile: Tile) -> bool {
        self.tile_count(tile) > 0
    }

    /// 查询某张牌的数量（O(1)）
    pub fn tile_count(&self, tile: Tile) -> u8 {
        self.tiles.get(&tile).copied().unwrap_or(0)
    }

    /// 获取总牌数
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// 转换为规范排序的牌向量（仅用于显示和调试）
    ///
    /// 排序规则：索、万、筒按数字升序，字牌按固定字母序殿后
    pub fn to_sorted_vec(&self) -> Vec<Tile> {
        let mut distinct: Vec<(Tile, u8)> =
            self.tiles.iter().map(|(tile, &count)| (*tile, count)).collect();
        distinct.sort_by_key(|(tile, _)| tile.order_key());

        let mut result = Vec::with_capacity(self.total_count);
        for (tile, count) in distinct {
            for _ in 0..count {
                result.push(tile);
            }
        }
        result
    }

    /// 检查手牌是否为空
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// 清空手牌
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.total_count = 0;
    }

    /// 获取所有不同的牌类型
    ///
    /// 手牌通常只有 5-10 种不同的牌，SmallVec 走栈分配
    pub fn distinct_tiles(&self) -> SmallVec<[Tile; 14]> {
        let mut result = SmallVec::with_capacity(self.tiles.len());
        for tile in self.tiles.keys() {
            result.push(*tile);
        }
        result
    }

    /// 获取所有牌的数量映射
    pub fn tiles_map(&self) -> &HashMap<Tile, u8> {
        &self.tiles
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}
