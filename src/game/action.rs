use crate::game::scoring::Meld;
use crate::tile::Tile;

/// 玩家意图（由调用方提交给引擎）
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Intent {
    /// 摸牌（轮到自己且处于待摸牌阶段）
    Draw,
    /// 出牌
    Discard { tile: Tile },
    /// 宣告杠（暗杠或加杠，由引擎根据手牌判别）
    DeclareGang { tile: Tile },
    /// 响应弃牌：碰
    ClaimPong,
    /// 响应弃牌：吃（option 为可吃组合的下标）
    ClaimChi { option: u8 },
    /// 响应弃牌：直杠
    ClaimGang,
    /// 响应弃牌：过
    Pass,
}

/// 引擎副作用（一次意图可能引发多个）
///
/// 按发生顺序返回给调用方，供传输层广播
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Effect {
    /// 摸到一张牌
    Drew { seat: u8, tile: Tile },
    /// 摸到花牌，亮出并累计台数（随后补摸）
    BonusRevealed { seat: u8, tile: Tile, tai: u32 },
    /// 打出一张牌
    Discarded { seat: u8, tile: Tile },
    /// 弃牌引发响应窗口
    ClaimWindowOpened { tile: Tile, discarder: u8 },
    /// 形成副露（碰/吃/杠）
    MeldFormed { seat: u8, meld: Meld },
    /// 轮转到下一个座位
    TurnPassed { next_seat: u8 },
    /// 胡牌
    Won { seat: u8, tai: u32, self_draw: bool },
    /// 牌墙摸空，流局
    WallExhausted,
}
