use crate::game::player::Player;
use crate::tile::Tile;
use smallvec::SmallVec;

/// 响应窗口中单个座位的资格
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClaimEligibility {
    /// 可碰
    pub pong: bool,
    /// 可直杠
    pub gang: bool,
    /// 可吃的顺子起点（仅下家非空）
    pub chi_options: SmallVec<[u8; 3]>,
}

impl ClaimEligibility {
    /// 是否有任何可响应的动作
    pub fn any(&self) -> bool {
        self.pong || self.gang || !self.chi_options.is_empty()
    }
}

/// 响应窗口中单个座位的应答
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimResponse {
    /// 尚未应答
    Pending,
    /// 过
    Pass,
    /// 碰
    Pong,
    /// 吃（顺子起点）
    Chi { start: u8 },
    /// 直杠
    Gang,
}

/// 回合阶段（状态机）
///
/// 终态（Won / Exhausted）只进不出，之后状态不再变化
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// 等待当前座位摸牌
    AwaitingDraw,
    /// 等待当前座位出牌（摸牌后或副露后）
    AwaitingDiscard,
    /// 弃牌响应窗口：收齐所有有资格座位的应答后统一裁决
    AwaitingClaim {
        /// 被响应的弃牌
        tile: Tile,
        /// 弃牌者座位
        discarder: u8,
        /// 各座位的响应资格
        eligibility: [ClaimEligibility; 4],
        /// 各座位的应答
        responses: [ClaimResponse; 4],
    },
    /// 有人胡牌
    Won { winner: u8, tai: u32, self_draw: bool },
    /// 牌墙摸空，流局
    Exhausted,
}

/// 弃牌记录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscardRecord {
    /// 弃牌座位
    pub seat: u8,
    /// 弃的牌
    pub tile: Tile,
    /// 弃牌时的回合数
    pub turn: u32,
}

/// 游戏状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// 四个座位的玩家
    pub players: [Player; 4],
    /// 当前阶段
    pub phase: Phase,
    /// 当前座位
    pub current_seat: u8,
    /// 回合数（每次轮转 +1）
    pub turn: u32,
    /// 弃牌堆（被响应取走的牌会移出）
    pub discard_pile: Vec<Tile>,
    /// 弃牌历史（只增不减，含被取走的牌）
    pub discard_history: Vec<DiscardRecord>,
}

impl GameState {
    /// 创建新的游戏状态（座位 0 先行，等待摸牌）
    pub fn new() -> Self {
        Self {
            players: [
                Player::new(0),
                Player::new(1),
                Player::new(2),
                Player::new(3),
            ],
            phase: Phase::AwaitingDraw,
            current_seat: 0,
            turn: 0,
            discard_pile: Vec::new(),
            discard_history: Vec::new(),
        }
    }

    /// 获取玩家（不可变引用）
    pub fn player_ref(&self, seat: u8) -> &Player {
        &self.players[seat as usize]
    }

    /// 获取玩家（可变引用）
    pub fn player_mut(&mut self, seat: u8) -> &mut Player {
        &mut self.players[seat as usize]
    }

    /// 获取当前玩家（不可变引用）
    pub fn current_player_ref(&self) -> &Player {
        &self.players[self.current_seat as usize]
    }

    /// 获取当前玩家（可变引用）
    pub fn current_player_mut(&mut self) -> &mut Player {
        &mut self.players[self.current_seat as usize]
    }

    /// 下一个座位（顺时针轮转）
    pub fn next_seat(seat: u8) -> u8 {
        (seat + 1) % 4
    }

    /// 是否已到终态
    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Won { .. } | Phase::Exhausted)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
