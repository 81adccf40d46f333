use crate::game::scoring::Meld;
use crate::game::state::{GameState, Phase};
use crate::tile::{Tile, Wall};

/// 单个座位的快照
///
/// 观察者自己的暗牌完整可见，其他座位只暴露张数
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SeatView {
    /// 座位
    pub seat: u8,
    /// 暗牌张数（所有座位可见）
    pub concealed_count: usize,
    /// 暗牌内容（仅观察者自己的座位为 Some，规范排序）
    pub concealed: Option<Vec<Tile>>,
    /// 副露（公开信息）
    pub melds: Vec<Meld>,
    /// 已亮出的花牌（公开信息）
    pub bonus_tiles: Vec<Tile>,
    /// 花牌累计台数
    pub bonus_tai: u32,
}

/// 阶段快照（不暴露响应窗口的资格矩阵）
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PhaseView {
    AwaitingDraw,
    AwaitingDiscard,
    AwaitingClaim { tile: Tile, discarder: u8 },
    Won { winner: u8, tai: u32, self_draw: bool },
    Exhausted,
}

/// 游戏快照（按观察者视角脱敏，可序列化给传输层）
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GameView {
    /// 观察者座位
    pub viewer: u8,
    /// 四个座位的快照
    pub seats: Vec<SeatView>,
    /// 当前座位
    pub current_seat: u8,
    /// 回合数
    pub turn: u32,
    /// 牌墙剩余张数
    pub wall_remaining: usize,
    /// 弃牌堆
    pub discard_pile: Vec<Tile>,
    /// 当前阶段
    pub phase: PhaseView,
}

impl GameView {
    /// 从游戏状态生成观察者视角的快照
    pub fn new(state: &GameState, wall: &Wall, viewer: u8) -> Self {
        let seats = state
            .players
            .iter()
            .map(|player| SeatView {
                seat: player.seat,
                concealed_count: player.hand.total_count(),
                concealed: if player.seat == viewer {
                    Some(player.hand.to_sorted_vec())
                } else {
                    None
                },
                melds: player.melds.clone(),
                bonus_tiles: player.bonus_tiles.clone(),
                bonus_tai: player.bonus_tai,
            })
            .collect();

        let phase = match &state.phase {
            Phase::AwaitingDraw => PhaseView::AwaitingDraw,
            Phase::AwaitingDiscard => PhaseView::AwaitingDiscard,
            Phase::AwaitingClaim { tile, discarder, .. } => PhaseView::AwaitingClaim {
                tile: *tile,
                discarder: *discarder,
            },
            Phase::Won { winner, tai, self_draw } => PhaseView::Won {
                winner: *winner,
                tai: *tai,
                self_draw: *self_draw,
            },
            Phase::Exhausted => PhaseView::Exhausted,
        };

        Self {
            viewer,
            seats,
            current_seat: state.current_seat,
            turn: state.turn,
            wall_remaining: wall.remaining_count(),
            discard_pile: state.discard_pile.clone(),
            phase,
        }
    }
}
