use crate::game::state::{ClaimEligibility, GameState};
use crate::tile::Tile;

/// 响应窗口的决策
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimChoice {
    /// 过
    Pass,
    /// 碰
    Pong,
    /// 吃（可吃组合的下标）
    Chi { option: u8 },
    /// 直杠
    Gang,
}

/// 决策来源
///
/// 每个座位持有一个决策来源（内置机器人或调用方适配器），
/// 引擎驱动整局时按座位询问，从不按身份分支
pub trait DecisionSource {
    /// 选择要打出的牌（处于待出牌阶段时询问）
    fn choose_discard(&mut self, state: &GameState, seat: u8) -> Option<Tile>;

    /// 对弃牌作出响应
    fn choose_claim(
        &mut self,
        state: &GameState,
        seat: u8,
        tile: Tile,
        eligibility: &ClaimEligibility,
    ) -> ClaimChoice;

    /// 出牌前是否宣告杠（暗杠/加杠）
    ///
    /// # 参数
    ///
    /// - `options`: 当前所有可杠的牌
    ///
    /// # 返回
    ///
    /// `Some(tile)` 宣告杠该牌，`None` 不杠
    fn choose_gang(&mut self, state: &GameState, seat: u8, options: &[Tile]) -> Option<Tile>;
}

/// 函数式决策来源适配器
///
/// 用一个出牌闭包驱动座位；响应窗口一律过，从不宣告杠。
/// 适合测试中精确控制出牌序列
pub struct FnDecisionSource<F> {
    choose: F,
}

impl<F> FnDecisionSource<F>
where
    F: FnMut(&GameState, u8) -> Option<Tile>,
{
    pub fn new(choose: F) -> Self {
        Self { choose }
    }
}

impl<F> DecisionSource for FnDecisionSource<F>
where
    F: FnMut(&GameState, u8) -> Option<Tile>,
{
    fn choose_discard(&mut self, state: &GameState, seat: u8) -> Option<Tile> {
        (self.choose)(state, seat)
    }

    fn choose_claim(
        &mut self,
        _state: &GameState,
        _seat: u8,
        _tile: Tile,
        _eligibility: &ClaimEligibility,
    ) -> ClaimChoice {
        ClaimChoice::Pass
    }

    fn choose_gang(&mut self, _state: &GameState, _seat: u8, _options: &[Tile]) -> Option<Tile> {
        None
    }
}
