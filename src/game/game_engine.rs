use crate::game::action::{Effect, Intent};
use crate::game::chi::ChiHandler;
use crate::game::decision::{ClaimChoice, DecisionSource};
use crate::game::gang::GangHandler;
use crate::game::pong::PongHandler;
use crate::game::scoring::{GangKind, Meld, TaiCalculator};
use crate::game::state::{ClaimEligibility, ClaimResponse, DiscardRecord, GameState, Phase};
use crate::game::view::GameView;
use crate::tile::{Tile, Wall, WinChecker};
use log::{debug, trace};
use std::fmt;

/// 引擎错误
///
/// 被拒绝的意图不改变任何状态，调用方可以修正后重试
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// 座位号越界
    InvalidPlayer,
    /// 当前阶段/座位不允许该意图
    IllegalMove,
    /// 手牌中没有这张牌
    TileNotFound { tile: Tile },
    /// 本局已到终态
    MatchOver,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidPlayer => write!(f, "invalid player seat"),
            GameError::IllegalMove => write!(f, "illegal move for current phase"),
            GameError::TileNotFound { tile } => write!(f, "tile not in hand: {}", tile),
            GameError::MatchOver => write!(f, "match already over"),
        }
    }
}

impl std::error::Error for GameError {}

/// 整局结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// 有人胡牌
    Won { winner: u8, tai: u32, self_draw: bool },
    /// 流局
    Exhausted,
}

/// 游戏引擎
///
/// 一个值就是一局：引擎持有状态、牌墙和胡牌判定器，没有全局量，
/// 多局可以并存。所有变更都经过 `apply_intent`，被拒绝的意图
/// 保证状态逐位不变
#[derive(Debug, Clone)]
pub struct GameEngine {
    /// 游戏状态
    pub state: GameState,
    /// 牌墙
    pub wall: Wall,
    /// 胡牌判定器（带缓存）
    checker: WinChecker,
}

impl GameEngine {
    /// 创建新的一局
    ///
    /// # 参数
    ///
    /// - `seed`: 洗牌种子（同种子同牌序）
    /// - `include_bonus`: 是否带花牌
    pub fn new(seed: u64, include_bonus: bool) -> Self {
        Self {
            state: GameState::new(),
            wall: Wall::shuffled(include_bonus, seed),
            checker: WinChecker::new(),
        }
    }

    /// 发牌：四个座位轮流各 13 张
    ///
    /// 摸到花牌立即亮出计台并补摸（可连锁），暗牌永远不含花牌
    pub fn deal(&mut self) -> Result<Vec<Effect>, GameError> {
        if self.state.is_over() {
            return Err(GameError::MatchOver);
        }
        if self.state.players.iter().any(|p| !p.hand.is_empty()) {
            return Err(GameError::IllegalMove);
        }

        let mut effects = Vec::new();
        for _ in 0..13 {
            for seat in 0..4 {
                if self.draw_replacing_bonus(seat, &mut effects).is_none() {
                    return Err(GameError::MatchOver);
                }
            }
        }
        debug!(
            "deal complete, wall remaining {}",
            self.wall.remaining_count()
        );
        Ok(effects)
    }

    /// 处理一个玩家意图
    ///
    /// # 返回
    ///
    /// 按发生顺序排列的副作用；出错时状态不变
    pub fn apply_intent(&mut self, seat: u8, intent: Intent) -> Result<Vec<Effect>, GameError> {
        if seat >= 4 {
            return Err(GameError::InvalidPlayer);
        }
        if self.state.is_over() {
            return Err(GameError::MatchOver);
        }

        match (&self.state.phase, intent) {
            (Phase::AwaitingDraw, Intent::Draw) => {
                if seat != self.state.current_seat {
                    return Err(GameError::IllegalMove);
                }
                self.handle_draw(seat)
            }
            (Phase::AwaitingDiscard, Intent::Discard { tile }) => {
                if seat != self.state.current_seat {
                    return Err(GameError::IllegalMove);
                }
                self.handle_discard(seat, tile)
            }
            (Phase::AwaitingDiscard, Intent::DeclareGang { tile }) => {
                if seat != self.state.current_seat {
                    return Err(GameError::IllegalMove);
                }
                self.handle_declare_gang(seat, tile)
            }
            (
                Phase::AwaitingClaim { .. },
                Intent::ClaimPong | Intent::ClaimChi { .. } | Intent::ClaimGang | Intent::Pass,
            ) => self.handle_claim(seat, intent),
            _ => Err(GameError::IllegalMove),
        }
    }

    /// 生成观察者视角的快照
    pub fn snapshot(&self, viewer: u8) -> GameView {
        GameView::new(&self.state, &self.wall, viewer)
    }

    /// 由决策来源驱动整局
    ///
    /// 手牌全空时自动先发牌；循环询问各座位直到终态
    pub fn run(
        &mut self,
        sources: &mut [Box<dyn DecisionSource>; 4],
    ) -> Result<MatchOutcome, GameError> {
        if self.state.players.iter().all(|p| p.hand.is_empty()) {
            self.deal()?;
        }

        loop {
            match self.state.phase.clone() {
                Phase::Won { winner, tai, self_draw } => {
                    return Ok(MatchOutcome::Won { winner, tai, self_draw });
                }
                Phase::Exhausted => return Ok(MatchOutcome::Exhausted),
                Phase::AwaitingDraw => {
                    let seat = self.state.current_seat;
                    self.apply_intent(seat, Intent::Draw)?;
                }
                Phase::AwaitingDiscard => {
                    let seat = self.state.current_seat;
                    let player = self.state.player_ref(seat);
                    let mut gang_options: Vec<Tile> =
                        GangHandler::concealed_gang_tiles(&player.hand).into_vec();
                    gang_options.extend(GangHandler::supplemental_gang_tiles(player));

                    let declared = if gang_options.is_empty() {
                        None
                    } else {
                        sources[seat as usize].choose_gang(&self.state, seat, &gang_options)
                    };
                    match declared {
                        Some(tile) => {
                            self.apply_intent(seat, Intent::DeclareGang { tile })?;
                        }
                        None => {
                            let tile = sources[seat as usize]
                                .choose_discard(&self.state, seat)
                                .ok_or(GameError::IllegalMove)?;
                            self.apply_intent(seat, Intent::Discard { tile })?;
                        }
                    }
                }
                Phase::AwaitingClaim { tile, eligibility, responses, .. } => {
                    for seat in 0..4u8 {
                        if responses[seat as usize] != ClaimResponse::Pending {
                            continue;
                        }
                        let choice = sources[seat as usize].choose_claim(
                            &self.state,
                            seat,
                            tile,
                            &eligibility[seat as usize],
                        );
                        let intent = match choice {
                            ClaimChoice::Pass => Intent::Pass,
                            ClaimChoice::Pong => Intent::ClaimPong,
                            ClaimChoice::Chi { option } => Intent::ClaimChi { option },
                            ClaimChoice::Gang => Intent::ClaimGang,
                        };
                        self.apply_intent(seat, intent)?;
                        // 收齐应答后窗口立即裁决，后续座位不再询问
                        if !matches!(self.state.phase, Phase::AwaitingClaim { .. }) {
                            break;
                        }
                    }
                }
            }
        }
    }

    /// 摸一张牌，花牌亮出补摸直到摸到非花牌
    ///
    /// # 返回
    ///
    /// - `Some(tile)`：摸到的非花牌（已入手牌）
    /// - `None`：牌墙摸空（调用方负责转入流局）
    fn draw_replacing_bonus(&mut self, seat: u8, effects: &mut Vec<Effect>) -> Option<Tile> {
        loop {
            let tile = self.wall.draw()?;
            if tile.is_bonus() {
                let tai = self.state.player_mut(seat).reveal_bonus(tile);
                trace!("seat {} revealed bonus {} (+{} tai)", seat, tile, tai);
                effects.push(Effect::BonusRevealed { seat, tile, tai });
                continue;
            }
            self.state.player_mut(seat).hand.add_tile(tile);
            effects.push(Effect::Drew { seat, tile });
            return Some(tile);
        }
    }

    /// 摸牌后的自摸检查：完整牌型且台数 > 0 才算胡
    ///
    /// 胡则转入终态，否则转入待出牌
    fn check_self_draw_win(&mut self, seat: u8, effects: &mut Vec<Effect>) {
        let player = &self.state.players[seat as usize];
        let win = self.checker.check_win(&player.hand, player.melds_count());
        if win.is_win {
            let tai = TaiCalculator::score(&player.hand, &player.melds, player.bonus_tai, &win);
            if tai > 0 {
                debug!("seat {} wins by self-draw with {} tai", seat, tai);
                self.state.phase = Phase::Won { winner: seat, tai, self_draw: true };
                effects.push(Effect::Won { seat, tai, self_draw: true });
                return;
            }
        }
        self.state.phase = Phase::AwaitingDiscard;
    }

    fn handle_draw(&mut self, seat: u8) -> Result<Vec<Effect>, GameError> {
        let mut effects = Vec::new();
        if self.draw_replacing_bonus(seat, &mut effects).is_none() {
            debug!("wall exhausted at turn {}", self.state.turn);
            self.state.phase = Phase::Exhausted;
            effects.push(Effect::WallExhausted);
            return Ok(effects);
        }
        self.check_self_draw_win(seat, &mut effects);
        Ok(effects)
    }

    fn handle_discard(&mut self, seat: u8, tile: Tile) -> Result<Vec<Effect>, GameError> {
        // 先验证再变更：没有这张牌时状态不动
        if !self.state.player_ref(seat).hand.has_tile(tile) {
            return Err(GameError::TileNotFound { tile });
        }

        let mut effects = Vec::new();
        self.state.player_mut(seat).hand.remove_tile(tile);
        self.state.discard_pile.push(tile);
        let turn = self.state.turn;
        self.state.discard_history.push(DiscardRecord { seat, tile, turn });
        effects.push(Effect::Discarded { seat, tile });
        trace!("seat {} discarded {}", seat, tile);

        // 点炮胡：按离弃牌者的近远扫描，胡牌优先于一切响应，立即终局
        let mut instant_win: Option<(u8, u32)> = None;
        for offset in 1..=3 {
            let responder = (seat + offset) % 4;
            let player = &self.state.players[responder as usize];
            let mut test_hand = player.hand.clone();
            test_hand.add_tile(tile);
            let win = self.checker.check_win(&test_hand, player.melds_count());
            if win.is_win {
                let tai = TaiCalculator::score(&test_hand, &player.melds, player.bonus_tai, &win);
                if tai > 0 {
                    instant_win = Some((responder, tai));
                    break;
                }
            }
        }
        if let Some((winner, tai)) = instant_win {
            debug!("seat {} wins on discard {} with {} tai", winner, tile, tai);
            self.state.discard_pile.pop();
            self.state.players[winner as usize].hand.add_tile(tile);
            self.state.phase = Phase::Won { winner, tai, self_draw: false };
            effects.push(Effect::Won { seat: winner, tai, self_draw: false });
            return Ok(effects);
        }

        // 响应资格：杠/碰任意座位，吃仅下家
        let mut eligibility: [ClaimEligibility; 4] = Default::default();
        let mut any_eligible = false;
        for offset in 1..=3 {
            let responder = (seat + offset) % 4;
            let hand = &self.state.players[responder as usize].hand;
            let mut elig = ClaimEligibility {
                pong: PongHandler::can_pong(hand, tile),
                gang: GangHandler::can_claim_gang(hand, tile),
                chi_options: Default::default(),
            };
            if offset == 1 {
                elig.chi_options = ChiHandler::find_valid_chis(hand, tile);
            }
            any_eligible |= elig.any();
            eligibility[responder as usize] = elig;
        }

        if !any_eligible {
            let next = GameState::next_seat(seat);
            self.advance_turn(next);
            effects.push(Effect::TurnPassed { next_seat: next });
            return Ok(effects);
        }

        let mut responses = [ClaimResponse::Pass; 4];
        for (index, elig) in eligibility.iter().enumerate() {
            if elig.any() {
                responses[index] = ClaimResponse::Pending;
            }
        }
        self.state.phase = Phase::AwaitingClaim { tile, discarder: seat, eligibility, responses };
        effects.push(Effect::ClaimWindowOpened { tile, discarder: seat });
        Ok(effects)
    }

    fn handle_declare_gang(&mut self, seat: u8, tile: Tile) -> Result<Vec<Effect>, GameError> {
        let player = &self.state.players[seat as usize];
        let kind = if player.hand.tile_count(tile) == 4 {
            GangKind::Concealed
        } else if GangHandler::supplemental_gang_tiles(player).contains(&tile) {
            GangKind::Supplemental
        } else {
            return Err(GameError::IllegalMove);
        };

        let mut effects = Vec::new();
        let player = &mut self.state.players[seat as usize];
        let done = match kind {
            GangKind::Concealed => GangHandler::concealed_gang(player, tile),
            GangKind::Supplemental => GangHandler::supplemental_gang(player, tile),
            GangKind::Claimed => false,
        };
        if !done {
            return Err(GameError::IllegalMove);
        }
        debug!("seat {} declared {:?} gang on {}", seat, kind, tile);
        effects.push(Effect::MeldFormed { seat, meld: Meld::Gang { tile, kind } });

        // 杠后补摸，补到的牌再走一次自摸检查
        if self.draw_replacing_bonus(seat, &mut effects).is_none() {
            self.state.phase = Phase::Exhausted;
            effects.push(Effect::WallExhausted);
            return Ok(effects);
        }
        self.check_self_draw_win(seat, &mut effects);
        Ok(effects)
    }

    fn handle_claim(&mut self, seat: u8, intent: Intent) -> Result<Vec<Effect>, GameError> {
        let resolved = {
            let (tile, discarder, eligibility, responses) = match &mut self.state.phase {
                Phase::AwaitingClaim { tile, discarder, eligibility, responses } => {
                    (*tile, *discarder, eligibility, responses)
                }
                _ => return Err(GameError::IllegalMove),
            };

            let elig = &eligibility[seat as usize];
            if !elig.any() || responses[seat as usize] != ClaimResponse::Pending {
                return Err(GameError::IllegalMove);
            }
            let response = match intent {
                Intent::Pass => ClaimResponse::Pass,
                Intent::ClaimPong if elig.pong => ClaimResponse::Pong,
                Intent::ClaimGang if elig.gang => ClaimResponse::Gang,
                Intent::ClaimChi { option } => match elig.chi_options.get(option as usize) {
                    Some(&start) => ClaimResponse::Chi { start },
                    None => return Err(GameError::IllegalMove),
                },
                _ => return Err(GameError::IllegalMove),
            };
            responses[seat as usize] = response;

            if responses.iter().any(|r| *r == ClaimResponse::Pending) {
                None
            } else {
                Some((tile, discarder, *responses))
            }
        };

        match resolved {
            None => Ok(Vec::new()),
            Some((tile, discarder, responses)) => self.resolve_claims(tile, discarder, responses),
        }
    }

    /// 收齐应答后的统一裁决
    ///
    /// 优先级：杠 > 碰 > 吃；同级取离弃牌者最近的座位。
    /// 只放行一个响应，其余全部作废
    fn resolve_claims(
        &mut self,
        tile: Tile,
        discarder: u8,
        responses: [ClaimResponse; 4],
    ) -> Result<Vec<Effect>, GameError> {
        let mut granted: Option<(u8, ClaimResponse)> = None;
        for wanted in [ClaimResponse::Gang, ClaimResponse::Pong] {
            if granted.is_some() {
                break;
            }
            for offset in 1..=3 {
                let s = (discarder + offset) % 4;
                if responses[s as usize] == wanted {
                    granted = Some((s, wanted));
                    break;
                }
            }
        }
        if granted.is_none() {
            for offset in 1..=3 {
                let s = (discarder + offset) % 4;
                if let ClaimResponse::Chi { start } = responses[s as usize] {
                    granted = Some((s, ClaimResponse::Chi { start }));
                    break;
                }
            }
        }

        let mut effects = Vec::new();
        let (claimant, response) = match granted {
            None => {
                // 全员过：弃牌留在弃牌堆，轮转继续
                let next = GameState::next_seat(discarder);
                self.advance_turn(next);
                effects.push(Effect::TurnPassed { next_seat: next });
                return Ok(effects);
            }
            Some(pair) => pair,
        };

        let player = &mut self.state.players[claimant as usize];
        let meld = match response {
            ClaimResponse::Gang => {
                if !GangHandler::claim_gang(player, tile) {
                    return Err(GameError::IllegalMove);
                }
                Meld::Gang { tile, kind: GangKind::Claimed }
            }
            ClaimResponse::Pong => {
                if !PongHandler::pong(player, tile) {
                    return Err(GameError::IllegalMove);
                }
                Meld::Pong { tile }
            }
            ClaimResponse::Chi { start } => {
                let suit = match tile.suit() {
                    Some(suit) => suit,
                    None => return Err(GameError::IllegalMove),
                };
                if !ChiHandler::chi(player, tile, start) {
                    return Err(GameError::IllegalMove);
                }
                Meld::Chi { suit, start }
            }
            _ => return Err(GameError::IllegalMove),
        };
        // 被响应的弃牌离开弃牌堆，进入副露
        self.state.discard_pile.pop();
        debug!("seat {} claimed {} forming {:?}", claimant, tile, meld);
        effects.push(Effect::MeldFormed { seat: claimant, meld });

        self.state.current_seat = claimant;
        self.state.turn += 1;
        if matches!(meld, Meld::Gang { .. }) {
            // 直杠同样补摸并复查自摸
            if self.draw_replacing_bonus(claimant, &mut effects).is_none() {
                self.state.phase = Phase::Exhausted;
                effects.push(Effect::WallExhausted);
                return Ok(effects);
            }
            self.check_self_draw_win(claimant, &mut effects);
        } else {
            // 碰/吃不摸牌，直接出牌
            self.state.phase = Phase::AwaitingDiscard;
        }
        Ok(effects)
    }

    fn advance_turn(&mut self, next: u8) {
        self.state.current_seat = next;
        self.state.turn += 1;
        self.state.phase = Phase::AwaitingDraw;
    }
}
