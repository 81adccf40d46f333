/// 四人麻将规则与回合引擎
///
/// 纯状态机核心：牌、手牌、胡牌判定、回合流转与响应裁决。
/// 传输、会话、界面由外部调用方负责

pub mod game;
pub mod tile;

// 重新导出常用类型
pub use game::action::{Effect, Intent};
pub use game::bot::{BotPolicy, BotSource};
pub use game::chi::ChiHandler;
pub use game::decision::{ClaimChoice, DecisionSource, FnDecisionSource};
pub use game::game_engine::{GameEngine, GameError, MatchOutcome};
pub use game::gang::GangHandler;
pub use game::player::Player;
pub use game::pong::PongHandler;
pub use game::scoring::{GangKind, Meld, TaiCalculator};
pub use game::state::{ClaimEligibility, ClaimResponse, DiscardRecord, GameState, Phase};
pub use game::view::{GameView, PhaseView, SeatView};
pub use tile::{Animal, Dragon, Hand, Suit, Tile, Wall, Wind, WinChecker, WinResult};
