/// 牌相关模块
///
/// 包含牌（Tile）、牌墙（Wall）、手牌（Hand）和胡牌判定（WinChecker）的实现

pub mod hand;
pub mod tile;
pub mod wall;
pub mod win_check;

// 重新导出常用类型
pub use hand::Hand;
pub use tile::{Animal, Dragon, Suit, Tile, Wind};
pub use wall::Wall;
pub use win_check::{is_complete, Group, WinChecker, WinResult};
