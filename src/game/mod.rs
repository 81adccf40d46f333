/// 游戏逻辑模块
///
/// 包含回合状态机、副露操作、台数计算和机器人策略

pub mod action;
pub mod bot;
pub mod chi;
pub mod decision;
pub mod game_engine;
pub mod gang;
pub mod player;
pub mod pong;
pub mod scoring;
pub mod state;
pub mod view;
