/// 可执行文件入口（演示一局机器人对局）

use mahjong_core::{BotSource, DecisionSource, GameEngine, MatchOutcome};

fn main() {
    env_logger::init();

    // 种子可从第一个命令行参数传入，便于复现
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(42);

    println!("四人麻将引擎演示，种子 {}", seed);

    let mut engine = GameEngine::new(seed, true);
    let mut sources: [Box<dyn DecisionSource>; 4] = [
        Box::new(BotSource),
        Box::new(BotSource),
        Box::new(BotSource),
        Box::new(BotSource),
    ];

    match engine.run(&mut sources) {
        Ok(MatchOutcome::Won { winner, tai, self_draw }) => {
            let how = if self_draw { "自摸" } else { "点炮" };
            println!("座位 {} {}胡牌，{} 台", winner, how, tai);
            let hand = engine.state.player_ref(winner).hand.to_sorted_vec();
            print!("胡牌手牌：");
            for tile in hand {
                print!("{} ", tile);
            }
            println!();
            for meld in &engine.state.player_ref(winner).melds {
                println!("副露：{:?}", meld);
            }
        }
        Ok(MatchOutcome::Exhausted) => {
            println!("牌墙摸空，流局");
        }
        Err(err) => {
            eprintln!("引擎错误：{}", err);
        }
    }

    println!(
        "共 {} 回合，弃牌 {} 张，牌墙剩余 {} 张",
        engine.state.turn,
        engine.state.discard_history.len(),
        engine.wall.remaining_count()
    );
}
