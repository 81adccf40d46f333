use mahjong_core::{
    ClaimResponse, GameEngine, GameError, GangKind, Intent, Meld, Phase, Suit, Tile,
};

/// 搭一个处于待出牌阶段的引擎，手牌全部手工指定
fn engine_with_hands(hands: [&[Tile]; 4], current: u8) -> GameEngine {
    let mut engine = GameEngine::new(0, false);
    for (seat, tiles) in hands.iter().enumerate() {
        let player = engine.state.player_mut(seat as u8);
        player.hand.clear();
        for tile in *tiles {
            assert!(player.hand.add_tile(*tile));
        }
    }
    engine.state.current_seat = current;
    engine.state.phase = Phase::AwaitingDiscard;
    engine
}

/// 杠 > 碰：远座的杠压过近座的碰
#[test]
fn test_gang_beats_nearer_pong() {
    let five = Tile::Bamboo(5);
    let mut engine = engine_with_hands(
        [
            &[five, Tile::Dot(1)],
            &[five, five, Tile::Dot(2)],       // 座位 1：可碰（近）
            &[Tile::Character(9)],
            &[five, five, five, Tile::Dot(3)], // 座位 3：可直杠（远）
        ],
        0,
    );

    engine.apply_intent(0, Intent::Discard { tile: five }).unwrap();
    assert!(matches!(engine.state.phase, Phase::AwaitingClaim { .. }));

    engine.apply_intent(1, Intent::ClaimPong).unwrap();
    let effects = engine.apply_intent(3, Intent::ClaimGang).unwrap();

    // 杠被放行，碰作废
    assert!(effects
        .iter()
        .any(|e| matches!(e, mahjong_core::Effect::MeldFormed { seat: 3, .. })));
    assert!(matches!(
        engine.state.player_ref(3).melds[0],
        Meld::Gang { kind: GangKind::Claimed, .. }
    ));
    assert!(engine.state.player_ref(1).melds.is_empty());
    // 座位 1 的两张牌原封不动
    assert_eq!(engine.state.player_ref(1).hand.tile_count(five), 2);
    // 轮到杠牌者（杠后补摸，处于待出牌）
    assert_eq!(engine.state.current_seat, 3);
    // 弃牌已离开弃牌堆
    assert!(engine.state.discard_pile.is_empty());
}

/// 碰 > 吃：下家的吃被任何碰压过
#[test]
fn test_pong_beats_chi() {
    let five = Tile::Bamboo(5);
    let mut engine = engine_with_hands(
        [
            &[five, Tile::Dot(1)],
            &[Tile::Bamboo(3), Tile::Bamboo(4), Tile::Dot(2)], // 座位 1：可吃
            &[five, five, Tile::Dot(9)],                        // 座位 2：可碰
            &[Tile::Character(9)],
        ],
        0,
    );

    engine.apply_intent(0, Intent::Discard { tile: five }).unwrap();
    engine.apply_intent(1, Intent::ClaimChi { option: 0 }).unwrap();
    engine.apply_intent(2, Intent::ClaimPong).unwrap();

    assert!(matches!(
        engine.state.player_ref(2).melds[0],
        Meld::Pong { tile: Tile::Bamboo(5) }
    ));
    assert!(engine.state.player_ref(1).melds.is_empty());
    assert_eq!(engine.state.current_seat, 2);
    assert!(matches!(engine.state.phase, Phase::AwaitingDiscard));
}

/// 吃只对下家开放：对面有吃形也没有资格
#[test]
fn test_chi_next_seat_only() {
    let five = Tile::Bamboo(5);
    let mut engine = engine_with_hands(
        [
            &[five, Tile::Dot(1)],
            &[Tile::Character(1)],
            &[Tile::Bamboo(3), Tile::Bamboo(4)], // 座位 2（对面）有吃形
            &[Tile::Character(9)],
        ],
        0,
    );

    engine.apply_intent(0, Intent::Discard { tile: five }).unwrap();
    // 没有任何座位有资格响应，直接轮转
    assert!(matches!(engine.state.phase, Phase::AwaitingDraw));
    assert_eq!(engine.state.current_seat, 1);
    // 弃牌留在弃牌堆
    assert_eq!(engine.state.discard_pile, vec![five]);
}

/// 下家的吃在无人碰/杠时放行
#[test]
fn test_chi_granted_when_alone() {
    let five = Tile::Bamboo(5);
    let mut engine = engine_with_hands(
        [
            &[five, Tile::Dot(1)],
            &[Tile::Bamboo(3), Tile::Bamboo(4), Tile::Dot(2)],
            &[Tile::Character(1)],
            &[Tile::Character(9)],
        ],
        0,
    );

    engine.apply_intent(0, Intent::Discard { tile: five }).unwrap();
    engine.apply_intent(1, Intent::ClaimChi { option: 0 }).unwrap();

    assert!(matches!(
        engine.state.player_ref(1).melds[0],
        Meld::Chi { suit: Suit::Bamboo, start: 3 }
    ));
    // 吃完直接出牌，不摸牌
    assert_eq!(engine.state.current_seat, 1);
    assert!(matches!(engine.state.phase, Phase::AwaitingDiscard));
}

/// 全员过：弃牌留堆，轮转继续
#[test]
fn test_all_pass_advances_rotation() {
    let five = Tile::Bamboo(5);
    let mut engine = engine_with_hands(
        [
            &[five, Tile::Dot(1)],
            &[five, five, Tile::Dot(2)],
            &[Tile::Character(1)],
            &[Tile::Character(9)],
        ],
        0,
    );

    engine.apply_intent(0, Intent::Discard { tile: five }).unwrap();
    engine.apply_intent(1, Intent::Pass).unwrap();

    assert!(matches!(engine.state.phase, Phase::AwaitingDraw));
    assert_eq!(engine.state.current_seat, 1);
    assert_eq!(engine.state.discard_pile, vec![five]);
    assert_eq!(engine.state.player_ref(1).hand.tile_count(five), 2);
}

/// 无资格座位的响应被拒绝且状态不变
#[test]
fn test_ineligible_claim_rejected() {
    let five = Tile::Bamboo(5);
    let mut engine = engine_with_hands(
        [
            &[five, Tile::Dot(1)],
            &[five, five, Tile::Dot(2)],
            &[Tile::Character(1)], // 座位 2：无资格
            &[Tile::Character(9)],
        ],
        0,
    );

    engine.apply_intent(0, Intent::Discard { tile: five }).unwrap();
    let before = engine.state.clone();

    assert_eq!(engine.apply_intent(2, Intent::ClaimPong), Err(GameError::IllegalMove));
    assert_eq!(engine.state, before);
    // 有资格但越权的响应（碰资格却要杠）同样被拒
    assert_eq!(engine.apply_intent(1, Intent::ClaimGang), Err(GameError::IllegalMove));
    assert_eq!(engine.state, before);
}

/// 同一座位不能应答两次
#[test]
fn test_double_response_rejected() {
    let five = Tile::Bamboo(5);
    let mut engine = engine_with_hands(
        [
            &[five, Tile::Dot(1)],
            &[five, five, Tile::Dot(2)],
            &[five, Tile::Character(1)], // 无资格（单张不够碰）
            &[Tile::Bamboo(5), Tile::Bamboo(5), Tile::Character(9)],
        ],
        0,
    );

    engine.apply_intent(0, Intent::Discard { tile: five }).unwrap();

    // 两个座位有资格：1 先过
    engine.apply_intent(1, Intent::Pass).unwrap();
    // 1 再答一次被拒
    assert_eq!(engine.apply_intent(1, Intent::Pass), Err(GameError::IllegalMove));

    // 收齐后窗口裁决：3 碰
    engine.apply_intent(3, Intent::ClaimPong).unwrap();
    assert_eq!(engine.state.current_seat, 3);
}

/// 响应窗口记录应答但不提前裁决
#[test]
fn test_window_waits_for_all_eligible() {
    let five = Tile::Bamboo(5);
    let mut engine = engine_with_hands(
        [
            &[five, Tile::Dot(1)],
            &[five, five, Tile::Dot(2)],
            &[Tile::Character(1)],
            &[five, five, Tile::Character(9)],
        ],
        0,
    );

    engine.apply_intent(0, Intent::Discard { tile: five }).unwrap();

    // 座位 1 碰，但座位 3 还没答：窗口未裁决
    let effects = engine.apply_intent(1, Intent::ClaimPong).unwrap();
    assert!(effects.is_empty());
    match &engine.state.phase {
        Phase::AwaitingClaim { responses, .. } => {
            assert_eq!(responses[1], ClaimResponse::Pong);
            assert_eq!(responses[3], ClaimResponse::Pending);
        }
        other => panic!("expected claim window, got {:?}", other),
    }

    // 座位 3 过：近座的碰放行
    engine.apply_intent(3, Intent::Pass).unwrap();
    assert!(matches!(
        engine.state.player_ref(1).melds[0],
        Meld::Pong { .. }
    ));
}
