//! Whole-game integration tests.
//!
//! Drive a match through the service layer against in-memory
//! collaborators: initialization and dealing, a full round through all
//! five phases with commit/version accounting, and play to completion.

use gridwar::cards::{Card, CardRegistry, Deck, Suite};
use gridwar::core::{CardId, DeckId, Position, UserId};
use gridwar::service::{
    GameRunnerService, InMemoryGameStateRepo, InMemoryGameStateVersionRepo, PlayerSlot,
    ServiceError, StartGameRequest, StaticDecksService, StaticUsersService, User,
};
use gridwar::state::{GamePhase, GameStateData, Seat};

type Service = GameRunnerService<
    InMemoryGameStateRepo,
    InMemoryGameStateVersionRepo,
    StaticDecksService,
    StaticUsersService,
>;

/// Two registered users with full 52-card decks, and a registry knowing
/// every card as a number card (1..=52 within each deck).
fn fixture() -> (Service, CardRegistry) {
    let mut users = StaticUsersService::new();
    let mut decks = StaticDecksService::new();
    let mut registry = CardRegistry::new();

    for user in [1u64, 2] {
        users.insert(User::new(UserId::new(user)));
        let card_ids: Vec<CardId> = (1..=52).map(|i| CardId::new(user * 100 + i)).collect();
        for (value, &id) in (1..=52).zip(&card_ids) {
            registry.register(Card::number(id, Suite::Spades, value));
        }
        decks.insert(Deck::new(
            DeckId::new(user),
            UserId::new(user),
            card_ids,
            "battle deck",
        ));
    }

    let service = GameRunnerService::new(
        InMemoryGameStateRepo::new(),
        InMemoryGameStateVersionRepo::new(),
        decks,
        users,
    );
    (service, registry)
}

fn start_request() -> StartGameRequest {
    StartGameRequest {
        player1: PlayerSlot::new(UserId::new(1), DeckId::new(1)),
        player2: PlayerSlot::new(UserId::new(2), DeckId::new(2)),
    }
}

/// The first owned, still-occupied cell for a seat, in row-major order.
fn first_owned_cell(data: &GameStateData, seat: Seat) -> Option<Position> {
    let user = data.player(seat).user;
    Position::all().find(|p| {
        let space = data.board.space(*p);
        space.owner == Some(user) && !space.is_empty()
    })
}

#[test]
fn test_initialize_deals_three_eight_forty_one() {
    let (mut service, _) = fixture();
    let state = service.initialize_game(&start_request()).unwrap();

    let mut board_cells = [0usize; 2];
    for position in Position::all() {
        let space = state.data.board.space(position);
        assert!(space.card.is_some());
        assert!(!space.revealed);
        match space.owner {
            Some(u) if u == UserId::new(1) => board_cells[0] += 1,
            Some(u) if u == UserId::new(2) => board_cells[1] += 1,
            other => panic!("unowned seeded cell: {other:?}"),
        }
    }
    assert_eq!(board_cells, [8, 8]);

    for seat in Seat::both() {
        let player = state.data.player(seat);
        assert_eq!(player.hand.len(), 3);
        assert_eq!(player.deck.len(), 41);
        assert_eq!(player.points, 0);
    }
    assert_eq!(state.data.phase, GamePhase::Setup);
    assert_eq!(state.data.round_number, 1);
}

#[test]
fn test_one_round_through_all_phases() {
    let (mut service, registry) = fixture();
    let state = service.initialize_game(&start_request()).unwrap();
    let game = state.id;

    let mut context = service.context(game).unwrap();

    // Setup -> CardAction: both seats may act once.
    assert_eq!(context.advance_phase(&registry).unwrap(), GamePhase::CardAction);
    assert!(context.player(Seat::P1, &registry).draw_card().unwrap().is_applied());
    assert!(!context
        .player(Seat::P1, &registry)
        .draw_card()
        .unwrap()
        .is_applied());
    let discard = context.player_state(Seat::P2).hand[0];
    assert!(context
        .player(Seat::P2, &registry)
        .discard_card(discard)
        .unwrap()
        .is_applied());
    context.commit().unwrap();

    // CardAction -> Reveal: both seats pick a cell for the War.
    assert_eq!(context.advance_phase(&registry).unwrap(), GamePhase::Reveal);
    let p1_pick = first_owned_cell(context.game_state_data(), Seat::P1).unwrap();
    let p2_pick = first_owned_cell(context.game_state_data(), Seat::P2).unwrap();
    assert!(context
        .select_card(Seat::P1, p1_pick, &registry)
        .unwrap()
        .is_applied());
    assert!(context
        .select_card(Seat::P2, p2_pick, &registry)
        .unwrap()
        .is_applied());

    // The decks are shuffled, so read the contenders off the board.
    let data = context.game_state_data();
    let p1_value = registry
        .get(data.board.space(p1_pick).card.unwrap())
        .unwrap()
        .war_value();
    let p2_value = registry
        .get(data.board.space(p2_pick).card.unwrap())
        .unwrap()
        .war_value();

    // Reveal -> War: the higher card takes the point.
    assert_eq!(context.advance_phase(&registry).unwrap(), GamePhase::War);
    let data = context.game_state_data();
    assert!(data.board.space(p1_pick).revealed);
    assert!(data.board.space(p2_pick).revealed);
    let (p1_points, p2_points) = (data.player(Seat::P1).points, data.player(Seat::P2).points);
    match p1_value.cmp(&p2_value) {
        std::cmp::Ordering::Greater => assert_eq!((p1_points, p2_points), (1, 0)),
        std::cmp::Ordering::Less => assert_eq!((p1_points, p2_points), (0, 1)),
        std::cmp::Ordering::Equal => assert_eq!((p1_points, p2_points), (0, 0)),
    }
    context.commit().unwrap();

    // War -> Cleanup: the fought cells leave the board, round advances.
    assert_eq!(context.advance_phase(&registry).unwrap(), GamePhase::Cleanup);
    let data = context.game_state_data();
    assert!(data.board.is_empty_space(p1_pick));
    assert!(data.board.is_empty_space(p2_pick));
    assert_eq!(data.board.cleared_spaces.len(), 2);
    assert_eq!(data.round_number, 2);
    assert!(!data.completion.is_complete);

    // Cleanup -> CardAction: fresh turn, flags and selections cleared.
    assert_eq!(context.advance_phase(&registry).unwrap(), GamePhase::CardAction);
    for seat in Seat::both() {
        let player = context.player_state(seat);
        assert!(!player.has_drawn_this_turn);
        assert!(!player.has_discarded_this_turn);
        assert!(player.selected_card.is_none());
    }
    assert!(context.player(Seat::P1, &registry).draw_card().unwrap().is_applied());
    context.commit().unwrap();

    // Initial version plus three commits.
    let latest = service.context(game).unwrap();
    assert_eq!(latest.game_state_data().round_number, 2);
}

#[test]
fn test_version_log_grows_one_entry_per_commit() {
    use gridwar::service::GameStateVersionRepo;

    let (mut service, registry) = fixture();
    let state = service.initialize_game(&start_request()).unwrap();
    assert_eq!(service.versions().versions_for(state.id).unwrap().len(), 1);

    let mut context = service.context(state.id).unwrap();
    for _ in 0..3 {
        context.advance_phase(&registry).unwrap();
        context.commit().unwrap();
    }

    // One version at initialization, then one per commit.
    let versions = service.versions().versions_for(state.id).unwrap();
    assert_eq!(versions.len(), 4);

    let latest = service.versions().latest_version(state.id).unwrap();
    assert_eq!(latest.state.data.phase, GamePhase::War);
    assert_eq!(latest.state.data.round_number, 1);
}

#[test]
fn test_play_to_completion_by_clearing_the_board() {
    let (mut service, registry) = fixture();
    let state = service.initialize_game(&start_request()).unwrap();
    let mut context = service.context(state.id).unwrap();

    assert_eq!(context.advance_phase(&registry).unwrap(), GamePhase::CardAction);

    // Each round fights the first owned cell per seat; two cells leave
    // the board per round, so eight rounds empty all sixteen.
    let mut rounds = 0;
    while !context.game_state_data().completion.is_complete {
        rounds += 1;
        assert!(rounds <= 15, "game failed to terminate");

        assert_eq!(context.advance_phase(&registry).unwrap(), GamePhase::Reveal);
        for seat in Seat::both() {
            let pick = first_owned_cell(context.game_state_data(), seat).unwrap();
            assert!(context.select_card(seat, pick, &registry).unwrap().is_applied());
        }
        assert_eq!(context.advance_phase(&registry).unwrap(), GamePhase::War);
        assert_eq!(context.advance_phase(&registry).unwrap(), GamePhase::Cleanup);
        context.commit().unwrap();

        if !context.game_state_data().completion.is_complete {
            assert_eq!(
                context.advance_phase(&registry).unwrap(),
                GamePhase::CardAction
            );
        }
    }

    assert_eq!(rounds, 8);
    let data = context.game_state_data();
    assert!(data.board.is_fully_cleared());

    // Strictly higher score wins; a dead-even match crowns nobody.
    let (p1, p2) = (data.player(Seat::P1), data.player(Seat::P2));
    match p1.points.cmp(&p2.points) {
        std::cmp::Ordering::Greater => assert_eq!(data.completion.winner, Some(p1.user)),
        std::cmp::Ordering::Less => assert_eq!(data.completion.winner, Some(p2.user)),
        std::cmp::Ordering::Equal => assert_eq!(data.completion.winner, None),
    }

    // A finished game refuses to advance further.
    assert_eq!(
        context.advance_phase(&registry),
        Err(ServiceError::GameComplete)
    );
}
